//! 页面提示消息（toast）

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ToastKind::Success => write!(f, "✅ {}", self.message),
            ToastKind::Error => write!(f, "❌ {}", self.message),
        }
    }
}

/// 提示消息队列
///
/// 克隆后共享同一个队列，页面组件推入，外层取出展示。
#[derive(Debug, Clone, Default)]
pub struct Toasts {
    inner: Arc<Mutex<Vec<Toast>>>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&self, message: &str) {
        info!("✓ {}", message);
        self.push(ToastKind::Success, message);
    }

    pub fn error(&self, message: &str) {
        warn!("⚠️ {}", message);
        self.push(ToastKind::Error, message);
    }

    /// 取出全部消息
    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.lock())
    }

    pub fn last(&self) -> Option<Toast> {
        self.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn push(&self, kind: ToastKind, message: &str) {
        self.lock().push(Toast {
            kind,
            message: message.to_string(),
        });
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Toast>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
