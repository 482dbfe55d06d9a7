//! 删除确认框
//!
//! 完全受控：是否打开、显示哪道题都由调用方决定，自身不保存状态。

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    Cancel,
    Delete,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfirmationModal<'a> {
    pub is_open: bool,
    pub question: &'a str,
}

impl<'a> ConfirmationModal<'a> {
    pub fn new(is_open: bool, question: &'a str) -> Self {
        Self { is_open, question }
    }

    /// 关闭时返回 `None`
    pub fn message(&self) -> Option<String> {
        self.is_open.then(|| {
            format!(
                "Are you sure you want to delete this question: \"{}\"",
                self.question
            )
        })
    }

    /// 渲染为文本，关闭时不渲染
    pub fn render(&self) -> Option<String> {
        self.message()
            .map(|message| format!("{}\n[Cancel] [Delete]", message))
    }

    /// 根据用户操作调用且只调用一个回调
    pub fn choose<R>(
        &self,
        action: ModalAction,
        on_close: impl FnOnce() -> R,
        on_confirm: impl FnOnce() -> R,
    ) -> R {
        match action {
            ModalAction::Cancel => on_close(),
            ModalAction::Delete => on_confirm(),
        }
    }
}
