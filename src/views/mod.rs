//! 页面组件
//!
//! 每个组件持有自己的 `ApiClient` 实例，通过 `Toasts` 发出提示。

pub mod add_question;
pub mod confirmation;
pub mod draft;
pub mod edit_question;
pub mod notify;
pub mod question_list;

pub use add_question::AddQuestionForm;
pub use confirmation::{ConfirmationModal, ModalAction};
pub use draft::QuestionDraft;
pub use edit_question::EditQuestionForm;
pub use notify::{Toast, ToastKind, Toasts};
pub use question_list::{DeleteOutcome, ListRender, QuestionCard, QuestionListView};

use crate::error::ApiError;

/// 表单提交结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 校验未通过或缺少参数，没有发请求
    Skipped,
    Succeeded,
    Failed(ApiError),
}
