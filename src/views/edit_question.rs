//! 编辑题目表单
//!
//! 没有单题查询接口，初始数据来自列表页写入的 `currentQuestion`。

use super::draft::{QuestionDraft, MAX_OPTIONS_MESSAGE, MIN_OPTIONS_MESSAGE};
use super::notify::Toasts;
use super::SubmitOutcome;
use crate::clients::ApiClient;
use crate::error::ApiError;
use crate::storage::TokenStore;
use reqwest::Method;
use serde_json::Value;
use std::fmt;
use tracing::{debug, error, info};

pub const UPDATE_SUCCESS_MESSAGE: &str = "Question updated successfully.";
pub const UPDATE_FAILURE_MESSAGE: &str = "Failed to update the question.";
pub const NOT_FOUND_MESSAGE: &str = "Question data not found.";
pub const INVALID_ID_MESSAGE: &str = "Invalid question ID.";

pub struct EditQuestionForm {
    question_id: Option<String>,
    draft: QuestionDraft,
    api: ApiClient<Value>,
    toasts: Toasts,
}

impl EditQuestionForm {
    /// 打开编辑页
    ///
    /// 缓存里没有题目时提示 "Question data not found."，表单保持空白。
    pub fn load(
        question_id: Option<String>,
        tokens: &TokenStore,
        api: ApiClient<Value>,
        toasts: Toasts,
    ) -> Self {
        let draft = match tokens.current_question() {
            Some(question) => {
                debug!("从缓存加载题目: {}", question.question);
                QuestionDraft::from_question(question)
            }
            None => {
                toasts.error(NOT_FOUND_MESSAGE);
                QuestionDraft::blank()
            }
        };

        Self {
            question_id: question_id.filter(|id| !id.is_empty()),
            draft,
            api,
            toasts,
        }
    }

    pub fn question_id(&self) -> Option<&str> {
        self.question_id.as_deref()
    }

    pub fn draft(&self) -> &QuestionDraft {
        &self.draft
    }

    pub fn set_question(&mut self, text: impl Into<String>) {
        self.draft.set_question(text);
    }

    pub fn set_option(&mut self, index: usize, text: impl Into<String>) -> bool {
        self.draft.set_option(index, text)
    }

    pub fn add_option(&mut self) -> bool {
        if !self.draft.add_option() {
            self.toasts.error(MAX_OPTIONS_MESSAGE);
            return false;
        }
        true
    }

    /// 只剩 2 个选项时删除按钮隐藏
    pub fn can_remove_option(&self) -> bool {
        self.draft.can_remove_option()
    }

    pub fn remove_option(&mut self, index: usize) -> bool {
        if !self.draft.can_remove_option() {
            self.toasts.error(MIN_OPTIONS_MESSAGE);
            return false;
        }
        self.draft.remove_option(index)
    }

    pub fn is_loading(&self) -> bool {
        self.api.is_loading()
    }

    pub fn error(&self) -> Option<ApiError> {
        self.api.error()
    }

    /// 所有选项都非空时才能提交
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && self.draft.all_options_filled()
    }

    /// 按原样提交草稿，成功后不修改表单
    pub async fn submit(&mut self) -> SubmitOutcome {
        let Some(id) = self.question_id.clone() else {
            self.toasts.error(INVALID_ID_MESSAGE);
            return SubmitOutcome::Skipped;
        };

        let endpoint = format!("/questions/{}", id);
        let payload = self.draft.to_question();

        info!("📝 正在更新题目 {}", id);

        match self.api.send_json(&endpoint, Method::PUT, &payload).await {
            Ok(_) => {
                self.toasts.success(UPDATE_SUCCESS_MESSAGE);
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                error!("题目更新失败 ({}): {}", id, e);
                self.toasts.error(UPDATE_FAILURE_MESSAGE);
                SubmitOutcome::Failed(e)
            }
        }
    }
}

impl fmt::Display for EditQuestionForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Edit Question")?;
        if self.is_loading() {
            writeln!(f, "Loading...")?;
        }
        if let Some(e) = self.error() {
            writeln!(f, "{}", e)?;
        }
        writeln!(f, "Question: {}", self.draft.question())?;
        let removable = self.can_remove_option();
        for (i, option) in self.draft.options().iter().enumerate() {
            let marker = if removable { " [×]" } else { "" };
            writeln!(f, "Option {}: {}{}", i + 1, option, marker)?;
        }
        if self.draft.can_add_option() {
            writeln!(f, "[Add Option]")?;
        }
        let state = if self.can_submit() { "" } else { " (disabled)" };
        write!(f, "[Update Question]{}", state)
    }
}
