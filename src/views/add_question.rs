//! 新增题目表单

use super::draft::{QuestionDraft, MIN_OPTIONS, MIN_OPTIONS_MESSAGE};
use super::notify::Toasts;
use super::SubmitOutcome;
use crate::clients::ApiClient;
use crate::error::ApiError;
use crate::utils::logging::truncate_text;
use reqwest::Method;
use serde_json::Value;
use std::fmt;
use tracing::{error, info};

pub const ADD_SUCCESS_MESSAGE: &str = "Question added successfully.";
pub const ADD_FAILURE_MESSAGE: &str = "An error occurred while adding the question.";

pub struct AddQuestionForm {
    draft: QuestionDraft,
    api: ApiClient<Value>,
    toasts: Toasts,
}

impl AddQuestionForm {
    pub fn new(api: ApiClient<Value>, toasts: Toasts) -> Self {
        Self {
            draft: QuestionDraft::blank(),
            api,
            toasts,
        }
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

    /// 已满 5 个时“添加选项”按钮不显示，这里直接忽略
    pub fn add_option(&mut self) -> bool {
        self.draft.add_option()
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

    /// 页面内显示的错误
    pub fn error(&self) -> Option<ApiError> {
        self.api.error()
    }

    pub fn can_submit(&self) -> bool {
        !self.is_loading() && self.draft.filled_options_count() >= MIN_OPTIONS
    }

    /// 提交草稿
    ///
    /// 去掉空选项后不足 2 个时不发请求；成功后清空表单，失败时保留草稿。
    pub async fn submit(&mut self) -> SubmitOutcome {
        let payload = self.draft.to_cleaned_question();
        if payload.options.len() < MIN_OPTIONS {
            return SubmitOutcome::Skipped;
        }

        info!("📤 正在提交题目: {}", truncate_text(&payload.question, 80));

        match self.api.send_json("/questions", Method::POST, &payload).await {
            Ok(_) => {
                self.toasts.success(ADD_SUCCESS_MESSAGE);
                self.draft = QuestionDraft::blank();
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                error!("题目提交失败: {}", e);
                self.toasts.error(ADD_FAILURE_MESSAGE);
                SubmitOutcome::Failed(e)
            }
        }
    }
}

impl fmt::Display for AddQuestionForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Question: {}", self.draft.question())?;
        writeln!(f, "Options:")?;
        for (i, option) in self.draft.options().iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, option)?;
        }
        if self.draft.can_add_option() {
            writeln!(f, "[Add Option]")?;
        }
        let state = if self.can_submit() { "" } else { " (disabled)" };
        write!(f, "[Submit Question]{}", state)?;
        if let Some(e) = self.error() {
            write!(f, "\n{}", e)?;
        }
        Ok(())
    }
}
