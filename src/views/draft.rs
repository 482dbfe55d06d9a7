//! 题目草稿：题干 + 有序选项列表
//!
//! 新增表单和编辑表单共用的状态转换，选项数量限制在 [2, 5]。

use crate::models::Question;

/// 最少选项数
pub const MIN_OPTIONS: usize = 2;
/// 最多选项数
pub const MAX_OPTIONS: usize = 5;
/// 空白草稿的选项数
pub const INITIAL_OPTIONS: usize = 3;

pub const MIN_OPTIONS_MESSAGE: &str = "A question must have at least 2 options.";
pub const MAX_OPTIONS_MESSAGE: &str = "Cannot add more than 5 options.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    question: String,
    options: Vec<String>,
}

impl Default for QuestionDraft {
    fn default() -> Self {
        Self::blank()
    }
}

impl QuestionDraft {
    /// 空题干 + 3 个空选项
    pub fn blank() -> Self {
        Self {
            question: String::new(),
            options: vec![String::new(); INITIAL_OPTIONS],
        }
    }

    /// 从已有题目创建草稿，选项原样保留
    pub fn from_question(question: Question) -> Self {
        Self {
            question: question.question,
            options: question.options,
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn set_question(&mut self, text: impl Into<String>) {
        self.question = text.into();
    }

    /// 替换指定位置的选项，下标越界时忽略
    pub fn set_option(&mut self, index: usize, text: impl Into<String>) -> bool {
        match self.options.get_mut(index) {
            Some(option) => {
                *option = text.into();
                true
            }
            None => false,
        }
    }

    pub fn can_add_option(&self) -> bool {
        self.options.len() < MAX_OPTIONS
    }

    /// 追加一个空选项，已满时不变
    pub fn add_option(&mut self) -> bool {
        if !self.can_add_option() {
            return false;
        }
        self.options.push(String::new());
        true
    }

    pub fn can_remove_option(&self) -> bool {
        self.options.len() > MIN_OPTIONS
    }

    /// 删除指定位置的选项
    ///
    /// 选项数不超过下限或下标越界时不变。
    pub fn remove_option(&mut self, index: usize) -> bool {
        if !self.can_remove_option() || index >= self.options.len() {
            return false;
        }
        self.options.remove(index);
        true
    }

    /// 去除首尾空白后非空的选项数
    pub fn filled_options_count(&self) -> usize {
        self.options.iter().filter(|o| !o.trim().is_empty()).count()
    }

    pub fn all_options_filled(&self) -> bool {
        self.options.iter().all(|o| !o.trim().is_empty())
    }

    /// 过滤掉空选项后的题目，选项文本不做裁剪
    pub fn to_cleaned_question(&self) -> Question {
        Question::new(
            self.question.clone(),
            self.options
                .iter()
                .filter(|o| !o.trim().is_empty())
                .cloned()
                .collect(),
        )
    }

    /// 原样转换为题目
    pub fn to_question(&self) -> Question {
        Question::new(self.question.clone(), self.options.clone())
    }
}
