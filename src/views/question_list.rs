//! 题目列表
//!
//! 打开时拉取全部题目；删除需要先确认，删除成功后重新拉取。

use super::confirmation::{ConfirmationModal, ModalAction};
use super::notify::Toasts;
use crate::clients::ApiClient;
use crate::error::StorageError;
use crate::models::{Question, QuestionCollection};
use crate::pages::Route;
use crate::storage::TokenStore;
use reqwest::Method;
use std::fmt;
use tracing::{error, info, warn};

pub const DELETE_SUCCESS_MESSAGE: &str = "Question deleted successfully.";
pub const DELETE_FAILURE_MESSAGE: &str = "Failed to delete the question.";

/// 一张题目卡片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCard {
    pub id: String,
    pub question: Question,
}

/// 列表的渲染结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRender {
    Loading,
    Error(String),
    Empty,
    Cards(Vec<QuestionCard>),
}

impl fmt::Display for ListRender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListRender::Loading => write!(f, "Loading questions..."),
            ListRender::Error(message) => write!(f, "{}", message),
            ListRender::Empty => write!(f, "No questions found."),
            ListRender::Cards(cards) => {
                for (i, card) in cards.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    writeln!(f, "[{}] {}", card.id, card.question.question)?;
                    for option in &card.question.options {
                        writeln!(f, "  • {}", option)?;
                    }
                    write!(f, "  [Edit] [Delete]")?;
                }
                Ok(())
            }
        }
    }
}

/// 删除结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// 没有选中的题目，什么都没做
    NothingSelected,
    Deleted,
    Failed,
}

pub struct QuestionListView {
    api: ApiClient<QuestionCollection>,
    tokens: TokenStore,
    toasts: Toasts,
    questions: Option<QuestionCollection>,
    is_modal_open: bool,
    current_question_id: Option<String>,
}

impl QuestionListView {
    pub fn new(api: ApiClient<QuestionCollection>, tokens: TokenStore, toasts: Toasts) -> Self {
        Self {
            api,
            tokens,
            toasts,
            questions: None,
            is_modal_open: false,
            current_question_id: None,
        }
    }

    /// 拉取全部题目
    ///
    /// 失败时错误保存在请求状态里，由 `render()` 显示。
    pub async fn load(&mut self) {
        match self.api.get("/questions").await {
            Ok(questions) => {
                info!("✓ 获取到 {} 道题目", questions.len());
                self.questions = Some(questions);
            }
            Err(e) => warn!("⚠️ 题目列表加载失败: {}", e),
        }
    }

    pub fn questions(&self) -> Option<&QuestionCollection> {
        self.questions.as_ref()
    }

    pub fn render(&self) -> ListRender {
        let state = self.api.state();
        if state.is_loading {
            return ListRender::Loading;
        }
        if let Some(e) = state.error {
            return ListRender::Error(e.to_string());
        }

        match &self.questions {
            Some(questions) if !questions.is_empty() => ListRender::Cards(
                questions
                    .iter()
                    .map(|(id, question)| QuestionCard {
                        id: id.to_string(),
                        question: question.clone(),
                    })
                    .collect(),
            ),
            _ => ListRender::Empty,
        }
    }

    /// 跳转到编辑页
    ///
    /// 先把整道题写进 `currentQuestion` 缓存；ID 不存在时返回 `None`。
    pub fn edit(&self, question_id: &str) -> Result<Option<Route>, StorageError> {
        let Some(question) = self.questions.as_ref().and_then(|q| q.get(question_id)) else {
            warn!("⚠️ 题目 {} 不在当前列表中", question_id);
            return Ok(None);
        };

        self.tokens.set_current_question(question)?;
        Ok(Some(Route::EditQuestion {
            id: question_id.to_string(),
        }))
    }

    /// 打开删除确认框
    pub fn request_delete(&mut self, question_id: &str) {
        self.current_question_id = Some(question_id.to_string());
        self.is_modal_open = true;
    }

    /// 关闭确认框，保留选中的题目
    pub fn cancel_delete(&mut self) {
        self.is_modal_open = false;
    }

    pub fn modal(&self) -> ConfirmationModal<'_> {
        let question = self
            .current_question_id
            .as_deref()
            .and_then(|id| self.questions.as_ref()?.get(id))
            .map(|q| q.question.as_str())
            .unwrap_or("");
        ConfirmationModal::new(self.is_modal_open, question)
    }

    /// 处理确认框上的操作
    pub async fn resolve_modal(&mut self, action: ModalAction) -> Option<DeleteOutcome> {
        let confirmed = self.modal().choose(action, || false, || true);
        if confirmed {
            Some(self.confirm_delete().await)
        } else {
            self.cancel_delete();
            None
        }
    }

    /// 删除选中的题目
    pub async fn confirm_delete(&mut self) -> DeleteOutcome {
        let Some(id) = self.current_question_id.clone() else {
            return DeleteOutcome::NothingSelected;
        };

        // 删除只看状态码，响应体不一定是题目集合
        let endpoint = format!("/questions/{}", id);
        let result = self.api.send_ignoring_body(&endpoint, Method::DELETE).await;

        self.is_modal_open = false;
        self.current_question_id = None;

        match result {
            Ok(()) => {
                self.toasts.success(DELETE_SUCCESS_MESSAGE);
                self.load().await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                error!("题目删除失败 ({}): {}", id, e);
                self.toasts.error(DELETE_FAILURE_MESSAGE);
                DeleteOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> QuestionListView {
        let api = ApiClient::new(reqwest::Client::new(), "http://127.0.0.1:1", TokenStore::in_memory());
        QuestionListView::new(api, TokenStore::in_memory(), Toasts::new())
    }

    fn sample() -> QuestionCollection {
        vec![
            (
                "q1".to_string(),
                Question::new("First?", vec!["a".into(), "b".into()]),
            ),
            (
                "q2".to_string(),
                Question::new("Second?", vec!["c".into(), "d".into()]),
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_renders_empty_before_load() {
        assert_eq!(view().render(), ListRender::Empty);
        assert_eq!(ListRender::Empty.to_string(), "No questions found.");
    }

    #[test]
    fn test_renders_cards_in_order() {
        let mut view = view();
        view.questions = Some(sample());

        let ListRender::Cards(cards) = view.render() else {
            panic!("expected cards");
        };
        let ids: Vec<&str> = cards.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "q2"]);
        assert!(view.render().to_string().contains("[Edit] [Delete]"));
    }

    #[test]
    fn test_modal_follows_selection() {
        let mut view = view();
        view.questions = Some(sample());
        assert_eq!(view.modal().render(), None);

        view.request_delete("q2");
        assert!(view.modal().render().unwrap().contains("\"Second?\""));

        view.cancel_delete();
        assert!(!view.modal().is_open);
    }

    #[test]
    fn test_edit_caches_question() {
        let mut view = view();
        view.questions = Some(sample());

        let route = view.edit("q1").unwrap();
        assert_eq!(route, Some(Route::EditQuestion { id: "q1".into() }));
        assert_eq!(view.tokens.current_question().unwrap().question, "First?");

        assert_eq!(view.edit("missing").unwrap(), None);
    }

    #[tokio::test]
    async fn test_confirm_without_selection_does_nothing() {
        let mut view = view();
        assert_eq!(view.confirm_delete().await, DeleteOutcome::NothingSelected);
        assert!(view.toasts.is_empty());
    }

    #[tokio::test]
    async fn test_cancel_action_keeps_questions() {
        let mut view = view();
        view.questions = Some(sample());
        view.request_delete("q1");

        assert_eq!(view.resolve_modal(ModalAction::Cancel).await, None);
        assert!(!view.modal().is_open);
        assert_eq!(view.questions().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_renders_loading_while_fetch_in_flight() {
        use std::time::Duration;
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/questions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({
                        "q1": {"question": "Slow?", "options": ["a", "b"]}
                    }))
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;

        let api = ApiClient::new(reqwest::Client::new(), server.uri(), TokenStore::in_memory());
        let view = QuestionListView::new(api, TokenStore::in_memory(), Toasts::new());

        let (fetched, during) = tokio::join!(view.api.get("/questions"), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            view.render()
        });

        assert_eq!(during, ListRender::Loading);
        assert_eq!(during.to_string(), "Loading questions...");
        assert_eq!(fetched.unwrap().len(), 1);
        assert!(!view.api.is_loading());
    }
}
