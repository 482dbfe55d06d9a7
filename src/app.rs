use crate::cli::Command;
use crate::clients::ApiClient;
use crate::config::Config;
use crate::error::AppError;
use crate::pages::{guard, HomePage, Route, TokenRequestPage};
use crate::services::AuthService;
use crate::storage::{FileStorage, TokenStore};
use crate::utils::logging::log_startup;
use crate::views::{
    AddQuestionForm, DeleteOutcome, EditQuestionForm, ModalAction, QuestionListView,
    SubmitOutcome, Toasts,
};
use anyhow::{bail, Context, Result};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    http: reqwest::Client,
    tokens: TokenStore,
    toasts: Toasts,
}

impl App {
    /// 初始化应用，令牌保存在配置指定的文件中
    pub fn initialize(config: Config) -> Self {
        log_startup(&config);
        let storage = Arc::new(FileStorage::new(&config.storage_path));
        Self::with_token_store(config, TokenStore::new(storage))
    }

    /// 使用指定的令牌存储
    pub fn with_token_store(config: Config, tokens: TokenStore) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            tokens,
            toasts: Toasts::new(),
        }
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    /// 每个页面组件一个新的客户端实例
    fn api<T>(&self) -> ApiClient<T>
    where
        T: serde::de::DeserializeOwned + Clone,
    {
        ApiClient::new(
            self.http.clone(),
            self.config.api_base_url.clone(),
            self.tokens.clone(),
        )
    }

    /// 执行一条命令
    pub async fn run(&self, command: Command) -> Result<()> {
        let result = match command {
            Command::Home => {
                println!("{}", HomePage::new(&self.tokens));
                Ok(())
            }
            Command::Token { email } => self.request_token(&email).await,
            Command::List => self.list_questions().await,
            Command::Add { question, options } => self.add_question(question, options).await,
            Command::ShowEdit { id } => self.show_edit(&id).await,
            Command::Edit {
                id,
                question,
                options,
            } => self.edit_question(id, question, options).await,
            Command::Delete { id, yes } => self.delete_question(&id, yes).await,
        };

        self.print_toasts();
        result
    }

    /// 进入页面前检查登录状态
    fn navigate(&self, route: Route) -> Result<Route> {
        let target = guard(route.clone(), &self.tokens);
        if target != route {
            println!("{}", HomePage::new(&self.tokens));
            bail!("访问 {} 需要先申请令牌", route);
        }
        info!("➡️  {}", target);
        Ok(target)
    }

    async fn request_token(&self, email: &str) -> Result<()> {
        let auth = AuthService::new(self.http.clone(), self.config.api_base_url.clone());
        let mut page = TokenRequestPage::new(auth, self.tokens.clone());

        let route = page
            .submit(email)
            .await
            .context("保存令牌失败")?;

        match route {
            Some(route) => {
                println!("Token saved.");
                println!("{}", HomePage::new(&self.tokens));
                info!("➡️  {}", route);
                Ok(())
            }
            None => {
                let message = page.message().unwrap_or_default().to_string();
                println!("{}", message);
                bail!(message)
            }
        }
    }

    async fn list_questions(&self) -> Result<()> {
        self.navigate(Route::Questions)?;

        let mut view = QuestionListView::new(self.api(), self.tokens.clone(), self.toasts.clone());
        view.load().await;

        println!("Question Management");
        println!("{}", view.render());
        Ok(())
    }

    async fn add_question(&self, question: String, options: Vec<String>) -> Result<()> {
        self.navigate(Route::AddQuestion)?;

        let mut form = AddQuestionForm::new(self.api(), self.toasts.clone());
        form.set_question(question);
        for (index, option) in options.into_iter().enumerate() {
            if index >= form.draft().options().len() && !form.add_option() {
                warn!("⚠️ 选项超过上限，忽略: {}", option);
                continue;
            }
            form.set_option(index, option);
        }

        match form.submit().await {
            SubmitOutcome::Succeeded => Ok(()),
            SubmitOutcome::Skipped => {
                println!("{}", form);
                bail!("至少需要 2 个非空选项")
            }
            SubmitOutcome::Failed(e) => {
                println!("{}", form);
                Err(AppError::from(e).into())
            }
        }
    }

    async fn show_edit(&self, id: &str) -> Result<()> {
        self.navigate(Route::Questions)?;

        let mut view = QuestionListView::new(self.api(), self.tokens.clone(), self.toasts.clone());
        view.load().await;

        match view.edit(id).context("缓存当前题目失败")? {
            Some(route) => {
                println!("{}", route);
                Ok(())
            }
            None => {
                println!("{}", view.render());
                bail!("题目 {} 不存在", id)
            }
        }
    }

    async fn edit_question(
        &self,
        id: String,
        question: Option<String>,
        options: Vec<String>,
    ) -> Result<()> {
        self.navigate(Route::EditQuestion { id: id.clone() })?;

        let mut form = EditQuestionForm::load(Some(id), &self.tokens, self.api(), self.toasts.clone());

        if let Some(question) = question {
            form.set_question(question);
        }
        if !options.is_empty() {
            while form.draft().options().len() > options.len() && form.remove_option(form.draft().options().len() - 1) {}
            for (index, option) in options.into_iter().enumerate() {
                if index >= form.draft().options().len() && !form.add_option() {
                    warn!("⚠️ 选项超过上限，忽略: {}", option);
                    continue;
                }
                form.set_option(index, option);
            }
        }

        if !form.can_submit() {
            println!("{}", form);
            bail!("所有选项都不能为空");
        }

        match form.submit().await {
            SubmitOutcome::Succeeded => {
                println!("{}", form);
                Ok(())
            }
            SubmitOutcome::Skipped => bail!("题目 ID 无效"),
            SubmitOutcome::Failed(e) => {
                println!("{}", form);
                Err(AppError::from(e).into())
            }
        }
    }

    async fn delete_question(&self, id: &str, assume_yes: bool) -> Result<()> {
        self.navigate(Route::Questions)?;

        let mut view = QuestionListView::new(self.api(), self.tokens.clone(), self.toasts.clone());
        view.load().await;
        view.request_delete(id);

        if let Some(prompt) = view.modal().render() {
            println!("{}", prompt);
        }

        let action = if assume_yes {
            ModalAction::Delete
        } else {
            read_confirmation().await?
        };

        let outcome = view.resolve_modal(action).await;
        println!("{}", view.render());

        match outcome {
            None => {
                info!("已取消删除");
                Ok(())
            }
            Some(DeleteOutcome::Deleted) | Some(DeleteOutcome::NothingSelected) => Ok(()),
            Some(DeleteOutcome::Failed) => bail!("删除题目 {} 失败", id),
        }
    }

    fn print_toasts(&self) {
        for toast in self.toasts.drain() {
            println!("{}", toast);
        }
    }
}

/// 从标准输入读取确认，只有 `y` / `yes` 视为删除
async fn read_confirmation() -> Result<ModalAction> {
    println!("Delete? [y/N]");
    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("读取确认输入失败")?;

    let answer = line.trim().to_ascii_lowercase();
    Ok(if answer == "y" || answer == "yes" {
        ModalAction::Delete
    } else {
        ModalAction::Cancel
    })
}
