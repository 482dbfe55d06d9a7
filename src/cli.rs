//! 命令行参数

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "question_time", version, about = "Manage multiple-choice questions")]
pub struct Cli {
    /// TOML 配置文件路径
    #[arg(long, env = "QT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// 显示首页
    Home,
    /// 用邮箱申请登录令牌
    Token { email: String },
    /// 列出全部题目
    List,
    /// 新增题目
    Add {
        #[arg(long)]
        question: String,
        /// 可以重复，最多 5 个
        #[arg(long = "option")]
        options: Vec<String>,
    },
    /// 选中一道题准备编辑（写入本地缓存）
    ShowEdit {
        #[arg(allow_hyphen_values = true)]
        id: String,
    },
    /// 编辑缓存中的题目，未给出的字段保持原值
    Edit {
        #[arg(allow_hyphen_values = true)]
        id: String,
        #[arg(long)]
        question: Option<String>,
        #[arg(long = "option")]
        options: Vec<String>,
    },
    /// 删除题目
    Delete {
        #[arg(allow_hyphen_values = true)]
        id: String,
        /// 跳过确认
        #[arg(long)]
        yes: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_with_repeated_options() {
        let cli = Cli::try_parse_from([
            "question_time",
            "add",
            "--question",
            "Test Question?",
            "--option",
            "Option 1",
            "--option",
            "Option 2",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Command::Add {
                question: "Test Question?".into(),
                options: vec!["Option 1".into(), "Option 2".into()],
            }
        );
    }

    #[test]
    fn test_parse_delete_flag() {
        let cli = Cli::try_parse_from(["question_time", "delete", "q1", "--yes"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Delete {
                id: "q1".into(),
                yes: true
            }
        );
    }
}
