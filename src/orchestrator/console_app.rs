//! 终端向导 - 编排层
//!
//! 读取标准输入中的命令，驱动 `WizardController`，每次操作后重新渲染状态

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::clients::ScoringClient;
use crate::config::Config;
use crate::models::ScopeType;
use crate::orchestrator::render::render_wizard;
use crate::services::LoadTicket;
use crate::utils::logging;
use crate::workflow::{WizardController, WizardError};

const HELP: &str = "命令: s <编号> 选择范围 | r <编号> 选择仓库 | c <编号> 选择班级 | h <编号> 选择作业 | submit 提交 | reload 重新加载当前列表 | q 退出";

/// 终端命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// 选择评分范围（编号从 1 开始）
    Scope(usize),
    Repository(usize),
    Class(usize),
    Homework(usize),
    Submit,
    Reload,
    Help,
    Quit,
}

/// 解析一行输入
pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(Command::Help);
    };

    let mut index = || -> Result<usize, String> {
        let raw = parts.next().ok_or_else(|| format!("'{}' 需要一个编号", head))?;
        match raw.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n),
            _ => Err(format!("无效的编号: {}", raw)),
        }
    };

    match head.to_lowercase().as_str() {
        "s" | "scope" => Ok(Command::Scope(index()?)),
        "r" | "repo" => Ok(Command::Repository(index()?)),
        "c" | "class" => Ok(Command::Class(index()?)),
        "h" | "homework" => Ok(Command::Homework(index()?)),
        "submit" => Ok(Command::Submit),
        "reload" => Ok(Command::Reload),
        "help" | "?" => Ok(Command::Help),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("未知命令: {}", other)),
    }
}

/// 应用主结构
pub struct App {
    controller: WizardController,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::log_startup(&config);

        let client = ScoringClient::new(&config).context("无法创建评分服务客户端")?;
        let controller = WizardController::new(Arc::new(client));

        Ok(Self { controller })
    }

    /// 运行交互循环，直到输入结束或用户退出
    pub async fn run(mut self) -> Result<()> {
        let ticket = self.controller.activate();
        self.controller.load(ticket).await;

        println!("{}", HELP);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            println!("{}", render_wizard(self.controller.state()));

            let Some(line) = lines.next_line().await.context("读取输入失败")? else {
                break;
            };

            let command = match parse_command(&line) {
                Ok(command) => command,
                Err(e) => {
                    warn!("⚠️ {}", e);
                    continue;
                }
            };

            if command == Command::Quit {
                break;
            }
            if let Err(e) = self.apply(command).await {
                warn!("⚠️ {}", e);
            }
        }

        info!("👋 向导已退出");
        Ok(())
    }

    async fn apply(&mut self, command: Command) -> Result<(), String> {
        let ticket = match command {
            Command::Scope(n) => {
                let scope = pick(&ScopeType::ALL, n)?;
                self.controller.select_scope_type(*scope);
                None
            }
            Command::Repository(n) => {
                let sets = self.controller.state().option_sets();
                let name = pick(&sets.repositories, n)?.name.clone();
                self.controller.select_repository(&name).map_err(msg)?
            }
            Command::Class(n) => {
                let sets = self.controller.state().option_sets();
                let name = pick(&sets.classes, n)?.name.clone();
                self.controller.select_class(&name).map_err(msg)?
            }
            Command::Homework(n) => {
                let sets = self.controller.state().option_sets();
                let name = pick(&sets.homeworks, n)?.name.clone();
                self.controller.select_homework(&name).map_err(msg)?;
                None
            }
            Command::Submit => {
                self.controller.submit().await.map_err(msg)?;
                None
            }
            Command::Reload => Some(self.controller.reload_current()),
            Command::Help => {
                println!("{}", HELP);
                None
            }
            Command::Quit => None,
        };

        self.run_ticket(ticket).await;
        Ok(())
    }

    async fn run_ticket(&mut self, ticket: Option<LoadTicket>) {
        if let Some(ticket) = ticket {
            self.controller.load(ticket).await;
        }
    }
}

fn pick<T>(items: &[T], n: usize) -> Result<&T, String> {
    items
        .get(n.wrapping_sub(1))
        .ok_or_else(|| format!("编号 {} 超出范围 [1, {}]", n, items.len()))
}

fn msg(e: WizardError) -> String {
    e.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeApi, Reply};

    #[test]
    fn test_parse_selection_commands() {
        assert_eq!(parse_command("s 3"), Ok(Command::Scope(3)));
        assert_eq!(parse_command("  R 1 "), Ok(Command::Repository(1)));
        assert_eq!(parse_command("class 2"), Ok(Command::Class(2)));
        assert_eq!(parse_command("h 1"), Ok(Command::Homework(1)));
        assert_eq!(parse_command("submit"), Ok(Command::Submit));
        assert_eq!(parse_command("reload"), Ok(Command::Reload));
        assert_eq!(parse_command("q"), Ok(Command::Quit));
        assert_eq!(parse_command(""), Ok(Command::Help));
    }

    #[test]
    fn test_parse_rejects_bad_index() {
        assert!(parse_command("r").is_err());
        assert!(parse_command("r 0").is_err());
        assert!(parse_command("r abc").is_err());
        assert!(parse_command("grade 1").is_err());
    }

    #[test]
    fn test_pick_is_one_based() {
        let items = ["a", "b"];
        assert_eq!(pick(&items, 1), Ok(&"a"));
        assert_eq!(pick(&items, 2), Ok(&"b"));
        assert!(pick(&items, 3).is_err());
        assert!(pick(&items, 0).is_err());
    }

    #[tokio::test]
    async fn test_reload_command_retries_current_list() {
        let api = Arc::new(FakeApi::new().with_classes("repo-A", Reply::Transport));
        let mut app = App {
            controller: WizardController::new(api.clone()),
        };
        let ticket = app.controller.activate();
        app.controller.load(ticket).await;

        app.apply(Command::Scope(2)).await.unwrap();
        app.apply(Command::Repository(1)).await.unwrap();
        assert_eq!(
            app.controller.state().status_message(),
            Some("获取班级列表失败")
        );

        app.apply(Command::Reload).await.unwrap();
        assert_eq!(
            api.call_log(),
            vec!["repositories", "classes:repo-A", "classes:repo-A"]
        );
        assert_eq!(app.controller.state().selected_repository(), Some("repo-A"));
    }
}
