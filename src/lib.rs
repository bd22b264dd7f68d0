//! # Batch Scoring Wizard
//!
//! 课程评分系统的批量 AI 评分选择向导
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 与评分服务交互，只暴露接口能力
//! - `ScoringApi` - 服务层依赖的 trait
//! - `ScoringClient` - 基于 reqwest 的 HTTP 实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不持有向导状态
//! - `OptionLoader` - 按当前选择加载下一步的候选项
//! - `SubmissionGateway` - 打包选择并提交评分
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义向导的状态与转换
//! - `WizardState` - 选择、候选项、提示、加载状态
//! - `WizardController` - 范围 → 仓库 → 班级 → 作业 → 提交，过期加载结果丢弃
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/console_app` - 终端交互循环
//! - `orchestrator/render` - 状态渲染
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

#[cfg(test)]
pub(crate) mod test_support;

// 重新导出常用类型
pub use clients::{ScoringApi, ScoringClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{ScopeType, ScoringRequest};
pub use orchestrator::App;
pub use services::{LoadOutcome, LoadTicket, SubmitOutcome};
pub use workflow::{VisibleSteps, WizardController, WizardError, WizardState};
