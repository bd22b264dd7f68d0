//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 持有向导控制器，把终端输入翻译成控制器的转换操作，并渲染当前状态。
//!
//! ## 层次关系
//!
//! ```text
//! console_app (读取输入、执行加载票据)
//!     ↓
//! workflow::WizardController (状态转换、门控)
//!     ↓
//! services (能力层：option_loader / submission_gateway)
//!     ↓
//! clients (ScoringApi：HTTP)
//! ```

pub mod console_app;
pub mod render;

pub use console_app::{parse_command, App, Command};
pub use render::render_wizard;
