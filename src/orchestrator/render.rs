//! 终端渲染
//!
//! 只读取 `WizardState`，不做任何状态修改

use std::fmt::Write;

use crate::models::ScopeType;
use crate::workflow::WizardState;

/// 空候选项的显示文本
pub const EMPTY_OPTIONS: &str = "（暂无可选项）";

/// 把向导状态渲染为文本
pub fn render_wizard(state: &WizardState) -> String {
    let mut out = String::new();
    let visible = state.visible_steps();
    let sets = state.option_sets();

    let _ = writeln!(out, "{}", "─".repeat(40));
    let _ = writeln!(out, "【步骤 1】评分范围 (s <编号>)");
    let scopes: Vec<&str> = ScopeType::ALL.iter().map(|s| s.label()).collect();
    let selected_scope = state.scope_type().map(|s| s.label());
    write_options(&mut out, &scopes, selected_scope);

    if visible.repository {
        let _ = writeln!(out, "【步骤 2】仓库 (r <编号>)");
        let names: Vec<&str> = sets.repositories.iter().map(|r| r.name.as_str()).collect();
        write_options(&mut out, &names, state.selected_repository());
    }

    if visible.class {
        let _ = writeln!(out, "【步骤 3】班级 (c <编号>)");
        let names: Vec<&str> = sets.classes.iter().map(|c| c.name.as_str()).collect();
        write_options(&mut out, &names, state.selected_class());
    }

    if visible.homework {
        let _ = writeln!(out, "【步骤 4】作业 (h <编号>)");
        let names: Vec<&str> = sets.homeworks.iter().map(|h| h.name.as_str()).collect();
        write_options(&mut out, &names, state.selected_homework());
    }

    if state.is_loading() {
        let _ = writeln!(out, "⏳ 加载中...");
    }
    if let Some(message) = state.status_message() {
        let _ = writeln!(out, "💬 {}", message);
    }

    let submit = if state.submitted() {
        "✅ 已提交"
    } else if state.can_trigger_submit() {
        "可用 (submit)"
    } else {
        "不可用"
    };
    let _ = writeln!(out, "[提交评分] {}", submit);
    out
}

fn write_options(out: &mut String, names: &[&str], selected: Option<&str>) {
    if names.is_empty() {
        let _ = writeln!(out, "  {}", EMPTY_OPTIONS);
        return;
    }
    for (i, name) in names.iter().enumerate() {
        let mark = if Some(*name) == selected { " ✓" } else { "" };
        let _ = writeln!(out, "  {}. {}{}", i + 1, name, mark);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Homework, Selections};

    #[test]
    fn test_fresh_state_shows_only_scope_step() {
        let text = render_wizard(&WizardState::default());
        assert!(text.contains("【步骤 1】"));
        assert!(!text.contains("【步骤 2】"));
        assert!(text.contains("[提交评分] 不可用"));
    }

    #[test]
    fn test_empty_homework_list_renders_placeholder() {
        let state = WizardState {
            selections: Selections {
                scope_type: Some(ScopeType::Homework),
                repository: Some("repo-A".to_string()),
                class: Some("class-1".to_string()),
                homework: None,
            },
            ..WizardState::default()
        };
        let text = render_wizard(&state);
        let homework_section = text.split("【步骤 4】").nth(1).unwrap();
        assert!(homework_section.contains(EMPTY_OPTIONS));
        assert!(text.contains("[提交评分] 不可用"));
    }

    #[test]
    fn test_selected_option_marked() {
        let mut state = WizardState {
            selections: Selections {
                scope_type: Some(ScopeType::Homework),
                repository: Some("repo-A".to_string()),
                class: Some("class-1".to_string()),
                homework: Some("hw-2".to_string()),
            },
            ..WizardState::default()
        };
        state.option_sets.homeworks = vec![
            Homework {
                name: "hw-1".to_string(),
            },
            Homework {
                name: "hw-2".to_string(),
            },
        ];
        let text = render_wizard(&state);
        assert!(text.contains("  2. hw-2 ✓"));
        assert!(text.contains("  1. hw-1\n"));
        assert!(text.contains("[提交评分] 可用"));
    }
}
