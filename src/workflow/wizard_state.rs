//! 向导状态
//!
//! 单一的、显式持有的状态结构。只有控制器可以修改，渲染层只读。

use crate::models::{OptionKind, OptionSets, ScopeType, Selections};

/// 各步骤是否可见
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleSteps {
    /// 步骤 2：选择仓库
    pub repository: bool,
    /// 步骤 3：选择班级
    pub class: bool,
    /// 步骤 4：选择作业
    pub homework: bool,
}

/// 每类候选项当前有效的在途加载代数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PendingLoads {
    repositories: Option<u64>,
    classes: Option<u64>,
    homeworks: Option<u64>,
}

impl PendingLoads {
    fn slot(&mut self, kind: OptionKind) -> &mut Option<u64> {
        match kind {
            OptionKind::Repositories => &mut self.repositories,
            OptionKind::Classes => &mut self.classes,
            OptionKind::Homeworks => &mut self.homeworks,
        }
    }

    pub(crate) fn get(&self, kind: OptionKind) -> Option<u64> {
        match kind {
            OptionKind::Repositories => self.repositories,
            OptionKind::Classes => self.classes,
            OptionKind::Homeworks => self.homeworks,
        }
    }

    pub(crate) fn set(&mut self, kind: OptionKind, generation: u64) {
        *self.slot(kind) = Some(generation);
    }

    pub(crate) fn clear(&mut self, kind: OptionKind) {
        *self.slot(kind) = None;
    }

    fn any(&self) -> bool {
        self.repositories.is_some() || self.classes.is_some() || self.homeworks.is_some()
    }
}

/// 向导状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardState {
    pub(crate) selections: Selections,
    pub(crate) option_sets: OptionSets,
    pub(crate) status_message: Option<String>,
    pub(crate) pending: PendingLoads,
    pub(crate) submitting: bool,
    pub(crate) submitted: bool,
}

impl WizardState {
    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn scope_type(&self) -> Option<ScopeType> {
        self.selections.scope_type
    }

    pub fn selected_repository(&self) -> Option<&str> {
        self.selections.repository.as_deref()
    }

    pub fn selected_class(&self) -> Option<&str> {
        self.selections.class.as_deref()
    }

    pub fn selected_homework(&self) -> Option<&str> {
        self.selections.homework.as_deref()
    }

    pub fn option_sets(&self) -> &OptionSets {
        &self.option_sets
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// 是否有在途的加载或提交
    pub fn is_loading(&self) -> bool {
        self.submitting || self.pending.any()
    }

    /// 某类候选项是否正在加载
    pub fn is_loading_options(&self, kind: OptionKind) -> bool {
        self.pending.get(kind).is_some()
    }

    /// 是否已成功提交（终态）
    pub fn submitted(&self) -> bool {
        self.submitted
    }

    /// 当前步骤，由选择推导
    pub fn step(&self) -> u8 {
        self.selections.step()
    }

    pub fn can_submit(&self) -> bool {
        self.selections.can_submit()
    }

    /// 提交按钮是否可用：选择完整、没有在途请求、且当前选择尚未提交
    pub fn can_trigger_submit(&self) -> bool {
        self.can_submit() && !self.is_loading() && !self.submitted
    }

    pub fn visible_steps(&self) -> VisibleSteps {
        let step = self.step();
        let scope = self.scope_type();
        VisibleSteps {
            repository: step >= 2,
            class: step >= 3 && scope != Some(ScopeType::Repository),
            homework: step >= 4 && scope == Some(ScopeType::Homework),
        }
    }
}
