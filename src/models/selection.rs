use crate::models::scope::ScopeType;

/// 用户当前的选择
///
/// 下游选择只在上游选择存在时才有意义，由控制器负责维护
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selections {
    pub scope_type: Option<ScopeType>,
    pub repository: Option<String>,
    pub class: Option<String>,
    pub homework: Option<String>,
}

impl Selections {
    /// 当前步骤（由选择推导，不单独存储）
    ///
    /// 1 = 未选范围；2 = 待选仓库；3 = 已选仓库；4 = 已选班级；5 = 已选作业
    pub fn step(&self) -> u8 {
        let Some(scope) = self.scope_type else {
            return 1;
        };
        if self.repository.is_none() {
            return 2;
        }
        if !scope.requires_class() || self.class.is_none() {
            return 3;
        }
        if scope.requires_homework() && self.homework.is_some() {
            5
        } else {
            4
        }
    }

    /// 选择是否满足当前范围的提交要求
    pub fn can_submit(&self) -> bool {
        let Some(scope) = self.scope_type else {
            return false;
        };
        self.repository.is_some()
            && (scope != ScopeType::Class || self.class.is_some())
            && (scope != ScopeType::Homework || (self.class.is_some() && self.homework.is_some()))
    }
}
