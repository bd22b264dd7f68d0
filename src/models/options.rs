use serde::{Deserialize, Serialize};

/// 代码仓库（以名称唯一标识）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
}

/// 班级，只在所属仓库内有效
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassGroup {
    pub name: String,
}

/// 作业，只在 (仓库, 班级) 内有效
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Homework {
    pub name: String,
}

/// 各步骤的候选项
///
/// 顺序与服务返回的顺序一致，空列表表示"暂无可选项"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSets {
    pub repositories: Vec<Repository>,
    pub classes: Vec<ClassGroup>,
    pub homeworks: Vec<Homework>,
}

/// 候选项种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    Repositories,
    Classes,
    Homeworks,
}

impl OptionKind {
    /// 加载失败时的默认提示
    pub fn fallback_message(self) -> &'static str {
        match self {
            OptionKind::Repositories => "获取仓库列表失败",
            OptionKind::Classes => "获取班级列表失败",
            OptionKind::Homeworks => "获取作业列表失败",
        }
    }
}

/// 一次成功加载得到的候选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionPayload {
    Repositories(Vec<Repository>),
    Classes(Vec<ClassGroup>),
    Homeworks(Vec<Homework>),
}

impl OptionPayload {
    pub fn kind(&self) -> OptionKind {
        match self {
            OptionPayload::Repositories(_) => OptionKind::Repositories,
            OptionPayload::Classes(_) => OptionKind::Classes,
            OptionPayload::Homeworks(_) => OptionKind::Homeworks,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            OptionPayload::Repositories(v) => v.len(),
            OptionPayload::Classes(v) => v.len(),
            OptionPayload::Homeworks(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
