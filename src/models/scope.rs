use serde::{Deserialize, Serialize};
use std::fmt;

/// 评分范围
///
/// 决定向导需要几步选择：整个仓库、某个班级、或某一次作业
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeType {
    /// 整个仓库
    Repository,
    /// 仓库中的一个班级
    Class,
    /// 班级中的一次作业
    Homework,
}

impl ScopeType {
    /// 全部范围（按向导中的显示顺序）
    pub const ALL: [ScopeType; 3] = [ScopeType::Repository, ScopeType::Class, ScopeType::Homework];

    /// 接口中使用的名称
    pub fn as_str(self) -> &'static str {
        match self {
            ScopeType::Repository => "repository",
            ScopeType::Class => "class",
            ScopeType::Homework => "homework",
        }
    }

    /// 显示名称
    pub fn label(self) -> &'static str {
        match self {
            ScopeType::Repository => "按仓库",
            ScopeType::Class => "按班级",
            ScopeType::Homework => "按作业",
        }
    }

    /// 是否需要选择班级
    pub fn requires_class(self) -> bool {
        matches!(self, ScopeType::Class | ScopeType::Homework)
    }

    /// 是否需要选择作业
    pub fn requires_homework(self) -> bool {
        self == ScopeType::Homework
    }

    /// 从字符串解析范围
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "repository" | "repo" | "仓库" => Some(ScopeType::Repository),
            "class" | "班级" => Some(ScopeType::Class),
            "homework" | "作业" => Some(ScopeType::Homework),
            _ => None,
        }
    }
}

impl fmt::Display for ScopeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
