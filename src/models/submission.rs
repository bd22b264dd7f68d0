use serde::Serialize;

use crate::models::scope::ScopeType;

/// 提交给评分服务的请求
///
/// `class` 仅在范围不是仓库时出现，`homework` 仅在范围是作业时出现
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoringRequest {
    #[serde(rename = "scopeType")]
    pub scope_type: ScopeType,
    pub repository: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homework: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_repository_scope_omits_optional_fields() {
        let req = ScoringRequest {
            scope_type: ScopeType::Repository,
            repository: "repo-A".to_string(),
            class: None,
            homework: None,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"scopeType": "repository", "repository": "repo-A"})
        );
    }
}
