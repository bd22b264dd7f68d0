//! 评分服务响应信封
//!
//! 所有接口都返回 `status` + 可选 `message`，只有 `status == "success"` 视为成功

use serde::Deserialize;

use crate::models::options::{ClassGroup, Homework, Repository};

/// 成功状态标识
pub const STATUS_SUCCESS: &str = "success";

/// 信封通用能力
pub trait Envelope {
    fn status(&self) -> &str;
    fn message(&self) -> Option<&str>;

    fn is_success(&self) -> bool {
        self.status() == STATUS_SUCCESS
    }
}

macro_rules! envelope {
    ($(#[$doc:meta])* $name:ident { $field:ident : $item:ty }) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Deserialize)]
        pub struct $name {
            pub status: String,
            #[serde(default)]
            pub message: Option<String>,
            #[serde(default)]
            pub $field: Option<Vec<$item>>,
        }

        impl Envelope for $name {
            fn status(&self) -> &str {
                &self.status
            }

            fn message(&self) -> Option<&str> {
                self.message.as_deref()
            }
        }
    };
}

envelope!(
    /// 仓库列表响应
    RepositoryListResponse { repositories: Repository }
);
envelope!(
    /// 班级列表响应
    ClassListResponse { classes: ClassGroup }
);
envelope!(
    /// 作业列表响应
    HomeworkListResponse { homework_list: Homework }
);

/// 提交评分响应
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl Envelope for SubmitResponse {
    fn status(&self) -> &str {
        &self.status
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_homework_list_field_name() {
        let resp: HomeworkListResponse = serde_json::from_str(
            r#"{"status":"success","homework_list":[{"name":"hw1","deadline":"2026-10-01"}]}"#,
        )
        .unwrap();
        assert!(resp.is_success());
        assert_eq!(resp.homework_list.unwrap()[0].name, "hw1");
    }

    #[test]
    fn test_non_success_status() {
        let resp: ClassListResponse =
            serde_json::from_str(r#"{"status":"error","message":"仓库不存在"}"#).unwrap();
        assert!(!resp.is_success());
        assert_eq!(resp.message(), Some("仓库不存在"));
        assert!(resp.classes.is_none());
    }
}
