//! 评分提交服务 - 业务能力层
//!
//! 把最终选择打包成评分请求并发送，结果折叠为一条提示

use std::sync::Arc;

use tracing::{info, warn};

use crate::clients::ScoringApi;
use crate::models::{Envelope, ScopeType, ScoringRequest, Selections};
use crate::services::option_loader::service_message;

/// 提交成功的默认提示
pub const DEFAULT_SUCCESS_MESSAGE: &str = "批量评分任务已完成";
/// 提交失败的默认提示
pub const DEFAULT_FAILURE_MESSAGE: &str = "批量评分失败，请稍后重试";

/// 提交结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Succeeded(String),
    Failed(String),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Succeeded(_))
    }

    pub fn message(&self) -> &str {
        match self {
            SubmitOutcome::Succeeded(m) | SubmitOutcome::Failed(m) => m,
        }
    }
}

/// 评分提交服务
#[derive(Clone)]
pub struct SubmissionGateway {
    api: Arc<dyn ScoringApi>,
}

impl SubmissionGateway {
    pub fn new(api: Arc<dyn ScoringApi>) -> Self {
        Self { api }
    }

    /// 根据当前选择构建请求，选择不满足提交条件时返回 None
    pub fn build_request(selections: &Selections) -> Option<ScoringRequest> {
        if !selections.can_submit() {
            return None;
        }
        let scope_type = selections.scope_type?;
        let repository = selections.repository.clone()?;

        let class = if scope_type == ScopeType::Repository {
            None
        } else {
            selections.class.clone()
        };
        let homework = if scope_type == ScopeType::Homework {
            selections.homework.clone()
        } else {
            None
        };

        Some(ScoringRequest {
            scope_type,
            repository,
            class,
            homework,
        })
    }

    /// 发送评分请求
    pub async fn submit(&self, request: &ScoringRequest) -> SubmitOutcome {
        info!(
            "📤 提交批量评分: 范围={}, 仓库={}, 班级={:?}, 作业={:?}",
            request.scope_type, request.repository, request.class, request.homework
        );

        match self.api.submit_scoring(request).await {
            Ok(resp) if resp.is_success() => {
                let message = service_message(&resp)
                    .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string());
                info!("✓ 批量评分完成: {}", message);
                SubmitOutcome::Succeeded(message)
            }
            Ok(resp) => {
                let message = service_message(&resp)
                    .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
                warn!("⚠️ 批量评分失败: status={}, message={}", resp.status(), message);
                SubmitOutcome::Failed(message)
            }
            Err(e) => {
                warn!("⚠️ 批量评分请求失败: {}", e);
                SubmitOutcome::Failed(DEFAULT_FAILURE_MESSAGE.to_string())
            }
        }
    }
}
