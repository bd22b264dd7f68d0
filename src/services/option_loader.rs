//! 候选项加载服务 - 业务能力层
//!
//! 只负责"按当前选择拉取下一步的候选项"，不修改向导状态。
//! 结果是否提交到状态中由控制器根据票据判断。

use std::sync::Arc;

use tracing::{debug, warn};

use crate::clients::ScoringApi;
use crate::error::AppResult;
use crate::models::{Envelope, OptionKind, OptionPayload};
use crate::utils::logging::truncate_text;

/// 一次加载的作用域
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadRequest {
    /// 仓库列表（无作用域）
    Repositories,
    /// 仓库下的班级
    Classes { repository: String },
    /// (仓库, 班级) 下的作业
    Homeworks { repository: String, class: String },
}

impl LoadRequest {
    pub fn kind(&self) -> OptionKind {
        match self {
            LoadRequest::Repositories => OptionKind::Repositories,
            LoadRequest::Classes { .. } => OptionKind::Classes,
            LoadRequest::Homeworks { .. } => OptionKind::Homeworks,
        }
    }
}

/// 加载票据
///
/// 携带发起时的作用域和代数；完成时代数或作用域与当前状态不符的结果会被丢弃
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub request: LoadRequest,
    pub generation: u64,
}

/// 加载结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(OptionPayload),
    /// 失败提示（服务返回的 message 或默认文案）
    Failed(String),
}

/// 候选项加载服务
#[derive(Clone)]
pub struct OptionLoader {
    api: Arc<dyn ScoringApi>,
}

impl OptionLoader {
    /// 创建新的加载服务
    pub fn new(api: Arc<dyn ScoringApi>) -> Self {
        Self { api }
    }

    /// 执行票据对应的加载
    ///
    /// 所有失败（传输错误、解析失败、status 非 success、缺少列表字段）统一折叠为 `Failed`
    pub async fn fetch(&self, ticket: &LoadTicket) -> LoadOutcome {
        debug!("加载候选项: {:?} (代数 {})", ticket.request, ticket.generation);

        match &ticket.request {
            LoadRequest::Repositories => resolve(
                self.api.list_repositories().await,
                OptionKind::Repositories,
                |resp| resp.repositories.map(OptionPayload::Repositories),
            ),
            LoadRequest::Classes { repository } => resolve(
                self.api.list_classes(repository).await,
                OptionKind::Classes,
                |resp| resp.classes.map(OptionPayload::Classes),
            ),
            LoadRequest::Homeworks { repository, class } => resolve(
                self.api.list_homeworks(repository, class).await,
                OptionKind::Homeworks,
                |resp| resp.homework_list.map(OptionPayload::Homeworks),
            ),
        }
    }
}

/// 取服务返回的提示，空白视为未提供
pub(crate) fn service_message<E: Envelope>(resp: &E) -> Option<String> {
    resp.message()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

fn resolve<E: Envelope>(
    result: AppResult<E>,
    kind: OptionKind,
    take: impl FnOnce(E) -> Option<OptionPayload>,
) -> LoadOutcome {
    let resp = match result {
        Ok(resp) => resp,
        Err(e) => {
            warn!("⚠️ {:?} 加载失败: {}", kind, e);
            return LoadOutcome::Failed(kind.fallback_message().to_string());
        }
    };

    let message = service_message(&resp);
    if !resp.is_success() {
        warn!(
            "⚠️ {:?} 加载失败: status={}, message={:?}",
            kind,
            resp.status(),
            message.as_deref().map(|m| truncate_text(m, 80))
        );
        return LoadOutcome::Failed(message.unwrap_or_else(|| kind.fallback_message().to_string()));
    }

    match take(resp) {
        Some(payload) => {
            debug!("✓ {:?} 加载完成，共 {} 项", kind, payload.len());
            LoadOutcome::Loaded(payload)
        }
        None => {
            warn!("⚠️ {:?} 响应缺少列表字段", kind);
            LoadOutcome::Failed(message.unwrap_or_else(|| kind.fallback_message().to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassGroup, Homework, Repository};
    use crate::test_support::{FakeApi, Reply};

    fn ticket(request: LoadRequest) -> LoadTicket {
        LoadTicket {
            request,
            generation: 1,
        }
    }

    #[tokio::test]
    async fn test_fetch_repositories_preserves_order() {
        let loader = OptionLoader::new(Arc::new(FakeApi::new()));
        let outcome = loader.fetch(&ticket(LoadRequest::Repositories)).await;
        assert_eq!(
            outcome,
            LoadOutcome::Loaded(OptionPayload::Repositories(vec![
                Repository {
                    name: "repo-A".to_string()
                },
                Repository {
                    name: "repo-B".to_string()
                },
            ]))
        );
    }

    #[tokio::test]
    async fn test_fetch_classes_scoped_to_repository() {
        let api = Arc::new(
            FakeApi::new().with_classes("repo-A", Reply::Ok(vec!["class-1".to_string()])),
        );
        let loader = OptionLoader::new(api.clone());
        let outcome = loader
            .fetch(&ticket(LoadRequest::Classes {
                repository: "repo-A".to_string(),
            }))
            .await;
        assert_eq!(
            outcome,
            LoadOutcome::Loaded(OptionPayload::Classes(vec![ClassGroup {
                name: "class-1".to_string()
            }]))
        );
        assert_eq!(api.call_log(), vec!["classes:repo-A".to_string()]);
    }

    #[tokio::test]
    async fn test_fetch_empty_homeworks_is_success() {
        let api = Arc::new(FakeApi::new().with_homeworks("repo-A", "class-1", Reply::Ok(vec![])));
        let loader = OptionLoader::new(api);
        let outcome = loader
            .fetch(&ticket(LoadRequest::Homeworks {
                repository: "repo-A".to_string(),
                class: "class-1".to_string(),
            }))
            .await;
        assert_eq!(outcome, LoadOutcome::Loaded(OptionPayload::Homeworks(Vec::<Homework>::new())));
    }

    #[tokio::test]
    async fn test_service_message_used_on_failure() {
        let api = Arc::new(FakeApi::new().with_classes(
            "repo-A",
            Reply::Error(Some("仓库已归档".to_string())),
        ));
        let loader = OptionLoader::new(api);
        let outcome = loader
            .fetch(&ticket(LoadRequest::Classes {
                repository: "repo-A".to_string(),
            }))
            .await;
        assert_eq!(outcome, LoadOutcome::Failed("仓库已归档".to_string()));
    }

    #[tokio::test]
    async fn test_fallback_message_on_transport_error() {
        let mut api = FakeApi::new();
        api.repositories = Reply::Transport;
        let loader = OptionLoader::new(Arc::new(api));
        let outcome = loader.fetch(&ticket(LoadRequest::Repositories)).await;
        assert_eq!(outcome, LoadOutcome::Failed("获取仓库列表失败".to_string()));
    }

    #[tokio::test]
    async fn test_fallback_message_on_blank_service_message() {
        let mut api = FakeApi::new();
        api.repositories = Reply::Error(Some("  ".to_string()));
        let loader = OptionLoader::new(Arc::new(api));
        let outcome = loader.fetch(&ticket(LoadRequest::Repositories)).await;
        assert_eq!(outcome, LoadOutcome::Failed("获取仓库列表失败".to_string()));
    }

    #[tokio::test]
    async fn test_fallback_message_when_list_field_missing() {
        let api = FakeApi::new().with_homeworks("repo-A", "class-1", Reply::MissingList);
        let loader = OptionLoader::new(Arc::new(api));
        let outcome = loader
            .fetch(&ticket(LoadRequest::Homeworks {
                repository: "repo-A".to_string(),
                class: "class-1".to_string(),
            }))
            .await;
        assert_eq!(outcome, LoadOutcome::Failed("获取作业列表失败".to_string()));
    }
}
