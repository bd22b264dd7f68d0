pub mod scoring_client;

pub use scoring_client::ScoringClient;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{
    ClassListResponse, HomeworkListResponse, RepositoryListResponse, ScoringRequest,
    SubmitResponse,
};

/// 评分服务接口
///
/// 服务层只依赖这个 trait，具体传输方式（HTTP 或测试替身）由调用方注入
#[async_trait]
pub trait ScoringApi: Send + Sync {
    /// 获取仓库列表
    async fn list_repositories(&self) -> AppResult<RepositoryListResponse>;

    /// 获取仓库下的班级列表
    async fn list_classes(&self, repository: &str) -> AppResult<ClassListResponse>;

    /// 获取 (仓库, 班级) 下的作业列表
    async fn list_homeworks(&self, repository: &str, class: &str)
        -> AppResult<HomeworkListResponse>;

    /// 提交批量评分
    async fn submit_scoring(&self, request: &ScoringRequest) -> AppResult<SubmitResponse>;
}
