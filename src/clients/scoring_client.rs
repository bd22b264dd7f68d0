/// 评分服务 API 客户端
///
/// 封装所有与评分服务相关的 HTTP 调用
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::clients::ScoringApi;
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use crate::models::{
    ClassListResponse, HomeworkListResponse, RepositoryListResponse, ScoringRequest,
    SubmitResponse,
};

const REPOSITORIES_ENDPOINT: &str = "api/repositories";
const CLASSES_ENDPOINT: &str = "api/classes";
const HOMEWORK_ENDPOINT: &str = "api/homework";
const SUBMIT_ENDPOINT: &str = "api/scoring/batch";

/// 评分服务客户端
pub struct ScoringClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ScoringClient {
    /// 创建新的评分服务客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::api_request_failed("client", e))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// 发送请求并解析信封
    ///
    /// 无论 HTTP 状态码如何都先尝试解析响应体，这样错误信封里的 message 也能展示给用户
    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        builder: RequestBuilder,
    ) -> AppResult<T> {
        let response = self
            .authorize(builder)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        debug!("{} 响应 (HTTP {}): {}", endpoint, status.as_u16(), body);

        match serde_json::from_str::<T>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(_) if !status.is_success() => Err(ApiError::BadStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            }
            .into()),
            Err(e) => Err(AppError::json_parse_failed(endpoint, e)),
        }
    }
}

#[async_trait]
impl ScoringApi for ScoringClient {
    async fn list_repositories(&self) -> AppResult<RepositoryListResponse> {
        let builder = self.http.get(self.url(REPOSITORIES_ENDPOINT));
        self.send(REPOSITORIES_ENDPOINT, builder).await
    }

    async fn list_classes(&self, repository: &str) -> AppResult<ClassListResponse> {
        let builder = self
            .http
            .get(self.url(CLASSES_ENDPOINT))
            .query(&[("repository", repository)]);
        self.send(CLASSES_ENDPOINT, builder).await
    }

    async fn list_homeworks(
        &self,
        repository: &str,
        class: &str,
    ) -> AppResult<HomeworkListResponse> {
        let builder = self
            .http
            .get(self.url(HOMEWORK_ENDPOINT))
            .query(&[("repository", repository), ("class", class)]);
        self.send(HOMEWORK_ENDPOINT, builder).await
    }

    async fn submit_scoring(&self, request: &ScoringRequest) -> AppResult<SubmitResponse> {
        debug!("提交评分 Payload: {:?}", request);
        let builder = self.http.post(self.url(SUBMIT_ENDPOINT)).json(request);
        self.send(SUBMIT_ENDPOINT, builder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let config = Config {
            api_base_url: "http://grading.local/".to_string(),
            ..Config::default()
        };
        let client = ScoringClient::new(&config).unwrap();
        assert_eq!(
            client.url(REPOSITORIES_ENDPOINT),
            "http://grading.local/api/repositories"
        );
    }
}
