//! 测试替身：内存中的评分服务

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::clients::ScoringApi;
use crate::error::{ApiError, AppError, AppResult};
use crate::models::{
    ClassGroup, ClassListResponse, Homework, HomeworkListResponse, Repository,
    RepositoryListResponse, ScoringRequest, SubmitResponse,
};

/// 服务对某个接口的预设行为
#[derive(Debug, Clone)]
pub enum Reply {
    /// status = success，返回给定列表
    Ok(Vec<String>),
    /// status = error，可选 message
    Error(Option<String>),
    /// status = success，但缺少列表字段
    MissingList,
    /// 传输失败
    Transport,
}

pub struct FakeApi {
    pub repositories: Reply,
    pub classes: HashMap<String, Reply>,
    pub homeworks: HashMap<(String, String), Reply>,
    pub submit_status: String,
    pub submit_message: Option<String>,
    pub submissions: Mutex<Vec<ScoringRequest>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            repositories: Reply::Ok(vec!["repo-A".to_string(), "repo-B".to_string()]),
            classes: HashMap::new(),
            homeworks: HashMap::new(),
            submit_status: "success".to_string(),
            submit_message: Some("评分任务已提交".to_string()),
            submissions: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_classes(mut self, repository: &str, reply: Reply) -> Self {
        self.classes.insert(repository.to_string(), reply);
        self
    }

    pub fn with_homeworks(mut self, repository: &str, class: &str, reply: Reply) -> Self {
        self.homeworks
            .insert((repository.to_string(), class.to_string()), reply);
        self
    }

    pub fn call_log(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

/// 构造一个真实的 reqwest 请求错误（URL 非法，请求无法发出）
fn transport_error() -> AppError {
    match reqwest::Client::new().get("not a url").build() {
        Err(source) => AppError::api_request_failed("fake", source),
        Ok(_) => ApiError::BadStatus {
            endpoint: "fake".to_string(),
            status: 503,
        }
        .into(),
    }
}

type Parts<T> = (String, Option<String>, Option<Vec<T>>);

fn split<T>(reply: &Reply, wrap: impl Fn(String) -> T) -> AppResult<Parts<T>> {
    match reply {
        Reply::Ok(names) => Ok((
            "success".to_string(),
            None,
            Some(names.iter().cloned().map(wrap).collect()),
        )),
        Reply::Error(message) => Ok(("error".to_string(), message.clone(), None)),
        Reply::MissingList => Ok(("success".to_string(), None, None)),
        Reply::Transport => Err(transport_error()),
    }
}

#[async_trait]
impl ScoringApi for FakeApi {
    async fn list_repositories(&self) -> AppResult<RepositoryListResponse> {
        self.record("repositories".to_string());
        let (status, message, repositories) =
            split(&self.repositories, |name| Repository { name })?;
        Ok(RepositoryListResponse {
            status,
            message,
            repositories,
        })
    }

    async fn list_classes(&self, repository: &str) -> AppResult<ClassListResponse> {
        self.record(format!("classes:{}", repository));
        let reply = self
            .classes
            .get(repository)
            .cloned()
            .unwrap_or(Reply::Ok(Vec::new()));
        let (status, message, classes) = split(&reply, |name| ClassGroup { name })?;
        Ok(ClassListResponse {
            status,
            message,
            classes,
        })
    }

    async fn list_homeworks(
        &self,
        repository: &str,
        class: &str,
    ) -> AppResult<HomeworkListResponse> {
        self.record(format!("homeworks:{}/{}", repository, class));
        let reply = self
            .homeworks
            .get(&(repository.to_string(), class.to_string()))
            .cloned()
            .unwrap_or(Reply::Ok(Vec::new()));
        let (status, message, homework_list) = split(&reply, |name| Homework { name })?;
        Ok(HomeworkListResponse {
            status,
            message,
            homework_list,
        })
    }

    async fn submit_scoring(&self, request: &ScoringRequest) -> AppResult<SubmitResponse> {
        self.record("submit".to_string());
        self.submissions.lock().unwrap().push(request.clone());
        Ok(SubmitResponse {
            status: self.submit_status.clone(),
            message: self.submit_message.clone(),
        })
    }
}
