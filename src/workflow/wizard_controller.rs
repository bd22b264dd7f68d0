//! 向导控制器 - 流程层
//!
//! 核心职责：持有 `WizardState`，提供选择转换，决定何时加载下一步的候选项、何时允许提交
//!
//! 流程顺序：
//! 1. 激活 → 加载仓库列表
//! 2. 选择评分范围
//! 3. 选择仓库 → （范围需要班级时）加载班级
//! 4. 选择班级 → （范围为作业时）加载作业
//! 5. 选择作业
//! 6. 提交
//!
//! 数据只向下游流动：第 N 步的选择会使第 N+1 步的候选项失效并重新加载。
//! 每次加载都带着发起时的作用域和代数，完成时与当前状态不符的结果直接丢弃。

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::clients::ScoringApi;
use crate::models::{OptionKind, OptionPayload, ScopeType, ScoringRequest};
use crate::services::{
    LoadOutcome, LoadRequest, LoadTicket, OptionLoader, SubmissionGateway, SubmitOutcome,
};
use crate::workflow::wizard_state::{VisibleSteps, WizardState};

/// 选择或提交被拒绝的原因
///
/// 状态在拒绝时保持不变；渲染层应当事先禁用对应操作
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("请先选择评分范围")]
    ScopeNotSelected,
    #[error("请先选择仓库")]
    RepositoryNotSelected,
    #[error("请先选择班级")]
    ClassNotSelected,
    #[error("评分范围 {0} 不需要选择班级")]
    ClassNotApplicable(ScopeType),
    #[error("评分范围 {0} 不需要选择作业")]
    HomeworkNotApplicable(ScopeType),
    #[error("当前选择不满足提交条件")]
    NotReady,
    #[error("正在处理中，请稍候")]
    Busy,
    #[error("当前选择已提交评分，修改选择后才能再次提交")]
    AlreadySubmitted,
}

/// 向导控制器
pub struct WizardController {
    state: WizardState,
    loader: OptionLoader,
    gateway: SubmissionGateway,
    next_generation: u64,
}

impl WizardController {
    /// 创建新的向导（状态为全新）
    pub fn new(api: Arc<dyn ScoringApi>) -> Self {
        Self {
            state: WizardState::default(),
            loader: OptionLoader::new(api.clone()),
            gateway: SubmissionGateway::new(api),
            next_generation: 0,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn loader(&self) -> &OptionLoader {
        &self.loader
    }

    pub fn can_submit(&self) -> bool {
        self.state.can_submit()
    }

    pub fn visible_steps(&self) -> VisibleSteps {
        self.state.visible_steps()
    }

    /// 激活向导：发起仓库列表加载
    pub fn activate(&mut self) -> LoadTicket {
        info!("📋 向导已激活，加载仓库列表...");
        self.issue(LoadRequest::Repositories)
    }

    /// 重新加载当前路径最深一级的候选项
    ///
    /// 作业范围且已选班级 → 作业；需要班级且已选仓库 → 班级；否则 → 仓库。
    /// 用于加载失败后在不改变选择的情况下重试，之前发出的同类票据随之过期
    pub fn reload_current(&mut self) -> LoadTicket {
        let sel = &self.state.selections;
        let request = match (sel.scope_type, &sel.repository, &sel.class) {
            (Some(scope), Some(repository), Some(class)) if scope.requires_homework() => {
                LoadRequest::Homeworks {
                    repository: repository.clone(),
                    class: class.clone(),
                }
            }
            (Some(scope), Some(repository), _) if scope.requires_class() => {
                LoadRequest::Classes {
                    repository: repository.clone(),
                }
            }
            _ => LoadRequest::Repositories,
        };
        info!("🔄 重新加载: {:?}", request);
        self.issue(request)
    }

    /// 选择评分范围
    ///
    /// 重复选择同一范围不做任何改变；切换到不同范围时清空仓库及以下的选择
    pub fn select_scope_type(&mut self, scope: ScopeType) {
        if self.state.selections.scope_type == Some(scope) {
            return;
        }

        info!("✓ 评分范围: {}", scope.label());
        if self.state.selections.repository.is_some() {
            debug!("评分范围变更，清空下游选择");
            self.state.selections.repository = None;
            self.invalidate_classes();
        }
        self.state.selections.scope_type = Some(scope);
        self.state.submitted = false;
    }

    /// 选择仓库
    ///
    /// 返回需要执行的班级加载票据（范围需要班级时）
    pub fn select_repository(&mut self, name: &str) -> Result<Option<LoadTicket>, WizardError> {
        let scope = self.state.selections.scope_type.ok_or_else(|| {
            warn!("⚠️ 未选择评分范围就选择了仓库: {}", name);
            WizardError::ScopeNotSelected
        })?;

        if self.state.selections.repository.as_deref() == Some(name) {
            return Ok(None);
        }

        info!("✓ 仓库: {}", name);
        self.state.selections.repository = Some(name.to_string());
        self.invalidate_classes();
        self.state.submitted = false;

        if scope.requires_class() {
            Ok(Some(self.issue(LoadRequest::Classes {
                repository: name.to_string(),
            })))
        } else {
            Ok(None)
        }
    }

    /// 选择班级
    ///
    /// 返回需要执行的作业加载票据（范围为作业时）
    pub fn select_class(&mut self, name: &str) -> Result<Option<LoadTicket>, WizardError> {
        let scope = self
            .state
            .selections
            .scope_type
            .ok_or_else(|| {
                warn!("⚠️ 未选择评分范围就选择了班级: {}", name);
                WizardError::ScopeNotSelected
            })?;
        if !scope.requires_class() {
            warn!("⚠️ 评分范围 {} 不需要班级，忽略选择: {}", scope, name);
            return Err(WizardError::ClassNotApplicable(scope));
        }
        let repository = self
            .state
            .selections
            .repository
            .clone()
            .ok_or_else(|| {
                warn!("⚠️ 未选择仓库就选择了班级: {}", name);
                WizardError::RepositoryNotSelected
            })?;

        if self.state.selections.class.as_deref() == Some(name) {
            return Ok(None);
        }

        info!("✓ 班级: {}", name);
        self.state.selections.class = Some(name.to_string());
        self.invalidate_homeworks();
        self.state.submitted = false;

        if scope.requires_homework() {
            Ok(Some(self.issue(LoadRequest::Homeworks {
                repository,
                class: name.to_string(),
            })))
        } else {
            Ok(None)
        }
    }

    /// 选择作业
    pub fn select_homework(&mut self, name: &str) -> Result<(), WizardError> {
        let scope = self
            .state
            .selections
            .scope_type
            .ok_or_else(|| {
                warn!("⚠️ 未选择评分范围就选择了作业: {}", name);
                WizardError::ScopeNotSelected
            })?;
        if !scope.requires_homework() {
            warn!("⚠️ 评分范围 {} 不需要作业，忽略选择: {}", scope, name);
            return Err(WizardError::HomeworkNotApplicable(scope));
        }
        if self.state.selections.repository.is_none() {
            warn!("⚠️ 未选择仓库就选择了作业: {}", name);
            return Err(WizardError::RepositoryNotSelected);
        }
        if self.state.selections.class.is_none() {
            warn!("⚠️ 未选择班级就选择了作业: {}", name);
            return Err(WizardError::ClassNotSelected);
        }

        if self.state.selections.homework.as_deref() == Some(name) {
            return Ok(());
        }

        info!("✓ 作业: {}", name);
        self.state.selections.homework = Some(name.to_string());
        self.state.submitted = false;
        Ok(())
    }

    /// 执行票据对应的加载并提交结果
    ///
    /// 返回结果是否被采用（过期结果返回 false）
    pub async fn load(&mut self, ticket: LoadTicket) -> bool {
        let outcome = self.loader.fetch(&ticket).await;
        self.complete_load(ticket, outcome)
    }

    /// 把一次加载的结果合并到状态中
    ///
    /// 票据代数已被取代、或作用域与当前选择不符时丢弃结果，不修改任何状态
    pub fn complete_load(&mut self, ticket: LoadTicket, outcome: LoadOutcome) -> bool {
        let kind = ticket.request.kind();
        if self.state.pending.get(kind) != Some(ticket.generation)
            || !self.matches_current_path(&ticket.request)
        {
            debug!(
                "丢弃过期的加载结果: {:?} (代数 {})",
                ticket.request, ticket.generation
            );
            return false;
        }
        self.state.pending.clear(kind);

        match outcome {
            LoadOutcome::Loaded(payload) if payload.kind() == kind => {
                let sets = &mut self.state.option_sets;
                match payload {
                    OptionPayload::Repositories(list) => sets.repositories = list,
                    OptionPayload::Classes(list) => sets.classes = list,
                    OptionPayload::Homeworks(list) => sets.homeworks = list,
                }
                self.state.status_message = None;
            }
            LoadOutcome::Loaded(payload) => {
                warn!(
                    "⚠️ 加载结果类型不符: 期望 {:?}, 实际 {:?}",
                    kind,
                    payload.kind()
                );
                self.state.status_message = Some(kind.fallback_message().to_string());
            }
            LoadOutcome::Failed(message) => {
                self.state.status_message = Some(message);
            }
        }
        true
    }

    /// 开始提交：检查门控并标记提交中
    pub(crate) fn begin_submit(&mut self) -> Result<ScoringRequest, WizardError> {
        if self.state.submitted {
            warn!("⚠️ 当前选择已提交，拒绝重复提交");
            return Err(WizardError::AlreadySubmitted);
        }
        if self.state.is_loading() {
            return Err(WizardError::Busy);
        }
        let request =
            SubmissionGateway::build_request(&self.state.selections).ok_or(WizardError::NotReady)?;
        self.state.submitting = true;
        Ok(request)
    }

    /// 结束提交：记录提示，成功时进入终态；失败时保留所有选择以便重试
    pub(crate) fn complete_submit(&mut self, outcome: &SubmitOutcome) {
        self.state.submitting = false;
        self.state.status_message = Some(outcome.message().to_string());
        if outcome.is_success() {
            self.state.submitted = true;
        }
    }

    /// 提交批量评分
    pub async fn submit(&mut self) -> Result<SubmitOutcome, WizardError> {
        let request = self.begin_submit()?;
        let outcome = self.gateway.submit(&request).await;
        self.complete_submit(&outcome);
        Ok(outcome)
    }

    // ========== 内部辅助方法 ==========

    fn issue(&mut self, request: LoadRequest) -> LoadTicket {
        self.next_generation += 1;
        let generation = self.next_generation;
        self.state.pending.set(request.kind(), generation);
        LoadTicket {
            request,
            generation,
        }
    }

    /// 清空班级及作业（选择、候选项、在途加载）
    fn invalidate_classes(&mut self) {
        self.state.selections.class = None;
        self.state.option_sets.classes.clear();
        self.state.pending.clear(OptionKind::Classes);
        self.invalidate_homeworks();
    }

    /// 清空作业（选择、候选项、在途加载）
    fn invalidate_homeworks(&mut self) {
        self.state.selections.homework = None;
        self.state.option_sets.homeworks.clear();
        self.state.pending.clear(OptionKind::Homeworks);
    }

    fn matches_current_path(&self, request: &LoadRequest) -> bool {
        let sel = &self.state.selections;
        match request {
            LoadRequest::Repositories => true,
            LoadRequest::Classes { repository } => {
                sel.scope_type.is_some_and(ScopeType::requires_class)
                    && sel.repository.as_deref() == Some(repository.as_str())
            }
            LoadRequest::Homeworks { repository, class } => {
                sel.scope_type.is_some_and(ScopeType::requires_homework)
                    && sel.repository.as_deref() == Some(repository.as_str())
                    && sel.class.as_deref() == Some(class.as_str())
            }
        }
    }
}
