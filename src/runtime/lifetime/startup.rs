use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::{PortalApi, create_api};
use crate::config::AppConfig;
use crate::errors::Result;
use crate::runtime::busy::BusyRegistry;
use crate::services::{AssignmentService, HomeworkService, LessonService, Notifier};

/// 客户端运行所需的共享对象
#[derive(Clone)]
pub struct StartupContext {
    pub api: Arc<dyn PortalApi>,
    pub notifier: Notifier,
    pub busy: BusyRegistry,
}

impl StartupContext {
    pub fn new(api: Arc<dyn PortalApi>, notifier: Notifier) -> Self {
        Self {
            api,
            notifier,
            busy: BusyRegistry::new(),
        }
    }

    pub fn lesson_service(&self) -> LessonService {
        LessonService::new(self.api.clone(), self.notifier.clone(), self.busy.clone())
    }

    pub fn homework_service(&self) -> HomeworkService {
        HomeworkService::new(self.api.clone(), self.busy.clone())
    }

    pub fn assignment_service(&self) -> AssignmentService {
        AssignmentService::new(self.api.clone(), self.busy.clone())
    }
}

/// 准备客户端启动的上下文
/// 包括后端客户端、提示管理器和忙碌标记
pub fn prepare_client_startup() -> Result<StartupContext> {
    let config = AppConfig::get();

    if config.bearer_token().is_none() {
        warn!("No API token configured, requests will be sent unauthenticated");
    }

    let api = create_api()?;
    debug!(base_url = %config.api.base_url, "API client initialized");

    let notifier = Notifier::new(config.toast_dismiss_delay());
    Ok(StartupContext::new(api, notifier))
}
