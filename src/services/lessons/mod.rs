pub mod board;
pub mod filter;
pub mod list;
pub mod transition;

use std::sync::Arc;

use crate::api::PortalApi;
use crate::errors::Result;
use crate::models::lessons::entities::{LessonHistoryItem, LessonStatus, StudentLesson};
use crate::runtime::busy::BusyRegistry;
use crate::services::notifications::{Notifier, Toast};

pub use board::LessonHistoryBoard;
pub use filter::{filter_lessons, matches_filter};

#[derive(Clone)]
pub struct LessonService {
    api: Arc<dyn PortalApi>,
    notifier: Notifier,
    busy: BusyRegistry,
}

impl LessonService {
    pub fn new(api: Arc<dyn PortalApi>, notifier: Notifier, busy: BusyRegistry) -> Self {
        Self {
            api,
            notifier,
            busy,
        }
    }

    pub(crate) fn api(&self) -> &Arc<dyn PortalApi> {
        &self.api
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub async fn list_lessons(&self) -> Result<Vec<LessonHistoryItem>> {
        list::list_lessons(self).await
    }

    pub async fn list_my_lessons(&self) -> Result<Vec<StudentLesson>> {
        list::list_my_lessons(self).await
    }

    pub async fn transition_status(
        &self,
        lesson: &LessonHistoryItem,
        target: LessonStatus,
    ) -> Result<Toast> {
        transition::transition_status(self, lesson, target).await
    }
}
