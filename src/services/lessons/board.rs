use tracing::warn;

use super::LessonService;
use super::filter::filter_lessons;
use crate::errors::{PortalError, Result};
use crate::models::lessons::entities::{LessonHistoryItem, LessonStatus};
use crate::models::lessons::requests::LessonFilter;
use crate::services::notifications::Toast;

/// 教师课程历史页面的临时状态
///
/// 列表加载失败时退化为空列表加错误文本；状态变更成功后整表重新拉取，
/// 不做本地修补。
pub struct LessonHistoryBoard {
    service: LessonService,
    lessons: Vec<LessonHistoryItem>,
    filter: LessonFilter,
    load_error: Option<String>,
    action_error: Option<String>,
}

impl LessonHistoryBoard {
    pub fn new(service: LessonService) -> Self {
        Self {
            service,
            lessons: Vec::new(),
            filter: LessonFilter::default(),
            load_error: None,
            action_error: None,
        }
    }

    /// 重新拉取整张列表
    pub async fn refresh(&mut self) {
        match self.service.list_lessons().await {
            Ok(lessons) => {
                self.lessons = lessons;
                self.load_error = None;
            }
            Err(e) => {
                warn!(error = %e, "Failed to load lesson history");
                self.lessons.clear();
                self.load_error = Some(e.message().to_string());
            }
        }
    }

    pub fn lessons(&self) -> &[LessonHistoryItem] {
        &self.lessons
    }

    pub fn lesson(&self, lesson_id: i64) -> Option<&LessonHistoryItem> {
        self.lessons.iter().find(|l| l.id == lesson_id)
    }

    pub fn filter(&self) -> &LessonFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: LessonFilter) {
        self.filter = filter;
    }

    /// 当前筛选条件下可见的课程
    pub fn visible(&self) -> Vec<&LessonHistoryItem> {
        filter_lessons(&self.lessons, &self.filter)
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    /// 某节课可选的下一状态；为空时不提供编辑入口
    pub fn allowed_actions(&self, lesson_id: i64) -> &'static [LessonStatus] {
        self.lesson(lesson_id)
            .map(|l| l.status.allowed_next())
            .unwrap_or(&[])
    }

    /// 变更状态，成功后整表刷新
    pub async fn transition(&mut self, lesson_id: i64, target: LessonStatus) -> Result<Toast> {
        let lesson = self
            .lesson(lesson_id)
            .cloned()
            .ok_or_else(|| PortalError::not_found(format!("Lesson #{lesson_id} is not in the list")))?;

        match self.service.transition_status(&lesson, target).await {
            Ok(toast) => {
                self.action_error = None;
                self.refresh().await;
                Ok(toast)
            }
            Err(e) => {
                self.service.notifier().error(e.message());
                self.action_error = Some(e.message().to_string());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use super::*;
    use crate::api::memory::{MemoryApi, lesson};
    use crate::models::lessons::entities::PayoutStatus;
    use crate::runtime::busy::BusyRegistry;
    use crate::services::notifications::{Notifier, ToastEvent, ToastKind};

    fn board(api: Arc<MemoryApi>) -> LessonHistoryBoard {
        let service = LessonService::new(
            api,
            Notifier::new(Duration::from_millis(3200)),
            BusyRegistry::new(),
        );
        LessonHistoryBoard::new(service)
    }

    #[tokio::test(start_paused = true)]
    async fn test_completing_a_lesson_reloads_and_toasts() {
        let api = Arc::new(MemoryApi::with_lessons(vec![
            lesson(7, "Ana", "2026-03-01T10:00:00Z", LessonStatus::Pending),
            lesson(8, "Bruno", "2026-03-02T10:00:00Z", LessonStatus::Confirmed),
        ]));
        let mut board = board(api.clone());
        let mut events = board.service.notifier().subscribe();
        board.refresh().await;
        assert_eq!(api.list_fetches.load(Ordering::SeqCst), 1);

        let toast = board.transition(7, LessonStatus::Completed).await.unwrap();
        assert_eq!(toast.message, "Lesson #7 updated to Completed");

        // 整表重新拉取，而不是本地修补
        assert_eq!(api.list_fetches.load(Ordering::SeqCst), 2);
        let updated = board.lesson(7).unwrap();
        assert_eq!(updated.status, LessonStatus::Completed);
        assert!(updated.credit_used);
        assert_eq!(updated.effective_payout_status(), Some(PayoutStatus::Pending));
        assert!(board.allowed_actions(7).is_empty());

        assert!(matches!(events.recv().await.unwrap(), ToastEvent::Shown(_)));
        let started = tokio::time::Instant::now();
        assert_eq!(events.recv().await.unwrap(), ToastEvent::Dismissed(toast.id));
        assert!(started.elapsed() >= Duration::from_millis(3100));
        assert!(board.service.notifier().active().is_empty());
    }

    #[tokio::test]
    async fn test_failed_transition_keeps_list_and_records_message() {
        let api = Arc::new(MemoryApi::with_lessons(vec![lesson(
            9,
            "Caio",
            "2026-03-03T10:00:00Z",
            LessonStatus::Pending,
        )]));
        let mut board = board(api.clone());
        board.refresh().await;

        api.fail_next(PortalError::rejected("Lesson already transitioned by another user."));
        let err = board.transition(9, LessonStatus::Cancelled).await.unwrap_err();
        assert_eq!(err.message(), "Lesson already transitioned by another user.");
        assert_eq!(
            board.action_error(),
            Some("Lesson already transitioned by another user.")
        );
        assert_eq!(board.lesson(9).unwrap().status, LessonStatus::Pending);
        assert_eq!(api.list_fetches.load(Ordering::SeqCst), 1);

        let toasts = board.service.notifier().active();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Error);
        assert_eq!(toasts[0].message, "Lesson already transitioned by another user.");
    }

    #[tokio::test]
    async fn test_load_failure_degrades_to_empty_state() {
        let api = Arc::new(MemoryApi::with_lessons(vec![lesson(
            1,
            "Ana",
            "2026-03-01T10:00:00Z",
            LessonStatus::Pending,
        )]));
        let mut board = board(api.clone());
        board.refresh().await;
        assert_eq!(board.lessons().len(), 1);

        api.fail_next(PortalError::network("connection refused"));
        board.refresh().await;
        assert!(board.lessons().is_empty());
        assert!(board.visible().is_empty());
        assert_eq!(board.load_error(), Some("connection refused"));

        board.refresh().await;
        assert_eq!(board.lessons().len(), 1);
        assert_eq!(board.load_error(), None);
    }

    #[tokio::test]
    async fn test_payout_status_does_not_block_editing() {
        let mut paid = lesson(5, "Dora", "2026-03-04T10:00:00Z", LessonStatus::Confirmed);
        paid.payout_status = Some(PayoutStatus::Paid);
        let api = Arc::new(MemoryApi::with_lessons(vec![paid]));
        let mut board = board(api);
        board.refresh().await;

        assert_eq!(board.allowed_actions(5).len(), 3);
        assert!(board.transition(5, LessonStatus::StudentAbsent).await.is_ok());
        assert_eq!(board.lesson(5).unwrap().status, LessonStatus::StudentAbsent);
    }

    #[tokio::test]
    async fn test_visible_applies_filter() {
        let api = Arc::new(MemoryApi::with_lessons(vec![
            lesson(1, "Ana", "2026-03-01T10:00:00Z", LessonStatus::Completed),
            lesson(2, "Bruno", "2026-03-02T10:00:00Z", LessonStatus::Pending),
        ]));
        let mut board = board(api);
        board.refresh().await;
        board.set_filter(LessonFilter::with_status(LessonStatus::Completed));
        let visible: Vec<i64> = board.visible().iter().map(|l| l.id).collect();
        assert_eq!(visible, vec![1]);
    }
}
