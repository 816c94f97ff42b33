use tracing::{info, warn};

use super::LessonService;
use crate::errors::{PortalError, Result};
use crate::models::lessons::entities::{LessonHistoryItem, LessonStatus};
use crate::runtime::busy::BusyKey;
use crate::services::notifications::Toast;

/// 变更课程状态
/// PATCH /api/teacher/lesson-history/{id}/
///
/// 目标状态必须在当前状态的允许集合内，否则不发请求直接拒绝。
/// 标记为 COMPLETED 时服务端会扣除一次学生课时并生成一条教师结算记录，
/// 客户端不做任何计算，调用方应重新拉取列表确认结果。
pub async fn transition_status(
    service: &LessonService,
    lesson: &LessonHistoryItem,
    target: LessonStatus,
) -> Result<Toast> {
    if !lesson.status.can_transition_to(target) {
        return Err(PortalError::validation(format!(
            "Lesson #{} cannot be changed from {} to {}",
            lesson.id,
            lesson.status.label(),
            target.label()
        )));
    }

    let _guard = service.busy.acquire(BusyKey::LessonTransition(lesson.id))?;

    if let Err(e) = service.api.update_lesson_status(lesson.id, target).await {
        warn!(lesson_id = lesson.id, %target, error = %e, "Lesson status update failed");
        return Err(e);
    }

    info!(
        lesson_id = lesson.id,
        from = %lesson.status,
        to = %target,
        "Lesson status updated"
    );

    Ok(service.notifier.success(format!(
        "Lesson #{} updated to {}",
        lesson.id,
        target.label()
    )))
}
