use chrono::NaiveDate;
use tracing::info;

use super::HomeworkService;
use crate::errors::Result;
use crate::models::assignments::entities::Assignment;
use crate::runtime::busy::BusyKey;

/// 为某节课布置作业
/// POST /api/homework/assign/{lessonId}/
///
/// 不做幂等保护：同一模板布置两次会生成两份作业。
pub async fn assign_homework(
    service: &HomeworkService,
    lesson_id: i64,
    homework_id: i64,
    due_date: NaiveDate,
) -> Result<Assignment> {
    let _guard = service.busy.acquire(BusyKey::HomeworkAssign(lesson_id))?;

    let assignment = service
        .api
        .assign_homework(lesson_id, homework_id, due_date)
        .await?;
    info!(
        assignment_id = assignment.id,
        lesson_id,
        homework_id,
        %due_date,
        "Homework assigned"
    );
    Ok(assignment)
}
