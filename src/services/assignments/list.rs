use tracing::debug;

use super::AssignmentService;
use crate::errors::Result;
use crate::models::assignments::entities::Assignment;

/// 教师布置过的作业
/// GET /api/homework/teacher-assignments/
pub async fn list_teacher_assignments(service: &AssignmentService) -> Result<Vec<Assignment>> {
    let assignments = service.api.list_teacher_assignments().await?;
    debug!(count = assignments.len(), "Loaded teacher assignments");
    Ok(assignments)
}
