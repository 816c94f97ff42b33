use tracing::debug;

use super::HomeworkService;
use crate::errors::Result;
use crate::models::homeworks::entities::HomeworkTemplate;

/// 题库列表
/// GET /api/homework/library/
pub async fn list_library(service: &HomeworkService) -> Result<Vec<HomeworkTemplate>> {
    let templates = service.api.list_homework_library().await?;
    debug!(count = templates.len(), "Loaded homework library");
    Ok(templates)
}
