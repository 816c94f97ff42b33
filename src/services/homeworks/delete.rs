use tracing::{info, warn};

use super::HomeworkService;
use crate::errors::Result;
use crate::runtime::busy::BusyKey;

/// 删除作业模板
/// DELETE /api/homework/{id}/delete/
pub async fn delete_template(service: &HomeworkService, homework_id: i64) -> Result<()> {
    let _guard = service.busy.acquire(BusyKey::HomeworkDelete(homework_id))?;

    match service.api.delete_homework(homework_id).await {
        Ok(()) => {
            info!(homework_id, "Homework template deleted");
            Ok(())
        }
        Err(e) => {
            warn!(homework_id, error = %e, "Failed to delete homework template");
            Err(e)
        }
    }
}
