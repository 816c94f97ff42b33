use tracing::debug;

use super::LessonService;
use crate::errors::Result;
use crate::models::lessons::entities::{LessonHistoryItem, StudentLesson};

/// 获取教师课程历史
/// GET /api/teacher/lesson-history/
pub async fn list_lessons(service: &LessonService) -> Result<Vec<LessonHistoryItem>> {
    let lessons = service.api().list_lesson_history().await?;
    debug!(count = lessons.len(), "Loaded lesson history");
    Ok(lessons)
}

/// 获取学生自己的课程
/// GET /api/my-lessons/
pub async fn list_my_lessons(service: &LessonService) -> Result<Vec<StudentLesson>> {
    let lessons = service.api().list_my_lessons().await?;
    debug!(count = lessons.len(), "Loaded student lessons");
    Ok(lessons)
}
