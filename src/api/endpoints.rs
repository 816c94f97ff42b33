//! 后端接口路径，均以 `/` 结尾

pub const LESSON_HISTORY: &str = "/api/teacher/lesson-history/";
pub const MY_LESSONS: &str = "/api/my-lessons/";
pub const HOMEWORK_LIBRARY: &str = "/api/homework/library/";
pub const HOMEWORK_CREATE: &str = "/api/homework/create/";
pub const TEACHER_ASSIGNMENTS: &str = "/api/homework/teacher-assignments/";

pub fn lesson_history_item(lesson_id: i64) -> String {
    format!("/api/teacher/lesson-history/{lesson_id}/")
}

pub fn add_question(homework_id: i64) -> String {
    format!("/api/homework/{homework_id}/add_question/")
}

pub fn delete_homework(homework_id: i64) -> String {
    format!("/api/homework/{homework_id}/delete/")
}

pub fn assign_homework(lesson_id: i64) -> String {
    format!("/api/homework/assign/{lesson_id}/")
}

pub fn assignment(assignment_id: i64) -> String {
    format!("/api/homework/assignment/{assignment_id}/")
}

pub fn submit_assignment(assignment_id: i64) -> String {
    format!("/api/homework/assignment/{assignment_id}/submit/")
}

pub fn assignment_details(assignment_id: i64) -> String {
    format!("/api/homework/assignment/{assignment_id}/details/")
}
