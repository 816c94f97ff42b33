use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 布置作业请求
/// POST /api/homework/assign/{lessonId}/
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignHomeworkRequest {
    pub homework_id: i64,
    pub due_date: NaiveDate, // 序列化为 "YYYY-MM-DD"
}

/// 单题作答
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AnswerSelection {
    pub question_id: i64,
    pub option_id: i64,
}

/// 提交作答请求
/// POST /api/homework/assignment/{id}/submit/
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct SubmitAnswersRequest {
    pub answers: Vec<AnswerSelection>,
}
