use std::sync::Arc;

use chrono::NaiveDate;

use crate::errors::Result;
use crate::models::{
    assignments::{
        entities::Assignment,
        requests::AnswerSelection,
        responses::{AssignmentDetail, SubmissionResult},
    },
    homeworks::{
        entities::{HomeworkTemplate, Question},
        requests::{AddQuestionRequest, CreateHomeworkRequest},
    },
    lessons::entities::{LessonHistoryItem, LessonStatus, StudentLesson},
};

pub mod endpoints;
pub mod http_client;

#[cfg(test)]
pub(crate) mod memory;

pub use http_client::HttpPortalApi;

/// 后端 REST 接口抽象
///
/// 所有业务规则（课时扣除、结算、评分）都在服务端完成，
/// 客户端只发起请求并原样接收结果。
#[async_trait::async_trait]
pub trait PortalApi: Send + Sync {
    /// 教师课程历史
    // 列出课程
    async fn list_lesson_history(&self) -> Result<Vec<LessonHistoryItem>>;
    // 变更课程状态
    async fn update_lesson_status(&self, lesson_id: i64, status: LessonStatus) -> Result<()>;

    /// 学生课程
    async fn list_my_lessons(&self) -> Result<Vec<StudentLesson>>;

    /// 作业模板管理
    // 题库列表
    async fn list_homework_library(&self) -> Result<Vec<HomeworkTemplate>>;
    // 创建模板外壳
    async fn create_homework(&self, req: CreateHomeworkRequest) -> Result<HomeworkTemplate>;
    // 追加一道题
    async fn add_question(&self, homework_id: i64, req: AddQuestionRequest) -> Result<Question>;
    // 删除模板
    async fn delete_homework(&self, homework_id: i64) -> Result<()>;

    /// 作业布置与提交
    // 为某节课布置作业
    async fn assign_homework(
        &self,
        lesson_id: i64,
        homework_id: i64,
        due_date: NaiveDate,
    ) -> Result<Assignment>;
    // 获取单个作业（含题目）
    async fn get_assignment(&self, assignment_id: i64) -> Result<Assignment>;
    // 提交作答，由服务端评分
    async fn submit_assignment(
        &self,
        assignment_id: i64,
        answers: Vec<AnswerSelection>,
    ) -> Result<SubmissionResult>;
    // 逐题评分明细
    async fn get_assignment_details(&self, assignment_id: i64) -> Result<AssignmentDetail>;
    // 教师布置过的作业
    async fn list_teacher_assignments(&self) -> Result<Vec<Assignment>>;
}

pub fn create_api() -> Result<Arc<dyn PortalApi>> {
    let api = HttpPortalApi::from_config()?;
    Ok(Arc::new(api))
}
