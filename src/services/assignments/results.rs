use std::collections::HashMap;

use tracing::{debug, warn};

use super::AssignmentService;
use crate::errors::{PortalError, Result};
use crate::models::assignments::entities::Assignment;
use crate::models::assignments::responses::AssignmentDetail;

/// 获取已完成作业的逐题明细
/// GET /api/homework/assignment/{id}/details/
pub async fn get_details(service: &AssignmentService, assignment_id: i64) -> Result<AssignmentDetail> {
    let detail = service.api.get_assignment_details(assignment_id).await?;
    debug!(
        assignment_id,
        questions = detail.questions.len(),
        "Loaded assignment details"
    );
    Ok(detail)
}

/// 教师作业列表页面的临时状态
///
/// 列表只带概要信息；逐题明细仅在教师展开某份作业时才请求，
/// 之后在本页面生命周期内复用。
pub struct TeacherAssignmentsBoard {
    service: AssignmentService,
    assignments: Vec<Assignment>,
    details: HashMap<i64, AssignmentDetail>,
    load_error: Option<String>,
}

impl TeacherAssignmentsBoard {
    pub fn new(service: AssignmentService) -> Self {
        Self {
            service,
            assignments: Vec::new(),
            details: HashMap::new(),
            load_error: None,
        }
    }

    pub async fn refresh(&mut self) {
        match self.service.list_teacher_assignments().await {
            Ok(assignments) => {
                self.assignments = assignments;
                self.load_error = None;
            }
            Err(e) => {
                warn!(error = %e, "Failed to load teacher assignments");
                self.assignments.clear();
                self.load_error = Some(e.message().to_string());
            }
        }
        self.details.clear();
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// 已加载过的明细
    pub fn cached_details(&self, assignment_id: i64) -> Option<&AssignmentDetail> {
        self.details.get(&assignment_id)
    }

    /// 展开某份作业的明细；未完成的作业没有明细
    pub async fn expand(&mut self, assignment_id: i64) -> Result<&AssignmentDetail> {
        let assignment = self
            .assignments
            .iter()
            .find(|a| a.id == assignment_id)
            .ok_or_else(|| {
                PortalError::not_found(format!("Assignment #{assignment_id} is not in the list"))
            })?;
        if !assignment.is_completed {
            return Err(PortalError::validation(format!(
                "Assignment #{assignment_id} has not been submitted yet"
            )));
        }

        if !self.details.contains_key(&assignment_id) {
            let detail = self.service.get_details(assignment_id).await?;
            self.details.insert(assignment_id, detail);
        }
        self.details
            .get(&assignment_id)
            .ok_or_else(|| PortalError::not_found(format!("Assignment #{assignment_id} has no details")))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::Ordering;

    use chrono::NaiveDate;

    use super::*;
    use crate::api::memory::{MemoryApi, lesson};
    use crate::models::homeworks::requests::{AddQuestionRequest, CreateHomeworkRequest};
    use crate::models::lessons::entities::LessonStatus;
    use crate::runtime::busy::BusyRegistry;
    use crate::services::homeworks::HomeworkService;

    #[tokio::test]
    async fn test_details_are_fetched_lazily_once() {
        let api = Arc::new(MemoryApi::with_lessons(vec![lesson(
            1,
            "Ana",
            "2026-03-01T10:00:00Z",
            LessonStatus::Completed,
        )]));
        let busy = BusyRegistry::new();
        let homeworks = HomeworkService::new(api.clone(), busy.clone());
        let service = AssignmentService::new(api.clone(), busy);

        let mut draft = homeworks
            .create_template(CreateHomeworkRequest {
                title: "Colors".into(),
                description: String::new(),
                level: "A1".into(),
            })
            .await
            .unwrap();
        draft
            .add_question(
                &homeworks,
                AddQuestionRequest::new("Sky?", 1)
                    .option("Blue", true)
                    .option("Green", false),
            )
            .await
            .unwrap();
        let due = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
        let done = homeworks.assign(1, draft.id(), due).await.unwrap();
        let open = homeworks.assign(1, draft.id(), due).await.unwrap();

        let mut quiz = service.open_quiz(done.id).await.unwrap();
        let question = quiz.assignment().questions[0].clone();
        let green = question.options.iter().find(|o| o.text == "Green").unwrap().id;
        quiz.choose(question.id, green).unwrap();
        quiz.submit(|_| true).await.unwrap();

        let mut board = TeacherAssignmentsBoard::new(service);
        board.refresh().await;
        assert_eq!(board.assignments().len(), 2);
        // 加载列表不会拉取明细
        assert_eq!(api.detail_fetches.load(Ordering::SeqCst), 0);
        assert!(board.cached_details(done.id).is_none());

        let detail = board.expand(done.id).await.unwrap();
        assert_eq!(detail.questions.len(), 1);
        let row = &detail.questions[0];
        assert_eq!(row.student_answer.as_deref(), Some("Green"));
        assert_eq!(row.correct_answer, "Blue");
        assert!(!row.is_correct);
        assert_eq!(row.points_earned, 0.0);
        assert_eq!(detail.correct_count(), 0);

        board.expand(done.id).await.unwrap();
        assert_eq!(api.detail_fetches.load(Ordering::SeqCst), 1);

        assert_eq!(board.expand(open.id).await.unwrap_err().code(), "E002");
        assert_eq!(board.expand(4242).await.unwrap_err().code(), "E005");
    }

    #[tokio::test]
    async fn test_list_failure_degrades_to_empty_state() {
        let api = Arc::new(MemoryApi::default());
        api.fail_next(PortalError::server("Internal server error"));
        let mut board = TeacherAssignmentsBoard::new(AssignmentService::new(api, BusyRegistry::new()));
        board.refresh().await;
        assert!(board.assignments().is_empty());
        assert_eq!(board.load_error(), Some("Internal server error"));
    }
}
