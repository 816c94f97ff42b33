pub mod list;
pub mod quiz;
pub mod results;

use std::sync::Arc;

use crate::api::PortalApi;
use crate::errors::Result;
use crate::models::assignments::entities::Assignment;
use crate::models::assignments::responses::AssignmentDetail;
use crate::runtime::busy::BusyRegistry;

pub use quiz::{IncompleteSubmission, QuizSession, SubmitOutcome};
pub use results::TeacherAssignmentsBoard;

#[derive(Clone)]
pub struct AssignmentService {
    api: Arc<dyn PortalApi>,
    busy: BusyRegistry,
}

impl AssignmentService {
    pub fn new(api: Arc<dyn PortalApi>, busy: BusyRegistry) -> Self {
        Self { api, busy }
    }

    pub async fn list_teacher_assignments(&self) -> Result<Vec<Assignment>> {
        list::list_teacher_assignments(self).await
    }

    /// 打开作业开始作答
    pub async fn open_quiz(&self, assignment_id: i64) -> Result<QuizSession> {
        quiz::open_quiz(self, assignment_id).await
    }

    pub async fn get_details(&self, assignment_id: i64) -> Result<AssignmentDetail> {
        results::get_details(self, assignment_id).await
    }
}
