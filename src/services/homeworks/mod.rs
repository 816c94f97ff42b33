pub mod assign;
pub mod create;
pub mod delete;
pub mod library;

use std::sync::Arc;

use chrono::NaiveDate;

use crate::api::PortalApi;
use crate::errors::Result;
use crate::models::assignments::entities::Assignment;
use crate::models::homeworks::entities::{HomeworkTemplate, Question};
use crate::models::homeworks::requests::{AddQuestionRequest, CreateHomeworkRequest};
use crate::runtime::busy::BusyRegistry;

pub use create::TemplateDraft;

#[derive(Clone)]
pub struct HomeworkService {
    api: Arc<dyn PortalApi>,
    busy: BusyRegistry,
}

impl HomeworkService {
    pub fn new(api: Arc<dyn PortalApi>, busy: BusyRegistry) -> Self {
        Self { api, busy }
    }

    pub async fn list_library(&self) -> Result<Vec<HomeworkTemplate>> {
        library::list_library(self).await
    }

    pub async fn create_template(&self, req: CreateHomeworkRequest) -> Result<TemplateDraft> {
        create::create_template(self, req).await
    }

    pub async fn add_question(&self, homework_id: i64, req: AddQuestionRequest) -> Result<Question> {
        create::add_question(self, homework_id, req).await
    }

    pub async fn delete_template(&self, homework_id: i64) -> Result<()> {
        delete::delete_template(self, homework_id).await
    }

    pub async fn assign(
        &self,
        lesson_id: i64,
        homework_id: i64,
        due_date: NaiveDate,
    ) -> Result<Assignment> {
        assign::assign_homework(self, lesson_id, homework_id, due_date).await
    }
}
