use tracing::{info, warn};

use super::HomeworkService;
use crate::errors::{PortalError, Result};
use crate::models::homeworks::entities::{HomeworkTemplate, Question};
use crate::models::homeworks::requests::{AddQuestionRequest, CreateHomeworkRequest};
use crate::runtime::busy::BusyKey;
use crate::utils::validate_question;

/// 编写中的作业模板
///
/// 第一阶段创建外壳后得到 ID，第二阶段逐题追加；两阶段之间没有事务保证，
/// 只有外壳、没有题目的模板也是合法状态。
#[derive(Debug, Clone)]
pub struct TemplateDraft {
    template: HomeworkTemplate,
}

impl TemplateDraft {
    pub fn id(&self) -> i64 {
        self.template.id
    }

    pub fn template(&self) -> &HomeworkTemplate {
        &self.template
    }

    pub fn question_count(&self) -> usize {
        self.template.questions.len()
    }

    /// 追加一道题，服务端返回的题目按顺序记入本地副本
    pub async fn add_question(
        &mut self,
        service: &HomeworkService,
        req: AddQuestionRequest,
    ) -> Result<&Question> {
        let question = add_question(service, self.template.id, req).await?;
        self.template.questions.push(question);
        let added = self.template.questions.len() - 1;
        Ok(&self.template.questions[added])
    }
}

/// 创建模板外壳
/// POST /api/homework/create/
pub async fn create_template(
    service: &HomeworkService,
    req: CreateHomeworkRequest,
) -> Result<TemplateDraft> {
    if req.title.trim().is_empty() {
        return Err(PortalError::validation("Homework title is required"));
    }

    let _guard = service.busy.acquire(BusyKey::HomeworkCreate)?;
    let template = service.api.create_homework(req).await?;
    info!(homework_id = template.id, title = %template.title, "Homework template created");
    Ok(TemplateDraft { template })
}

/// 追加一道题
/// POST /api/homework/{id}/add_question/
pub async fn add_question(
    service: &HomeworkService,
    homework_id: i64,
    req: AddQuestionRequest,
) -> Result<Question> {
    validate_question(&req)?;

    let _guard = service.busy.acquire(BusyKey::QuestionAdd(homework_id))?;
    match service.api.add_question(homework_id, req).await {
        Ok(question) => {
            info!(homework_id, question_id = question.id, "Question added");
            Ok(question)
        }
        Err(e) => {
            warn!(homework_id, error = %e, "Failed to add question");
            Err(e)
        }
    }
}
