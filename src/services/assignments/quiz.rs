use std::collections::BTreeMap;

use tracing::{info, warn};

use super::AssignmentService;
use crate::errors::{PortalError, Result};
use crate::models::assignments::entities::Assignment;
use crate::models::assignments::requests::AnswerSelection;
use crate::models::assignments::responses::SubmissionResult;
use crate::runtime::busy::BusyKey;

/// 未答完时交给确认回调的信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncompleteSubmission {
    pub answered: usize,
    pub total: usize,
}

impl IncompleteSubmission {
    pub fn missing(&self) -> usize {
        self.total - self.answered
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Submitted(SubmissionResult),
    /// 用户在未答完确认中取消，未发送请求
    Declined,
}

/// 学生作答会话
///
/// 每题选一个选项。提交成功后（或打开时作业已完成）会话锁定，
/// 不再接受修改，也没有重新提交的途径。
pub struct QuizSession {
    service: AssignmentService,
    assignment: Assignment,
    // 题目 ID -> 选项 ID
    answers: BTreeMap<i64, i64>,
    result: Option<SubmissionResult>,
}

/// 打开作业
/// GET /api/homework/assignment/{id}/
pub async fn open_quiz(service: &AssignmentService, assignment_id: i64) -> Result<QuizSession> {
    let assignment = service.api.get_assignment(assignment_id).await?;
    let result = match (assignment.is_completed, assignment.score) {
        (true, Some(score)) => Some(SubmissionResult {
            score,
            total: assignment.total_points.unwrap_or_default(),
            percentage: assignment.percentage,
        }),
        _ => None,
    };
    Ok(QuizSession {
        service: service.clone(),
        assignment,
        answers: BTreeMap::new(),
        result,
    })
}

impl QuizSession {
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn is_locked(&self) -> bool {
        self.assignment.is_completed
    }

    pub fn result(&self) -> Option<&SubmissionResult> {
        self.result.as_ref()
    }

    fn ensure_unlocked(&self) -> Result<()> {
        if self.is_locked() {
            return Err(PortalError::assignment_locked(format!(
                "Assignment #{} has already been submitted",
                self.assignment.id
            )));
        }
        Ok(())
    }

    /// 选择某题的选项，重复选择会覆盖
    pub fn choose(&mut self, question_id: i64, option_id: i64) -> Result<()> {
        self.ensure_unlocked()?;
        let question = self.assignment.question(question_id).ok_or_else(|| {
            PortalError::validation(format!("Question #{question_id} is not part of this assignment"))
        })?;
        if !question.has_option(option_id) {
            return Err(PortalError::validation(format!(
                "Option #{option_id} does not belong to question #{question_id}"
            )));
        }
        self.answers.insert(question_id, option_id);
        Ok(())
    }

    /// 清除某题的作答
    pub fn clear(&mut self, question_id: i64) -> Result<()> {
        self.ensure_unlocked()?;
        self.answers.remove(&question_id);
        Ok(())
    }

    pub fn selected(&self, question_id: i64) -> Option<i64> {
        self.answers.get(&question_id).copied()
    }

    /// 未作答的题目，按题目顺序
    pub fn unanswered(&self) -> Vec<i64> {
        self.assignment
            .questions
            .iter()
            .filter(|q| !self.answers.contains_key(&q.id))
            .map(|q| q.id)
            .collect()
    }

    /// 按题目顺序生成提交内容
    pub fn answers(&self) -> Vec<AnswerSelection> {
        self.assignment
            .questions
            .iter()
            .filter_map(|q| {
                self.answers.get(&q.id).map(|&option_id| AnswerSelection {
                    question_id: q.id,
                    option_id,
                })
            })
            .collect()
    }

    /// 提交作答
    /// POST /api/homework/assignment/{id}/submit/
    ///
    /// 未答完时先调用 `confirm`，返回 false 则不发送请求。
    pub async fn submit<F>(&mut self, confirm: F) -> Result<SubmitOutcome>
    where
        F: FnOnce(&IncompleteSubmission) -> bool,
    {
        self.ensure_unlocked()?;

        let total = self.assignment.questions.len();
        let answered = total - self.unanswered().len();
        if answered < total && !confirm(&IncompleteSubmission { answered, total }) {
            return Ok(SubmitOutcome::Declined);
        }

        let assignment_id = self.assignment.id;
        let _guard = self
            .service
            .busy
            .acquire(BusyKey::AssignmentSubmit(assignment_id))?;

        let result = match self
            .service
            .api
            .submit_assignment(assignment_id, self.answers())
            .await
        {
            Ok(result) => result,
            Err(e) => {
                warn!(assignment_id, error = %e, "Assignment submission failed");
                return Err(e);
            }
        };

        info!(
            assignment_id,
            score = result.score,
            total = result.total,
            answered,
            "Assignment submitted"
        );

        self.assignment.is_completed = true;
        self.assignment.score = Some(result.score);
        self.assignment.total_points = Some(result.total);
        self.assignment.percentage = Some(result.percent());
        self.result = Some(result.clone());
        Ok(SubmitOutcome::Submitted(result))
    }
}
