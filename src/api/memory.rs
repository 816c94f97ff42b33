//! 测试用的内存后端，模拟服务端的状态校验、课时扣除与评分

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;

use super::PortalApi;
use crate::errors::{PortalError, Result};
use crate::models::{
    assignments::{
        entities::Assignment,
        requests::AnswerSelection,
        responses::{AssignmentDetail, QuestionResult, SubmissionResult},
    },
    homeworks::{
        entities::{HomeworkTemplate, Question, QuestionOption},
        requests::{AddQuestionRequest, CreateHomeworkRequest},
    },
    lessons::entities::{LessonHistoryItem, LessonStatus, PayoutStatus, StudentLesson},
};

#[derive(Default)]
struct State {
    lessons: Vec<LessonHistoryItem>,
    templates: Vec<HomeworkTemplate>,
    assignments: Vec<Assignment>,
    answers: HashMap<i64, Vec<AnswerSelection>>,
    next_id: i64,
    fail_next: Option<PortalError>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub(crate) struct MemoryApi {
    state: Mutex<State>,
    pub detail_fetches: AtomicUsize,
    pub list_fetches: AtomicUsize,
}

impl MemoryApi {
    pub fn with_lessons(lessons: Vec<LessonHistoryItem>) -> Self {
        let api = Self::default();
        {
            let mut state = api.state.lock().unwrap();
            state.lessons = lessons;
            state.next_id = 100;
        }
        api
    }

    /// 下一次请求返回指定错误
    pub fn fail_next(&self, err: PortalError) {
        self.state.lock().unwrap().fail_next = Some(err);
    }

    /// 模拟另一个操作者直接修改了状态
    pub fn force_status(&self, lesson_id: i64, status: LessonStatus) {
        let mut state = self.state.lock().unwrap();
        if let Some(l) = state.lessons.iter_mut().find(|l| l.id == lesson_id) {
            l.status = status;
        }
    }

    pub fn assignment_count(&self) -> usize {
        self.state.lock().unwrap().assignments.len()
    }

    pub fn template(&self, id: i64) -> Option<HomeworkTemplate> {
        self.state
            .lock()
            .unwrap()
            .templates
            .iter()
            .find(|t| t.id == id)
            .cloned()
    }

    fn take_failure(&self) -> Result<()> {
        match self.state.lock().unwrap().fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// 学生视角：隐藏正确答案
    fn strip_answers(mut questions: Vec<Question>) -> Vec<Question> {
        for q in &mut questions {
            for o in &mut q.options {
                o.is_correct = None;
            }
        }
        questions
    }
}

pub(crate) fn lesson(id: i64, student: &str, start: &str, status: LessonStatus) -> LessonHistoryItem {
    LessonHistoryItem {
        id,
        student_id: Some(id * 10),
        student_name: student.to_string(),
        start_time: start.to_string(),
        end_time: start.to_string(),
        status,
        credit_used: false,
        teacher_rate: Some(25.0),
        payout_amount: None,
        payout_status: None,
    }
}

#[async_trait::async_trait]
impl PortalApi for MemoryApi {
    async fn list_lesson_history(&self) -> Result<Vec<LessonHistoryItem>> {
        self.take_failure()?;
        self.list_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.state.lock().unwrap().lessons.clone())
    }

    async fn update_lesson_status(&self, lesson_id: i64, status: LessonStatus) -> Result<()> {
        self.take_failure()?;
        let mut state = self.state.lock().unwrap();
        let lesson = state
            .lessons
            .iter_mut()
            .find(|l| l.id == lesson_id)
            .ok_or_else(|| PortalError::not_found("Lesson not found."))?;
        if !lesson.status.can_transition_to(status) {
            return Err(PortalError::rejected(format!(
                "Cannot change status from {} to {}.",
                lesson.status, status
            )));
        }
        lesson.status = status;
        if status == LessonStatus::Completed {
            lesson.credit_used = true;
            lesson.payout_amount = lesson.teacher_rate;
            lesson.payout_status = Some(PayoutStatus::Pending);
        }
        Ok(())
    }

    async fn list_my_lessons(&self) -> Result<Vec<StudentLesson>> {
        self.take_failure()?;
        let state = self.state.lock().unwrap();
        Ok(state
            .lessons
            .iter()
            .map(|l| StudentLesson {
                id: l.id,
                teacher_name: "Teacher".into(),
                start_time: l.start_time.clone(),
                end_time: l.end_time.clone(),
                status: l.status,
                assignments: state
                    .assignments
                    .iter()
                    .filter(|a| a.lesson_id == Some(l.id))
                    .cloned()
                    .collect(),
            })
            .collect())
    }

    async fn list_homework_library(&self) -> Result<Vec<HomeworkTemplate>> {
        self.take_failure()?;
        Ok(self.state.lock().unwrap().templates.clone())
    }

    async fn create_homework(&self, req: CreateHomeworkRequest) -> Result<HomeworkTemplate> {
        self.take_failure()?;
        let mut state = self.state.lock().unwrap();
        let template = HomeworkTemplate {
            id: state.next_id(),
            title: req.title,
            description: req.description,
            level: req.level,
            questions: Vec::new(),
        };
        state.templates.push(template.clone());
        Ok(template)
    }

    async fn add_question(&self, homework_id: i64, req: AddQuestionRequest) -> Result<Question> {
        self.take_failure()?;
        let mut state = self.state.lock().unwrap();
        let question_id = state.next_id();
        let mut options = Vec::new();
        for o in req.options {
            options.push(QuestionOption {
                id: state.next_id(),
                text: o.text,
                is_correct: Some(o.is_correct),
            });
        }
        let question = Question {
            id: question_id,
            text: req.text,
            points: req.points,
            options,
        };
        let template = state
            .templates
            .iter_mut()
            .find(|t| t.id == homework_id)
            .ok_or_else(|| PortalError::not_found("Homework not found."))?;
        template.questions.push(question.clone());
        Ok(question)
    }

    async fn delete_homework(&self, homework_id: i64) -> Result<()> {
        self.take_failure()?;
        let mut state = self.state.lock().unwrap();
        let before = state.templates.len();
        state.templates.retain(|t| t.id != homework_id);
        if state.templates.len() == before {
            return Err(PortalError::not_found("Homework not found."));
        }
        Ok(())
    }

    async fn assign_homework(
        &self,
        lesson_id: i64,
        homework_id: i64,
        due_date: NaiveDate,
    ) -> Result<Assignment> {
        self.take_failure()?;
        let mut state = self.state.lock().unwrap();
        let template = state
            .templates
            .iter()
            .find(|t| t.id == homework_id)
            .cloned()
            .ok_or_else(|| PortalError::not_found("Homework not found."))?;
        let student_name = state
            .lessons
            .iter()
            .find(|l| l.id == lesson_id)
            .map(|l| l.student_name.clone());
        let assignment = Assignment {
            id: state.next_id(),
            lesson_id: Some(lesson_id),
            homework_id: Some(homework_id),
            homework_title: template.title.clone(),
            student_name,
            due_date: Some(due_date.to_string()),
            is_completed: false,
            score: None,
            total_points: Some(template.total_points() as f64),
            percentage: None,
            questions: template.questions,
        };
        state.assignments.push(assignment.clone());
        Ok(assignment)
    }

    async fn get_assignment(&self, assignment_id: i64) -> Result<Assignment> {
        self.take_failure()?;
        let state = self.state.lock().unwrap();
        let mut assignment = state
            .assignments
            .iter()
            .find(|a| a.id == assignment_id)
            .cloned()
            .ok_or_else(|| PortalError::not_found("Assignment not found."))?;
        assignment.questions = Self::strip_answers(assignment.questions);
        Ok(assignment)
    }

    async fn submit_assignment(
        &self,
        assignment_id: i64,
        answers: Vec<AnswerSelection>,
    ) -> Result<SubmissionResult> {
        self.take_failure()?;
        let mut state = self.state.lock().unwrap();
        let assignment = state
            .assignments
            .iter_mut()
            .find(|a| a.id == assignment_id)
            .ok_or_else(|| PortalError::not_found("Assignment not found."))?;
        if assignment.is_completed {
            return Err(PortalError::rejected("Assignment already submitted."));
        }
        let mut score = 0.0;
        let mut total = 0.0;
        for q in &assignment.questions {
            total += q.points as f64;
            let chosen = answers.iter().find(|a| a.question_id == q.id);
            let correct = chosen.is_some_and(|a| {
                q.options
                    .iter()
                    .any(|o| o.id == a.option_id && o.is_correct == Some(true))
            });
            if correct {
                score += q.points as f64;
            }
        }
        let percentage = if total > 0.0 { score / total * 100.0 } else { 0.0 };
        assignment.is_completed = true;
        assignment.score = Some(score);
        assignment.percentage = Some(percentage);
        state.answers.insert(assignment_id, answers);
        Ok(SubmissionResult {
            score,
            total,
            percentage: Some(percentage),
        })
    }

    async fn get_assignment_details(&self, assignment_id: i64) -> Result<AssignmentDetail> {
        self.take_failure()?;
        self.detail_fetches.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();
        let assignment = state
            .assignments
            .iter()
            .find(|a| a.id == assignment_id)
            .ok_or_else(|| PortalError::not_found("Assignment not found."))?;
        let answers = state.answers.get(&assignment_id).cloned().unwrap_or_default();
        let questions = assignment
            .questions
            .iter()
            .map(|q| {
                let chosen = answers
                    .iter()
                    .find(|a| a.question_id == q.id)
                    .and_then(|a| q.options.iter().find(|o| o.id == a.option_id));
                let correct = q.options.iter().find(|o| o.is_correct == Some(true));
                let is_correct = chosen.is_some_and(|o| o.is_correct == Some(true));
                QuestionResult {
                    question_id: q.id,
                    question_text: q.text.clone(),
                    student_answer: chosen.map(|o| o.text.clone()),
                    correct_answer: correct.map(|o| o.text.clone()).unwrap_or_default(),
                    is_correct,
                    points_earned: if is_correct { q.points as f64 } else { 0.0 },
                    points_possible: Some(q.points as f64),
                }
            })
            .collect();
        Ok(AssignmentDetail {
            assignment_id: Some(assignment_id),
            score: assignment.score,
            total: assignment.total_points,
            percentage: assignment.percentage,
            questions,
        })
    }

    async fn list_teacher_assignments(&self) -> Result<Vec<Assignment>> {
        self.take_failure()?;
        Ok(self.state.lock().unwrap().assignments.clone())
    }
}
