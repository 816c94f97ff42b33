//! 基于 [`reqwest`] 的后端 REST 客户端
//!
//! 负责拼接路径、附加 Bearer Token，并把 `{error}` 错误体映射为 [`PortalError`]。

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{PortalApi, endpoints};
use crate::config::AppConfig;
use crate::errors::{PortalError, Result};
use crate::models::ErrorBody;
use crate::models::{
    assignments::{
        entities::Assignment,
        requests::{AnswerSelection, AssignHomeworkRequest, SubmitAnswersRequest},
        responses::{AssignmentDetail, SubmissionResult},
    },
    homeworks::{
        entities::{HomeworkTemplate, Question},
        requests::{AddQuestionRequest, CreateHomeworkRequest},
    },
    lessons::{
        entities::{LessonHistoryItem, LessonStatus, StudentLesson},
        requests::UpdateLessonStatusRequest,
    },
};

/// 单个后端实例的 HTTP 客户端
pub struct HttpPortalApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpPortalApi {
    /// * `base_url` - 后端地址，例如 `http://localhost:8000`
    pub fn new(base_url: impl Into<String>, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// 使用全局配置创建客户端
    pub fn from_config() -> Result<Self> {
        let config = AppConfig::get();
        Self::new(
            config.api.base_url.clone(),
            config.bearer_token().map(str::to_owned),
            config.request_timeout(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "Sending API request");
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    // ---- private helpers ----

    /// 非 2xx 时读取错误体，优先使用服务端给出的 `error` 文本
    async fn ensure_success(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = ErrorBody::parse(&body)
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
        warn!(status = status.as_u16(), %message, "API request rejected");
        Err(PortalError::from_status(status.as_u16(), message))
    }

    async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// 只检查状态码，丢弃响应体（包括 204）
    async fn check_status(response: Response) -> Result<()> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl PortalApi for HttpPortalApi {
    async fn list_lesson_history(&self) -> Result<Vec<LessonHistoryItem>> {
        let response = self
            .request(Method::GET, endpoints::LESSON_HISTORY)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn update_lesson_status(&self, lesson_id: i64, status: LessonStatus) -> Result<()> {
        let response = self
            .request(Method::PATCH, &endpoints::lesson_history_item(lesson_id))
            .json(&UpdateLessonStatusRequest { status })
            .send()
            .await?;
        Self::check_status(response).await
    }

    async fn list_my_lessons(&self) -> Result<Vec<StudentLesson>> {
        let response = self
            .request(Method::GET, endpoints::MY_LESSONS)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn list_homework_library(&self) -> Result<Vec<HomeworkTemplate>> {
        let response = self
            .request(Method::GET, endpoints::HOMEWORK_LIBRARY)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn create_homework(&self, req: CreateHomeworkRequest) -> Result<HomeworkTemplate> {
        let response = self
            .request(Method::POST, endpoints::HOMEWORK_CREATE)
            .json(&req)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn add_question(&self, homework_id: i64, req: AddQuestionRequest) -> Result<Question> {
        let response = self
            .request(Method::POST, &endpoints::add_question(homework_id))
            .json(&req)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn delete_homework(&self, homework_id: i64) -> Result<()> {
        let response = self
            .request(Method::DELETE, &endpoints::delete_homework(homework_id))
            .send()
            .await?;
        Self::check_status(response).await
    }

    async fn assign_homework(
        &self,
        lesson_id: i64,
        homework_id: i64,
        due_date: NaiveDate,
    ) -> Result<Assignment> {
        let response = self
            .request(Method::POST, &endpoints::assign_homework(lesson_id))
            .json(&AssignHomeworkRequest {
                homework_id,
                due_date,
            })
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn get_assignment(&self, assignment_id: i64) -> Result<Assignment> {
        let response = self
            .request(Method::GET, &endpoints::assignment(assignment_id))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn submit_assignment(
        &self,
        assignment_id: i64,
        answers: Vec<AnswerSelection>,
    ) -> Result<SubmissionResult> {
        let response = self
            .request(Method::POST, &endpoints::submit_assignment(assignment_id))
            .json(&SubmitAnswersRequest { answers })
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn get_assignment_details(&self, assignment_id: i64) -> Result<AssignmentDetail> {
        let response = self
            .request(Method::GET, &endpoints::assignment_details(assignment_id))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn list_teacher_assignments(&self) -> Result<Vec<Assignment>> {
        let response = self
            .request(Method::GET, endpoints::TEACHER_ASSIGNMENTS)
            .send()
            .await?;
        Self::parse_response(response).await
    }
}
