use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::amount::{deserialize_amount, deserialize_optional_amount};

/// 提交后服务端返回的评分
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct SubmissionResult {
    #[serde(deserialize_with = "deserialize_amount")]
    pub score: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub total: f64,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub percentage: Option<f64>,
}

impl SubmissionResult {
    /// 百分比；后端未返回时按得分/总分计算
    pub fn percent(&self) -> f64 {
        match self.percentage {
            Some(p) => p,
            None if self.total > 0.0 => self.score / self.total * 100.0,
            None => 0.0,
        }
    }
}

/// 逐题评分明细
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct QuestionResult {
    pub question_id: i64,
    pub question_text: String,
    // 未作答时为空
    #[serde(default)]
    pub student_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
    #[serde(deserialize_with = "deserialize_amount")]
    pub points_earned: f64,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub points_possible: Option<f64>,
}

/// 已完成作业的评分明细
/// GET /api/homework/assignment/{id}/details/
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentDetail {
    #[serde(default)]
    pub assignment_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub total: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub percentage: Option<f64>,
    pub questions: Vec<QuestionResult>,
}

impl AssignmentDetail {
    pub fn correct_count(&self) -> usize {
        self.questions.iter().filter(|q| q.is_correct).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_result_accepts_decimal_strings() {
        let result: SubmissionResult =
            serde_json::from_str(r#"{"score":"3.00","total":"5.00"}"#).unwrap();
        assert_eq!(result.score, 3.0);
        assert_eq!(result.total, 5.0);
        assert_eq!(result.percentage, None);
        assert_eq!(result.percent(), 60.0);
    }

    #[test]
    fn test_detail_rows_accept_decimal_strings() {
        let detail: AssignmentDetail = serde_json::from_str(
            r#"{
                "score": "2.00",
                "total": "5.00",
                "questions": [{
                    "question_id": 1,
                    "question_text": "Capital of France?",
                    "student_answer": "Paris",
                    "correct_answer": "Paris",
                    "is_correct": true,
                    "points_earned": "2.00",
                    "points_possible": "2.00"
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(detail.score, Some(2.0));
        assert_eq!(detail.questions[0].points_earned, 2.0);
        assert_eq!(detail.questions[0].points_possible, Some(2.0));
    }

    #[test]
    fn test_submission_result_requires_score() {
        assert!(serde_json::from_str::<SubmissionResult>(r#"{"score":null,"total":5}"#).is_err());
    }
}
