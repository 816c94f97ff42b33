use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::amount::deserialize_optional_amount;
use crate::models::homeworks::entities::Question;

/// 作业布置：某个模板针对某节课（某个学生）的一次实例
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    // 关联课程
    #[serde(default)]
    pub lesson_id: Option<i64>,
    // 来源模板
    #[serde(default)]
    pub homework_id: Option<i64>,
    #[serde(default)]
    pub homework_title: String,
    #[serde(default)]
    pub student_name: Option<String>,
    // 截止日期（服务端原样返回）
    #[serde(default)]
    pub due_date: Option<String>,
    // 是否已提交；提交后不可再作答
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub total_points: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub percentage: Option<f64>,
    // 单独获取时附带题目（不含正确答案）
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Assignment {
    pub fn question(&self, question_id: i64) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }
}
