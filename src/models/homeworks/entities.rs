use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 作业模板（题库条目）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct HomeworkTemplate {
    // 唯一 ID
    pub id: i64,
    // 作业标题
    pub title: String,
    // 作业描述
    #[serde(default)]
    pub description: String,
    // 难度等级标签
    #[serde(default)]
    pub level: String,
    // 有序题目列表；刚创建的模板为空
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl HomeworkTemplate {
    /// 满分（各题分值之和）
    pub fn total_points(&self) -> i64 {
        self.questions.iter().map(|q| q.points).sum()
    }
}

/// 单选题
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub points: i64,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
}

impl Question {
    pub fn has_option(&self, option_id: i64) -> bool {
        self.options.iter().any(|o| o.id == option_id)
    }
}

/// 选项；学生视角下后端不返回 is_correct
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct QuestionOption {
    pub id: i64,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
}
