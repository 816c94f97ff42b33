use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 创建作业模板请求（第一阶段：只建外壳）
/// POST /api/homework/create/
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct CreateHomeworkRequest {
    pub title: String,
    pub description: String,
    pub level: String,
}

/// 追加一道题请求（第二阶段，可重复调用）
/// POST /api/homework/{id}/add_question/
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct AddQuestionRequest {
    pub text: String,
    pub points: i64,
    pub options: Vec<NewOption>,
}

impl AddQuestionRequest {
    pub fn new(text: impl Into<String>, points: i64) -> Self {
        Self {
            text: text.into(),
            points,
            options: Vec::new(),
        }
    }

    /// 追加一个选项
    pub fn option(mut self, text: impl Into<String>, is_correct: bool) -> Self {
        self.options.push(NewOption {
            text: text.into(),
            is_correct,
        });
        self
    }

    pub fn correct_count(&self) -> usize {
        self.options.iter().filter(|o| o.is_correct).count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homework.ts")]
pub struct NewOption {
    pub text: String,
    pub is_correct: bool,
}
