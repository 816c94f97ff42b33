use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::lessons::entities::LessonStatus;

/// 更新课程状态请求
/// PATCH /api/teacher/lesson-history/{id}/
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct UpdateLessonStatusRequest {
    pub status: LessonStatus,
}

/// 状态筛选：全部或指定状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(LessonStatus),
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

/// 课程历史列表的客户端筛选条件
///
/// `from` / `to` 为 `YYYY-MM-DD`，空字符串表示不限。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonFilter {
    pub status: StatusFilter,
    pub search: String,
    pub from: String,
    pub to: String,
}

impl LessonFilter {
    pub fn with_status(status: LessonStatus) -> Self {
        Self {
            status: StatusFilter::Only(status),
            ..Self::default()
        }
    }
}
