use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::amount::deserialize_optional_amount;

// 课程状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub enum LessonStatus {
    Pending,       // 待确认
    Confirmed,     // 已确认
    Completed,     // 已完成（终态）
    StudentAbsent, // 学生缺席（终态）
    Cancelled,     // 已取消（终态）
}

// 客户端允许发起的状态流转：非终态只能流向下列三种终态
const FROM_OPEN: &[LessonStatus] = &[
    LessonStatus::Completed,
    LessonStatus::StudentAbsent,
    LessonStatus::Cancelled,
];

impl LessonStatus {
    pub const PENDING: &'static str = "PENDING";
    pub const CONFIRMED: &'static str = "CONFIRMED";
    pub const COMPLETED: &'static str = "COMPLETED";
    pub const STUDENT_ABSENT: &'static str = "STUDENT_ABSENT";
    pub const CANCELLED: &'static str = "CANCELLED";

    pub fn all() -> &'static [LessonStatus] {
        &[
            Self::Pending,
            Self::Confirmed,
            Self::Completed,
            Self::StudentAbsent,
            Self::Cancelled,
        ]
    }

    /// 状态流转表：给定当前状态，返回允许的下一状态集合
    pub const fn allowed_next(self) -> &'static [LessonStatus] {
        match self {
            LessonStatus::Pending | LessonStatus::Confirmed => FROM_OPEN,
            LessonStatus::Completed | LessonStatus::StudentAbsent | LessonStatus::Cancelled => &[],
        }
    }

    pub fn can_transition_to(self, target: LessonStatus) -> bool {
        self.allowed_next().contains(&target)
    }

    /// 终态不再提供编辑入口
    pub const fn is_terminal(self) -> bool {
        self.allowed_next().is_empty()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            LessonStatus::Pending => Self::PENDING,
            LessonStatus::Confirmed => Self::CONFIRMED,
            LessonStatus::Completed => Self::COMPLETED,
            LessonStatus::StudentAbsent => Self::STUDENT_ABSENT,
            LessonStatus::Cancelled => Self::CANCELLED,
        }
    }

    /// 界面展示用名称
    pub const fn label(self) -> &'static str {
        match self {
            LessonStatus::Pending => "Pending",
            LessonStatus::Confirmed => "Confirmed",
            LessonStatus::Completed => "Completed",
            LessonStatus::StudentAbsent => "Student Absent",
            LessonStatus::Cancelled => "Cancelled",
        }
    }
}

impl<'de> Deserialize<'de> for LessonStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for LessonStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LessonStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            LessonStatus::PENDING => Ok(LessonStatus::Pending),
            LessonStatus::CONFIRMED => Ok(LessonStatus::Confirmed),
            LessonStatus::COMPLETED => Ok(LessonStatus::Completed),
            LessonStatus::STUDENT_ABSENT => Ok(LessonStatus::StudentAbsent),
            LessonStatus::CANCELLED => Ok(LessonStatus::Cancelled),
            _ => Err(format!(
                "Invalid lesson status: '{s}'. Supported: PENDING, CONFIRMED, COMPLETED, STUDENT_ABSENT, CANCELLED"
            )),
        }
    }
}

// 结算状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub enum PayoutStatus {
    Pending, // 待结算
    Paid,    // 已结算
}

impl PayoutStatus {
    pub const fn label(self) -> &'static str {
        match self {
            PayoutStatus::Pending => "Pending",
            PayoutStatus::Paid => "Paid",
        }
    }
}

/// 教师课程历史记录
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct LessonHistoryItem {
    // 课程 ID
    pub id: i64,
    // 学生 ID
    #[serde(default)]
    pub student_id: Option<i64>,
    // 学生姓名
    pub student_name: String,
    // 开始时间（ISO 8601，保留服务端原始字符串用于日期前缀比较）
    pub start_time: String,
    // 结束时间
    pub end_time: String,
    // 课程状态
    pub status: LessonStatus,
    // 是否已扣除学生课时
    #[serde(default)]
    pub credit_used: bool,
    // 教师课时费
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub teacher_rate: Option<f64>,
    // 本节课应结算金额
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub payout_amount: Option<f64>,
    // 结算状态，仅在课程完成后有意义
    #[serde(default)]
    pub payout_status: Option<PayoutStatus>,
}

impl LessonHistoryItem {
    /// 开始日期（ISO 日期前缀 `YYYY-MM-DD`）
    pub fn start_date(&self) -> &str {
        self.start_time.get(..10).unwrap_or(&self.start_time)
    }

    /// 仅在课程完成后返回结算状态
    pub fn effective_payout_status(&self) -> Option<PayoutStatus> {
        match self.status {
            LessonStatus::Completed => self.payout_status,
            _ => None,
        }
    }

    /// 是否提供状态编辑入口；与结算状态无关
    pub fn is_editable(&self) -> bool {
        !self.status.is_terminal()
    }
}

/// 学生视角的课程（我的课程）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct StudentLesson {
    pub id: i64,
    pub teacher_name: String,
    pub start_time: String,
    pub end_time: String,
    pub status: LessonStatus,
    // 该课程下布置的作业
    #[serde(default)]
    pub assignments: Vec<crate::models::assignments::entities::Assignment>,
}
