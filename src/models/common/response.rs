use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 后端统一的错误响应结构: {"error": "..."}
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    /// 从原始响应体中解析错误信息，非 JSON 或缺少字段时返回 None
    pub fn parse(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .map(|b| b.error)
            .filter(|e| !e.trim().is_empty())
    }
}
