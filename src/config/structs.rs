use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ApiConfig,
    pub ui: UiConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub environment: String,
    pub log_level: String,
}

/// 后端 API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String, // 例如 http://localhost:8000（不带结尾斜杠）
    #[serde(skip_serializing, default)] // 不输出到日志或调试信息
    pub token: String,
    pub timeout_ms: u64, // 单次请求超时 (毫秒)
}

/// 界面行为配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub toast_dismiss_ms: u64, // 提示自动消失延迟 (毫秒)
    pub currency_symbol: String,
}
