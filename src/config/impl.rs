use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;
use std::time::Duration;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // 内置默认值，保证无配置文件时也能启动
            .set_default("app.environment", "development")?
            .set_default("app.log_level", "info")?
            .set_default("api.base_url", "http://localhost:8000")?
            .set_default("api.token", "")?
            .set_default("api.timeout_ms", 15_000)?
            .set_default("ui.toast_dismiss_ms", 3_200)?
            .set_default("ui.currency_symbol", "$")?
            // 首先加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖
            .add_source(
                Environment::with_prefix("TUTOR_PORTAL")
                    .separator("__")
                    .try_parsing(true),
            );

        // 支持从环境变量加载
        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("api.base_url", std::env::var("API_BASE_URL").ok())?
            .set_override_option("api.token", std::env::var("API_TOKEN").ok())?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        // 统一去掉结尾斜杠，路径拼接时再补
        while app_config.api.base_url.ends_with('/') {
            app_config.api.base_url.pop();
        }

        Ok(app_config)
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 请求超时
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.api.timeout_ms)
    }

    /// 提示自动消失延迟
    pub fn toast_dismiss_delay(&self) -> Duration {
        Duration::from_millis(self.ui.toast_dismiss_ms)
    }

    /// 获取 Bearer Token (如果配置了)
    pub fn bearer_token(&self) -> Option<&str> {
        if self.api.token.is_empty() {
            None
        } else {
            Some(&self.api.token)
        }
    }
}
