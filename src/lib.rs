//! Tutor Portal - 家教平台前端的业务流程核心
//!
//! 封装对后端 REST 接口的调用与页面侧的流程逻辑。
//!
//! # 架构
//! - `api`: 后端接口抽象与 reqwest 实现
//! - `config`: 配置管理
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义（同时导出 TypeScript 类型）
//! - `runtime`: 启动上下文与请求级忙碌标记
//! - `services`: 业务流程层（课程状态、作业编写/布置/作答/结果、提示）
//! - `utils`: 格式化与校验工具

pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod runtime;
pub mod services;
pub mod utils;
