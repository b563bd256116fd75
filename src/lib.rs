//! # Insya Analyzer
//!
//! 阿拉伯语文本分析客户端：上传含阿拉伯语文本的图片，调用远端 OCR 提取文本，
//! 也可以让后端生成一段示例文本，再提交语言分析得到错误报告和质量评分。
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 基础设施层（Api）
//! - `api/` - 封装与后端三个 HTTP 端点的交互，持有超时策略
//! - `BackendClient` - 唯一的网络出口
//!
//! ### ② 数据层（Models）
//! - `models/` - 分析报告、错误条目、上传图片及其本地校验
//!
//! ### ③ 业务能力层（Services）
//! - `services/report_parser` - 把松散的分析载荷规整为结构化报告（永不失败）
//! - `services/fallback` - 分析失败时本地合成兜底报告
//!
//! ### ④ 流程层（Workflow）
//! - `workflow/` - 六阶段向导状态机 + 远程操作编排
//! - `Session` - 单一可变的会话状态
//! - `AnalysisFlow` - 流程编排（选图 → 提取 → 分析 → 结果）
//! - `ProgressTicker` - 处理期间的进度模拟
//!
//! ## 层次关系
//!
//! ```text
//! workflow::AnalysisFlow (驱动 Session 状态迁移)
//!     ↓
//! services (能力层：parse / fallback)
//!     ↓
//! api::BackendClient (基础设施：HTTP)
//! ```
//!
//! 展示层不在本 crate 范围内：任何 UI 只需持有 `AnalysisFlow`，
//! 轮询 `Session` 和进度句柄即可渲染。

pub mod api;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod services;
pub mod workflow;

// 重新导出常用类型
pub use api::{BackendClient, NO_ARABIC_TEXT_SENTINEL};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{AnalysisReport, ErrorFinding, ImageFile};
pub use services::parse_analysis;
pub use workflow::{AnalysisFlow, AnalyzeOutcome, ExtractOutcome, Session, Stage};
