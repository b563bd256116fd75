//! 后端 API 模块（基础设施层）
//!
//! 封装与分析后端三个 HTTP 端点的交互：
//! - `POST /ocr` - 上传图片提取文本
//! - `POST /analyze_arabic` - 分析文本
//! - `POST /generate_and_analyze` - 生成并分析文本

pub mod client;

pub use client::{BackendClient, GeneratedAnalysis, NO_ARABIC_TEXT_SENTINEL};
