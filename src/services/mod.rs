//! 业务能力层
//!
//! - `report_parser` - 把后端返回的松散分析载荷规整为结构化报告
//! - `fallback` - 分析失败时本地合成兜底报告

pub mod fallback;
pub mod report_parser;

pub use report_parser::parse_analysis;
