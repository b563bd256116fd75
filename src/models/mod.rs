//! 数据模型层
//!
//! 定义分析报告、错误条目和上传图片等核心数据结构

pub mod image;
pub mod report;

pub use image::ImageFile;
pub use report::{AnalysisReport, ErrorFinding, ErrorKind, Severity};
