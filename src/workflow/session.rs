//! 会话状态
//!
//! 单一可变的客户端状态单元。所有字段只由 [`super::AnalysisFlow`] 修改，
//! 展示层只读。

use crate::models::{AnalysisReport, ImageFile};
use crate::workflow::Stage;

/// 分析会话
#[derive(Debug, Default)]
pub struct Session {
    /// 当前阶段
    pub stage: Stage,
    /// 已选择的图片（重置时清空）
    pub selected_image: Option<ImageFile>,
    /// 提取 / 生成得到的文本，空闲时允许用户编辑
    pub extracted_text: String,
    /// 最近一次分析报告，每次分析整体替换而非合并
    pub report: Option<AnalysisReport>,
    /// 是否有远程操作进行中
    pub processing: bool,
    /// 最近一次分析失败的用户可见信息
    pub last_error: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// 回到初始上传状态，清空全部字段
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// 是否已有可以分析的文本
    pub fn has_text(&self) -> bool {
        !self.extracted_text.trim().is_empty()
    }
}
