//! 流程阶段
//!
//! 对应前端向导的六个步骤。阶段只通过 [`super::AnalysisFlow`] 的操作迁移，
//! 成功路径单调前进，提取失败回退到预览，重置回到上传。

use serde::{Deserialize, Serialize};

/// 向导阶段（1-6）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    /// 1. 上传图片
    Upload,
    /// 2. 预览
    Preview,
    /// 3. 提取文本中
    Extracting,
    /// 4. 文本已提取
    Extracted,
    /// 5. 分析中
    Analyzing,
    /// 6. 结果
    Results,
}

impl Default for Stage {
    fn default() -> Self {
        Stage::Upload
    }
}

impl Stage {
    /// 阶段编号（1-6），与前端步骤条一致
    pub fn number(&self) -> u8 {
        match self {
            Stage::Upload => 1,
            Stage::Preview => 2,
            Stage::Extracting => 3,
            Stage::Extracted => 4,
            Stage::Analyzing => 5,
            Stage::Results => 6,
        }
    }

    /// 步骤条上的阿拉伯语标签
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Upload => "رفع الصورة",
            Stage::Preview => "معاينة",
            Stage::Extracting => "استخراج النص",
            Stage::Extracted => "النص المستخرج",
            Stage::Analyzing => "التحليل",
            Stage::Results => "النتائج",
        }
    }

    /// 阶段下方的阿拉伯语提示文案
    pub fn description(&self) -> &'static str {
        match self {
            Stage::Upload => "قم برفع صورة تحتوي على نص عربي",
            Stage::Preview => "معاينة الصورة المرفوعة",
            Stage::Extracting => "استخراج النص...",
            Stage::Extracted => "النص جاهز للتحليل",
            Stage::Analyzing => "تحليل النص...",
            Stage::Results => "تم الانتهاء من التحليل",
        }
    }

    /// 是否为处理中阶段（提取中 / 分析中）
    pub fn is_busy_stage(&self) -> bool {
        matches!(self, Stage::Extracting | Stage::Analyzing)
    }
}
