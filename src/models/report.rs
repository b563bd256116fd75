//! 分析报告模型
//!
//! 与后端 JSON 格式保持一致（camelCase 字段名），
//! 报告既可能由后端直接返回结构化对象，也可能由解析器从自由文本生成

use serde::{Deserialize, Serialize};

/// 错误类别
///
/// 序列化值为报告中展示的阿拉伯语标签
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ErrorKind {
    /// 语法错误
    #[serde(rename = "نحوي")]
    Grammar,
    /// 词法（构词）错误
    #[serde(rename = "صرفي")]
    Morphology,
    /// 拼写错误
    #[serde(rename = "إملائي")]
    Spelling,
    /// 句子结构错误
    #[serde(rename = "تركيبي")]
    Syntax,
}

impl ErrorKind {
    /// 展示用阿拉伯语标签
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::Grammar => "نحوي",
            ErrorKind::Morphology => "صرفي",
            ErrorKind::Spelling => "إملائي",
            ErrorKind::Syntax => "تركيبي",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 错误严重程度
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Severity {
    #[serde(rename = "منخفض")]
    Low,
    #[serde(rename = "متوسط")]
    Medium,
    #[serde(rename = "عالي")]
    High,
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Medium
    }
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "منخفض",
            Severity::Medium => "متوسط",
            Severity::High => "عالي",
        }
    }
}

/// 单条语言错误
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorFinding {
    /// 错误类别
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    /// 出错的词或片段
    pub word: String,
    /// 修改建议
    pub suggestion: String,
    /// 粗略位置描述（后端不提供精确偏移，默认"عام"）
    #[serde(default = "default_position")]
    pub position: String,
    /// 严重程度，缺省为中等
    #[serde(default)]
    pub severity: Severity,
    /// 错误说明
    #[serde(default)]
    pub explanation: String,
}

fn default_position() -> String {
    "عام".to_string()
}

/// 结构化分析报告
///
/// 字段缺省值保证任何形态的后端响应都能落到一个可展示的报告上
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisReport {
    /// 总体评分 0-100
    pub overall_score: u8,
    /// 被分析文本的词数
    pub total_words: usize,
    /// 被分析文本的句数
    pub total_sentences: usize,
    /// 可读性等级
    pub readability_level: String,
    /// 检出的错误列表（发现顺序），缺省为空而非 null
    pub errors: Vec<ErrorFinding>,
    /// 文本优点
    pub strengths: Vec<String>,
    /// 改进建议
    pub recommendations: Vec<String>,
    /// 后端返回的原始分析文本（如果有），用于展示
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_analysis: Option<String>,
}

impl Default for AnalysisReport {
    fn default() -> Self {
        Self {
            overall_score: 0,
            total_words: 0,
            total_sentences: 0,
            readability_level: "متوسط".to_string(),
            errors: Vec::new(),
            strengths: Vec::new(),
            recommendations: Vec::new(),
            raw_analysis: None,
        }
    }
}

impl AnalysisReport {
    /// 将评分收敛到 [0, 100]
    pub fn clamp_score(&mut self) {
        if self.overall_score > 100 {
            self.overall_score = 100;
        }
    }
}

/// 统计非空的词数（按空白分割）
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// 统计非空的句数
///
/// 句子边界为 . ! ? 和阿拉伯语问号 ؟
pub fn count_sentences(text: &str) -> usize {
    text.split(['.', '!', '?', '؟'])
        .filter(|s| !s.trim().is_empty())
        .count()
}
