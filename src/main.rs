use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use insya_analyzer::logger;
use insya_analyzer::workflow::AnalyzeOutcome;
use insya_analyzer::{AnalysisFlow, AnalysisReport, Config, ImageFile};

/// 命令行驱动器
///
/// 浏览器展示层不在本 crate 范围内，这里用一个最小驱动器替代：
/// 带图片路径参数时走 选图 → 提取 → 分析，不带参数时走 生成并分析。
#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    // 加载配置
    let config = Config::from_env();
    logger::log_startup(&config);

    let mut flow = AnalysisFlow::new(config);

    match std::env::args().nth(1) {
        Some(path) => run_image_pipeline(&mut flow, &path).await?,
        None => run_generate_pipeline(&mut flow).await?,
    }

    Ok(())
}

/// 图片路径 → 提取 → 分析
async fn run_image_pipeline(flow: &mut AnalysisFlow, path: &str) -> Result<()> {
    let bytes = std::fs::read(path)?;
    let file_name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let image = ImageFile::new(&file_name, guess_mime(path), bytes);

    if let Err(e) = flow.select_image(image) {
        warn!("图片校验失败: {}", e);
        return Ok(());
    }

    let outcome = flow.extract_text().await?;
    if let Some(message) = outcome.user_message() {
        warn!("提取未成功: {}", message);
        return Ok(());
    }

    let outcome = flow.analyze_text().await?;
    if outcome == AnalyzeOutcome::FallbackUsed {
        if let Some(message) = flow.session().last_error.as_deref() {
            warn!("تحذير: {}. تم استخدام تحليل أساسي.", message);
        }
    }

    if let Some(report) = flow.session().report.as_ref() {
        print_report(&flow.session().extracted_text, report);
    }

    Ok(())
}

/// 生成并分析
async fn run_generate_pipeline(flow: &mut AnalysisFlow) -> Result<()> {
    let outcome = flow.generate_and_analyze().await?;
    if outcome == AnalyzeOutcome::FallbackUsed {
        if let Some(message) = flow.session().last_error.as_deref() {
            warn!("تحذير: {}. تم استخدام تحليل أساسي.", message);
        }
    }

    if let Some(report) = flow.session().report.as_ref() {
        print_report(&flow.session().extracted_text, report);
    }

    Ok(())
}

/// 打印分析报告
fn print_report(text: &str, report: &AnalysisReport) {
    info!("{}", "=".repeat(60));
    info!("📄 النص: {}", text);
    info!(
        "📊 النتيجة الإجمالية: {} من 100 | كلمات: {} | جمل: {} | مستوى القراءة: {}",
        report.overall_score, report.total_words, report.total_sentences, report.readability_level
    );
    info!("الأخطاء المكتشفة ({})", report.errors.len());
    for finding in &report.errors {
        info!(
            "  [{}] {} -> {} ({})",
            finding.kind,
            finding.word,
            finding.suggestion,
            finding.severity.label()
        );
    }
    for strength in &report.strengths {
        info!("  ✓ {}", strength);
    }
    for rec in &report.recommendations {
        info!("  • {}", rec);
    }
    info!("{}", "=".repeat(60));
}

/// 根据扩展名猜测 MIME 类型
fn guess_mime(path: &str) -> &'static str {
    match Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}
