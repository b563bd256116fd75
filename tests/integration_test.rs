use insya_analyzer::logger;
use insya_analyzer::workflow::{AnalyzeOutcome, ExtractOutcome};
use insya_analyzer::{AnalysisFlow, Config, ImageFile, Stage};

fn sample_image() -> ImageFile {
    // 1x1 PNG，仅用于验证上传通路
    let png: Vec<u8> = vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48,
        0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00,
        0x00, 0x1F, 0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78,
        0x9C, 0x63, 0x00, 0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00,
        0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];
    ImageFile::new("pixel.png", "image/png", png)
}

/// 完整的降级路径：后端不可达时流程仍然走到结果页
#[tokio::test]
async fn full_flow_degrades_without_backend() {
    let config = Config {
        api_base_url: "http://127.0.0.1:9".to_string(),
        progress_tick_ms: 10,
        ..Config::default()
    };
    let mut flow = AnalysisFlow::new(config);

    // 选图 → 提取失败回退预览
    flow.select_image(sample_image()).unwrap();
    assert_eq!(flow.session().stage, Stage::Preview);

    let outcome = flow.extract_text().await.unwrap();
    assert_eq!(outcome, ExtractOutcome::ConnectionFailed);
    assert_eq!(flow.session().stage, Stage::Preview);

    // 手动填入文本 → 分析失败仍到结果页
    flow.set_extracted_text("مرحبا بك. كيف حالك؟").unwrap();
    let outcome = flow.analyze_text().await.unwrap();
    assert_eq!(outcome, AnalyzeOutcome::FallbackUsed);
    assert_eq!(flow.session().stage, Stage::Results);
    assert!(flow.session().report.is_some());
    assert!(flow.session().last_error.is_some());

    // 重置回到初始状态
    flow.reset();
    assert_eq!(flow.session().stage, Stage::Upload);
}

/// 提取超时：指向不可路由地址并把超时压到 1 秒，
/// 验证回退预览 + 超时专属文案
#[tokio::test]
#[ignore] // 依赖网络环境（需要 10.255.255.1 不可达且不被即时拒绝）
async fn extract_timeout_rolls_back_with_timeout_message() {
    logger::init();

    let config = Config {
        api_base_url: "http://10.255.255.1".to_string(),
        ocr_timeout_secs: 1,
        progress_tick_ms: 10,
        ..Config::default()
    };
    let mut flow = AnalysisFlow::new(config);
    flow.select_image(sample_image()).unwrap();

    let outcome = flow.extract_text().await.unwrap();
    assert_eq!(outcome, ExtractOutcome::TimedOut);
    assert_eq!(
        outcome.user_message(),
        Some("انتهت مهلة الطلب. يرجى المحاولة مرة أخرى")
    );
    assert_eq!(flow.session().stage, Stage::Preview);
}

/// 对真实后端的端到端分析
#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn analyze_against_live_backend() {
    logger::init();

    let config = Config::from_env();
    let mut flow = AnalysisFlow::new(config);

    flow.set_extracted_text("ذهب الطالب إلى المدرسة. هو يحب القراءة؟").unwrap();
    let _outcome = flow.analyze_text().await.expect("分析请求失败");

    assert_eq!(flow.session().stage, Stage::Results);
    let report = flow.session().report.as_ref().expect("应该有分析报告");
    assert!(report.overall_score <= 100);
}

/// 对真实后端的生成并分析
#[tokio::test]
#[ignore]
async fn generate_against_live_backend() {
    logger::init();

    let config = Config::from_env();
    let mut flow = AnalysisFlow::new(config);

    let _outcome = flow.generate_and_analyze().await.expect("生成请求失败");

    assert_eq!(flow.session().stage, Stage::Results);
    assert!(!flow.session().extracted_text.is_empty());
    assert!(flow.session().report.is_some());
}
