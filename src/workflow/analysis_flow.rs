//! 分析流程 - 流程层
//!
//! 编排三个远程操作（提取 / 分析 / 生成并分析）并驱动会话状态迁移。
//!
//! 失败策略：
//! - 提取失败回退到预览，用户可以重试
//! - 分析失败不阻断流程，本地合成兜底报告并照常进入结果页
//! - 同一时刻最多一个远程操作，处理中拒绝新的操作和文本编辑

use tracing::{info, warn};

use crate::api::{BackendClient, GeneratedAnalysis, NO_ARABIC_TEXT_SENTINEL};
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult, FlowError};
use crate::logger::truncate_text;
use crate::models::ImageFile;
use crate::services::fallback;
use crate::services::parse_analysis;
use crate::workflow::progress::{ProgressHandle, ProgressTicker};
use crate::workflow::{Session, Stage};

/// 提取操作的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractOutcome {
    /// 成功提取到文本
    Extracted,
    /// 图片中没有阿拉伯语文本（后端哨兵值或空结果）
    NoArabicText,
    /// 客户端超时
    TimedOut,
    /// 网络或服务器错误
    ConnectionFailed,
}

impl ExtractOutcome {
    /// 面向用户的阿拉伯语提示，成功时无提示
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            ExtractOutcome::Extracted => None,
            ExtractOutcome::NoArabicText => Some("لم يتم العثور على نص عربي في الصورة"),
            ExtractOutcome::TimedOut => Some("انتهت مهلة الطلب. يرجى المحاولة مرة أخرى"),
            ExtractOutcome::ConnectionFailed => Some("فشل في الاتصال بخادم استخراج النص"),
        }
    }
}

/// 分析操作的结果
///
/// 两条分析路径都保证走到结果页，区别只在报告来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzeOutcome {
    /// 使用了后端返回的分析
    Analyzed,
    /// 后端失败，使用了本地兜底报告
    FallbackUsed,
}

/// 分析流程
///
/// 持有会话、后端客户端和进度定时器，是它们唯一的修改方
pub struct AnalysisFlow {
    config: Config,
    client: BackendClient,
    session: Session,
    progress: ProgressTicker,
}

impl AnalysisFlow {
    /// 创建新的分析流程
    pub fn new(config: Config) -> Self {
        let client = BackendClient::new(&config);
        let progress = ProgressTicker::new(config.progress_tick_ms);
        Self {
            config,
            client,
            session: Session::new(),
            progress,
        }
    }

    /// 只读访问会话状态
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// 进度只读句柄，供展示层轮询
    pub fn progress_handle(&self) -> ProgressHandle {
        self.progress.handle()
    }

    /// 选择图片（上传 → 预览）
    ///
    /// 先本地校验类型和大小，校验失败不改变任何状态也不发网络请求。
    /// 选择新图片会清掉上一轮的文本和报告。
    pub fn select_image(&mut self, image: ImageFile) -> AppResult<()> {
        self.ensure_idle()?;
        image.validate(self.config.max_image_bytes)?;

        info!(
            "📷 已选择图片: {} ({} 字节)",
            image.file_name,
            image.size()
        );

        self.session.selected_image = Some(image);
        self.session.stage = Stage::Preview;
        self.session.extracted_text.clear();
        self.session.report = None;
        self.session.last_error = None;
        Ok(())
    }

    /// 提取图片中的文本（预览 → 提取中 → 已提取 / 回退预览）
    pub async fn extract_text(&mut self) -> AppResult<ExtractOutcome> {
        self.ensure_idle()?;
        let image = self
            .session
            .selected_image
            .clone()
            .ok_or(FlowError::NoImageSelected)?;

        self.begin_processing(Stage::Extracting);
        info!("🔍 正在提取图片中的文本...");

        let outcome = match self.client.extract_text(&image).await {
            Ok(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() || trimmed == NO_ARABIC_TEXT_SENTINEL {
                    warn!("⚠️ 图片中未找到阿拉伯语文本");
                    self.session.stage = Stage::Preview;
                    ExtractOutcome::NoArabicText
                } else {
                    info!("✓ 提取成功: {}", truncate_text(trimmed, 40));
                    self.session.extracted_text = text;
                    self.session.stage = Stage::Extracted;
                    ExtractOutcome::Extracted
                }
            }
            Err(e) if e.is_timeout() => {
                warn!("⚠️ 提取超时: {}", e);
                self.session.stage = Stage::Preview;
                ExtractOutcome::TimedOut
            }
            Err(e) => {
                warn!("⚠️ 提取失败: {}", e);
                self.session.stage = Stage::Preview;
                ExtractOutcome::ConnectionFailed
            }
        };

        self.finish_processing();
        Ok(outcome)
    }

    /// 分析当前文本（已提取 → 分析中 → 结果）
    ///
    /// 失败不回退：记录 `last_error`，合成兜底报告，照常进入结果页
    pub async fn analyze_text(&mut self) -> AppResult<AnalyzeOutcome> {
        self.ensure_idle()?;
        if !self.session.has_text() {
            return Err(FlowError::EmptyText.into());
        }
        let text = self.session.extracted_text.clone();

        self.begin_processing(Stage::Analyzing);
        self.session.last_error = None;
        info!("📝 正在分析文本 ({} 词)...", crate::models::report::count_words(&text));

        let outcome = match self.client.analyze_text(&text).await {
            Ok(payload) => {
                self.session.report = Some(parse_analysis(&payload, &text));
                info!("✓ 分析完成");
                AnalyzeOutcome::Analyzed
            }
            Err(AppError::Api(e @ ApiError::BadResponse { .. })) => {
                warn!("⚠️ 后端分析失败，使用兜底报告: {}", e);
                let message = e
                    .server_message()
                    .unwrap_or("فشل في تحليل النص")
                    .to_string();
                self.session.last_error = Some(message);
                self.session.report = Some(fallback::analysis_bad_response(&text));
                AnalyzeOutcome::FallbackUsed
            }
            Err(e) => {
                warn!("⚠️ 分析请求失败，使用兜底报告: {}", e);
                self.session.last_error = Some("فشل في الاتصال بخادم التحليل".to_string());
                self.session.report = Some(fallback::analysis_network_failure(&text));
                AnalyzeOutcome::FallbackUsed
            }
        };

        // 分析路径无条件推进到结果页
        self.session.stage = Stage::Results;
        self.finish_processing();
        Ok(outcome)
    }

    /// 生成一段文本并分析（→ 分析中 → 结果）
    ///
    /// 任何失败都降级为固定兜底文本 + 兜底报告
    pub async fn generate_and_analyze(&mut self) -> AppResult<AnalyzeOutcome> {
        self.ensure_idle()?;

        self.begin_processing(Stage::Analyzing);
        self.session.last_error = None;
        info!("✨ 正在生成并分析文本...");

        let outcome = match self
            .client
            .generate_and_analyze(&self.config.generation_prompt)
            .await
        {
            Ok(GeneratedAnalysis {
                generated_text,
                analysis,
            }) => {
                self.session.report = Some(parse_analysis(&analysis, &generated_text));
                self.session.extracted_text = generated_text;
                info!("✓ 生成并分析完成");
                AnalyzeOutcome::Analyzed
            }
            Err(e) => {
                warn!("⚠️ 生成并分析失败，使用兜底文本: {}", e);
                self.session.last_error = Some(generation_error_message(&e));
                let (text, report) = fallback::generation_failure();
                self.session.extracted_text = text;
                self.session.report = Some(report);
                AnalyzeOutcome::FallbackUsed
            }
        };

        self.session.stage = Stage::Results;
        self.finish_processing();
        Ok(outcome)
    }

    /// 用户编辑提取出来的文本，处理中不允许
    pub fn set_extracted_text(&mut self, text: impl Into<String>) -> AppResult<()> {
        if self.session.processing {
            return Err(FlowError::EditingWhileProcessing.into());
        }
        self.session.extracted_text = text.into();
        Ok(())
    }

    /// 重置：任何阶段都回到初始上传状态
    pub fn reset(&mut self) {
        info!("🔄 重置会话");
        self.session.clear();
        self.progress.idle();
    }

    // ========== 内部状态管理 ==========

    fn ensure_idle(&self) -> AppResult<()> {
        if self.session.processing {
            return Err(FlowError::Busy.into());
        }
        Ok(())
    }

    fn begin_processing(&mut self, stage: Stage) {
        self.session.processing = true;
        self.session.stage = stage;
        self.progress.start();
    }

    fn finish_processing(&mut self) {
        // 与前端行为一致：先打满 100，处理标志清除后归零
        self.progress.complete();
        self.session.processing = false;
        self.progress.idle();
    }
}

/// 生成并分析失败时的用户可见文案分类
fn generation_error_message(err: &AppError) -> String {
    match err {
        AppError::Api(ApiError::Timeout { .. }) => {
            "انتهت مهلة الطلب. يرجى المحاولة مرة أخرى".to_string()
        }
        AppError::Api(ApiError::RequestFailed { .. }) => {
            "فشل في الاتصال بالخادم. تأكد من تشغيل الخادم".to_string()
        }
        AppError::Api(ApiError::BadResponse {
            message: Some(message),
            ..
        }) => message.clone(),
        _ => "حدث خطأ أثناء توليد وتحليل النص".to_string(),
    }
}
