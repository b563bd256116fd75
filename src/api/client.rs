//! 分析后端 HTTP 客户端
//!
//! 封装所有与后端的网络交互。超时策略与原前端一致：
//! OCR 提取 30 秒、生成并分析 60 秒由客户端超时中断，
//! 文本分析不设客户端超时，依赖传输层自行了断。

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::{ApiError, AppResult};
use crate::models::ImageFile;

/// 后端在图片中未找到阿拉伯语文本时返回的哨兵值
pub const NO_ARABIC_TEXT_SENTINEL: &str = "لا يوجد نص عربي في الصورة";

/// `/generate_and_analyze` 的成功载荷
#[derive(Debug, Clone)]
pub struct GeneratedAnalysis {
    /// 后端生成的阿拉伯语文本
    pub generated_text: String,
    /// 分析结果（字符串或对象，交给解析器规整）
    pub analysis: Value,
}

#[derive(Debug, Deserialize, Default)]
struct OcrResponse {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct AnalyzeResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    analysis: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct GenerateResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    generated_text: Option<String>,
    #[serde(default)]
    analysis: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

/// 分析后端客户端
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    ocr_timeout: Duration,
    generate_timeout: Duration,
}

impl BackendClient {
    /// 创建新的后端客户端
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            ocr_timeout: Duration::from_secs(config.ocr_timeout_secs),
            generate_timeout: Duration::from_secs(config.generate_timeout_secs),
        }
    }

    /// 上传图片并提取文本
    ///
    /// # 返回
    /// 后端返回的 `text` 字段；字段缺失按空字符串处理，
    /// 哨兵值的判断交给流程层
    pub async fn extract_text(&self, image: &ImageFile) -> AppResult<String> {
        let endpoint = "/ocr";
        let url = format!("{}{}", self.base_url, endpoint);

        debug!(
            "上传图片提取文本: {} ({} 字节, {})",
            image.file_name,
            image.size(),
            image.mime_type
        );

        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime_type)
            .map_err(|e| ApiError::RequestFailed {
                endpoint: endpoint.to_string(),
                source: Box::new(e),
            })?;
        let form = Form::new().part("image", part);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .timeout(self.ocr_timeout)
            .send()
            .await
            .map_err(|e| map_send_error(endpoint, self.ocr_timeout, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::BadStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let body: OcrResponse = response.json().await.map_err(|e| ApiError::JsonParseFailed {
            endpoint: endpoint.to_string(),
            source: Box::new(e),
        })?;

        Ok(body.text.unwrap_or_default())
    }

    /// 分析指定文本
    ///
    /// # 返回
    /// 后端的 `analysis` 字段原样返回（字符串或对象），
    /// 由 [`crate::services::parse_analysis`] 负责规整
    pub async fn analyze_text(&self, text: &str) -> AppResult<Value> {
        let endpoint = "/analyze_arabic";
        let url = format!("{}{}", self.base_url, endpoint);

        debug!("提交文本分析: {} 字符", text.chars().count());

        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed {
                endpoint: endpoint.to_string(),
                source: Box::new(e),
            })?;

        let status = response.status();
        let body: AnalyzeResponse =
            response.json().await.map_err(|e| ApiError::JsonParseFailed {
                endpoint: endpoint.to_string(),
                source: Box::new(e),
            })?;

        if !status.is_success() || !body.success {
            return Err(ApiError::BadResponse {
                endpoint: endpoint.to_string(),
                message: body.error,
            }
            .into());
        }

        Ok(body.analysis.unwrap_or(Value::Null))
    }

    /// 用固定提示词生成一段文本并同时分析
    pub async fn generate_and_analyze(&self, prompt: &str) -> AppResult<GeneratedAnalysis> {
        let endpoint = "/generate_and_analyze";
        let url = format!("{}{}", self.base_url, endpoint);

        debug!("请求生成并分析文本");

        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "prompt": prompt }))
            .timeout(self.generate_timeout)
            .send()
            .await
            .map_err(|e| map_send_error(endpoint, self.generate_timeout, e))?;

        let status = response.status();

        // 失败状态下后端可能仍然带有 error 字段，尽力取出来
        if !status.is_success() {
            let message = response
                .json::<GenerateResponse>()
                .await
                .ok()
                .and_then(|b| b.error);
            return Err(ApiError::BadResponse {
                endpoint: endpoint.to_string(),
                message,
            }
            .into());
        }

        let body: GenerateResponse =
            response.json().await.map_err(|e| ApiError::JsonParseFailed {
                endpoint: endpoint.to_string(),
                source: Box::new(e),
            })?;

        match (body.success, body.generated_text, body.analysis) {
            (true, Some(generated_text), Some(analysis)) => Ok(GeneratedAnalysis {
                generated_text,
                analysis,
            }),
            _ => Err(ApiError::BadResponse {
                endpoint: endpoint.to_string(),
                message: body.error,
            }
            .into()),
        }
    }
}

/// 把 reqwest 的发送错误映射为领域错误，区分客户端超时
fn map_send_error(endpoint: &str, timeout: Duration, err: reqwest::Error) -> crate::error::AppError {
    if err.is_timeout() {
        ApiError::Timeout {
            endpoint: endpoint.to_string(),
            secs: timeout.as_secs(),
        }
        .into()
    } else {
        ApiError::RequestFailed {
            endpoint: endpoint.to_string(),
            source: Box::new(err),
        }
        .into()
    }
}
