/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 后端服务基础URL
    pub api_base_url: String,
    /// OCR 提取请求超时（秒）
    pub ocr_timeout_secs: u64,
    /// 生成并分析请求超时（秒）
    pub generate_timeout_secs: u64,
    /// 上传图片大小上限（字节）
    pub max_image_bytes: usize,
    /// 进度模拟定时器间隔（毫秒）
    pub progress_tick_ms: u64,
    /// 生成文本使用的固定提示词
    pub generation_prompt: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://insya-analizer-backend.vercel.app".to_string(),
            ocr_timeout_secs: 30,
            generate_timeout_secs: 60,
            max_image_bytes: 10 * 1024 * 1024,
            progress_tick_ms: 200,
            generation_prompt: "اكتب لي نصا عربيا قصيرا عن أهمية التعليم".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(default.api_base_url),
            ocr_timeout_secs: std::env::var("OCR_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.ocr_timeout_secs),
            generate_timeout_secs: std::env::var("GENERATE_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.generate_timeout_secs),
            max_image_bytes: std::env::var("MAX_IMAGE_BYTES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_image_bytes),
            progress_tick_ms: std::env::var("PROGRESS_TICK_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.progress_tick_ms),
            generation_prompt: std::env::var("GENERATION_PROMPT").unwrap_or(default.generation_prompt),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}
