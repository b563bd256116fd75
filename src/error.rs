use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// 本地校验错误（文件类型 / 大小）
    Validation(ValidationError),
    /// 后端 API 调用错误
    Api(ApiError),
    /// 流程状态错误
    Flow(FlowError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(e) => write!(f, "校验错误: {}", e),
            AppError::Api(e) => write!(f, "API错误: {}", e),
            AppError::Flow(e) => write!(f, "流程错误: {}", e),
            AppError::Other(msg) => write!(f, "错误: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Api(e) => Some(e),
            _ => None,
        }
    }
}

/// 本地校验错误
///
/// 上传前在客户端完成，不发起任何网络请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// 不是图片文件
    NotAnImage { mime_type: String },
    /// 文件超过大小上限
    FileTooLarge { size: usize, max: usize },
}

impl ValidationError {
    /// 面向用户的阿拉伯语提示（与前端原有文案一致）
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::NotAnImage { .. } => {
                "يرجى اختيار ملف صورة صالح (PNG, JPG, JPEG)"
            }
            ValidationError::FileTooLarge { .. } => {
                "حجم الملف كبير جداً. الحد الأقصى 10 ميجابايت"
            }
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NotAnImage { mime_type } => {
                write!(f, "文件不是图片 (MIME类型: {})", mime_type)
            }
            ValidationError::FileTooLarge { size, max } => {
                write!(f, "文件过大: {} 字节, 上限 {} 字节", size, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// 后端 API 调用错误
#[derive(Debug)]
pub enum ApiError {
    /// 网络请求失败
    RequestFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 请求超时（客户端侧超时中断）
    Timeout { endpoint: String, secs: u64 },
    /// HTTP 状态码非 2xx
    BadStatus { endpoint: String, status: u16 },
    /// 后端返回 success=false 或响应结构缺字段
    BadResponse {
        endpoint: String,
        message: Option<String>,
    },
    /// JSON 解析失败
    JsonParseFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApiError {
    /// 是否为客户端超时
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout { .. })
    }

    /// 后端明确返回的错误文案（如果有）
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::BadResponse { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::RequestFailed { endpoint, source } => {
                write!(f, "API请求失败 ({}): {}", endpoint, source)
            }
            ApiError::Timeout { endpoint, secs } => {
                write!(f, "API请求超时 ({}): 超过 {} 秒", endpoint, secs)
            }
            ApiError::BadStatus { endpoint, status } => {
                write!(f, "API返回错误状态码 ({}): HTTP {}", endpoint, status)
            }
            ApiError::BadResponse { endpoint, message } => {
                write!(f, "API返回失败响应 ({}): {:?}", endpoint, message)
            }
            ApiError::JsonParseFailed { endpoint, source } => {
                write!(f, "JSON解析失败 ({}): {}", endpoint, source)
            }
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::RequestFailed { source, .. }
            | ApiError::JsonParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 流程状态错误
///
/// 对应状态机拒绝的非法操作，不会破坏会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowError {
    /// 已有远程操作进行中
    Busy,
    /// 尚未选择图片
    NoImageSelected,
    /// 待分析文本为空
    EmptyText,
    /// 处理中不允许编辑文本
    EditingWhileProcessing,
}

impl fmt::Display for FlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowError::Busy => write!(f, "已有远程操作进行中，拒绝并发操作"),
            FlowError::NoImageSelected => write!(f, "尚未选择图片"),
            FlowError::EmptyText => write!(f, "待分析文本为空"),
            FlowError::EditingWhileProcessing => write!(f, "处理中不允许编辑文本"),
        }
    }
}

impl std::error::Error for FlowError {}

// ========== 从常见错误类型转换 ==========

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        AppError::Api(err)
    }
}

impl From<FlowError> for AppError {
    fn from(err: FlowError) -> Self {
        AppError::Flow(err)
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建API超时错误
    pub fn api_timeout(endpoint: impl Into<String>, secs: u64) -> Self {
        AppError::Api(ApiError::Timeout {
            endpoint: endpoint.into(),
            secs,
        })
    }

    /// 是否为客户端超时错误
    pub fn is_timeout(&self) -> bool {
        matches!(self, AppError::Api(e) if e.is_timeout())
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
