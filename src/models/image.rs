//! 上传图片模型
//!
//! 封装待上传的图片二进制及其元信息，并负责上传前的本地校验

use crate::error::ValidationError;

/// 待上传的图片文件
#[derive(Debug, Clone)]
pub struct ImageFile {
    /// 文件名（multipart 上传时使用）
    pub file_name: String,
    /// MIME 类型，例如 image/png
    pub mime_type: String,
    /// 图片二进制内容
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// 上传前的本地校验
    ///
    /// 规则与前端一致：必须是 image/* 类型，且不超过大小上限。
    /// 校验失败不发起任何网络请求。
    pub fn validate(&self, max_bytes: usize) -> Result<(), ValidationError> {
        if self.bytes.len() > max_bytes {
            return Err(ValidationError::FileTooLarge {
                size: self.bytes.len(),
                max: max_bytes,
            });
        }
        if !self.mime_type.starts_with("image/") {
            return Err(ValidationError::NotAnImage {
                mime_type: self.mime_type.clone(),
            });
        }
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: usize = 10 * 1024 * 1024;

    #[test]
    fn accepts_small_png() {
        let image = ImageFile::new("text.png", "image/png", vec![0u8; 128]);
        assert!(image.validate(MAX).is_ok());
    }

    #[test]
    fn rejects_non_image_mime() {
        let file = ImageFile::new("notes.pdf", "application/pdf", vec![0u8; 128]);
        let err = file.validate(MAX).unwrap_err();
        assert!(matches!(err, ValidationError::NotAnImage { .. }));
        assert_eq!(
            err.user_message(),
            "يرجى اختيار ملف صورة صالح (PNG, JPG, JPEG)"
        );
    }

    #[test]
    fn rejects_oversized_file() {
        let file = ImageFile::new("big.jpg", "image/jpeg", vec![0u8; MAX + 1]);
        let err = file.validate(MAX).unwrap_err();
        assert!(matches!(err, ValidationError::FileTooLarge { .. }));
    }

    #[test]
    fn size_check_runs_before_mime_check() {
        // 原前端先判断大小再判断类型
        let file = ImageFile::new("big.pdf", "application/pdf", vec![0u8; MAX + 1]);
        let err = file.validate(MAX).unwrap_err();
        assert!(matches!(err, ValidationError::FileTooLarge { .. }));
    }
}
