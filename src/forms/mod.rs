//! Form definitions backing the public and admin routes.

use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use thiserror::Error;
use validator::ValidationErrors;

use crate::api::UploadFile;

pub mod admin;
pub mod auth;
pub mod contact;
pub mod registration;

pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    /// Field-level failure carrying the message shown to the user.
    #[error("{0}")]
    Invalid(&'static str),

    #[error("failed to read uploaded file: {0}")]
    Upload(#[from] std::io::Error),
}

impl FormError {
    /// Messages suitable for a flash notice.
    pub fn user_message(&self) -> String {
        match self {
            FormError::Validation(errors) => validation_messages(errors),
            FormError::Invalid(message) => message.to_string(),
            FormError::Upload(_) => "Không thể đọc file tải lên".to_string(),
        }
    }
}

/// Collects the messages of every failed rule, sorted so output is stable.
pub fn validation_messages(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|errors| errors.iter())
        .map(|error| {
            error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| error.code.to_string())
        })
        .collect();
    messages.sort();
    messages.dedup();
    messages.join(" ")
}

pub(crate) fn text(field: Text<String>) -> String {
    field.into_inner().trim().to_string()
}

pub(crate) fn optional_text(field: Option<Text<String>>) -> String {
    field.map(text).unwrap_or_default()
}

/// Checkbox fields are present only when ticked.
pub(crate) fn checkbox(field: Option<Text<String>>) -> bool {
    field.is_some_and(|v| matches!(v.as_str(), "on" | "true" | "1"))
}

/// Reads a multipart file part; browsers send an empty part when no file
/// was picked.
pub(crate) fn upload(file: Option<TempFile>) -> Result<Option<UploadFile>, FormError> {
    let Some(file) = file else {
        return Ok(None);
    };
    let file_name = file.file_name.clone().unwrap_or_default();
    if file.size == 0 && file_name.is_empty() {
        return Ok(None);
    }
    let bytes = std::fs::read(file.file.path())?;
    Ok(Some(UploadFile {
        file_name,
        content_type: file.content_type.as_ref().map(ToString::to_string),
        bytes,
    }))
}

/// Accepts any `image/*` upload.
pub(crate) fn check_image(file: &UploadFile) -> Result<(), FormError> {
    match file.content_type.as_deref() {
        Some(mime) if mime.starts_with("image/") => Ok(()),
        _ => Err(FormError::Invalid("Chỉ có thể tải lên file ảnh!")),
    }
}

/// Accepts JPG/PNG images below [`MAX_IMAGE_BYTES`].
pub(crate) fn check_avatar(file: &UploadFile) -> Result<(), FormError> {
    if !matches!(
        file.content_type.as_deref(),
        Some("image/jpeg" | "image/png" | "image/jpg")
    ) {
        return Err(FormError::Invalid("Chỉ có thể upload file JPG/PNG!"));
    }
    if file.bytes.len() >= MAX_IMAGE_BYTES {
        return Err(FormError::Invalid("Ảnh phải nhỏ hơn 2MB!"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "Vui lòng nhập tiêu đề"))]
        title: String,
        #[validate(email(message = "Email không hợp lệ"))]
        email: String,
    }

    fn file(mime: Option<&str>, len: usize) -> UploadFile {
        UploadFile {
            file_name: "a.png".into(),
            content_type: mime.map(str::to_string),
            bytes: vec![0; len],
        }
    }

    #[test]
    fn validation_messages_are_sorted_and_joined() {
        let sample = Sample {
            title: String::new(),
            email: "nope".into(),
        };
        let err = FormError::from(sample.validate().unwrap_err());
        assert_eq!(err.user_message(), "Email không hợp lệ Vui lòng nhập tiêu đề");
    }

    #[test]
    fn avatar_rules() {
        assert!(check_avatar(&file(Some("image/png"), 10)).is_ok());
        assert_eq!(
            check_avatar(&file(Some("image/gif"), 10)).unwrap_err().user_message(),
            "Chỉ có thể upload file JPG/PNG!"
        );
        assert_eq!(
            check_avatar(&file(Some("image/jpeg"), MAX_IMAGE_BYTES)).unwrap_err().user_message(),
            "Ảnh phải nhỏ hơn 2MB!"
        );
    }

    fn temp_file(name: &str, contents: &[u8]) -> TempFile {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        TempFile {
            file,
            content_type: None,
            file_name: (!name.is_empty()).then(|| name.to_string()),
            size: contents.len(),
        }
    }

    #[test]
    fn upload_reads_the_part_and_skips_empty_ones() {
        let file = upload(Some(temp_file("slides.pdf", b"%PDF"))).unwrap().unwrap();
        assert_eq!(file.file_name, "slides.pdf");
        assert_eq!(file.bytes, b"%PDF");

        assert!(upload(Some(temp_file("", b""))).unwrap().is_none());
        assert!(upload(None).unwrap().is_none());
    }

    #[test]
    fn image_rule() {
        assert!(check_image(&file(Some("image/webp"), 1)).is_ok());
        assert!(check_image(&file(Some("application/pdf"), 1)).is_err());
        assert!(check_image(&file(None, 1)).is_err());
    }
}
