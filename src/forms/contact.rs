use serde::Deserialize;
use validator::Validate;

use crate::domain::contact::ContactMessage;

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ContactForm {
    #[validate(length(min = 1, message = "Vui lòng nhập họ và tên!"))]
    pub name: String,
    #[validate(
        length(min = 1, message = "Vui lòng nhập email!"),
        email(message = "Email không hợp lệ!")
    )]
    pub email: String,
    #[validate(length(min = 1, message = "Vui lòng chọn chủ đề!"))]
    pub subject: String,
    #[validate(length(min = 1, message = "Vui lòng nhập nội dung!"))]
    pub message: String,
}

impl ContactForm {
    /// Trims every field ahead of validation.
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}

impl From<ContactForm> for ContactMessage {
    fn from(form: ContactForm) -> Self {
        Self {
            name: form.name,
            email: form.email,
            subject: form.subject,
            message: form.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_fail_after_trimming() {
        let form = ContactForm {
            name: "  ".into(),
            email: "an@example.com".into(),
            subject: "general".into(),
            message: "Xin chào".into(),
        }
        .trimmed();
        assert!(form.validate().is_err());
    }

    #[test]
    fn valid_form_converts() {
        let form = ContactForm {
            name: " An ".into(),
            email: "an@example.com".into(),
            subject: "event".into(),
            message: "Xin chào".into(),
        }
        .trimmed();
        assert!(form.validate().is_ok());
        let message = ContactMessage::from(form);
        assert_eq!(message.name, "An");
    }
}
