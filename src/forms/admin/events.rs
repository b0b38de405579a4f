use actix_multipart::form::MultipartForm;
use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use validator::Validate;

use crate::api::UploadFile;
use crate::domain::event::{EventStatus, NewEvent};
use crate::forms::{FormError, check_image, checkbox, optional_text, text, upload};

#[derive(MultipartForm)]
pub struct EventForm {
    pub title: Text<String>,
    pub description: Text<String>,
    pub date: Text<String>,
    pub time: Text<String>,
    pub location: Text<String>,
    pub status: Text<String>,
    pub organizer: Text<String>,
    pub facebook_url: Option<Text<String>>,
    pub is_highlight: Option<Text<String>>,
    /// URL of the image already attached to the event.
    pub image: Option<Text<String>>,
    #[multipart(limit = "5MB")]
    pub image_file: Option<TempFile>,
}

#[derive(Debug, Validate)]
pub struct EventInput {
    #[validate(length(min = 1, message = "Vui lòng nhập tên sự kiện"))]
    pub title: String,
    #[validate(length(min = 1, message = "Vui lòng nhập mô tả"))]
    pub description: String,
    #[validate(length(min = 1, message = "Vui lòng chọn ngày"))]
    pub date: String,
    #[validate(length(min = 1, message = "Vui lòng chọn thời gian"))]
    pub time: String,
    #[validate(length(min = 1, message = "Vui lòng nhập địa điểm"))]
    pub location: String,
    #[validate(length(min = 1, message = "Vui lòng nhập ban tổ chức"))]
    pub organizer: String,
    #[validate(url(message = "Vui lòng nhập đúng định dạng URL Facebook"))]
    pub facebook_url: Option<String>,
    pub status: EventStatus,
    pub is_highlight: bool,
    pub image: String,
}

impl EventInput {
    pub fn into_new_event(self, image: String) -> NewEvent {
        NewEvent::new(
            self.title,
            self.description,
            self.date,
            self.time,
            self.location,
            self.status,
            image,
            self.organizer,
            self.is_highlight,
            self.facebook_url.unwrap_or_default(),
        )
    }
}

impl EventForm {
    /// Validates the fields and reads the optional new image.
    pub fn into_parts(self) -> Result<(EventInput, Option<UploadFile>), FormError> {
        let status = EventStatus::parse(self.status.trim())
            .ok_or(FormError::Invalid("Trạng thái không hợp lệ"))?;
        let facebook_url = optional_text(self.facebook_url);
        let input = EventInput {
            title: text(self.title),
            description: text(self.description),
            date: text(self.date),
            time: text(self.time),
            location: text(self.location),
            organizer: text(self.organizer),
            facebook_url: (!facebook_url.is_empty()).then_some(facebook_url),
            status,
            is_highlight: checkbox(self.is_highlight),
            image: optional_text(self.image),
        };
        input.validate()?;

        let file = upload(self.image_file)?;
        if let Some(file) = &file {
            check_image(file)?;
        } else if input.image.is_empty() {
            return Err(FormError::Invalid("Vui lòng tải lên ảnh sự kiện"));
        }
        Ok((input, file))
    }
}
