use actix_multipart::form::MultipartForm;
use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use validator::Validate;

use crate::api::UploadFile;
use crate::domain::banner::NewBanner;
use crate::forms::{FormError, check_image, checkbox, optional_text, text, upload};

#[derive(MultipartForm)]
pub struct BannerForm {
    pub title: Text<String>,
    pub description: Option<Text<String>>,
    pub order: Text<String>,
    pub active: Option<Text<String>>,
    #[multipart(limit = "5MB")]
    pub image: Option<TempFile>,
}

#[derive(Debug, Validate)]
struct BannerInput {
    #[validate(length(min = 1, message = "Vui lòng nhập tiêu đề"))]
    title: String,
    #[validate(length(min = 1, message = "Vui lòng nhập thứ tự"))]
    order: String,
}

impl BannerForm {
    /// A new banner needs an image; an edited one keeps its own unless replaced.
    pub fn into_parts(self, creating: bool) -> Result<(NewBanner, Option<UploadFile>), FormError> {
        let input = BannerInput {
            title: text(self.title),
            order: text(self.order),
        };
        input.validate()?;
        let order = input
            .order
            .parse()
            .map_err(|_| FormError::Invalid("Thứ tự phải là số"))?;

        let image = upload(self.image)?;
        match &image {
            Some(file) => check_image(file)?,
            None if creating => return Err(FormError::Invalid("Vui lòng chọn hình ảnh")),
            None => {}
        }

        let banner = NewBanner {
            title: input.title,
            description: optional_text(self.description),
            order,
            active: checkbox(self.active),
        };
        Ok((banner, image))
    }
}
