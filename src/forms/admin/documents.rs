use actix_multipart::form::MultipartForm;
use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use validator::Validate;

use crate::api::UploadFile;
use crate::domain::document::NewDocument;
use crate::forms::{FormError, checkbox, text, upload};

#[derive(MultipartForm)]
pub struct DocumentForm {
    pub title: Text<String>,
    pub description: Text<String>,
    pub category: Text<String>,
    pub sub_category: Text<String>,
    pub active: Option<Text<String>>,
    #[multipart(limit = "50MB")]
    pub file: Option<TempFile>,
}

#[derive(Debug, Validate)]
struct DocumentInput {
    #[validate(length(min = 1, message = "Vui lòng nhập tiêu đề"))]
    title: String,
    #[validate(length(min = 1, message = "Vui lòng nhập mô tả"))]
    description: String,
    #[validate(length(min = 1, message = "Vui lòng chọn danh mục"))]
    category: String,
    #[validate(length(min = 1, message = "Vui lòng chọn danh mục con"))]
    sub_category: String,
}

impl DocumentForm {
    /// A new document needs a file; an edited one keeps its own unless replaced.
    pub fn into_parts(
        self,
        creating: bool,
    ) -> Result<(NewDocument, Option<UploadFile>), FormError> {
        let input = DocumentInput {
            title: text(self.title),
            description: text(self.description),
            category: text(self.category),
            sub_category: text(self.sub_category),
        };
        input.validate()?;

        let file = upload(self.file)?;
        if file.is_none() && creating {
            return Err(FormError::Invalid("Vui lòng chọn file"));
        }

        let document = NewDocument {
            title: input.title,
            description: input.description,
            category: input.category,
            sub_category: input.sub_category,
            active: checkbox(self.active),
        };
        Ok((document, file))
    }
}
