use actix_multipart::form::MultipartForm;
use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use validator::Validate;

use crate::api::UploadFile;
use crate::domain::member::{MemberLinks, MemberStatus, NewMember};
use crate::forms::{FormError, check_avatar, optional_text, text, upload};

#[derive(MultipartForm)]
pub struct MemberForm {
    pub name: Text<String>,
    pub role: Text<String>,
    pub team: Text<String>,
    pub department: Text<String>,
    pub year: Option<Text<String>>,
    pub join_year: Text<String>,
    pub status: Text<String>,
    pub skills: Text<String>,
    pub facebook: Text<String>,
    pub github: Text<String>,
    pub email: Text<String>,
    /// URL of the avatar already stored for the member.
    pub avatar: Option<Text<String>>,
    #[multipart(limit = "2MB")]
    pub avatar_file: Option<TempFile>,
}

#[derive(Debug, Validate)]
pub struct MemberInput {
    #[validate(length(min = 1, message = "Vui lòng nhập tên thành viên"))]
    pub name: String,
    #[validate(length(min = 1, message = "Vui lòng chọn vai trò"))]
    pub role: String,
    #[validate(length(min = 1, message = "Vui lòng chọn team"))]
    pub team: String,
    #[validate(length(min = 1, message = "Vui lòng chọn phòng ban"))]
    pub department: String,
    pub year: Option<String>,
    #[validate(length(min = 1, message = "Vui lòng chọn năm tham gia"))]
    pub join_year: String,
    pub status: MemberStatus,
    #[validate(length(min = 1, message = "Vui lòng nhập các kỹ năng"))]
    pub skills: String,
    #[validate(length(min = 1, message = "Vui lòng nhập URL Facebook"))]
    pub facebook: String,
    #[validate(length(min = 1, message = "Vui lòng nhập URL Github"))]
    pub github: String,
    #[validate(
        length(min = 1, message = "Vui lòng nhập email"),
        email(message = "Email không hợp lệ")
    )]
    pub email: String,
    pub avatar: String,
}

impl MemberInput {
    pub fn into_new_member(self, avatar: String) -> NewMember {
        NewMember {
            name: self.name,
            role: self.role,
            avatar,
            team: self.team.to_lowercase(),
            department: self.department,
            year: self.year,
            join_year: self.join_year,
            status: self.status,
            skills: NewMember::parse_skills(&self.skills),
            links: MemberLinks {
                facebook: self.facebook,
                github: self.github,
                email: self.email,
            },
        }
    }
}

impl MemberForm {
    pub fn into_parts(self) -> Result<(MemberInput, Option<UploadFile>), FormError> {
        let status = MemberStatus::parse(self.status.trim())
            .ok_or(FormError::Invalid("Vui lòng chọn trạng thái"))?;
        let year = optional_text(self.year);
        let input = MemberInput {
            name: text(self.name),
            role: text(self.role),
            team: text(self.team),
            department: text(self.department),
            year: (!year.is_empty()).then_some(year),
            join_year: text(self.join_year),
            status,
            skills: text(self.skills),
            facebook: text(self.facebook),
            github: text(self.github),
            email: text(self.email),
            avatar: optional_text(self.avatar),
        };
        input.validate()?;

        let file = upload(self.avatar_file)?;
        if let Some(file) = &file {
            check_avatar(file)?;
        } else if input.avatar.is_empty() {
            return Err(FormError::Invalid("Vui lòng upload avatar"));
        }
        Ok((input, file))
    }
}
