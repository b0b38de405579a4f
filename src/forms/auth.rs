use serde::Deserialize;
use validator::Validate;

use crate::api::auth::Credentials;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "Vui lòng nhập tên đăng nhập!"))]
    pub username: String,
    #[validate(length(min = 1, message = "Vui lòng nhập mật khẩu!"))]
    pub password: String,
    /// Location the guard redirected from.
    #[serde(default)]
    pub from: Option<String>,
}

impl LoginForm {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        }
    }
}
