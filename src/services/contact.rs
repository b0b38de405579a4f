use validator::Validate;

use crate::api::FormRelay;
use crate::domain::contact::ContactMessage;
use crate::forms::FormError;
use crate::forms::contact::ContactForm;
use crate::services::{ServiceError, ServiceResult};

/// Validates the public contact form and relays it.
pub async fn send_message<R>(relay: &R, form: ContactForm) -> ServiceResult<()>
where
    R: FormRelay + ?Sized,
{
    let form = form.trimmed();
    form.validate().map_err(FormError::from)?;
    let message = ContactMessage::from(form);

    relay.submit_contact(&message).await.map_err(|err| {
        log::error!("Failed to relay contact message: {err}");
        ServiceError::from(err)
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::api::errors::ApiError;
    use crate::api::mock::MockApi;

    fn form(email: &str) -> ContactForm {
        ContactForm {
            name: "An".into(),
            email: email.into(),
            subject: "general".into(),
            message: "Xin chào".into(),
        }
    }

    #[actix_web::test]
    async fn invalid_email_is_not_relayed() {
        let mut relay = MockApi::new();
        relay.expect_submit_contact().never();

        let err = send_message(&relay, form("not-an-email")).await.unwrap_err();
        assert_eq!(err.to_string(), "Email không hợp lệ!");
    }

    #[actix_web::test]
    async fn relay_failure_surfaces() {
        let mut relay = MockApi::new();
        relay
            .expect_submit_contact()
            .withf(|m| m.email == "an@example.com")
            .times(1)
            .returning(|_| {
                Err(ApiError::Status {
                    status: 500,
                    message: String::new(),
                })
            });

        assert!(matches!(
            send_message(&relay, form(" an@example.com ")).await,
            Err(ServiceError::Api(_))
        ));
    }
}
