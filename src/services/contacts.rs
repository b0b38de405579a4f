use crate::api::{AuthApi, ContactReader, ContactWriter};
use crate::auth::context::AuthContext;
use crate::auth::storage::SessionStorage;
use crate::domain::contact::Contact;
use crate::domain::types::ContactId;
use crate::dto::admin::{ContactsAdminData, ContactsAdminQuery};
use crate::listing::{CONTACTS_PER_PAGE, filter_contacts};
use crate::pagination::Paginated;
use crate::services::{ServiceResult, with_token};

/// Contact messages are private, so even listing needs the admin token.
pub async fn fetch_contacts<S, A>(auth: &AuthContext<S, A>) -> ServiceResult<Vec<Contact>>
where
    S: SessionStorage,
    A: AuthApi + ContactReader,
{
    let api = auth.api();
    with_token(auth, |token| async move { api.list_contacts(&token).await })
        .await
        .map_err(|err| {
            log::error!("Failed to list contacts: {err}");
            err
        })
}

pub async fn load_admin_contacts<S, A>(
    auth: &AuthContext<S, A>,
    query: ContactsAdminQuery,
) -> ServiceResult<ContactsAdminData>
where
    S: SessionStorage,
    A: AuthApi + ContactReader,
{
    let filter = query.filter();
    let contacts = filter_contacts(fetch_contacts(auth).await?, &filter);
    Ok(ContactsAdminData {
        contacts: Paginated::slice(contacts, query.page.unwrap_or(1), CONTACTS_PER_PAGE),
        filter,
    })
}

pub async fn delete_contact<S, A>(auth: &AuthContext<S, A>, id: i32) -> ServiceResult<()>
where
    S: SessionStorage,
    A: AuthApi + ContactWriter,
{
    let api = auth.api();
    let id = ContactId::new(id)?;
    with_token(auth, |token| async move { api.delete_contact(&token, id).await })
        .await
        .map_err(|err| {
            log::error!("Failed to delete contact {id}: {err}");
            err
        })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use mockall::predicate::{always, eq};
    use serde_json::json;

    use super::*;
    use crate::api::mock::MockApi;
    use crate::services::ServiceError;
    use crate::services::test_support::{anonymous, logged_in};

    #[actix_web::test]
    async fn lists_with_token_and_filters() {
        let mut api = MockApi::new();
        api.expect_list_contacts()
            .with(eq("access"))
            .times(1)
            .returning(|_| {
                Ok(serde_json::from_value(json!([
                    {"id": 1, "name": "An", "subject": "event", "created_at": "2024-01-02T08:00:00Z"},
                    {"id": 2, "name": "Binh", "subject": "other", "created_at": "2024-03-02T08:00:00Z"}
                ]))
                .unwrap())
            });
        let auth = logged_in(api);

        let data = load_admin_contacts(
            &auth,
            ContactsAdminQuery {
                search: String::new(),
                subject: Some("event".into()),
                page: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(data.contacts.total, 1);
        assert_eq!(data.contacts.items[0].name, "An");
    }

    #[actix_web::test]
    async fn delete_without_session_is_unauthorized() {
        let mut api = MockApi::new();
        api.expect_delete_contact().with(always(), always()).never();
        let auth = anonymous(api);

        assert!(matches!(
            delete_contact(&auth, 3).await,
            Err(ServiceError::Unauthorized)
        ));
    }
}
