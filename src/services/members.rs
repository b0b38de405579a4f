use crate::api::{AuthApi, MemberReader, MemberWriter, UploadFile};
use crate::auth::context::AuthContext;
use crate::auth::storage::SessionStorage;
use crate::domain::member::Member;
use crate::domain::types::MemberId;
use crate::dto::admin::{MembersAdminData, MembersAdminQuery};
use crate::export::{ExportQuery, export_file};
use crate::forms::admin::members::MemberInput;
use crate::listing::{MEMBERS_PER_PAGE, MemberBoard, member_board, split_members};
use crate::pagination::Paginated;
use crate::services::{ServiceError, ServiceResult, with_token};

async fn fetch_members<A>(api: &A) -> ServiceResult<Vec<Member>>
where
    A: MemberReader + ?Sized,
{
    api.list_members().await.map_err(|err| {
        log::error!("Failed to list members: {err}");
        ServiceError::from(err)
    })
}

pub async fn load_member_board<A>(api: &A) -> ServiceResult<MemberBoard>
where
    A: MemberReader + ?Sized,
{
    Ok(member_board(fetch_members(api).await?))
}

pub async fn load_admin_members<A>(
    api: &A,
    query: MembersAdminQuery,
) -> ServiceResult<MembersAdminData>
where
    A: MemberReader + ?Sized,
{
    let filter = query.filter();
    let (pinned, members) = split_members(fetch_members(api).await?, &filter);
    Ok(MembersAdminData {
        pinned,
        members: Paginated::slice(members, query.page.unwrap_or(1), MEMBERS_PER_PAGE),
        filter,
    })
}

pub async fn load_member<A>(api: &A, id: i32) -> ServiceResult<Member>
where
    A: MemberReader + ?Sized,
{
    let id = MemberId::new(id).map_err(|_| ServiceError::NotFound)?;
    fetch_members(api)
        .await?
        .into_iter()
        .find(|m| m.id == id)
        .ok_or(ServiceError::NotFound)
}

pub async fn export_members<A>(api: &A, query: &ExportQuery) -> ServiceResult<Vec<u8>>
where
    A: MemberReader + ?Sized,
{
    let members = fetch_members(api).await?;
    export_file(&members, query).map_err(|err| {
        log::error!("Failed to export members: {err}");
        ServiceError::Form("Có lỗi xảy ra khi xuất file".to_string())
    })
}

/// Creates the member, or replaces it when `id` is given, uploading a newly
/// picked avatar first.
pub async fn save_member<S, A>(
    auth: &AuthContext<S, A>,
    id: Option<i32>,
    input: MemberInput,
    avatar: Option<UploadFile>,
) -> ServiceResult<()>
where
    S: SessionStorage,
    A: AuthApi + MemberWriter,
{
    let api = auth.api();
    let id = id.map(MemberId::new).transpose()?;

    let avatar_url = match avatar {
        Some(file) => {
            let file = &file;
            with_token(auth, |token| async move {
                api.upload_avatar(&token, file.clone()).await
            })
            .await
            .map_err(|err| {
                log::error!("Failed to upload avatar: {err}");
                err
            })?
            .url
        }
        None => input.avatar.clone(),
    };

    let member = &input.into_new_member(avatar_url);
    with_token(auth, |token| async move {
        match id {
            Some(id) => api.update_member(&token, id, member).await,
            None => api.create_member(&token, member).await,
        }
    })
    .await
    .map_err(|err| {
        log::error!("Failed to save member: {err}");
        err
    })
}

pub async fn delete_member<S, A>(auth: &AuthContext<S, A>, id: i32) -> ServiceResult<()>
where
    S: SessionStorage,
    A: AuthApi + MemberWriter,
{
    let api = auth.api();
    let id = MemberId::new(id)?;
    with_token(auth, |token| async move { api.delete_member(&token, id).await })
        .await
        .map_err(|err| {
            log::error!("Failed to delete member {id}: {err}");
            err
        })
}

/// Pins the member as the featured leader, or unpins it.
pub async fn set_pinned<S, A>(auth: &AuthContext<S, A>, id: i32, pinned: bool) -> ServiceResult<()>
where
    S: SessionStorage,
    A: AuthApi + MemberWriter,
{
    let api = auth.api();
    let id = MemberId::new(id)?;
    with_token(auth, |token| async move {
        if pinned {
            api.pin_member(&token, id).await
        } else {
            api.unpin_member(&token, id).await
        }
    })
    .await
    .map_err(|err| {
        log::error!("Failed to change pin of member {id}: {err}");
        err
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::api::mock::MockApi;
    use crate::domain::member::MemberStatus;
    use crate::export::FileType;
    use crate::services::test_support::logged_in;

    fn roster() -> Vec<Member> {
        serde_json::from_value(json!([
            {"id": 1, "name": "An", "team": "lead", "isPinned": true},
            {"id": 2, "name": "Bình", "team": "media", "status": "active"},
            {"id": 3, "name": "Chi", "team": "event", "status": "inactive"}
        ]))
        .unwrap()
    }

    #[actix_web::test]
    async fn admin_roster_separates_pinned_member() {
        let mut api = MockApi::new();
        api.expect_list_members().returning(|| Ok(roster()));

        let data = load_admin_members(
            &api,
            MembersAdminQuery {
                status: Some("active".into()),
                ..MembersAdminQuery::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(data.pinned.unwrap().name, "An");
        assert_eq!(data.members.items.len(), 1);
        assert_eq!(data.members.items[0].name, "Bình");
    }

    #[actix_web::test]
    async fn export_applies_filters() {
        let mut api = MockApi::new();
        api.expect_list_members().returning(|| Ok(roster()));

        let query = ExportQuery {
            file_type: FileType::Csv,
            team: "event".into(),
            fields: vec!["name".into(), "status".into()],
            ..ExportQuery::default()
        };
        let csv = export_members(&api, &query).await.unwrap();
        assert_eq!(
            String::from_utf8(csv).unwrap(),
            "\u{feff}name,status\nChi,inactive\n"
        );
    }

    #[actix_web::test]
    async fn pin_and_unpin_hit_their_endpoints() {
        let mut api = MockApi::new();
        api.expect_pin_member()
            .withf(|token, id| token == "access" && id.get() == 2)
            .times(1)
            .returning(|_, _| Ok(()));
        api.expect_unpin_member()
            .times(1)
            .returning(|_, _| Ok(()));
        let auth = logged_in(api);

        set_pinned(&auth, 2, true).await.unwrap();
        set_pinned(&auth, 2, false).await.unwrap();
    }

    #[actix_web::test]
    async fn save_keeps_existing_avatar() {
        let mut api = MockApi::new();
        api.expect_upload_avatar().never();
        api.expect_create_member()
            .withf(|_, member| member.avatar == "/static/a.png" && member.team == "media")
            .times(1)
            .returning(|_, _| Ok(()));
        let auth = logged_in(api);

        let input = MemberInput {
            name: "An".into(),
            role: "Thành viên".into(),
            team: "Media".into(),
            department: "Truyền thông".into(),
            year: None,
            join_year: "2024".into(),
            status: MemberStatus::Active,
            skills: "Figma".into(),
            facebook: "https://facebook.com/an".into(),
            github: "https://github.com/an".into(),
            email: "an@example.com".into(),
            avatar: "/static/a.png".into(),
        };
        save_member(&auth, None, input, None).await.unwrap();
    }
}
