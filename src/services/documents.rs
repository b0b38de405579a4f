use crate::api::{AuthApi, DocumentReader, DocumentWriter, UploadFile};
use crate::auth::context::AuthContext;
use crate::auth::storage::SessionStorage;
use crate::domain::document::{
    DOCUMENT_CATEGORIES, Document, DownloadCount, NewDocument, category_breadcrumbs,
};
use crate::domain::types::DocumentId;
use crate::dto::admin::{DocumentsAdminData, DocumentsAdminQuery};
use crate::dto::public::{DocumentsPageData, DocumentsQuery};
use crate::listing::{DOCUMENTS_PER_PAGE, filter_documents};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::services::{ServiceError, ServiceResult, with_token};

async fn fetch_documents<A>(api: &A) -> ServiceResult<Vec<Document>>
where
    A: DocumentReader + ?Sized,
{
    api.list_documents().await.map_err(|err| {
        log::error!("Failed to list documents: {err}");
        ServiceError::from(err)
    })
}

async fn find_document<A>(api: &A, id: i32) -> ServiceResult<Document>
where
    A: DocumentReader + ?Sized,
{
    let id = DocumentId::new(id).map_err(|_| ServiceError::NotFound)?;
    fetch_documents(api)
        .await?
        .into_iter()
        .find(|d| d.id == id)
        .ok_or(ServiceError::NotFound)
}

pub async fn load_documents_page<A>(
    api: &A,
    query: DocumentsQuery,
) -> ServiceResult<DocumentsPageData>
where
    A: DocumentReader + ?Sized,
{
    let filter = query.filter();
    let documents = filter_documents(fetch_documents(api).await?, &filter, false);
    Ok(DocumentsPageData {
        documents: Paginated::slice(documents, query.page.unwrap_or(1), DOCUMENTS_PER_PAGE),
        search: filter.search.trim().to_string(),
        category: filter.category().to_string(),
        breadcrumbs: category_breadcrumbs(filter.category()),
        categories: DOCUMENT_CATEGORIES,
    })
}

/// Counts a public download and returns the file URL to redirect to.
///
/// Inactive documents are not served.
pub async fn record_download<A>(api: &A, id: i32) -> ServiceResult<String>
where
    A: DocumentReader + DocumentWriter + ?Sized,
{
    let document = find_document(api, id).await?;
    if !document.active {
        return Err(ServiceError::NotFound);
    }
    let count = DownloadCount {
        downloads: document.downloads.saturating_add(1),
    };
    api.record_download(document.id, count)
        .await
        .map_err(|err| {
            log::error!("Failed to count download of document {}: {err}", document.id);
            ServiceError::from(err)
        })?;
    Ok(document.file_url)
}

pub async fn load_admin_documents<A>(
    api: &A,
    query: DocumentsAdminQuery,
) -> ServiceResult<DocumentsAdminData>
where
    A: DocumentReader + ?Sized,
{
    let filter = query.filter();
    let documents = filter_documents(fetch_documents(api).await?, &filter, true);
    Ok(DocumentsAdminData {
        documents: Paginated::slice(documents, query.page.unwrap_or(1), DEFAULT_ITEMS_PER_PAGE),
        filter,
        categories: DOCUMENT_CATEGORIES,
    })
}

pub async fn load_document<A>(api: &A, id: i32) -> ServiceResult<Document>
where
    A: DocumentReader + ?Sized,
{
    find_document(api, id).await
}

pub async fn save_document<S, A>(
    auth: &AuthContext<S, A>,
    id: Option<i32>,
    document: NewDocument,
    file: Option<UploadFile>,
) -> ServiceResult<()>
where
    S: SessionStorage,
    A: AuthApi + DocumentWriter,
{
    let api = auth.api();
    let id = id.map(DocumentId::new).transpose()?;
    let (document, file) = (&document, &file);
    with_token(auth, |token| async move {
        match id {
            Some(id) => api.update_document(&token, id, document, file.clone()).await,
            None => api.create_document(&token, document, file.clone()).await,
        }
    })
    .await
    .map_err(|err| {
        log::error!("Failed to save document: {err}");
        err
    })
}

/// Shows or hides a document on the public page, keeping its other fields.
pub async fn set_document_active<S, A>(
    auth: &AuthContext<S, A>,
    id: i32,
    active: bool,
) -> ServiceResult<()>
where
    S: SessionStorage,
    A: AuthApi + DocumentReader + DocumentWriter,
{
    let current = find_document(auth.api(), id).await?;
    let document = NewDocument {
        active,
        ..NewDocument::from(&current)
    };
    save_document(auth, Some(id), document, None).await
}

pub async fn delete_document<S, A>(auth: &AuthContext<S, A>, id: i32) -> ServiceResult<()>
where
    S: SessionStorage,
    A: AuthApi + DocumentWriter,
{
    let api = auth.api();
    let id = DocumentId::new(id)?;
    with_token(auth, |token| async move { api.delete_document(&token, id).await })
        .await
        .map_err(|err| {
            log::error!("Failed to delete document {id}: {err}");
            err
        })
}
