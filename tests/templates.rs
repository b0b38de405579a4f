use dsc_portal::domain::document::{DOCUMENT_CATEGORIES, Document, category_breadcrumbs};
use dsc_portal::domain::event::{Event, EventStatus};
use dsc_portal::domain::member::{Member, TEAM_STUDENT_ASSOCIATION, TEAM_YOUTH_UNION};
use dsc_portal::domain::wizard::Wizard;
use dsc_portal::dto::public::{DocumentsPageData, EventsPageData};
use dsc_portal::dto::registration::WizardPageData;
use dsc_portal::listing::{
    ALL_TAB, DOCUMENTS_PER_PAGE, DocumentFilter, EVENTS_PER_PAGE, filter_documents,
    filter_events, highlighted_events, member_board,
};
use dsc_portal::pagination::Paginated;
use dsc_portal::routes::MediaUrlFilter;
use serde_json::json;
use tera::{Context, Tera};

fn templates() -> Tera {
    let mut tera = Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*"))
        .expect("templates parse");
    tera.register_filter(
        "image_url",
        MediaUrlFilter::new("http://api.local", "/assets/images/default-avatar.svg"),
    );
    tera
}

fn page_context(current_page: &str) -> Context {
    let mut context = Context::new();
    context.insert("alerts", &Vec::<(String, String)>::new());
    context.insert("current_page", current_page);
    context.insert("current_user", &None::<String>);
    context.insert("is_admin", &false);
    context
}

#[test]
fn login_page_keeps_return_path() {
    let mut context = page_context("login");
    context.insert("from", "/admin/events");

    let html = templates().render("admin/login.html", &context).unwrap();

    assert!(html.contains(r#"action="/admin/login""#));
    // Autoescaping encodes the slashes.
    assert!(html.contains(r#"name="from" value="&#x2F;admin&#x2F;events""#));
}

#[test]
fn wizard_renders_first_step_and_errors() {
    let tera = templates();
    let mut wizard = Wizard::new();

    let mut context = page_context("registration");
    context.insert("wizard", &WizardPageData::from(&wizard));
    context.insert("nganh_options", dsc_portal::domain::registration::NGANH_OPTIONS);
    context.insert(
        "gioi_tinh_options",
        dsc_portal::domain::registration::GIOI_TINH_OPTIONS,
    );
    let html = tera.render("public/registration.html", &context).unwrap();
    assert!(html.contains(r#"value="next""#));
    assert!(!html.contains(r#"value="back""#));

    assert!(!wizard.next());
    context.insert("wizard", &WizardPageData::from(&wizard));
    let html = tera.render("public/registration.html", &context).unwrap();
    assert!(html.contains("is-invalid"));
    assert!(html.contains("Vui lòng nhập thông tin"));
}

#[test]
fn documents_page_keeps_search_on_page_links() {
    let documents: Vec<Document> = serde_json::from_value(json!(
        (1..=7)
            .map(|i| json!({
                "id": i,
                "title": format!("Linux bài {i}"),
                "category": "linux-devops",
                "subCategory": "linux-os",
                "fileType": "PDF",
                "fileSize": "1.2 MB",
                "uploadDate": "2024-09-01",
            }))
            .collect::<Vec<_>>()
    ))
    .unwrap();
    let filter = DocumentFilter {
        search: "linux bài".into(),
        category: None,
    };
    let page = DocumentsPageData {
        documents: Paginated::slice(
            filter_documents(documents, &filter, false),
            1,
            DOCUMENTS_PER_PAGE,
        ),
        search: filter.search.clone(),
        category: filter.category().to_string(),
        breadcrumbs: category_breadcrumbs(filter.category()),
        categories: DOCUMENT_CATEGORIES,
    };

    let mut context = page_context("documents");
    context.insert("page", &page);
    let html = templates().render("public/documents.html", &context).unwrap();

    assert!(html.contains("Linux bài 1"));
    assert!(!html.contains("Linux bài 6"));
    assert!(html.contains(r#"value="linux bài""#));
    assert!(html.contains(r#"href="?category=all&amp;search=linux%20b%C3%A0i&amp;page=2""#));
}

#[test]
fn events_page_links_pages_within_tab() {
    let events: Vec<Event> = serde_json::from_value(json!(
        (1..=8)
            .map(|i| json!({
                "id": i,
                "title": format!("Workshop {i}"),
                "date": "2025-03-01",
                "location": "A5-202",
                "status": "upcoming",
                "isHighlight": i == 1,
            }))
            .collect::<Vec<_>>()
    ))
    .unwrap();
    let tab = EventStatus::Upcoming.as_str();
    let mut tabs = vec![(ALL_TAB, "Tất cả")];
    tabs.extend(EventStatus::ALL.iter().map(|s| (s.as_str(), s.label())));
    let page = EventsPageData {
        tab: tab.to_string(),
        tabs,
        highlighted: highlighted_events(&events),
        events: Paginated::slice(filter_events(events, Some(tab)), 1, EVENTS_PER_PAGE),
    };

    let mut context = page_context("events");
    context.insert("page", &page);
    let html = templates().render("public/events.html", &context).unwrap();

    assert!(html.contains("Sự kiện nổi bật"));
    assert!(html.contains("Workshop 6"));
    assert!(!html.contains("Workshop 7"));
    assert!(html.contains(r#"href="?tab=upcoming&amp;page=2""#));
}

#[test]
fn members_page_shows_leaders_and_teams() {
    let members: Vec<Member> = serde_json::from_value(json!([
        {"id": 1, "name": "Trần An", "role": "Bí thư Đoàn khoa", "team": TEAM_YOUTH_UNION, "status": "active"},
        {"id": 2, "name": "Lê Bình", "role": "Liên chi Hội trưởng", "team": TEAM_STUDENT_ASSOCIATION, "status": "active"},
        {"id": 3, "name": "Phạm Chi", "role": "Thành viên", "team": "media", "status": "active",
         "links": {"github": "https://github.com/chi"}},
        {"id": 4, "name": "Đỗ Dũng", "role": "Thành viên", "team": "media", "status": "inactive"}
    ]))
    .unwrap();

    let mut context = page_context("members");
    context.insert("board", &member_board(members));
    context.insert("youth_union", TEAM_YOUTH_UNION);
    context.insert("student_association", TEAM_STUDENT_ASSOCIATION);
    let html = templates().render("public/members.html", &context).unwrap();

    assert!(html.contains("Bí thư Đoàn khoa"));
    assert!(html.contains("Trần An"));
    assert!(html.contains("Lê Bình"));
    assert!(html.contains("Phạm Chi"));
    assert!(html.contains("Media"));
    assert!(!html.contains("Đỗ Dũng"));
    // Members without a photo get the placeholder avatar.
    assert!(html.contains("default-avatar.svg"));
}
