use folio::{
    contact::ContactSubmission,
    portfolio::{Portfolio, PortfolioContent, PortfolioStore},
    server::{AppState, router},
};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use tokio::net::TcpListener;

struct TestServer {
    base: String,
    client: Client,
}

impl TestServer {
    async fn start(store: PortfolioStore) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let address = listener.local_addr().expect("local address");
        let app = router(AppState::new(store));
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server");
        });
        Self { base: format!("http://{address}/api"), client: Client::new() }
    }

    async fn seeded() -> Self {
        Self::start(PortfolioStore::seeded(embedded())).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    async fn submit(&self, name: &str) -> ContactSubmission {
        let response = self
            .client
            .post(self.url("/contact"))
            .json(&json!({
                "name": name,
                "email": "visitor@example.com",
                "subject": "Hello",
                "message": "Nice portfolio!"
            }))
            .send()
            .await
            .expect("request");
        assert_eq!(response.status(), StatusCode::OK);
        response.json().await.expect("submission body")
    }

    async fn set_status(&self, id: impl std::fmt::Display, status: &str) -> reqwest::Response {
        self.client
            .put(self.url(&format!("/contact/{id}")))
            .json(&json!({ "status": status }))
            .send()
            .await
            .expect("request")
    }
}

fn embedded() -> PortfolioContent {
    PortfolioContent::embedded().expect("embedded portfolio is valid")
}

async fn detail(response: reqwest::Response) -> String {
    let content_type = response.headers().get("content-type").expect("content type").to_str().expect("ascii");
    assert!(content_type.starts_with("application/json"), "unexpected content type {content_type}");
    let body: Value = response.json().await.expect("json");
    body["detail"].as_str().expect("detail").to_string()
}

#[tokio::test]
async fn health() {
    let server = TestServer::seeded().await;
    let body: Value = server.client.get(server.url("/")).send().await.expect("request").json().await.expect("json");
    assert_eq!(body["status"], "ok");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn portfolio_lifecycle() {
    let server = TestServer::start(PortfolioStore::empty()).await;

    let response = server.client.get(server.url("/portfolio")).send().await.expect("request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.expect("json");
    assert!(body["detail"].is_string());

    let response = server.client.put(server.url("/portfolio")).json(&json!({})).send().await.expect("request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = server.client.post(server.url("/portfolio")).json(&embedded()).send().await.expect("request");
    assert_eq!(response.status(), StatusCode::OK);
    let created: Portfolio = response.json().await.expect("portfolio");
    assert_eq!(created.content, embedded());

    let response = server
        .client
        .put(server.url("/portfolio"))
        .json(&json!({ "achievements": [] }))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Portfolio = response.json().await.expect("portfolio");
    assert_eq!(updated.id, created.id);
    assert!(updated.content.achievements.is_empty());
    assert_eq!(updated.content.projects, created.content.projects);
    assert!(updated.updated_at >= created.updated_at);

    let fetched: Portfolio =
        server.client.get(server.url("/portfolio")).send().await.expect("request").json().await.expect("portfolio");
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn portfolio_uses_camel_case() {
    let server = TestServer::seeded().await;
    let body: Value =
        server.client.get(server.url("/portfolio")).send().await.expect("request").json().await.expect("json");
    assert!(body["socialLinks"].is_object());
    assert!(body["createdAt"].is_string());
    assert!(body["personal"]["name"].is_string());
}

#[tokio::test]
async fn invalid_portfolio_update_is_rejected() {
    let server = TestServer::seeded().await;
    let mut personal = serde_json::to_value(&embedded().personal).expect("json");
    personal["name"] = json!("  ");
    let response = server
        .client
        .put(server.url("/portfolio"))
        .json(&json!({ "personal": personal }))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let current: Portfolio =
        server.client.get(server.url("/portfolio")).send().await.expect("request").json().await.expect("portfolio");
    assert_eq!(current.content.personal, embedded().personal);
}

#[tokio::test]
async fn contact_submission() {
    let server = TestServer::seeded().await;
    let submission = server.submit("  Ada  ").await;
    assert_eq!(submission.name, "Ada");
    assert_eq!(submission.status.to_string(), "new");

    let response = server
        .client
        .post(server.url("/contact"))
        .json(&json!({ "name": "Ada", "email": "not-an-email", "subject": "Hi", "message": "Hello" }))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.expect("json");
    assert!(body["detail"].as_str().expect("detail").contains("email"));
}

#[tokio::test]
async fn listing_filters_and_paginates() {
    let server = TestServer::seeded().await;
    let first = server.submit("first").await;
    let second = server.submit("second").await;
    server.submit("third").await;
    assert_eq!(server.set_status(first.id, "read").await.status(), StatusCode::OK);

    let all: Vec<ContactSubmission> =
        server.client.get(server.url("/contact")).send().await.expect("request").json().await.expect("list");
    let names: Vec<_> = all.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["third", "second", "first"]);

    let unread: Vec<ContactSubmission> = server
        .client
        .get(server.url("/contact?status=new"))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("list");
    assert_eq!(unread.len(), 2);
    assert!(unread.iter().all(|s| s.id != first.id));

    let page: Vec<ContactSubmission> = server
        .client
        .get(server.url("/contact?skip=1&limit=1"))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("list");
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, second.id);
}

#[tokio::test]
async fn stats_count_per_status() {
    let server = TestServer::seeded().await;
    let first = server.submit("first").await;
    server.submit("second").await;
    server.set_status(first.id, "read").await;
    server.set_status(first.id, "responded").await;

    let stats: Value =
        server.client.get(server.url("/contact/stats")).send().await.expect("request").json().await.expect("json");
    assert_eq!(stats, json!({ "total": 2, "new": 1, "read": 0, "responded": 1 }));
}

#[tokio::test]
async fn status_transitions() {
    let server = TestServer::seeded().await;
    let submission = server.submit("Ada").await;

    let response = server.set_status(submission.id, "responded").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = server.set_status(submission.id, "read").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("json");
    assert_eq!(body["message"], "Status updated successfully");
    assert_eq!(body["submission"]["status"], "read");

    let response = server.set_status(submission.id, "read").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = server.set_status(submission.id, "archived").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = server.set_status(uuid::Uuid::new_v4(), "read").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let server = TestServer::seeded().await;
    let response = server
        .client
        .get(server.url("/"))
        .header("Origin", "https://portfolio.example")
        .send()
        .await
        .expect("request");
    let allowed = response.headers().get("access-control-allow-origin").expect("cors header");
    assert_eq!(allowed, "*");
}

#[tokio::test]
async fn malformed_ids_are_not_found() {
    let server = TestServer::seeded().await;
    let response = server.set_status("abc123", "read").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(detail(response).await.contains("abc123"));
}

#[tokio::test]
async fn incomplete_submission_reports_detail() {
    let server = TestServer::seeded().await;
    let response = server
        .client
        .post(server.url("/contact"))
        .json(&json!({ "name": "Ada", "subject": "Hi", "message": "Hello" }))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(detail(response).await.contains("email"));
}

#[tokio::test]
async fn unparsable_body_reports_detail() {
    let server = TestServer::seeded().await;
    let response = server
        .client
        .post(server.url("/contact"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(!detail(response).await.is_empty());
}

#[tokio::test]
async fn unknown_status_filter_reports_detail() {
    let server = TestServer::seeded().await;
    let response = server.client.get(server.url("/contact?status=archived")).send().await.expect("request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(detail(response).await.contains("archived"));
}

#[tokio::test]
async fn zero_limit_lists_everything() {
    let server = TestServer::seeded().await;
    for name in ["first", "second", "third"] {
        server.submit(name).await;
    }
    let all: Vec<ContactSubmission> =
        server.client.get(server.url("/contact?limit=0")).send().await.expect("request").json().await.expect("list");
    assert_eq!(all.len(), 3);
}
