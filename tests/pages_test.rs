//! Page rendering through the router

mod common;

use builder_hub::models::DeviceType;

const SEED: &str = "INSERT INTO projects (id, title, status, progress, laptop_path, desktop_path, doc_url) VALUES
    ('p1', 'Alpha', 'active', 150, '/home/me/alpha', NULL, 'https://docs.example.com/alpha'),
    ('p2', NULL, NULL, NULL, NULL, NULL, 'docs.example.com/untitled');";

#[tokio::test]
async fn test_root_redirects_to_hub() {
    let hub = common::start(true, DeviceType::Desktop).await;
    let res = hub.get("/").await;
    assert!(res.status().is_redirection());
    assert_eq!(res.headers()["location"], "/hub");
}

#[tokio::test]
async fn test_health_and_static() {
    let hub = common::start(false, DeviceType::Desktop).await;
    assert_eq!(hub.get("/health").await.text().await.unwrap(), "OK");

    let res = hub.get("/static/hub.js").await;
    assert_eq!(res.status(), 200);
    let script = res.text().await.unwrap();
    assert!(script.contains("/api/launch-cursor"));
    // Modal launch control is disabled rather than hidden without a path
    assert!(script.contains("launchButton.disabled = true"));
    assert!(!script.contains("launchButton.hidden"));
    // Clipboard failure tells the user to copy by hand
    assert!(script.contains("Copy the doc URL manually"));
}

#[tokio::test]
async fn test_hub_lists_projects_for_device() {
    let hub = common::start(true, DeviceType::Desktop).await;
    hub.seed_projects(SEED);

    let html = hub.get("/hub").await.text().await.unwrap();
    assert_eq!(html.matches("class=\"card\"").count(), 2);
    // Untitled (NULL title) sorts first
    let untitled = html.find("<h2>Untitled</h2>").unwrap();
    let alpha = html.find("<h2>Alpha</h2>").unwrap();
    assert!(untitled < alpha);
    assert!(html.contains("width: 100%"));
    // Desktop falls back to the laptop path when no desktop path is set
    assert!(html.contains("data-launch-path=\"/home/me/alpha\""));
    assert!(!html.contains("docs.example.com/untitled"));
}

#[tokio::test]
async fn test_hub_without_storage() {
    let hub = common::start(false, DeviceType::Desktop).await;
    let res = hub.get("/hub").await;
    assert_eq!(res.status(), 200);
    assert!(res.text().await.unwrap().contains("Storage is not configured"));

    assert_eq!(hub.get("/hub/p1").await.status(), 404);
}

#[tokio::test]
async fn test_detail_page() {
    let hub = common::start(true, DeviceType::Laptop).await;
    hub.seed_projects(SEED);

    let html = hub.get("/hub/p1").await.text().await.unwrap();
    assert!(html.contains("<iframe class=\"doc-frame\" src=\"https://docs.example.com/alpha\""));
    assert!(html.contains("data-launch-path=\"/home/me/alpha\""));

    let html = hub.get("/hub/p2").await.text().await.unwrap();
    assert!(!html.contains("<iframe"));
    assert!(html.contains("Enter a valid doc URL (must start with http)"));

    let res = hub.get("/hub/missing").await;
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn test_quick_log_page() {
    let hub = common::start(false, DeviceType::Desktop).await;
    let html = hub.get("/quick-log").await.text().await.unwrap();
    assert!(html.contains("id=\"quick-log\""));
    assert!(html.contains("<option value=\"dev\" selected>"));
}

#[tokio::test]
async fn test_storage_failures() {
    let hub = common::start(true, DeviceType::Desktop).await;
    hub.seed_projects(SEED);
    hub.seed_projects("DROP TABLE build_logs; DROP TABLE projects;");

    // Insert failure passes the storage message through
    let res = hub
        .post_json("/api/log", r#"{"project":"Acme","stage":"dev","summary":"x"}"#)
        .await;
    assert_eq!(res.status(), 500);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "no such table: build_logs");

    // List failure renders as an empty hub
    let res = hub.get("/hub").await;
    assert_eq!(res.status(), 200);
    let html = res.text().await.unwrap();
    assert!(html.contains("No projects yet"));
    assert!(!html.contains("class=\"card\""));

    // Detail failure renders the not-found page
    assert_eq!(hub.get("/hub/p1").await.status(), 404);
}
