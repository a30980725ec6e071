//! Shared harness: a hub on a loopback port with a recording spawner

#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use builder_hub::config::LauncherConfig;
use builder_hub::dashboard::{create_router, AppState};
use builder_hub::launcher::{LaunchCommand, LaunchError, Launcher, ProcessSpawner};
use builder_hub::models::DeviceType;
use builder_hub::storage::HubDb;
use tempfile::TempDir;

#[derive(Default)]
pub struct RecordingSpawner {
    pub seen: Mutex<Vec<LaunchCommand>>,
}

#[async_trait::async_trait]
impl ProcessSpawner for RecordingSpawner {
    async fn run(&self, command: &LaunchCommand) -> Result<(), LaunchError> {
        self.seen.lock().unwrap().push(command.clone());
        Ok(())
    }
}

impl RecordingSpawner {
    /// Wait until `count` commands have been run.
    pub async fn wait_for(&self, count: usize) -> Vec<LaunchCommand> {
        for _ in 0..200 {
            {
                let seen = self.seen.lock().unwrap();
                if seen.len() >= count {
                    return seen.clone();
                }
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("spawner never saw {count} launches");
    }
}

pub struct TestHub {
    pub base: String,
    pub db: Option<Arc<HubDb>>,
    pub spawner: Arc<RecordingSpawner>,
    pub http: reqwest::Client,
    _dir: TempDir,
}

impl TestHub {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn db(&self) -> &HubDb {
        self.db.as_deref().expect("hub started without storage")
    }

    /// Insert project rows directly, as the external tool that owns them would.
    pub fn seed_projects(&self, sql: &str) {
        self.db()
            .with_conn(|conn| Ok(conn.execute_batch(sql)?))
            .unwrap();
    }

    pub async fn post_json(&self, path: &str, body: &str) -> reqwest::Response {
        self.http
            .post(self.url(path))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .unwrap()
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.http.get(self.url(path)).send().await.unwrap()
    }
}

pub async fn start(with_db: bool, device: DeviceType) -> TestHub {
    let dir = TempDir::new().unwrap();
    let db = with_db.then(|| Arc::new(HubDb::open(&dir.path().join("hub.db")).unwrap()));

    let spawner = Arc::new(RecordingSpawner::default());
    let launcher = Launcher::start(LauncherConfig::default(), spawner.clone());
    let state = Arc::new(AppState::new(db.clone(), device, launcher));

    let static_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("static");
    let app = create_router(state, &static_dir);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let http = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestHub {
        base: format!("http://{}", addr),
        db,
        spawner,
        http,
        _dir: dir,
    }
}
