//! Test helpers: build AppState and router for integration tests.
//!
//! Each test app gets its own temporary storage root.

#![allow(dead_code)]

pub mod fixtures;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use filepress_api::setup::{build_state, routes};
use filepress_core::Config;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test application: server plus the storage root it writes to.
pub struct TestApp {
    pub server: TestServer,
    pub upload_folder: PathBuf,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn upload_folder(&self) -> &Path {
        &self.upload_folder
    }

    /// Sorted names of everything currently in the storage root.
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.upload_folder)
            .expect("Failed to read upload folder")
            .map(|e| e.expect("dir entry").file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    /// POST a single file part named `file`.
    pub async fn upload(&self, filename: &str, data: Vec<u8>) -> TestResponse {
        let part = Part::bytes(data).file_name(filename);
        self.server
            .post("/upload")
            .multipart(MultipartForm::new().add_part("file", part))
            .await
    }
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {}).await
}

/// Setup test app with a config adjusted by `configure`.
pub async fn setup_test_app_with(configure: impl FnOnce(&mut Config)) -> TestApp {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let upload_folder = temp_dir.path().join("uploads");

    let mut config = Config {
        upload_folder: upload_folder.clone(),
        ..Config::default()
    };
    configure(&mut config);

    let state = build_state(config).await.expect("Failed to build state");
    let app = routes::setup_routes(&state.config, state.clone());
    let server = TestServer::new(app).expect("Failed to create test server");

    TestApp {
        server,
        upload_folder,
        _temp_dir: temp_dir,
    }
}
