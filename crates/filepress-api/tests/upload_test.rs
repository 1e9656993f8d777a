//! Upload API integration tests.
//!
//! Run with: `cargo test -p filepress-api --test upload_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::fixtures::{create_fake_executable, create_test_png, read_single_entry};
use helpers::{setup_test_app, setup_test_app_with};
use image::ImageFormat;
use serde_json::Value;

#[tokio::test]
async fn test_upload_csv_returns_archive_descriptor() {
    let app = setup_test_app().await;

    let response = app.upload("report.csv", b"a,b\n1,2\n".to_vec()).await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["original_size"], 9);
    assert_eq!(body["filename"], "compressed_report.csv.zip");
    assert!(body["compressed_size"].as_u64().unwrap() > 0);

    assert_eq!(app.stored_files(), vec!["compressed_report.csv.zip"]);
}

#[tokio::test]
async fn test_upload_png_is_reencoded() {
    let app = setup_test_app().await;
    let png = create_test_png(64, 48);

    let response = app.upload("photo.PNG", png.clone()).await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["original_size"], png.len() as u64);
    assert_eq!(body["filename"], "compressed_photo.PNG.zip");

    let stored = std::fs::read(app.upload_folder().join("compressed_photo.PNG.zip")).unwrap();
    assert_eq!(image::guess_format(&stored).unwrap(), ImageFormat::Png);
    assert_eq!(body["compressed_size"], stored.len() as u64);
}

#[tokio::test]
async fn test_upload_disguised_executable_is_archived() {
    let app = setup_test_app().await;
    let exe = create_fake_executable();

    let response = app.upload("malware.txt", exe.clone()).await;

    assert_eq!(response.status_code(), 200);
    let stored = std::fs::read(app.upload_folder().join("compressed_malware.txt.zip")).unwrap();
    let (name, content) = read_single_entry(&stored);
    assert_eq!(name, "malware.txt");
    assert_eq!(content, exe);
}

#[tokio::test]
async fn test_upload_empty_file() {
    let app = setup_test_app().await;

    let response = app.upload("empty.txt", Vec::new()).await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["original_size"], 0);
    assert!(body["compressed_size"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn test_upload_without_file_part() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_text("comment", "no attachment");
    let response = app.client().post("/upload").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "no file part");
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_upload_text_field_named_file_is_not_a_file() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_text("file", "just a value");
    let response = app.client().post("/upload").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "no file part");
}

#[tokio::test]
async fn test_upload_non_multipart_body() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload")
        .json(&serde_json::json!({ "file": "report.csv" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "no file part");
}

#[tokio::test]
async fn test_upload_with_empty_filename() {
    let app = setup_test_app().await;

    let response = app.upload("", b"data".to_vec()).await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "no file selected");
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_upload_disallowed_extension() {
    let app = setup_test_app().await;

    for name in ["setup.exe", "README", "archive.tar.gz"] {
        let response = app.upload(name, b"data".to_vec()).await;
        assert_eq!(response.status_code(), 400, "{} should be rejected", name);
        let body: Value = response.json();
        assert_eq!(body["error"], "unsupported file type");
    }

    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_upload_only_first_file_part_is_used() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_part("file", Part::bytes(b"first".to_vec()).file_name("one.txt"))
        .add_part("file", Part::bytes(b"second".to_vec()).file_name("two.txt"));
    let response = app.client().post("/upload").multipart(form).await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(app.stored_files(), vec!["compressed_one.txt.zip"]);
}

#[tokio::test]
async fn test_upload_corrupt_image_leaves_nothing_behind() {
    let app = setup_test_app().await;
    let mut png = create_test_png(32, 32);
    png.truncate(50);

    let response = app.upload("broken.png", png).await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["code"], "PROCESSING_ERROR");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Error during compression:"));
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_upload_over_size_cap() {
    let app = setup_test_app_with(|config| config.max_upload_size_bytes = 1024).await;

    let response = app.upload("big.txt", vec![b'a'; 8 * 1024]).await;

    assert_eq!(response.status_code(), 413);
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_upload_path_in_filename_is_stripped() {
    let app = setup_test_app().await;

    let response = app.upload("../../etc/passwd.txt", b"root".to_vec()).await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["filename"], "compressed_passwd.txt.zip");
    assert_eq!(app.stored_files(), vec!["compressed_passwd.txt.zip"]);
}

#[tokio::test]
async fn test_error_details_follow_configured_environment() {
    let dev = setup_test_app().await;
    let response = dev.upload("setup.exe", b"x".to_vec()).await;
    let body: Value = response.json();
    assert_eq!(body["error"], "unsupported file type");
    assert_eq!(body["error_type"], "InvalidInput");
    assert!(body["details"].as_str().is_some());

    let prod = setup_test_app_with(|config| config.environment = "production".to_string()).await;
    let response = prod.upload("setup.exe", b"x".to_vec()).await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "unsupported file type");
    assert!(body.get("details").is_none());
    assert!(body.get("error_type").is_none());
}

#[tokio::test]
async fn test_upload_long_filename_keeps_extension() {
    let app = setup_test_app().await;
    let name = format!("{}.txt", "a".repeat(246));

    let response = app.upload(&name, b"long".to_vec()).await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    let stored = body["filename"].as_str().unwrap();
    assert!(stored.ends_with(".txt.zip"), "{stored}");
    assert_eq!(app.stored_files(), vec![stored.to_string()]);
}
