use crate::common::{TestApp, routes};

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake image payload";

#[tokio::test]
async fn uploaded_file_gets_a_hash_derived_url() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("alice", "securepass").await;

    let res = app
        .upload_with_token(routes::UPLOAD, "cover.png", PNG_BYTES.to_vec(), &token)
        .await;

    assert_eq!(res.status, 201, "{}", res.text);
    let url = res.body["url"].as_str().unwrap();
    assert!(url.starts_with("http://localhost/media/"));
    assert!(url.ends_with(".png"));
}

#[tokio::test]
async fn identical_uploads_return_the_same_url() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("alice", "securepass").await;

    let first = app
        .upload_with_token(routes::UPLOAD, "cover.png", PNG_BYTES.to_vec(), &token)
        .await;
    let second = app
        .upload_with_token(routes::UPLOAD, "other-name.png", PNG_BYTES.to_vec(), &token)
        .await;

    assert_eq!(first.body["url"], second.body["url"]);
}

#[tokio::test]
async fn uploaded_file_can_be_fetched_back() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("alice", "securepass").await;

    let res = app
        .upload_with_token(routes::UPLOAD, "cover.png", PNG_BYTES.to_vec(), &token)
        .await;
    let url = res.body["url"].as_str().unwrap();
    let path = url.strip_prefix("http://localhost").unwrap();

    let fetched = app.get_without_token(path).await;

    assert_eq!(fetched.status, 200);
    assert_eq!(fetched.text.as_bytes(), PNG_BYTES);
}

#[tokio::test]
async fn upload_requires_a_token() {
    let app = TestApp::spawn().await;

    let res = app
        .post_empty_without_token(routes::UPLOAD)
        .await;

    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "TOKEN_MISSING");
}

#[tokio::test]
async fn upload_without_a_file_field_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("alice", "securepass").await;

    let form = reqwest::multipart::Form::new().text("note", "no file here");
    let res = app
        .client
        .post(format!("http://{}{}", app.addr, routes::UPLOAD))
        .header("Authorization", format!("Bearer {token}"))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send multipart request");
    let res = crate::common::TestResponse::from_response(res).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn filenames_with_path_separators_are_rejected() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("alice", "securepass").await;

    let res = app
        .upload_with_token(
            routes::UPLOAD,
            "../escape.png",
            PNG_BYTES.to_vec(),
            &token,
        )
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn missing_media_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app
        .get_without_token(&format!(
            "/media/{}.png",
            "0".repeat(64)
        ))
        .await;

    assert_eq!(res.status, 404);
}
