use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn own_profile_requires_a_token() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token(routes::OWN_PROFILE).await;

    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "TOKEN_MISSING");
}

#[tokio::test]
async fn own_profile_is_returned_for_the_caller() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("alice", "securepass").await;

    let res = app.get_with_token(routes::OWN_PROFILE, &token).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["username"], "alice");
    assert_eq!(res.body["avatar"], "avatars/default.svg");
    assert!(res.body["joined"].is_string());
}

#[tokio::test]
async fn bio_and_avatar_can_be_updated() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("alice", "securepass").await;

    let res = app
        .patch_with_token(
            routes::OWN_PROFILE,
            &json!({"bio": "I make patches.", "avatar": "media/alice.png"}),
            &token,
        )
        .await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["bio"], "I make patches.");
    assert_eq!(res.body["avatar"], "media/alice.png");
}

#[tokio::test]
async fn join_date_is_immutable_across_updates() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("alice", "securepass").await;

    let before = app.get_with_token(routes::OWN_PROFILE, &token).await;
    let res = app
        .patch_with_token(routes::OWN_PROFILE, &json!({"bio": "new bio"}), &token)
        .await;

    assert_eq!(res.body["joined"], before.body["joined"]);
}

#[tokio::test]
async fn overlong_bio_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("alice", "securepass").await;

    let res = app
        .patch_with_token(
            routes::OWN_PROFILE,
            &json!({"bio": "b".repeat(251)}),
            &token,
        )
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn other_profiles_are_publicly_readable() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("alice", "securepass").await;
    let me = app.get_with_token(routes::ME, &token).await;
    let user_id = me.body["id"].as_i64().unwrap() as i32;

    let res = app.get_without_token(&routes::profile(user_id)).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["username"], "alice");
}

#[tokio::test]
async fn unknown_user_profile_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token(&routes::profile(999_999)).await;

    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
}
