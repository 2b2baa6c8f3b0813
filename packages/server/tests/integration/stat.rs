use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn stats_are_listed_publicly_ordered_by_description() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("alice", "securepass").await;

    for (value, description) in [(120, "patches hosted"), (45, "active authors")] {
        let res = app
            .post_with_token(
                routes::STATS,
                &json!({"value": value, "description": description}),
                &token,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
    }

    let res = app.get_without_token(routes::STATS).await;

    assert_eq!(res.status, 200);
    let stats = res.body.as_array().unwrap();
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0]["description"], "active authors");
    assert_eq!(stats[1]["description"], "patches hosted");
}

#[tokio::test]
async fn creating_a_stat_requires_a_token() {
    let app = TestApp::spawn().await;

    let res = app
        .post_without_token(routes::STATS, &json!({"value": 1, "description": "d"}))
        .await;

    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "TOKEN_MISSING");
}

#[tokio::test]
async fn zero_value_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("alice", "securepass").await;

    let res = app
        .post_with_token(
            routes::STATS,
            &json!({"value": 0, "description": "nothing"}),
            &token,
        )
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn blank_description_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("alice", "securepass").await;

    let res = app
        .post_with_token(routes::STATS, &json!({"value": 5, "description": "  "}), &token)
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}
