use serde_json::json;

use crate::common::{TestApp, routes};

fn patch_with_content(content: &serde_json::Value) -> serde_json::Value {
    json!({
        "title": "Moonlight",
        "description": "A translation patch",
        "content": content.to_string(),
    })
}

mod creation {
    use super::*;

    #[tokio::test]
    async fn blocks_are_persisted_and_listed_by_position() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .post_with_token(
                routes::NEW_PATCH,
                &patch_with_content(&json!([
                    {"type": "singleImage", "images": ["media/cover.png"], "order": 2},
                    {"type": "textField", "text": "Install notes", "order": 1},
                ])),
                &token,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        let id = res.uuid();

        let content = app.get_without_token(&routes::patch_content(&id)).await;
        assert_eq!(content.status, 200);
        let blocks = content.body.as_array().unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0]["type"], "textField");
        assert_eq!(blocks[0]["text"], "Install notes");
        assert_eq!(blocks[1]["type"], "singleImage");
        assert_eq!(blocks[1]["images"], json!(["media/cover.png"]));
    }

    #[tokio::test]
    async fn block_type_and_order_have_defaults() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .post_with_token(
                routes::NEW_PATCH,
                &patch_with_content(&json!([{"text": "just text"}])),
                &token,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        let id = res.uuid();

        let content = app.get_without_token(&routes::patch_content(&id)).await;
        let blocks = content.body.as_array().unwrap();
        assert_eq!(blocks[0]["type"], "textField");
        assert_eq!(blocks[0]["order"], 1);
    }

    #[tokio::test]
    async fn malformed_content_json_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .post_with_token(
                routes::NEW_PATCH,
                &json!({"title": "t", "description": "d", "content": "{not json"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "content must be valid JSON");
    }

    #[tokio::test]
    async fn non_array_content_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .post_with_token(
                routes::NEW_PATCH,
                &json!({"title": "t", "description": "d", "content": "{\"type\": \"textField\"}"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "content must be a JSON array");
    }

    #[tokio::test]
    async fn invalid_block_rolls_back_the_whole_patch() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .post_with_token(
                routes::NEW_PATCH,
                &patch_with_content(&json!([
                    {"type": "textField", "text": "fine"},
                    {"type": "imageGallery", "images": []},
                ])),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "image type requires at least one image");

        let mine = app.get_with_token(routes::USER_PATCHES, &token).await;
        assert!(mine.body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn single_image_rules_report_exact_messages() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .post_with_token(
                routes::NEW_PATCH,
                &patch_with_content(&json!([
                    {"type": "singleImage", "images": ["a.png", "b.png"]},
                ])),
                &token,
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "single image type allows only one image");

        let res = app
            .post_with_token(
                routes::NEW_PATCH,
                &patch_with_content(&json!([
                    {"type": "textField", "text": "hi", "images": ["a.png"]},
                ])),
                &token,
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "text type cannot have images");
    }
}

mod update {
    use super::*;

    async fn patch_with_one_block(app: &TestApp, token: &str) -> (String, String) {
        let res = app
            .post_with_token(
                routes::NEW_PATCH,
                &patch_with_content(&json!([{"type": "textField", "text": "original"}])),
                token,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        let patch_id = res.uuid();

        let content = app.get_without_token(&routes::patch_content(&patch_id)).await;
        let block_id = content.body[0]["id"].as_str().unwrap().to_string();
        (patch_id, block_id)
    }

    #[tokio::test]
    async fn existing_block_text_can_be_overwritten() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let (patch_id, block_id) = patch_with_one_block(&app, &token).await;

        let content = json!([{"id": block_id, "type": "textField", "text": "rewritten"}]);
        let res = app
            .patch_with_token(
                &routes::patch_update(&patch_id),
                &json!({"content": content.to_string()}),
                &token,
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);

        let listed = app.get_without_token(&routes::patch_content(&patch_id)).await;
        assert_eq!(listed.body[0]["text"], "rewritten");
        assert_eq!(listed.body[0]["id"], block_id.as_str());
    }

    #[tokio::test]
    async fn block_update_without_an_id_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let (patch_id, _) = patch_with_one_block(&app, &token).await;

        let content = json!([{"type": "textField", "text": "orphan"}]);
        let res = app
            .patch_with_token(
                &routes::patch_update(&patch_id),
                &json!({"content": content.to_string()}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "content block update requires an id");
    }

    #[tokio::test]
    async fn bogus_block_id_rolls_back_everything() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let (patch_id, _) = patch_with_one_block(&app, &token).await;

        let content =
            json!([{"id": "00000000-0000-0000-0000-000000000000", "text": "never lands"}]);
        let res = app
            .patch_with_token(
                &routes::patch_update(&patch_id),
                &json!({"title": "New Title", "content": content.to_string()}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "content block not found for this patch");

        // Neither the block nor the patch fields moved.
        let detail = app.get_without_token(&routes::patch(&patch_id)).await;
        assert_eq!(detail.body["title"], "Moonlight");
        let listed = app.get_without_token(&routes::patch_content(&patch_id)).await;
        assert_eq!(listed.body[0]["text"], "original");
    }

    #[tokio::test]
    async fn cannot_update_blocks_of_another_users_patch() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice", "securepass").await;
        let bob = app.create_authenticated_user("bob", "securepass").await;
        let (patch_id, block_id) = patch_with_one_block(&app, &alice).await;

        let content = json!([{"id": block_id, "text": "hijacked"}]);
        let res = app
            .patch_with_token(
                &routes::patch_update(&patch_id),
                &json!({"content": content.to_string()}),
                &bob,
            )
            .await;

        assert_eq!(res.status, 403);
        let listed = app.get_without_token(&routes::patch_content(&patch_id)).await;
        assert_eq!(listed.body[0]["text"], "original");
    }

    #[tokio::test]
    async fn omitted_block_fields_reset_to_creation_defaults() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .post_with_token(
                routes::NEW_PATCH,
                &patch_with_content(&json!([
                    {"type": "textField", "text": "original", "order": 5}
                ])),
                &token,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        let patch_id = res.uuid();

        let content = app.get_without_token(&routes::patch_content(&patch_id)).await;
        let block_id = content.body[0]["id"].as_str().unwrap().to_string();
        assert_eq!(content.body[0]["order"], 5);

        // Omitting order in the update entry resets it, just like a
        // creation entry without one.
        let content = json!([{"id": block_id, "type": "textField", "text": "rewritten"}]);
        let res = app
            .patch_with_token(
                &routes::patch_update(&patch_id),
                &json!({"content": content.to_string()}),
                &token,
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);

        let listed = app.get_without_token(&routes::patch_content(&patch_id)).await;
        assert_eq!(listed.body[0]["text"], "rewritten");
        assert_eq!(listed.body[0]["order"], 1);
    }

    #[tokio::test]
    async fn updated_block_must_still_satisfy_the_image_rules() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let (patch_id, block_id) = patch_with_one_block(&app, &token).await;

        let content = json!([{"id": block_id, "type": "singleImage", "images": []}]);
        let res = app
            .patch_with_token(
                &routes::patch_update(&patch_id),
                &json!({"content": content.to_string()}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "image type requires at least one image");
    }
}
