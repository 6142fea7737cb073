use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use aicache::config::Config;
use http_body_util::BodyExt;
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    // One connection keeps the in-memory database shared.
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;

    let state = aicache::api::create_app_state(config)
        .await
        .expect("Failed to create app state");
    aicache::api::router(state)
}

async fn get_json(app: &Router, uri: &str) -> serde_json::Value {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

async fn post_save(app: &Router, body: &serde_json::Value) -> serde_json::Value {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/aicache/save")
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_string(body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn list_all_on_empty_store() {
    let app = spawn_app().await;

    let body = get_json(&app, "/api/aicache/all").await;

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 0);
    assert_eq!(body["data"]["totalCount"], 0);
    assert_eq!(body["data"]["page"], 1);
    assert_eq!(body["data"]["pageSize"], 20);
}

#[tokio::test]
async fn save_then_resave_roundtrip() {
    let app = spawn_app().await;

    let request = serde_json::json!({
        "prompt": "Explain recursion",
        "response": "A function that calls itself until a base case is reached.",
        "tags": "cs, theory",
        "techStack": "rust",
        "fileName": "notes.md"
    });

    let body = post_save(&app, &request).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Entry saved successfully");
    assert_eq!(body["data"]["tags"], "cs,theory");
    assert_eq!(body["data"]["fileName"], "notes.md");
    assert!(body["data"]["id"].as_i64().unwrap() > 0);
    assert!(body["data"]["createdAt"].is_string());

    let id = body["data"]["id"].clone();

    let resave = serde_json::json!({
        "prompt": "Explain recursion",
        "response": "Updated explanation of recursion.",
        "fileName": "notes.md"
    });

    let body = post_save(&app, &resave).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Entry updated successfully");
    assert_eq!(body["data"]["id"], id);
    assert_eq!(body["data"]["response"], "Updated explanation of recursion.");

    let listing = get_json(&app, "/api/aicache/all").await;
    assert_eq!(listing["data"]["totalCount"], 1);
}

#[tokio::test]
async fn validation_failures_are_http_200_envelopes() {
    let app = spawn_app().await;

    let empty = serde_json::json!({});
    let body = post_save(&app, &empty).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Response must be at least 10 characters");

    let short_response = serde_json::json!({
        "prompt": "A prompt",
        "response": "123456789",
        "fileName": "f.md"
    });
    let body = post_save(&app, &short_response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Response must be at least 10 characters");

    let no_prompt = serde_json::json!({
        "response": "A response that is long enough.",
        "fileName": "f.md"
    });
    let body = post_save(&app, &no_prompt).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Prompt is required");

    let no_file = serde_json::json!({
        "prompt": "A prompt",
        "response": "A response that is long enough."
    });
    let body = post_save(&app, &no_file).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "File name is required");
}

async fn seed_entries(app: &Router, count: usize) {
    for i in 1..=count {
        let request = serde_json::json!({
            "prompt": format!("Prompt {}", i),
            "response": format!("Response {} with shared content inside.", i),
            "fileName": format!("file{}.md", i)
        });
        let body = post_save(app, &request).await;
        assert_eq!(body["success"], true);
    }
}

#[tokio::test]
async fn list_paging_returns_newest_first() {
    let app = spawn_app().await;
    seed_entries(&app, 15).await;

    let body = get_json(&app, "/api/aicache/all?page=1&pageSize=5").await;

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["totalCount"], 15);
    assert_eq!(body["data"]["totalPages"], 3);
    assert_eq!(body["data"]["hasNextPage"], true);
    assert_eq!(body["data"]["hasPreviousPage"], false);

    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 5);
    assert_eq!(items[0]["prompt"], "Prompt 15");
    assert_eq!(items[4]["prompt"], "Prompt 11");
}

#[tokio::test]
async fn search_paging_second_page() {
    let app = spawn_app().await;
    seed_entries(&app, 15).await;

    let body = get_json(&app, "/api/aicache/search?query=content&page=2&pageSize=5").await;

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["totalCount"], 15);
    assert_eq!(body["data"]["page"], 2);
    assert_eq!(body["data"]["hasNextPage"], true);
    assert_eq!(body["data"]["hasPreviousPage"], true);

    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 5);
    assert_eq!(items[0]["prompt"], "Prompt 10");
    assert_eq!(items[4]["prompt"], "Prompt 6");
}

#[tokio::test]
async fn search_filters_and_counts_only_matches() {
    let app = spawn_app().await;
    seed_entries(&app, 3).await;

    let needle = serde_json::json!({
        "prompt": "Something unusual",
        "response": "The Quick Brown Fox jumps over everything.",
        "fileName": "fox.md"
    });
    post_save(&app, &needle).await;

    // Case-insensitive substring across fields.
    let body = get_json(&app, "/api/aicache/search?query=quick%20brown").await;
    assert_eq!(body["data"]["totalCount"], 1);
    assert_eq!(body["data"]["items"][0]["prompt"], "Something unusual");

    let body = get_json(&app, "/api/aicache/search?query=nothing-matches-this").await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["totalCount"], 0);
}

#[tokio::test]
async fn empty_query_behaves_like_list_all() {
    let app = spawn_app().await;
    seed_entries(&app, 3).await;

    let body = get_json(&app, "/api/aicache/search?query=").await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["totalCount"], 3);

    let body = get_json(&app, "/api/aicache/search").await;
    assert_eq!(body["data"]["totalCount"], 3);
}

#[tokio::test]
async fn get_by_hash_hit_and_miss() {
    let app = spawn_app().await;

    let request = serde_json::json!({
        "prompt": "Hash lookup prompt",
        "response": "A response we can find again.",
        "fileName": "lookup.md"
    });
    let saved = post_save(&app, &request).await;
    let hash = saved["data"]["promptHash"].as_str().unwrap().to_string();
    assert_eq!(hash.len(), 64);

    let body = get_json(&app, &format!("/api/aicache/hash/{}", hash)).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["id"], saved["data"]["id"]);

    let body = get_json(&app, "/api/aicache/hash/deadbeef").await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Entry not found");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn hash_segment_is_percent_decoded() {
    let app = spawn_app().await;

    let request = serde_json::json!({
        "prompt": "Encoded hash prompt",
        "response": "A response behind an encoded hash.",
        "fileName": "enc.md"
    });
    let saved = post_save(&app, &request).await;
    let hash = saved["data"]["promptHash"].as_str().unwrap();

    // Percent-encode the first character of the hex digest.
    let encoded = format!("%{:02x}{}", hash.as_bytes()[0], &hash[1..]);

    let body = get_json(&app, &format!("/api/aicache/hash/{}", encoded)).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["id"], saved["data"]["id"]);
}

#[tokio::test]
async fn long_prompt_is_truncated_in_stored_entry() {
    let app = spawn_app().await;

    let long_prompt = "x".repeat(600);
    let request = serde_json::json!({
        "prompt": long_prompt,
        "response": "A valid response for the long prompt.",
        "fileName": "long.md"
    });

    let body = post_save(&app, &request).await;
    assert_eq!(body["success"], true);
    assert_eq!(
        body["data"]["prompt"].as_str().unwrap().chars().count(),
        500
    );
}
