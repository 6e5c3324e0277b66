use globerai::{
    AssetFile, AssetType, Client, ClientBuilder, CreateProjectRequest, Gender, GloberError,
    ProjectStatus, TargetContentConfig, TargetContentType, TargetPlatform,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

async fn setup() -> (MockServer, Client) {
    let server = MockServer::start().await;
    let client = ClientBuilder::new()
        .token(TOKEN)
        .base_url(format!("{}/api/v1", server.uri()))
        .build()
        .unwrap();
    (server, client)
}

fn sample_request() -> CreateProjectRequest {
    CreateProjectRequest::new(
        "test_project",
        TargetPlatform::AppleAppStore,
        TargetContentType::Localization,
        "https://www.content-page-for-optimization.com",
    )
    .with_description("test_description")
    .with_target(
        TargetContentConfig::new("Arabic", "Saudi Arabia")
            .with_demo_age("18-24")
            .with_demo_gender(Gender::Male)
            .with_image_config(1920, 1080, 3),
    )
}

fn project_record(status: &str) -> serde_json::Value {
    json!({
        "name": "test_project",
        "description": "test_description",
        "target_platform": "APPLE_APP_STORE",
        "target_content_type": "LOCALIZATION",
        "content_url": "https://www.content-page-for-optimization.com",
        "target_content_configs": [{
            "target_language": "Arabic",
            "target_location": "Saudi Arabia",
            "target_demo_age": "18-24",
            "target_demo_gender": "MALE",
        }],
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-01T10:05:00Z",
        "status": status,
        "assets": [
            { "asset_id": "a1", "name": "7.jpg", "asset_type": "IMAGE", "resource_uri": "https://cdn.example.com/7.jpg" },
            { "asset_id": "a2", "name": "terms.csv", "asset_type": "GLOSSARY", "resource_uri": "" },
        ],
    })
}

#[tokio::test]
async fn create_project_posts_json_once() {
    let (server, client) = setup().await;
    let request = sample_request();

    Mock::given(method("POST"))
        .and(path("/api/v1/projects"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::to_value(&request).unwrap()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "projectId": "p1" })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create_project(&request).await.unwrap();
    assert_eq!(created.project_id, "p1");

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    let sent: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert!(sent.get("instruction").is_none());
    assert_eq!(sent["target_content_configs"][0]["target_demo_gender"], "MALE");
}

#[tokio::test]
async fn create_project_is_not_deduplicated() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/projects"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "projectId": "p1" })))
        .expect(2)
        .mount(&server)
        .await;

    let request = sample_request();
    client.create_project(&request).await.unwrap();
    client.create_project(&request).await.unwrap();
}

#[tokio::test]
async fn get_project_details_decodes_record() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/projects/p1"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(project_record("COMPLETED")))
        .expect(1)
        .mount(&server)
        .await;

    let details = client.get_project_details("p1").await.unwrap();
    assert_eq!(details.status, ProjectStatus::Completed);
    assert!(details.status.is_terminal());
    assert_eq!(details.assets.len(), 2);
    assert_eq!(details.assets[1].asset_type, AssetType::Glossary);
    assert_eq!(details.target_content_configs[0].target_demo_gender, Some(Gender::Male));
}

#[tokio::test]
async fn get_project_details_accepts_wrapped_record() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/projects/p1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "project": project_record("PENDING") })),
        )
        .mount(&server)
        .await;

    let details = client.get_project_details("p1").await.unwrap();
    assert_eq!(details.status, ProjectStatus::Pending);
    assert_eq!(details.name, "test_project");
}

#[tokio::test]
async fn unknown_project_status_is_decode_error_naming_value() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/projects/p1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "project": project_record("ARCHIVED") })),
        )
        .mount(&server)
        .await;

    let err = client.get_project_details("p1").await.unwrap_err();
    match &err {
        GloberError::Decode { body, .. } => assert!(body.contains("ARCHIVED")),
        other => panic!("expected Decode error, got {other:?}"),
    }
    let message = err.to_string();
    assert!(message.contains("ARCHIVED"), "{message}");
    assert!(!message.contains("untagged"), "{message}");
}

#[tokio::test]
async fn missing_project_is_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/projects/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"error":"not found"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let err = client.get_project_details("missing").await.unwrap_err();
    match err {
        GloberError::Api { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, r#"{"error":"not found"}"#);
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn status_codes_are_not_special_cased() {
    let (server, client) = setup().await;

    for (id, code) in [("a", 401u16), ("b", 403), ("c", 500)] {
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/projects/{id}/results")))
            .respond_with(ResponseTemplate::new(code).set_body_string("nope"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client.get_project_results(id).await.unwrap_err();
        assert!(matches!(err, GloberError::Api { .. }));
        assert_eq!(err.status(), Some(code));
    }
}

#[tokio::test]
async fn upload_asset_sends_two_field_multipart() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/projects/p1/assets"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "asset_id": "a1", "name": "7.jpg" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let file = AssetFile::from_bytes("7.jpg", b"\xFF\xD8fake-jpeg".to_vec());
    let uploaded = client
        .upload_asset("p1", AssetType::Image, file)
        .await
        .unwrap();
    assert_eq!(uploaded.asset_id, "a1");
    assert_eq!(uploaded.name, "7.jpg");

    let received = server.received_requests().await.unwrap();
    let req = &received[0];

    let content_type = req.headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data; boundary="));
    assert!(!content_type.contains("application/json"));

    let body = String::from_utf8_lossy(&req.body).to_lowercase();
    assert_eq!(body.matches("content-disposition: form-data;").count(), 2);
    assert!(body.contains(r#"name="assettype""#));
    assert!(body.contains("\r\n\r\nimage\r\n"));
    assert!(body.contains(r#"name="file"; filename="7.jpg""#));
    assert!(body.contains("fake-jpeg"));
}

#[tokio::test]
async fn upload_asset_file_part_carries_mime_type() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/projects/p1/assets"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "asset_id": "a1", "name": "x" })),
        )
        .expect(3)
        .mount(&server)
        .await;

    let files = [
        AssetFile::from_bytes("7.jpg", b"\xFF\xD8fake-jpeg".to_vec()),
        AssetFile::from_bytes("terms", b"source,target\n".to_vec()).with_mime_type("text/csv"),
        AssetFile::from_bytes("blob", b"??".to_vec()),
    ];
    for file in files {
        client
            .upload_asset("p1", AssetType::Image, file)
            .await
            .unwrap();
    }

    let received = server.received_requests().await.unwrap();
    let bodies: Vec<String> = received
        .iter()
        .map(|r| String::from_utf8_lossy(&r.body).to_lowercase())
        .collect();

    assert!(bodies[0].contains("filename=\"7.jpg\"\r\ncontent-type: image/jpeg\r\n"));
    assert!(bodies[1].contains("filename=\"terms\"\r\ncontent-type: text/csv\r\n"));
    assert!(bodies[2].contains("filename=\"blob\"\r\ncontent-type: application/octet-stream\r\n"));
    // The assetType text field stays untyped.
    assert_eq!(bodies[0].matches("content-type:").count(), 1);
}

#[tokio::test]
async fn invalid_mime_type_sends_nothing() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let file = AssetFile::from_bytes("7.jpg", b"x".to_vec()).with_mime_type("not a mime");
    let err = client
        .upload_asset("p1", AssetType::Image, file)
        .await
        .unwrap_err();
    assert!(matches!(err, GloberError::InvalidArgument(_)), "got {err:?}");
}

#[tokio::test]
async fn upload_asset_reads_file_from_path() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/projects/p1/assets"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "asset_id": "g1", "name": "glossary.csv" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("glossary.csv");
    std::fs::write(&file_path, "source,target\nhello,marhaba\n").unwrap();

    let uploaded = client
        .upload_asset("p1", AssetType::Glossary, AssetFile::from_path(&file_path))
        .await
        .unwrap();
    assert_eq!(uploaded.asset_id, "g1");

    let received = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&received[0].body);
    assert!(body.contains(r#"filename="glossary.csv""#));
    assert!(body.contains("hello,marhaba"));
    assert!(body.contains("GLOSSARY"));
}

#[tokio::test]
async fn upload_of_missing_file_sends_nothing() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let err = client
        .upload_asset(
            "p1",
            AssetType::Video,
            AssetFile::from_path(dir.path().join("nope.mp4")),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, GloberError::Io(_)));
}

#[tokio::test]
async fn upload_text_asset_posts_json() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/projects/p1/textAssets"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "assetType": "TEXT",
            "textField": "subtitle",
            "textContent": "Track every workout",
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "asset_id": "t1", "name": "subtitle" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let uploaded = client
        .upload_text_asset("p1", "subtitle", "Track every workout")
        .await
        .unwrap();
    assert_eq!(uploaded.asset_id, "t1");
}

#[tokio::test]
async fn get_project_results_preserves_targets() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/projects/p1/results"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "project_id": "p1",
            "status": "COMPLETED",
            "targets": [
                {
                    "target_content_config_id": "cfg-ar",
                    "results": [
                        { "generated_asset_id": "g1", "asset_type": "IMAGE", "name": "shot-1", "resource_uri": "https://cdn.example.com/g1.png" },
                        { "generated_asset_id": "g2", "asset_type": "TEXT", "name": "title", "resource_uri": "https://cdn.example.com/g2.txt" },
                    ],
                },
                {
                    "target_content_config_id": "cfg-fr",
                    "results": [
                        { "generated_asset_id": "g3", "asset_type": "VIDEO", "name": "preview", "resource_uri": "https://cdn.example.com/g3.mp4" },
                    ],
                },
            ],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let results = client.get_project_results("p1").await.unwrap();
    assert_eq!(results.project_id, "p1");
    assert_eq!(results.status, "COMPLETED");
    assert_eq!(results.targets.len(), 2);

    assert_eq!(results.targets[0].target_content_config_id, "cfg-ar");
    let names: Vec<_> = results.targets[0]
        .results
        .iter()
        .map(|g| g.generated_asset_id.as_str())
        .collect();
    assert_eq!(names, ["g1", "g2"]);

    assert_eq!(results.targets[1].target_content_config_id, "cfg-fr");
    assert_eq!(results.targets[1].results[0].generated_asset_id, "g3");
}

#[tokio::test]
async fn rerun_generation_posts_config_id_each_time() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/projects/p1/rerun"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "target_content_config_id": "cfg-ar" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "IN_PROGRESS" })))
        .expect(2)
        .mount(&server)
        .await;

    let first = client.rerun_generation("p1", "cfg-ar").await.unwrap();
    let second = client.rerun_generation("p1", "cfg-ar").await.unwrap();
    assert_eq!(first.status, "IN_PROGRESS");
    assert_eq!(second.status, "IN_PROGRESS");
}

#[tokio::test]
async fn empty_ids_are_rejected_before_sending() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client.get_project_details("").await.unwrap_err();
    assert!(matches!(err, GloberError::InvalidArgument(_)));

    let err = client.rerun_generation("p1", "").await.unwrap_err();
    assert!(matches!(err, GloberError::InvalidArgument(_)));
}

#[tokio::test]
async fn ids_are_path_encoded() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/projects/a%2Fb/results"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "project_id": "a/b",
            "status": "PENDING",
            "targets": [],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let results = client.get_project_results("a/b").await.unwrap();
    assert!(results.targets.is_empty());
}

#[tokio::test]
async fn malformed_success_body_is_decode_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let err = client.create_project(&sample_request()).await.unwrap_err();
    match err {
        GloberError::Decode { body, .. } => assert_eq!(body, "<html>gateway</html>"),
        other => panic!("expected Decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ClientBuilder::new()
        .token(TOKEN)
        .base_url(format!("http://{addr}/api/v1"))
        .build()
        .unwrap();

    let err = client.get_project_details("p1").await.unwrap_err();
    assert!(err.is_transport(), "expected Transport error, got {err:?}");
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn clients_keep_their_own_tokens() {
    let server = MockServer::start().await;
    let base = format!("{}/api/v1", server.uri());

    for token in ["alice-token", "bob-token"] {
        Mock::given(method("GET"))
            .and(path("/api/v1/projects/p1/results"))
            .and(header("authorization", format!("Bearer {token}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "project_id": "p1",
                "status": token,
                "targets": [],
            })))
            .expect(2)
            .mount(&server)
            .await;
    }

    let alice = ClientBuilder::new().token("alice-token").base_url(&base).build().unwrap();
    let bob = ClientBuilder::new().token("bob-token").base_url(&base).build().unwrap();
    let alice_clone = alice.clone();

    let (a1, b1, a2, b2) = tokio::join!(
        alice.get_project_results("p1"),
        bob.get_project_results("p1"),
        alice_clone.get_project_results("p1"),
        bob.get_project_results("p1"),
    );
    assert_eq!(a1.unwrap().status, "alice-token");
    assert_eq!(a2.unwrap().status, "alice-token");
    assert_eq!(b1.unwrap().status, "bob-token");
    assert_eq!(b2.unwrap().status, "bob-token");
}
