//! HTTP contract tests for the presign, upload and predict flow.

use std::sync::{Arc, Mutex};

use regex::Regex;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use eegp_client::{
    ClientConfig, ClientError, FlowStage, NoProgress, PredictApi, PredictClient,
    PredictionResult, SetFile,
};

fn client_for(server: &MockServer) -> PredictClient {
    PredictClient::new(ClientConfig::default().with_api_base(server.uri())).unwrap()
}

fn sample_file() -> SetFile {
    SetFile::new("sample.set", b"EEGLAB-bytes".to_vec())
}

fn sample_prediction() -> serde_json::Value {
    json!({ "predicted_class": "A", "confidence": 0.87, "probs": [0.87, 0.13] })
}

/// Echoes the requested key back, as the real presign endpoint does.
async fn mount_presign_echo(server: &MockServer) {
    let upload_url = format!("{}/bucket/object?X-Amz-Signature=abc", server.uri());
    Mock::given(method("GET"))
        .and(path("/presign"))
        .respond_with(move |req: &wiremock::Request| {
            let key = req
                .url
                .query_pairs()
                .find(|(k, _)| k == "key")
                .map(|(_, v)| v.into_owned())
                .unwrap_or_default();
            ResponseTemplate::new(200).set_body_json(json!({ "uploadUrl": upload_url, "key": key }))
        })
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_upload_flow_happy_path() {
    let server = MockServer::start().await;
    let confirmed = "uploads/2024-05-01T12-34-56-789-abc123-sample.set";

    Mock::given(method("GET"))
        .and(path("/presign"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uploadUrl": format!("{}/bucket/object?X-Amz-Signature=abc", server.uri()),
            "key": confirmed,
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/bucket/object"))
        .and(query_param("X-Amz-Signature", "abc"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "s3_key": confirmed })))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_prediction()))
        .expect(1)
        .mount(&server)
        .await;

    let stages = Arc::new(Mutex::new(Vec::new()));
    let sink = stages.clone();
    let observer = move |s: FlowStage| sink.lock().unwrap().push(s);

    let client = client_for(&server);
    let result = client.run_upload_flow(&sample_file(), &observer).await.unwrap();

    assert_eq!(
        result,
        PredictionResult {
            predicted_class: "A".to_string(),
            confidence: 0.87,
            probs: vec![0.87, 0.13],
            top_index: None,
        }
    );
    assert_eq!(stages.lock().unwrap().last(), Some(&FlowStage::Done));

    let requests = server.received_requests().await.unwrap();
    let presign = &requests[0];
    let key = presign
        .url
        .query_pairs()
        .find(|(k, _)| k == "key")
        .map(|(_, v)| v.into_owned())
        .unwrap();
    let pattern = Regex::new(r"^uploads/[0-9T:-]+-[0-9a-z]{6}-[A-Za-z0-9._-]+$").unwrap();
    assert!(pattern.is_match(&key), "unexpected key {key}");
    assert!(presign.url.query_pairs().all(|(k, _)| k != "content_type"));

    let upload = &requests[1];
    assert_eq!(upload.body, b"EEGLAB-bytes");
    assert!(upload.headers.get("content-type").is_none());
}

#[tokio::test]
async fn test_typed_variant_sends_content_type() {
    let server = MockServer::start().await;
    mount_presign_echo(&server).await;

    Mock::given(method("PUT"))
        .and(path("/bucket/object"))
        .and(header("content-type", "application/octet-stream"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_prediction()))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::default()
        .with_api_base(server.uri())
        .with_content_type(Some("application/octet-stream".to_string()));
    let client = PredictClient::new(config).unwrap();
    assert_ok!(client.run_upload_flow(&sample_file(), &NoProgress).await);

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .url
        .query_pairs()
        .find(|(k, _)| k == "content_type")
        .map(|(_, v)| v.into_owned());
    assert_eq!(content_type.as_deref(), Some("application/octet-stream"));
}

#[tokio::test]
async fn test_non_set_file_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .run_upload_flow(&SetFile::new("recording.edf", vec![1u8]), &NoProgress)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(err.to_string(), "Only .set files are allowed.");
}

#[tokio::test]
async fn test_presign_without_upload_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/presign"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "key": "uploads/x.set" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_prediction()))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .run_upload_flow(&sample_file(), &NoProgress)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Presign { .. }));
    assert_eq!(err.to_string(), "No uploadUrl in response");
}

#[tokio::test]
async fn test_presign_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/presign"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "BUCKET_NAME not configured" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .request_upload_url(&client.generate_object_key("sample.set"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Presign failed: 500");
    assert_eq!(err.detail(), Some("BUCKET_NAME not configured"));
}

#[tokio::test]
async fn test_upload_rejected_by_storage() {
    let server = MockServer::start().await;
    mount_presign_echo(&server).await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_prediction()))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .run_upload_flow(&sample_file(), &NoProgress)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Upload { status: Some(403), .. }));
    assert_eq!(err.to_string(), "S3 upload failed: 403");
}

#[tokio::test]
async fn test_predict_error_message_from_backend() {
    let server = MockServer::start().await;
    mount_presign_echo(&server).await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "bad format" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .run_upload_flow(&sample_file(), &NoProgress)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Predict { status: Some(500), .. }));
    assert_eq!(err.to_string(), "bad format");
}

#[tokio::test]
async fn test_predict_error_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = assert_err!(client.run_demo_flow(&NoProgress).await);
    assert_eq!(err.to_string(), "Predict failed: 502");
}

#[tokio::test]
async fn test_demo_flow_skips_upload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/presign"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(body_json(json!({ "demo": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_prediction()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.run_demo_flow(&NoProgress).await.unwrap();
    assert_eq!(result.predicted_class, "A");
}

#[tokio::test]
async fn test_demo_flow_with_demo_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(body_json(json!({ "demo": true, "demo_key": "sample_data/other.set" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_prediction()))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::default()
        .with_api_base(server.uri())
        .with_demo_key(Some("sample_data/other.set".to_string()));
    let client = PredictClient::new(config).unwrap();
    assert_ok!(client.run_demo_flow(&NoProgress).await);
}

#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;

    assert!(client_for(&server).check_health().await);
}

#[tokio::test]
async fn test_health_check_unhealthy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(!client.check_health().await);
    assert!(matches!(
        client.health().await,
        Err(ClientError::NetworkUnreachable(_))
    ));
}

#[tokio::test]
async fn test_health_check_unreachable() {
    // bind then release a port so nothing is listening on it
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = ClientConfig::default().with_api_base(format!("http://127.0.0.1:{}", port));
    let client = PredictClient::new(config).unwrap();

    let err = client.health().await.unwrap_err();
    match &err {
        ClientError::NetworkUnreachable(reason) => {
            assert!(!reason.contains("health check returned"), "got {reason}");
        }
        other => panic!("expected NetworkUnreachable, got {other:?}"),
    }
    assert!(err.to_string().starts_with("API unreachable: "));
    assert!(!client.check_health().await);
}
