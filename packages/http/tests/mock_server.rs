//! Client behaviour against canned server replies.

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bailey_core_store::{Error, KeyError};
use bailey_http::connect;
use bailey_serde_store::Object;

#[tokio::test]
async fn test_put_sends_base64_payload() {
    let server = MockServer::start().await;

    // JSON-encoded `42` is the two bytes "42", base64 "NDI=".
    Mock::given(method("POST"))
        .and(path("/rpc"))
        .and(body_json(json!({
            "method": "put",
            "params": {"key": "/answer", "value": "NDI="}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "/answer"})))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    tokio::task::spawn_blocking(move || {
        let mut store = connect(&uri).unwrap();
        store.put("/answer", &42).unwrap();
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_listing_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rpc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"result": {"listing": ["eggs", "spam"]}})),
        )
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let mut store = connect(&uri).unwrap();
        store.get::<i32>("/food").unwrap()
    })
    .await
    .unwrap();

    assert_eq!(
        result,
        Object::Listing(vec!["eggs".to_string(), "spam".to_string()])
    );
}

#[tokio::test]
async fn test_known_faults_become_local_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rpc"))
        .and(body_json(json!({"method": "get", "params": {"key": "/nope"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fault": {"code": "not_found", "key": "/nope", "message": "Key not found: /nope"}
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rpc"))
        .and(body_json(json!({"method": "present", "params": {"key": "/ok"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fault": {
                "code": "invalid_key",
                "key": "/ok",
                "reason": {"kind": "reserved_name", "component": "ok"},
                "message": "rejected"
            }
        })))
        .mount(&server)
        .await;

    let uri = server.uri();
    let (get, present) = tokio::task::spawn_blocking(move || {
        let mut store = connect(&uri).unwrap();
        (store.get::<i32>("/nope"), store.contains("/ok"))
    })
    .await
    .unwrap();

    assert!(matches!(get, Err(Error::NotFound { key }) if key == "/nope"));
    match present {
        Err(Error::InvalidKey { key, reason }) => {
            assert_eq!(key, "/ok");
            assert_eq!(
                reason,
                KeyError::ReservedName {
                    component: "ok".to_string()
                }
            );
        }
        other => panic!("expected invalid key, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_fault_code_is_remote_fault() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rpc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fault": {"code": "disk_on_fire", "message": "the disk is on fire"}
        })))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let mut store = connect(&uri).unwrap();
        store.contains("/spam")
    })
    .await
    .unwrap();

    match result {
        Err(Error::RemoteFault { message, .. }) => assert_eq!(message, "the disk is on fire"),
        other => panic!("expected remote fault, got {:?}", other),
    }
}

#[tokio::test]
async fn test_http_error_is_remote_fault() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rpc"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let mut store = connect(&uri).unwrap();
        store.get::<i32>("/spam")
    })
    .await
    .unwrap();

    match result {
        Err(Error::RemoteFault { code, .. }) => assert_eq!(code, "http_500"),
        other => panic!("expected remote fault, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_reply_is_remote_fault() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rpc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let mut store = connect(&uri).unwrap();
        store.contains("/spam")
    })
    .await
    .unwrap();

    assert!(matches!(result, Err(Error::RemoteFault { .. })));
}
