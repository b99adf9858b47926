//! HttpGateway integration tests against a mock backend
//!
//! Covers auth header attachment, payload encoding, and failure
//! classification (transport / HTTP status / application error).

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use agrolink_core::credentials::{CredentialRecord, MemoryCredentialStore, UserProfile};
use agrolink_core::gateway::{Attachment, Payload, RequestEnvelope, Unwrap};
use agrolink_core::{ClientConfig, ClientError, CredentialStore, HttpGateway, TransportKind};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct TestContext {
    server: MockServer,
    store: Arc<MemoryCredentialStore>,
    gateway: HttpGateway,
}

impl TestContext {
    async fn new(token: Option<&str>) -> Self {
        Self::with_config(token, |c| c).await
    }

    async fn with_config(
        token: Option<&str>,
        tweak: impl FnOnce(ClientConfig) -> ClientConfig,
    ) -> Self {
        init_logging();
        let server = MockServer::start().await;
        let record = match token {
            Some(t) => CredentialRecord::new(
                t,
                UserProfile {
                    id: "u-1".into(),
                    role: Some("staff".into()),
                    ..Default::default()
                },
            ),
            None => CredentialRecord::empty(),
        };
        let store = Arc::new(MemoryCredentialStore::with_record(record));
        let config = tweak(ClientConfig::new(server.uri()));
        let gateway = HttpGateway::new(config, store.clone()).unwrap();
        Self {
            server,
            store,
            gateway,
        }
    }

    async fn requests(&self) -> Vec<wiremock::Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}

// ─── Request preparation ───

#[tokio::test]
async fn test_bearer_attached_when_token_present() {
    let ctx = TestContext::new(Some("abc")).await;
    Mock::given(method("GET"))
        .and(path("/api/user/getUserDetails"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "_id": "u-1", "role": "staff", "firstName": "Kiran" }
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let user = ctx.gateway.get_user_details().await.unwrap();
    assert_eq!(user.id, "u-1");
    assert_eq!(user.first_name, "Kiran");
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let ctx = TestContext::new(None).await;
    Mock::given(method("GET"))
        .and(path("/api/crop-listing/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&ctx.server)
        .await;

    let listings = ctx.gateway.list_listings().await.unwrap();
    assert!(listings.is_empty());

    let requests = ctx.requests().await;
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_token_is_read_per_request() {
    let ctx = TestContext::new(None).await;
    Mock::given(method("GET"))
        .and(path("/api/order/my-orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&ctx.server)
        .await;

    ctx.gateway.my_orders().await.unwrap();
    ctx.store
        .save(&CredentialRecord::new("fresh", UserProfile::default()))
        .await
        .unwrap();
    ctx.gateway.my_orders().await.unwrap();

    let requests = ctx.requests().await;
    assert!(requests[0].headers.get("authorization").is_none());
    assert_eq!(
        requests[1].headers.get("authorization").unwrap().to_str().unwrap(),
        "Bearer fresh"
    );
}

#[tokio::test]
async fn test_json_body_and_content_type() {
    let ctx = TestContext::new(Some("abc")).await;
    Mock::given(method("POST"))
        .and(path("/api/cart/add"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "productId": "p-9", "quantity": 2.0 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "_id": "c-1", "product": "p-9", "quantity": 2 },
            "message": "Added to cart"
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let item = ctx
        .gateway
        .add_to_cart(&agrolink_core::api::AddToCart {
            product_id: "p-9".into(),
            quantity: 2.0,
        })
        .await
        .unwrap();
    assert_eq!(item.id, "c-1");
}

#[tokio::test]
async fn test_multipart_never_claims_json() {
    let ctx = TestContext::new(Some("abc")).await;
    Mock::given(method("PUT"))
        .and(path("/api/user/update-profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "_id": "u-1", "firstName": "Asha", "profileImage": "https://cdn/x.jpg" },
            "message": "Profile updated"
        })))
        .mount(&ctx.server)
        .await;

    let update = agrolink_core::api::ProfileUpdate {
        first_name: Some("Asha".into()),
        ..Default::default()
    };
    let photo = Attachment::jpeg("ignored", "me.jpg", vec![0xFF, 0xD8, 0xFF, 0xE0]);
    let envelope = ctx
        .gateway
        .update_profile(&update, Some(photo))
        .await
        .unwrap();
    assert_eq!(envelope.message.as_deref(), Some("Profile updated"));

    let requests = ctx.requests().await;
    let content_type = requests[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"));
    assert!(!content_type.contains("application/json"));

    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"profileImage\""));
    assert!(body.contains("filename=\"me.jpg\""));
    assert!(body.contains("name=\"firstName\""));
}

#[tokio::test]
async fn test_base_url_path_prefix_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/api/purchase/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = HttpGateway::new(
        ClientConfig::new(format!("{}/v1", server.uri())),
        Arc::new(MemoryCredentialStore::new()),
    )
    .unwrap();
    assert!(gateway.list_purchases().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_item_ids_are_percent_encoded() {
    let ctx = TestContext::new(Some("abc")).await;
    Mock::given(method("GET"))
        .and(path("/api/crop-listing/a%20b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "_id": "a b", "cropName": "Onion" }
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let listing = ctx.gateway.get_listing("a b").await.unwrap();
    assert_eq!(listing.crop_name, "Onion");
}

#[tokio::test]
async fn test_dot_segment_ids_never_leave_the_client() {
    let ctx = TestContext::new(Some("abc")).await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": null })))
        .expect(0)
        .mount(&ctx.server)
        .await;

    let err = ctx.gateway.delete_listing("..").await.unwrap_err();
    assert!(matches!(err, ClientError::Validation { ref field, .. } if field == "id"));

    let err = ctx.gateway.remove_cart_item(".").await.unwrap_err();
    assert!(matches!(err, ClientError::Validation { ref field, .. } if field == "id"));

    let err = ctx.gateway.get_order("").await.unwrap_err();
    assert!(matches!(err, ClientError::Validation { ref field, .. } if field == "id"));

    let err = ctx.gateway.toggle_product_status("..").await.unwrap_err();
    assert!(matches!(err, ClientError::Validation { .. }));

    assert!(ctx.requests().await.is_empty());
}

// ─── Failure classification ───

#[tokio::test]
async fn test_unauthorized_is_http_failure() {
    let ctx = TestContext::new(None).await;
    Mock::given(method("GET"))
        .and(path("/api/user/getUserDetails"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Unauthorized"
        })))
        .mount(&ctx.server)
        .await;

    let err = ctx.gateway.get_user_details().await.unwrap_err();
    assert!(!err.is_transport());
    assert_eq!(err.status(), Some(401));
    assert!(err.is_unauthorized());
    assert!(matches!(err, ClientError::Http { ref message, .. } if message == "Unauthorized"));
}

#[tokio::test]
async fn test_server_error_without_body_uses_status_text() {
    let ctx = TestContext::new(Some("abc")).await;
    Mock::given(method("GET"))
        .and(path("/api/product/all"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&ctx.server)
        .await;

    let err = ctx.gateway.list_products().await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert!(!err.user_message().is_empty());
}

#[tokio::test]
async fn test_application_error_on_success_status() {
    let ctx = TestContext::new(Some("abc")).await;
    Mock::given(method("GET"))
        .and(path("/api/farm/f-404"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "Farm not found"
        })))
        .mount(&ctx.server)
        .await;

    let err = ctx.gateway.get_farm("f-404").await.unwrap_err();
    match err {
        ClientError::Application { status, message } => {
            assert_eq!(status, 200);
            assert_eq!(message, "Farm not found");
        }
        other => panic!("expected application error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_success_false_is_application_error() {
    let ctx = TestContext::new(Some("abc")).await;
    Mock::given(method("POST"))
        .and(path("/api/order/place"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Cart is empty"
        })))
        .mount(&ctx.server)
        .await;

    let err = ctx
        .gateway
        .place_order(&agrolink_core::api::PlaceOrder {
            shipping_address: "Plot 4, Market Yard, Nashik".into(),
            payment_method: "cod".into(),
            notes: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Application { .. }));
    assert_eq!(err.user_message(), "Cart is empty");
}

#[tokio::test]
async fn test_non_json_success_body() {
    let ctx = TestContext::new(Some("abc")).await;
    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy login</html>"))
        .mount(&ctx.server)
        .await;

    let err = ctx.gateway.get_cart().await.unwrap_err();
    assert!(matches!(err, ClientError::Serialization(_)));
}

#[tokio::test]
async fn test_unreachable_host_is_transport_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let gateway = HttpGateway::new(
        ClientConfig::new(format!("http://127.0.0.1:{port}"))
            .with_request_timeout(Duration::from_secs(5)),
        Arc::new(MemoryCredentialStore::new()),
    )
    .unwrap();

    let err = gateway.list_listings().await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(err.status(), None);
    assert!(matches!(
        err,
        ClientError::Transport {
            kind: TransportKind::Connect,
            ..
        }
    ));
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let ctx = TestContext::with_config(Some("abc"), |c| {
        c.with_request_timeout(Duration::from_millis(100))
    })
    .await;
    Mock::given(method("GET"))
        .and(path("/api/crop/all"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": [] }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&ctx.server)
        .await;

    let err = ctx.gateway.list_crops().await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Transport {
            kind: TransportKind::Timeout,
            ..
        }
    ));
}

// ─── Unwrap levels ───

#[tokio::test]
async fn test_raw_call_at_both_levels() {
    let ctx = TestContext::new(Some("abc")).await;
    Mock::given(method("GET"))
        .and(path("/api/anything"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "n": 1 },
            "message": "ok"
        })))
        .mount(&ctx.server)
        .await;

    let data: Value = ctx
        .gateway
        .call(RequestEnvelope::get("/api/anything"), Unwrap::Data)
        .await
        .unwrap();
    assert_eq!(data, json!({ "n": 1 }));

    let whole: Value = ctx
        .gateway
        .call(RequestEnvelope::get("/api/anything"), Unwrap::Envelope)
        .await
        .unwrap();
    assert_eq!(whole["message"], "ok");
    assert_eq!(whole["data"]["n"], 1);
}

#[tokio::test]
async fn test_invalid_attachment_mime_is_rejected_locally() {
    let ctx = TestContext::new(Some("abc")).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ctx.server)
        .await;

    let payload = Payload::with_attachments(
        &json!({ "name": "x" }),
        vec![Attachment::new("file", "x.bin", "not a mime", vec![1, 2, 3])],
    )
    .unwrap();
    let err = ctx
        .gateway
        .execute(RequestEnvelope::post("/api/upload").with_payload(payload))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation { .. }));
}
