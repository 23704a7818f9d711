//! Integration tests against an in-memory transport.
//!
//! The blocking facade test needs the `blocking` feature:
//! cargo test --test integration --features blocking
//!
//! Live API checks are ignored by default. Run them with:
//! MARZPAY_API_KEY=... MARZPAY_API_SECRET=... cargo test --test integration -- --nocapture --ignored

use marzpay_core::api::{
    AccountUpdate, CollectMoneyRequest, ListFilter, SendMoneyRequest, ServiceFilter,
    TransactionFilter, WebhookRequest,
};
use marzpay_core::{
    Client, Config, Error, ErrorKind, HttpRequest, HttpResponse, Method, TransactionStatus,
    Transport, TransportFuture,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

enum Reply {
    Response(HttpResponse),
    Timeout,
}

#[derive(Default)]
struct MockState {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<HttpRequest>>,
}

/// In-memory transport recording every request and answering with queued replies.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<MockState>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.state
            .replies
            .lock()
            .unwrap()
            .push_back(Reply::Response(HttpResponse::new(status, body)));
        self
    }

    pub fn time_out(self) -> Self {
        self.state.replies.lock().unwrap().push_back(Reply::Timeout);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: HttpRequest) -> TransportFuture<'_> {
        Box::pin(async move {
            let url = request.url.clone();
            self.state.requests.lock().unwrap().push(request);
            match self.state.replies.lock().unwrap().pop_front() {
                Some(Reply::Response(response)) => Ok(response),
                Some(Reply::Timeout) => Err(Error::Timeout(format!("Request to {} timed out", url))),
                None => panic!("unexpected request to {}", url),
            }
        })
    }
}

const BASE_URL: &str = "https://api.test/v1";

fn client(transport: &MockTransport) -> Client {
    let config = Config::new("test_key", "test_secret").with_base_url(BASE_URL);
    Client::with_transport(config, transport.clone()).unwrap()
}

#[tokio::test]
async fn collect_money_returns_mocked_collection() {
    let transport = MockTransport::new()
        .respond(200, r#"{"data": {"collection_id": "C1", "status": "pending"}}"#);
    let client = client(&transport);

    let request = CollectMoneyRequest::new(5000, "0759983853", "R1").with_description("test");
    let result = client.collections().collect_money(&request).await.unwrap();

    assert_eq!(result.data.collection_id, "C1");
    assert_eq!(result.data.status, TransactionStatus::Pending);

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    let sent = &requests[0];
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.url, format!("{}/collections", BASE_URL));
    assert_eq!(sent.header("Authorization"), Some("Basic dGVzdF9rZXk6dGVzdF9zZWNyZXQ="));
    assert_eq!(sent.header("Content-Type"), Some("application/json"));

    let body = sent.body.as_ref().unwrap();
    assert_eq!(body["amount"], 5000);
    assert_eq!(body["phone_number"], "256759983853");
    assert_eq!(body["reference"], "R1");
    assert_eq!(body["description"], "test");
    assert_eq!(body["country"], "UG");
}

#[tokio::test]
async fn identifiers_round_trip_for_valid_requests() {
    let cases = [
        (500, "0759983853", "ref-a"),
        (10_000, "+256 772 123 456", "ref-b"),
        (10_000_000, "701234567", "ref-c"),
    ];

    for (i, (amount, phone, reference)) in cases.into_iter().enumerate() {
        let id = format!("C{}", i);
        let body = format!(r#"{{"data": {{"collection_id": "{}", "status": "pending"}}}}"#, id);
        let transport = MockTransport::new().respond(201, &body);

        let request = CollectMoneyRequest::new(amount, phone, reference);
        let result = client(&transport)
            .collections()
            .collect_money(&request)
            .await
            .unwrap();
        assert_eq!(result.data.collection_id, id);

        let sent = transport.requests();
        assert_eq!(sent[0].body.as_ref().unwrap()["reference"], reference);
    }
}

#[tokio::test]
async fn api_error_carries_code_status_and_message() {
    let transport = MockTransport::new()
        .respond(400, r#"{"code": "invalid_amount", "message": "Amount too low"}"#);
    let client = client(&transport);

    let request = CollectMoneyRequest::new(5000, "0759983853", "R1").with_description("test");
    let err = client.collections().collect_money(&request).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
    let api = err.as_api_error().unwrap();
    assert_eq!(api.code, "invalid_amount");
    assert_eq!(api.status, 400);
    assert_eq!(api.message, "Amount too low");
}

#[tokio::test]
async fn non_2xx_statuses_map_to_api_errors() {
    for (status, code) in [(401, "unauthorized"), (404, "not_found"), (409, "duplicate_reference"), (500, "server_error")] {
        let body = format!(r#"{{"code": "{}", "message": "failed with {}"}}"#, code, status);
        let transport = MockTransport::new().respond(status, &body);

        let err = client(&transport)
            .disbursements()
            .get_disbursement("D1")
            .await
            .unwrap_err();

        let api = err.as_api_error().unwrap();
        assert_eq!(api.status, status);
        assert_eq!(api.code, code);
        assert_eq!(api.message, format!("failed with {}", status));
    }
}

#[tokio::test]
async fn malformed_phone_numbers_fail_before_any_request() {
    let transport = MockTransport::new();
    let client = client(&transport);

    for phone in ["", "abc", "0759", "+256 759 983 853 1", "0459983853"] {
        let collect = CollectMoneyRequest::new(5000, phone, "R1");
        let err = client.collections().collect_money(&collect).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation, "{phone}");

        let send = SendMoneyRequest::new(5000, phone, "R1");
        let err = client.disbursements().send_money(&send).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation, "{phone}");

        let err = client
            .phone_verification()
            .verify_phone_number(phone)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation, "{phone}");
    }

    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn disbursement_amounts_are_left_to_the_api() {
    let transport = MockTransport::new().respond(
        200,
        r#"{"status": "success", "message": "Queued", "data": {"disbursement_id": "D7", "status": "pending"}}"#,
    );
    let client = client(&transport);

    let err = client
        .disbursements()
        .send_money(&SendMoneyRequest::new(0, "0759983853", "R1"))
        .await
        .unwrap_err();
    match err {
        Error::Validation { errors, .. } => {
            assert_eq!(errors, vec!["Amount is required".to_string()])
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(transport.requests().is_empty());

    let result = client
        .disbursements()
        .send_money(&SendMoneyRequest::new(700, "0759983853", "R1"))
        .await
        .unwrap();
    assert_eq!(result.data.disbursement_id, "D7");
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn send_money_posts_formatted_request() {
    let transport = MockTransport::new().respond(
        200,
        r#"{"status": "success", "message": "Queued", "data": {"disbursement_id": "D1", "status": "processing", "amount": 20000}}"#,
    );
    let client = client(&transport);

    let result = client
        .disbursements()
        .send_money(
            &SendMoneyRequest::new(20_000, "0772 123 456", "R2")
                .with_callback_url("https://merchant.test/hooks"),
        )
        .await
        .unwrap();

    assert_eq!(result.status.as_deref(), Some("success"));
    assert_eq!(result.data.disbursement_id, "D1");
    assert_eq!(result.data.status, TransactionStatus::Processing);
    assert_eq!(result.data.amount, Some(20_000));

    let sent = transport.requests();
    assert_eq!(sent[0].url, format!("{}/disbursements", BASE_URL));
    let body = sent[0].body.as_ref().unwrap();
    assert_eq!(body["phone_number"], "256772123456");
    assert_eq!(body["callback_url"], "https://merchant.test/hooks");
}

#[tokio::test]
async fn timeouts_are_connectivity_errors() {
    let transport = MockTransport::new().time_out();
    let err = client(&transport).balance().get_balance().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Connectivity);
    assert!(err.as_api_error().is_none());
}

#[tokio::test]
async fn list_endpoints_send_filters_as_query() {
    let transport = MockTransport::new()
        .respond(200, r#"{"data": {"collections": [{"collection_id": "C1", "status": "completed"}], "pagination": {"current_page": 2}}}"#)
        .respond(200, r#"{"data": {"transactions": []}}"#)
        .respond(200, r#"{"data": {"services": [{"uuid": "S1", "provider": "mtn", "type": "collection"}]}}"#);
    let client = client(&transport);

    let page = client
        .collections()
        .get_collections(&ListFilter {
            page: Some(2),
            status: Some(TransactionStatus::Completed),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.data.items[0].collection_id, "C1");

    client
        .transactions()
        .get_transactions(&TransactionFilter {
            transaction_type: Some("disbursement".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let services = client
        .services()
        .get_services(&ServiceFilter {
            provider: Some("mtn".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(services.data.items[0].provider.as_deref(), Some("mtn"));

    let sent = transport.requests();
    assert_eq!(sent[0].url, format!("{}/collections", BASE_URL));
    assert_eq!(
        sent[0].query,
        vec![
            ("page".to_string(), "2".to_string()),
            ("status".to_string(), "completed".to_string()),
        ]
    );
    assert_eq!(sent[1].url, format!("{}/transactions", BASE_URL));
    assert_eq!(sent[1].query, vec![("type".to_string(), "disbursement".to_string())]);
    assert_eq!(sent[2].url, format!("{}/services", BASE_URL));
    assert_eq!(sent[2].query, vec![("provider".to_string(), "mtn".to_string())]);
}

#[tokio::test]
async fn resource_paths() {
    let transport = MockTransport::new()
        .respond(200, r#"{"data": {"collection_id": "C9", "status": "completed"}}"#)
        .respond(200, r#"{"data": {"services": []}}"#)
        .respond(200, r#"{"data": {"business_name": "Shop"}}"#)
        .respond(200, r#"{"data": {"balance": "125,000", "currency": "UGX"}}"#)
        .respond(200, r#"{"data": {"history": []}}"#)
        .respond(200, r#"{"data": {"uuid": "T1", "status": "failed", "type": "collection"}}"#)
        .respond(200, r#"{"data": {"uuid": "S1"}}"#)
        .respond(200, r#"{"data": {"is_subscribed": true}}"#);
    let client = client(&transport);

    let collection = client.collections().get_collection("C9").await.unwrap();
    assert!(collection.data.status.is_success());
    client.collections().get_services().await.unwrap();
    let account = client.accounts().get_account().await.unwrap();
    assert_eq!(account.data.business_name.as_deref(), Some("Shop"));
    let balance = client.balance().get_balance().await.unwrap();
    assert_eq!(balance.data.balance, Some(125_000));
    client
        .balance()
        .get_balance_history(&ListFilter::default())
        .await
        .unwrap();
    let transaction = client.transactions().get_transaction("T1").await.unwrap();
    assert_eq!(transaction.data.transaction_type.as_deref(), Some("collection"));
    client.services().get_service("S1").await.unwrap();
    let subscription = client
        .phone_verification()
        .get_subscription_status()
        .await
        .unwrap();
    assert_eq!(subscription.data.is_subscribed, Some(true));

    let paths: Vec<String> = transport
        .requests()
        .iter()
        .map(|r| r.url.trim_start_matches(BASE_URL).to_string())
        .collect();
    assert_eq!(
        paths,
        vec![
            "/collections/C9",
            "/collections/services",
            "/account",
            "/balance",
            "/balance/history",
            "/transactions/T1",
            "/services/S1",
            "/phone-verification/subscription-status",
        ]
    );
    assert!(transport.requests().iter().all(|r| r.method == Method::Get));
}

#[tokio::test]
async fn empty_ids_are_rejected_locally() {
    let transport = MockTransport::new();
    let client = client(&transport);

    assert!(client.collections().get_collection("").await.is_err());
    assert!(client.transactions().get_transaction(" ").await.is_err());
    assert!(client.webhooks().delete("a/b").await.is_err());
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn account_update_formats_phone_and_skips_unset_fields() {
    let transport = MockTransport::new().respond(200, r#"{"data": {"email": "ops@shop.test"}}"#);
    let client = client(&transport);

    let update = AccountUpdate {
        email: Some("ops@shop.test".to_string()),
        phone_number: Some("0759983853".to_string()),
        ..Default::default()
    };
    client.accounts().update_account(&update).await.unwrap();

    let sent = transport.requests();
    assert_eq!(sent[0].method, Method::Put);
    let body = sent[0].body.as_ref().unwrap();
    assert_eq!(body["phone_number"], "256759983853");
    assert!(body.get("business_name").is_none());

    let err = client
        .accounts()
        .update_account(&AccountUpdate::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn webhook_management() {
    let transport = MockTransport::new()
        .respond(201, r#"{"data": {"uuid": "W1", "url": "https://shop.test/hook", "event_type": "collection.completed"}}"#)
        .respond(200, r#"{"data": {"uuid": "W1", "url": "https://shop.test/hook", "is_active": false}}"#)
        .respond(204, "");
    let client = client(&transport);

    let missing = client
        .webhooks()
        .create(&WebhookRequest::default())
        .await
        .unwrap_err();
    match missing {
        Error::Validation { errors, .. } => assert_eq!(errors.len(), 2),
        other => panic!("unexpected error: {other}"),
    }

    let created = client
        .webhooks()
        .create(&WebhookRequest {
            url: Some("https://shop.test/hook".to_string()),
            event_type: Some("collection.completed".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.data.uuid, "W1");

    let updated = client
        .webhooks()
        .update(
            "W1",
            &WebhookRequest {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.data.is_active, Some(false));

    client.webhooks().delete("W1").await.unwrap();

    let methods: Vec<Method> = transport.requests().iter().map(|r| r.method).collect();
    assert_eq!(methods, vec![Method::Post, Method::Put, Method::Delete]);
}

#[tokio::test]
async fn verify_phone_number_posts_canonical_number() {
    let transport = MockTransport::new()
        .respond(200, r#"{"data": {"phone_number": "256759983853", "full_name": "Jane Doe"}}"#);
    let client = client(&transport);

    let result = client
        .phone_verification()
        .verify_phone_number("0759 983 853")
        .await
        .unwrap();
    assert_eq!(result.data.full_name.as_deref(), Some("Jane Doe"));

    let sent = transport.requests();
    assert_eq!(sent[0].url, format!("{}/phone-verification/verify", BASE_URL));
    assert_eq!(sent[0].body.as_ref().unwrap()["phone_number"], "256759983853");
}

#[test]
fn webhook_round_trip_through_client() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let handler = client.webhook_handler("whsec");

    let payload = br#"{"event_type": "disbursement.completed", "transaction": {"uuid": "D1", "status": "completed"}}"#;
    let signature = handler.verifier().sign(payload);

    let event = handler.verify(payload, &signature).unwrap();
    assert_eq!(event.transaction_id(), "D1");
    assert!(event.status().is_final());

    let altered = br#"{"event_type": "disbursement.completed", "transaction": {"uuid": "D2", "status": "completed"}}"#;
    assert!(matches!(
        handler.verify(altered, &signature),
        Err(Error::InvalidSignature)
    ));
}

#[cfg(feature = "blocking")]
#[test]
fn blocking_client_collects_money() {
    let transport = MockTransport::new()
        .respond(200, r#"{"data": {"collection_id": "C1", "status": "pending"}}"#);
    let config = Config::new("test_key", "test_secret").with_base_url(BASE_URL);
    let client = marzpay_core::blocking::Client::with_transport(config, transport.clone()).unwrap();

    let request = CollectMoneyRequest::new(5000, "0759983853", "R1");
    let result = client
        .block_on(client.collections().collect_money(&request))
        .unwrap();
    assert_eq!(result.data.collection_id, "C1");
}

fn live_client() -> Client {
    let key = std::env::var("MARZPAY_API_KEY").unwrap();
    let secret = std::env::var("MARZPAY_API_SECRET").unwrap();
    Client::new(Config::new(key, secret)).unwrap()
}

#[tokio::test]
#[ignore]
async fn test_get_balance() {
    let client = live_client();

    match client.balance().get_balance().await {
        Ok(response) => println!("Balance: {:?}", response.data),
        Err(e) => println!("Balance check failed: {:#}", e),
    }
}

#[tokio::test]
#[ignore] // Moves real money. Run manually with a sandbox account only.
async fn test_collect_money() {
    let client = live_client();
    let phone = std::env::var("MARZPAY_TEST_PHONE").unwrap();

    let request = CollectMoneyRequest::new(500, phone, client.collections().generate_reference())
        .with_description("SDK integration test");
    let result = client.collections().collect_money(&request).await.unwrap();

    dbg!(result);
}
