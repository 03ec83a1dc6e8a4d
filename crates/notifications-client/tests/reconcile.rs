use notifications_client::{
    ClientConfig, ClientError, CreationError, EndpointType, Identity, Lookup, LookupFailure,
    NotificationsClient, ResourceKind,
};
use serde_json::{Map, Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BUNDLES: &str = "/internal/bundles";
const APPLICATIONS: &str = "/internal/applications";
const EVENT_TYPES: &str = "/internal/eventTypes";
const ENDPOINTS: &str = "/api/integrations/v1.0/endpoints";

fn client_for(server: &MockServer) -> NotificationsClient {
    NotificationsClient::new(&ClientConfig::new(server.uri())).unwrap()
}

fn identity() -> Identity {
    Identity::new("eyJpZGVudGl0eSI6eyJhY2NvdW50X251bWJlciI6IjEyMzQ1In19")
}

/// Serves `before` for the first GET on `route` and `after` for every later one.
async fn mount_listing(server: &MockServer, route: &str, before: Value, after: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(before))
        .up_to_n_times(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(after))
        .mount(server)
        .await;
}

#[tokio::test]
async fn add_bundle_twice_creates_once() {
    let server = MockServer::start().await;
    mount_listing(
        &server,
        BUNDLES,
        json!([]),
        json!([{ "id": "B1", "name": "a-bundle", "display_name": "A bundle" }]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(BUNDLES))
        .and(body_json(json!({ "name": "a-bundle", "display_name": "A bundle" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "B1" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let first = client.add_bundle("a-bundle", "A bundle").await.unwrap();
    let second = client.add_bundle("a-bundle", "A bundle").await.unwrap();

    assert_eq!(first, "B1");
    assert_eq!(second, "B1");
}

#[tokio::test]
async fn find_matches_exact_case_sensitive_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/internal/bundles/B1/applications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "A0", "name": "My-App", "display_name": "x", "bundle_id": "B1" },
            { "id": "A1", "name": "my-app", "display_name": "y", "bundle_id": "B1" },
            { "id": "A2", "name": "my-app", "display_name": "z", "bundle_id": "B1" }
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(
        client.find_application("B1", "my-app").await,
        Lookup::Found("A1".into())
    );
    assert_eq!(client.find_application("B1", "other").await, Lookup::NotFound);
}

#[tokio::test]
async fn absent_resource_is_created_exactly_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/internal/applications/A1/eventTypes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(EVENT_TYPES))
        .and(body_json(json!({
            "name": "et1",
            "display_name": "Event type one",
            "application_id": "A1"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "E1" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.find_event_type("A1", "et1").await, Lookup::NotFound);
    let id = client
        .add_event_type("A1", "et1", "Event type one")
        .await
        .unwrap();
    assert_eq!(id, "E1");
}

#[tokio::test]
async fn failed_lookup_reads_as_absent_and_triggers_create() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(BUNDLES))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(BUNDLES))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "B9" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let lookup = client.find_bundle("a-bundle").await;
    assert_eq!(lookup, Lookup::TransportError(LookupFailure::Status(503)));
    assert_eq!(lookup.into_id(), None);

    assert_eq!(client.add_bundle("a-bundle", "A").await.unwrap(), "B9");
}

#[tokio::test]
async fn rejected_create_is_a_creation_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/internal/applications/A1/eventTypes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(EVENT_TYPES))
        .respond_with(ResponseTemplate::new(400).set_body_string("name must match [a-z0-9-]+"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .add_event_type("A1", "Bad Name", "Bad")
        .await
        .unwrap_err();
    match err {
        ClientError::Creation(CreationError { kind, status, body }) => {
            assert_eq!(kind, ResourceKind::EventType);
            assert_eq!(status, 400);
            assert_eq!(body, "name must match [a-z0-9-]+");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn endpoints_are_created_fresh_every_time() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINTS))
        .and(header("x-rh-identity", identity().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "ep-1" })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(ENDPOINTS))
        .and(header("x-rh-identity", identity().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "ep-2" })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut properties = Map::new();
    properties.insert("url".into(), json!("https://example.com/hook"));
    properties.insert("method".into(), json!("POST"));

    let first = client
        .create_endpoint("hook", &identity(), properties.clone(), EndpointType::Webhook)
        .await
        .unwrap();
    let second = client
        .create_endpoint("hook", &identity(), properties, EndpointType::Webhook)
        .await
        .unwrap();
    assert_ne!(first, second);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let bodies: Vec<Value> = requests
        .iter()
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect();
    for body in &bodies {
        assert_eq!(body["name"], "hook");
        assert_eq!(body["description"], "hook");
        assert_eq!(body["enabled"], true);
        assert_eq!(body["type"], "webhook");
        assert_eq!(body["properties"]["url"], "https://example.com/hook");
    }
    let correlation: Vec<&str> = bodies
        .iter()
        .map(|b| b["properties"]["endpointId"].as_str().unwrap())
        .collect();
    assert_ne!(correlation[0], correlation[1]);
}

#[tokio::test]
async fn rejected_endpoint_is_a_creation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINTS))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .create_endpoint("hook", &identity(), Map::new(), EndpointType::Camel)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Creation(CreationError {
            kind: ResourceKind::Endpoint,
            status: 403,
            ..
        })
    ));
}

#[tokio::test]
async fn linking_sends_the_whole_set_each_time() {
    let server = MockServer::start().await;
    let actions = "/api/notifications/v1.0/notifications/behaviorGroups/bg-1/actions";
    Mock::given(method("PUT"))
        .and(path(actions))
        .and(body_json(json!(["e1"])))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(actions))
        .and(body_json(json!(["e2"])))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let status = client
        .link_behavior_group_endpoints("bg-1", &["e1".to_string()], &identity())
        .await
        .unwrap();
    assert!(status.is_success());
    client
        .link_behavior_group_endpoints("bg-1", &["e2".to_string()], &identity())
        .await
        .unwrap();
}

#[tokio::test]
async fn event_type_links_carry_identity() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(
            "/api/notifications/v1.0/notifications/eventTypes/E1/behaviorGroups",
        ))
        .and(header("x-rh-identity", identity().as_str()))
        .and(body_json(json!(["bg-1", "bg-2"])))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .link_event_type_behavior_groups(
            "E1",
            &["bg-1".to_string(), "bg-2".to_string()],
            &identity(),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn behavior_group_find_or_create_uses_display_name() {
    let server = MockServer::start().await;
    mount_listing(
        &server,
        "/api/notifications/v1.0/notifications/bundles/B1/behaviorGroups",
        json!([{ "id": "bg-0", "display_name": "Other", "bundle_id": "B1" }]),
        json!([
            { "id": "bg-0", "display_name": "Other", "bundle_id": "B1" },
            { "id": "bg-1", "display_name": "Ops team", "bundle_id": "B1" }
        ]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/api/notifications/v1.0/notifications/behaviorGroups"))
        .and(header("x-rh-identity", identity().as_str()))
        .and(body_json(json!({ "display_name": "Ops team", "bundle_id": "B1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "bg-1" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let id = &identity();
    assert_eq!(client.add_behavior_group("B1", "Ops team", id).await.unwrap(), "bg-1");
    assert_eq!(client.add_behavior_group("B1", "Ops team", id).await.unwrap(), "bg-1");
}

#[tokio::test]
async fn delete_reports_status_without_failing() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/internal/applications/A1"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/internal/bundles/B1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.delete_application("A1").await.unwrap().as_u16(), 404);
    assert_eq!(client.delete_bundle("B1").await.unwrap().as_u16(), 204);
}

#[tokio::test]
async fn history_keeps_camel_actions_without_details() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/notifications/v1.0/notifications/events"))
        .and(wiremock::matchers::query_param("bundleIds", "B1"))
        .and(wiremock::matchers::query_param("appIds", "A1"))
        .and(wiremock::matchers::query_param("eventTypeDisplayName", "Policy triggered"))
        .and(wiremock::matchers::query_param("includeDetails", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": "ev-1",
                "created": "2022-03-01T10:00:00",
                "bundle": "Red Hat Enterprise Linux",
                "application": "Policies",
                "event_type": "Policy triggered",
                "actions": [
                    { "endpoint_type": "camel", "invocation_result": true, "details": null },
                    { "endpoint_type": "webhook", "invocation_result": false }
                ]
            }],
            "meta": { "count": 1 },
            "links": {}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let filter = notifications_client::HistoryFilter {
        bundle_id: Some("B1".into()),
        application_id: Some("A1".into()),
        event_type_display_name: Some("Policy triggered".into()),
    };
    let entries = client.fetch_history(&filter, &identity()).await.unwrap();
    assert_eq!(entries.len(), 1);
    let actions = &entries[0].actions;
    assert_eq!(actions[0].endpoint_type, EndpointType::Camel);
    assert!(actions[0].details.is_none());
    assert!(!actions[1].invocation_result);
}

#[tokio::test]
async fn endpoint_history_failure_keeps_remote_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/integrations/v1.0/endpoints/ep-1/history"))
        .and(wiremock::matchers::query_param("include_detail", "true"))
        .and(wiremock::matchers::query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .endpoint_history("ep-1", 5, &identity())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert!(matches!(err, ClientError::Read { reason, .. } if reason == "Forbidden"));
}

#[tokio::test]
async fn endpoint_listing_accepts_paged_and_bare_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENDPOINTS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": "ep-1", "name": "hook", "type": "webhook", "enabled": true,
                       "properties": { "url": "https://example.com" } }],
            "meta": { "count": 1 }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/notifications/v1.0/notifications/eventTypes/E1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "ep-2", "name": "slack", "type": "camel", "sub_type": "slack",
              "properties": { "url": "https://hooks.slack.com/x" } }
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let listed = client.list_endpoints(&identity()).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].url(), Some("https://example.com"));

    let linked = client.event_type_endpoints("E1", &identity()).await.unwrap();
    assert_eq!(linked[0].resolved_sub_type(), Some("slack"));
}

#[tokio::test]
async fn end_to_end_setup_is_idempotent() {
    let server = MockServer::start().await;
    mount_listing(
        &server,
        BUNDLES,
        json!([]),
        json!([{ "id": "B1", "name": "a-bundle", "display_name": "A bundle" }]),
    )
    .await;
    mount_listing(
        &server,
        "/internal/bundles/B1/applications",
        json!([]),
        json!([{ "id": "A1", "name": "my-app", "display_name": "My app", "bundle_id": "B1" }]),
    )
    .await;
    mount_listing(
        &server,
        "/internal/applications/A1/eventTypes",
        json!([]),
        json!([{ "id": "E1", "name": "et1", "display_name": "Event one", "application_id": "A1" }]),
    )
    .await;
    for (route, id) in [(BUNDLES, "B1"), (APPLICATIONS, "A1"), (EVENT_TYPES, "E1")] {
        Mock::given(method("POST"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": id })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client_for(&server);
    let mut runs = Vec::new();
    for _ in 0..2 {
        let bundle = client.add_bundle("a-bundle", "A bundle").await.unwrap();
        let app = client.add_application(&bundle, "my-app", "My app").await.unwrap();
        let et = client.add_event_type(&app, "et1", "Event one").await.unwrap();
        runs.push((bundle, app, et));
    }

    let expected = ("B1".to_string(), "A1".to_string(), "E1".to_string());
    assert_eq!(runs, vec![expected.clone(), expected]);

    let record = client.find_event_type_record("A1", "et1").await.unwrap();
    assert_eq!(record.display_name, "Event one");
}
