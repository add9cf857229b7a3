//! Resource lifecycle tests
//!
//! Each test configures a provider against a mock Wavefront server and walks
//! a resource through create, read, update, delete and import the way the
//! host drives it.

use serde_json::{json, Value};
use terraform_provider_wavefront::config::ProviderConfig;
use terraform_provider_wavefront::plugin::{Request, Response};
use terraform_provider_wavefront::provider::Provider;
use wiremock::matchers::{bearer_token, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

fn envelope(response: Value) -> Value {
    json!({"status": {"result": "OK", "code": 200}, "response": response})
}

fn search_page(items: Value) -> Value {
    envelope(json!({"items": items, "offset": 0, "limit": 100, "moreItems": false}))
}

fn configured(server: &MockServer) -> Provider {
    let mut provider = Provider::new();
    provider
        .configure(&ProviderConfig::new(&server.uri(), TOKEN))
        .expect("provider should configure");
    provider
}

fn result(response: Response) -> Value {
    match response {
        Response::Ok { result } => result,
        Response::Error { message } => panic!("unexpected error response: {}", message),
    }
}

fn message(response: Response) -> String {
    match response {
        Response::Error { message } => message,
        Response::Ok { result } => panic!("unexpected ok response: {}", result),
    }
}

mod derived_metric_lifecycle {
    use super::*;

    const RESOURCE: &str = "wavefront_derived_metric";

    fn remote() -> Value {
        json!({
            "id": "dm-1",
            "name": "requests",
            "query": "aliasMetric(ts(requests), \"derived\")",
            "minutes": 5,
            "tags": {"customerTags": ["b", "a"]}
        })
    }

    #[tokio::test]
    async fn test_create_returns_server_id() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v2/derivedmetric"))
            .and(bearer_token(TOKEN))
            .and(body_partial_json(json!({
                "name": "requests",
                "query": "aliasMetric(ts(requests), \"derived\")",
                "minutes": 5
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(remote())))
            .expect(1)
            .mount(&server)
            .await;

        let mut provider = configured(&server);
        let state = result(
            provider
                .handle(Request::Create {
                    resource: RESOURCE.to_string(),
                    config: json!({
                        "name": "requests",
                        "query": "  aliasMetric(ts(requests), \"derived\")\n",
                        "minutes": 5,
                        "tags": ["a", "b"]
                    }),
                })
                .await,
        );

        assert_eq!(state["id"], "dm-1");
        assert_eq!(state["tags"], json!(["a", "b"]));
    }

    #[tokio::test]
    async fn test_read_refreshes_state() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/derivedmetric/dm-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(remote())))
            .mount(&server)
            .await;

        let mut provider = configured(&server);
        let state = result(
            provider
                .handle(Request::Read {
                    resource: RESOURCE.to_string(),
                    state: json!({"id": "dm-1", "name": "stale", "query": "q", "minutes": 1}),
                })
                .await,
        );

        assert_eq!(state["name"], "requests");
        assert_eq!(state["minutes"], 5);
    }

    #[tokio::test]
    async fn test_read_of_deleted_object_clears_state() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/derivedmetric/dm-1"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut provider = configured(&server);
        let response = provider
            .handle(Request::Read {
                resource: RESOURCE.to_string(),
                state: json!({"id": "dm-1", "name": "requests", "query": "q", "minutes": 5}),
            })
            .await;

        assert_eq!(response, Response::ok(Value::Null));
    }

    #[tokio::test]
    async fn test_update_puts_full_object() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/derivedmetric/dm-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(remote())))
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/api/v2/derivedmetric/dm-1"))
            .and(body_partial_json(json!({"id": "dm-1", "minutes": 10})))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
                "id": "dm-1",
                "name": "requests",
                "query": "ts(requests)",
                "minutes": 10
            }))))
            .expect(1)
            .mount(&server)
            .await;

        let mut provider = configured(&server);
        let state = result(
            provider
                .handle(Request::Update {
                    resource: RESOURCE.to_string(),
                    state: json!({
                        "id": "dm-1",
                        "name": "requests",
                        "query": "ts(requests)",
                        "minutes": 10
                    }),
                })
                .await,
        );

        assert_eq!(state["minutes"], 10);
    }

    #[tokio::test]
    async fn test_update_of_missing_object_fails() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/derivedmetric/dm-1"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut provider = configured(&server);
        let message = message(
            provider
                .handle(Request::Update {
                    resource: RESOURCE.to_string(),
                    state: json!({"id": "dm-1", "name": "n", "query": "q", "minutes": 1}),
                })
                .await,
        );

        assert_eq!(message, "derived metric dm-1 not found");
    }

    #[tokio::test]
    async fn test_delete_removes_remote_object() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/derivedmetric/dm-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(remote())))
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/api/v2/derivedmetric/dm-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
            .expect(1)
            .mount(&server)
            .await;

        let mut provider = configured(&server);
        let response = provider
            .handle(Request::Delete {
                resource: RESOURCE.to_string(),
                state: json!({"id": "dm-1", "name": "requests", "query": "q", "minutes": 5}),
            })
            .await;

        assert_eq!(response, Response::ok(Value::Null));
    }

    #[tokio::test]
    async fn test_import_adopts_existing_object() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/derivedmetric/dm-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(remote())))
            .mount(&server)
            .await;

        let mut provider = configured(&server);
        let state = result(
            provider
                .handle(Request::Import {
                    resource: RESOURCE.to_string(),
                    id: "dm-1".to_string(),
                })
                .await,
        );

        assert_eq!(state["id"], "dm-1");
        assert_eq!(state["name"], "requests");
    }
}

mod alert_lifecycle {
    use super::*;

    const RESOURCE: &str = "wavefront_alert";

    fn classic_config() -> Value {
        json!({
            "name": "cpu high",
            "condition": "ts(cpu) > 90",
            "severity": "warn",
            "target": "ops@example.com",
            "minutes": 5,
            "tags": ["prod"]
        })
    }

    #[tokio::test]
    async fn test_create_classic_alert() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v2/alert"))
            .and(body_partial_json(json!({
                "alertType": "CLASSIC",
                "condition": "ts(cpu) > 90",
                "severity": "WARN",
                "target": "ops@example.com",
                "tags": {"customerTags": ["prod"]}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
                "id": "a-1",
                "name": "cpu high",
                "alertType": "CLASSIC",
                "condition": "ts(cpu) > 90",
                "severity": "WARN",
                "target": "ops@example.com",
                "minutes": 5,
                "tags": {"customerTags": ["prod"]}
            }))))
            .expect(1)
            .mount(&server)
            .await;

        let mut provider = configured(&server);
        let state = result(
            provider
                .handle(Request::Create {
                    resource: RESOURCE.to_string(),
                    config: classic_config(),
                })
                .await,
        );

        assert_eq!(state["id"], "a-1");
        assert_eq!(state["alert_type"], "CLASSIC");
    }

    #[tokio::test]
    async fn test_invalid_alert_never_reaches_server() {
        let server = MockServer::start().await;

        let mut config = classic_config();
        config["target"] = json!("");

        let mut provider = configured(&server);
        let message = message(
            provider
                .handle(Request::Create {
                    resource: RESOURCE.to_string(),
                    config,
                })
                .await,
        );

        assert_eq!(message, "target must be supplied for classic alerts");
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_read_uses_exact_search() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v2/search/alert"))
            .and(body_partial_json(json!({
                "query": [{"key": "id", "value": "a-1", "matchingMethod": "EXACT"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(search_page(json!([{
                "id": "a-1",
                "name": "cpu high",
                "alertType": "THRESHOLD",
                "conditions": {"warn": "ts(cpu) > 80", "severe": "ts(cpu) > 95"},
                "minutes": 5
            }]))))
            .mount(&server)
            .await;

        let mut provider = configured(&server);
        let state = result(
            provider
                .handle(Request::Read {
                    resource: RESOURCE.to_string(),
                    state: json!({"id": "a-1"}),
                })
                .await,
        );

        assert_eq!(state["alert_type"], "THRESHOLD");
        assert_eq!(state["threshold_conditions"]["severe"], "ts(cpu) > 95");
    }

    #[tokio::test]
    async fn test_exists_reports_missing_alert() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v2/search/alert"))
            .respond_with(ResponseTemplate::new(200).set_body_json(search_page(json!([]))))
            .mount(&server)
            .await;

        let mut provider = configured(&server);
        let response = provider
            .handle(Request::Exists {
                resource: RESOURCE.to_string(),
                state: json!({"id": "a-1"}),
            })
            .await;

        assert_eq!(response, Response::ok(json!(false)));
    }
}

mod user_lifecycle {
    use super::*;

    const RESOURCE: &str = "wavefront_user";

    #[tokio::test]
    async fn test_update_keeps_server_user_groups_when_unset() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v2/search/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(search_page(json!([{
                "identifier": "jane@example.com",
                "groups": ["browse"],
                "userGroups": [{"id": "g-1", "name": "Everyone"}]
            }]))))
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/api/v2/user/jane%40example.com"))
            .and(body_partial_json(json!({
                "groups": ["agent_management"],
                "userGroups": ["g-1"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
                "identifier": "jane@example.com",
                "groups": ["agent_management"],
                "userGroups": [{"id": "g-1"}]
            }))))
            .expect(1)
            .mount(&server)
            .await;

        let mut provider = configured(&server);
        let state = result(
            provider
                .handle(Request::Update {
                    resource: RESOURCE.to_string(),
                    state: json!({
                        "id": "jane@example.com",
                        "email": "jane@example.com",
                        "groups": ["agent_management"]
                    }),
                })
                .await,
        );

        assert_eq!(state["groups"], json!(["agent_management"]));
        assert_eq!(state["user_groups"], json!(["g-1"]));
    }
}

mod user_group_lifecycle {
    use super::*;

    const RESOURCE: &str = "wavefront_user_group";

    #[tokio::test]
    async fn test_create_reads_back_members() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v2/usergroup"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
                "id": "g-1",
                "name": "ops",
                "description": "operators",
                "permissions": ["alerts_management"]
            }))))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/v2/usergroup/g-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
                "id": "g-1",
                "name": "ops",
                "description": "operators",
                "permissions": ["alerts_management"],
                "users": ["jane@example.com"]
            }))))
            .mount(&server)
            .await;

        let mut provider = configured(&server);
        let state = result(
            provider
                .handle(Request::Create {
                    resource: RESOURCE.to_string(),
                    config: json!({
                        "name": "ops",
                        "description": "operators",
                        "permissions": ["alerts_management"]
                    }),
                })
                .await,
        );

        assert_eq!(state["id"], "g-1");
        assert_eq!(state["members"], json!(["jane@example.com"]));
    }
}

mod dashboard_lifecycle {
    use super::*;

    const RESOURCE: &str = "wavefront_dashboard";

    fn config() -> Value {
        json!({
            "name": "Ops",
            "description": "Operations",
            "url": "ops-dash",
            "tags": ["prod"],
            "section": [{
                "name": "Overview",
                "row": [{"chart": [{
                    "name": "CPU",
                    "units": "%",
                    "source": [{"name": "cpu", "query": "ts(cpu.usage)"}]
                }]}]
            }]
        })
    }

    fn remote() -> Value {
        json!({
            "id": "ops-dash",
            "url": "ops-dash",
            "name": "Ops",
            "description": "Operations",
            "tags": {"customerTags": ["prod"]},
            "eventFilterType": "BYCHART",
            "sections": [{
                "name": "Overview",
                "rows": [{"charts": [{
                    "name": "CPU",
                    "units": "%",
                    "summarization": "MEAN",
                    "sources": [{"name": "cpu", "query": "ts(cpu.usage)", "scatterPlotSource": "Y"}]
                }]}]
            }]
        })
    }

    fn state() -> Value {
        let mut state = config();
        state["id"] = json!("ops-dash");
        state
    }

    #[tokio::test]
    async fn test_create_uses_url_as_id() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v2/dashboard"))
            .and(bearer_token(TOKEN))
            .and(body_partial_json(json!({
                "id": "ops-dash",
                "url": "ops-dash",
                "eventFilterType": "BYCHART"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(remote())))
            .expect(1)
            .mount(&server)
            .await;

        let mut provider = configured(&server);
        let state = result(
            provider
                .handle(Request::Create {
                    resource: RESOURCE.to_string(),
                    config: config(),
                })
                .await,
        );

        assert_eq!(state["id"], "ops-dash");
        assert_eq!(state["section"][0]["row"][0]["chart"][0]["name"], "CPU");
    }

    #[tokio::test]
    async fn test_read_refreshes_state() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/dashboard/ops-dash"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(remote())))
            .mount(&server)
            .await;

        let mut stale = state();
        stale["name"] = json!("Old name");

        let mut provider = configured(&server);
        let state = result(
            provider
                .handle(Request::Read {
                    resource: RESOURCE.to_string(),
                    state: stale,
                })
                .await,
        );

        assert_eq!(state["name"], "Ops");
        assert_eq!(state["tags"], json!(["prod"]));
    }

    #[tokio::test]
    async fn test_update_of_missing_dashboard_fails() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/dashboard/ops-dash"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/api/v2/dashboard/ops-dash"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(remote())))
            .expect(0)
            .mount(&server)
            .await;

        let mut provider = configured(&server);
        let message = message(
            provider
                .handle(Request::Update {
                    resource: RESOURCE.to_string(),
                    state: state(),
                })
                .await,
        );

        assert_eq!(message, "dashboard ops-dash not found");
    }

    #[tokio::test]
    async fn test_delete_of_missing_dashboard_fails() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/dashboard/ops-dash"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/api/v2/dashboard/ops-dash"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
            .expect(0)
            .mount(&server)
            .await;

        let mut provider = configured(&server);
        let message = message(
            provider
                .handle(Request::Delete {
                    resource: RESOURCE.to_string(),
                    state: state(),
                })
                .await,
        );

        assert_eq!(message, "dashboard ops-dash not found");
    }
}

mod dashboard_json_lifecycle {
    use super::*;

    const RESOURCE: &str = "wavefront_dashboard_json";

    fn document() -> String {
        json!({
            "url": "ops-json",
            "name": "Ops",
            "description": "Operations",
            "sections": []
        })
        .to_string()
    }

    /// What the server returns: the document plus fields it maintains itself
    fn remote(name: &str) -> Value {
        json!({
            "id": "ops-json",
            "url": "ops-json",
            "name": name,
            "description": "Operations",
            "sections": [],
            "creatorId": "jane@example.com",
            "createdEpochMillis": 1700000000000i64,
            "viewsLastDay": 12,
            "numCharts": 0,
            "favorite": true
        })
    }

    fn stored(state: &Value) -> Value {
        let document = state["dashboard_json"]
            .as_str()
            .expect("dashboard_json should be a string");
        serde_json::from_str(document).expect("stored dashboard_json should parse")
    }

    #[tokio::test]
    async fn test_create_stores_normalised_document() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v2/dashboard"))
            .and(body_partial_json(json!({"id": "ops-json", "url": "ops-json"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(remote("Ops"))))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/v2/dashboard/ops-json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(remote("Ops"))))
            .expect(1)
            .mount(&server)
            .await;

        let mut provider = configured(&server);
        let state = result(
            provider
                .handle(Request::Create {
                    resource: RESOURCE.to_string(),
                    config: json!({"dashboard_json": document()}),
                })
                .await,
        );

        assert_eq!(state["id"], "ops-json");
        let dashboard = stored(&state);
        assert_eq!(dashboard["id"], dashboard["url"]);
        assert_eq!(dashboard["name"], "Ops");
        for field in ["creatorId", "createdEpochMillis", "viewsLastDay", "numCharts"] {
            assert!(dashboard.get(field).is_none(), "{} should be stripped", field);
        }
        assert_eq!(dashboard["favorite"], false);
    }

    #[tokio::test]
    async fn test_update_reads_back_written_dashboard() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/v2/dashboard/ops-json"))
            .and(body_partial_json(json!({"id": "ops-json", "name": "Operations"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(envelope(remote("Operations"))),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/v2/dashboard/ops-json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(envelope(remote("Operations"))),
            )
            .expect(1)
            .mount(&server)
            .await;

        let renamed = json!({
            "url": "ops-json",
            "name": "Operations",
            "description": "Operations",
            "sections": []
        })
        .to_string();

        let mut provider = configured(&server);
        let state = result(
            provider
                .handle(Request::Update {
                    resource: RESOURCE.to_string(),
                    state: json!({"id": "ops-json", "dashboard_json": renamed}),
                })
                .await,
        );

        let dashboard = stored(&state);
        assert_eq!(dashboard["name"], "Operations");
        assert!(dashboard.get("creatorId").is_none());
    }

    #[tokio::test]
    async fn test_read_of_deleted_dashboard_clears_state() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/dashboard/ops-json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut provider = configured(&server);
        let response = provider
            .handle(Request::Read {
                resource: RESOURCE.to_string(),
                state: json!({"id": "ops-json", "dashboard_json": document()}),
            })
            .await;

        assert_eq!(response, Response::ok(Value::Null));
    }
}

mod alert_target_lifecycle {
    use super::*;

    const RESOURCE: &str = "wavefront_alert_target";

    fn remote() -> Value {
        json!({
            "id": "t-1",
            "title": "ops",
            "description": "Ops mailbox",
            "triggers": ["ALERT_OPENED"],
            "template": "{{alertId}}",
            "method": "EMAIL",
            "recipient": "ops@example.com"
        })
    }

    fn state() -> Value {
        json!({
            "id": "t-1",
            "name": "ops",
            "description": "Ops mailbox",
            "triggers": ["ALERT_OPENED"],
            "template": "{{alertId}}",
            "method": "EMAIL",
            "recipient": "ops@example.com"
        })
    }

    #[tokio::test]
    async fn test_create_defaults_to_email() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v2/notificant"))
            .and(bearer_token(TOKEN))
            .and(body_partial_json(json!({
                "title": "ops",
                "method": "EMAIL",
                "recipient": "ops@example.com"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(remote())))
            .expect(1)
            .mount(&server)
            .await;

        let mut provider = configured(&server);
        let state = result(
            provider
                .handle(Request::Create {
                    resource: RESOURCE.to_string(),
                    config: json!({
                        "name": "ops",
                        "description": "Ops mailbox",
                        "triggers": ["ALERT_OPENED"],
                        "template": "{{alertId}}",
                        "recipient": "ops@example.com"
                    }),
                })
                .await,
        );

        assert_eq!(state["id"], "t-1");
        assert_eq!(state["method"], "EMAIL");
    }

    #[tokio::test]
    async fn test_delete_then_read_clears_state() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/notificant/t-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(remote())))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/api/v2/notificant/t-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/v2/notificant/t-1"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut provider = configured(&server);
        let deleted = provider
            .handle(Request::Delete {
                resource: RESOURCE.to_string(),
                state: state(),
            })
            .await;
        assert_eq!(deleted, Response::ok(Value::Null));

        let read = provider
            .handle(Request::Read {
                resource: RESOURCE.to_string(),
                state: state(),
            })
            .await;
        assert_eq!(read, Response::ok(Value::Null));
    }

    #[tokio::test]
    async fn test_update_of_missing_target_fails() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/notificant/t-1"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut provider = configured(&server);
        let message = message(
            provider
                .handle(Request::Update {
                    resource: RESOURCE.to_string(),
                    state: state(),
                })
                .await,
        );

        assert_eq!(message, "alert target t-1 not found");
    }
}
