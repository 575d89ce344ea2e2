//! Integration tests for the Camunda Cloud client against a mock server

use ccctl_core::{CamundaCloudClient, ClusterCreationRequest, ClusterSelection, CoreError};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-access-token";

/// Client pointed at `server` for both the token endpoint and the API
fn client_for(server: &MockServer) -> CamundaCloudClient {
    CamundaCloudClient::builder()
        .api_url(server.uri())
        .auth_url(server.uri())
        .build()
        .unwrap()
}

/// Client that already holds [`TOKEN`]
async fn logged_in_client(server: &MockServer) -> CamundaCloudClient {
    let client = client_for(server);
    client.set_access_token(TOKEN).await;
    client
}

fn catalog() -> Value {
    json!({
        "channels": [
            {
                "uuid": "ch-stable",
                "name": "Stable",
                "isDefault": true,
                "allowedGenerations": [
                    {"uuid": "gen-old", "name": "Zeebe 0.26.0"},
                    {"uuid": "gen-new", "name": "Zeebe 1.0.0"}
                ],
                "defaultGeneration": {"uuid": "gen-new", "name": "Zeebe 1.0.0"}
            },
            {
                "uuid": "ch-dev",
                "name": "Dev",
                "isDefault": false,
                "allowedGenerations": [{"uuid": "gen-dev", "name": "Zeebe SNAPSHOT"}],
                "defaultGeneration": {"uuid": "gen-dev", "name": "Zeebe SNAPSHOT"}
            }
        ],
        "clusterPlanTypes": [
            {"uuid": "plan-dev", "name": "Development"},
            {"uuid": "plan-prod", "name": "Production S"}
        ],
        "regions": [
            {"uuid": "reg-a", "name": "A", "region": "europe-west1", "zone": "d"},
            {"uuid": "reg-b", "name": "B", "region": "us-east1", "zone": "b"}
        ]
    })
}

fn cluster(id: &str, name: &str) -> Value {
    json!({
        "uuid": id,
        "name": name,
        "created": "2021-05-04T10:00:00Z",
        "channel": {"uuid": "ch-stable", "name": "Stable"},
        "generation": {"uuid": "gen-new", "name": "Zeebe 1.0.0"}
    })
}

async fn mock_clusters(server: &MockServer, clusters: Value) {
    Mock::given(method("GET"))
        .and(path("/clusters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(clusters))
        .mount(server)
        .await;
}

async fn mock_params(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/clusters/parameters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog()))
        .mount(server)
        .await;
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_stores_token_used_by_later_calls() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_json(json!({
            "grant_type": "client_credentials",
            "audience": "api.cloud.camunda.io",
            "client_id": "my-id",
            "client_secret": "my-secret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "issued-token",
            "expires_in": 86400,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/clusters"))
        .and(header("authorization", "Bearer issued-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.login("my-id", "my-secret").await.unwrap();
    assert!(client.is_authenticated().await);

    let clusters = client.get_clusters().await.unwrap();
    assert!(clusters.is_empty());
}

#[tokio::test]
async fn test_login_failure_keeps_previous_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/clusters"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    let err = client.login("my-id", "wrong").await.unwrap_err();

    assert!(matches!(err, CoreError::AuthenticationFailed { status: 401 }));
    assert_eq!(err.to_string(), "HTTP Error trying to login: 401");
    // Old token still in place
    client.get_clusters().await.unwrap();
}

#[tokio::test]
async fn test_login_without_token_in_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.login("my-id", "my-secret").await.unwrap_err();
    assert!(matches!(err, CoreError::Decode { .. }));
    assert!(err.to_string().contains("maintenance"));
    assert!(!client.is_authenticated().await);
}

#[tokio::test]
async fn test_calls_before_login_send_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.get_clusters().await.unwrap_err();
    assert!(matches!(err, CoreError::NotAuthenticated));
    assert!(err.is_unauthorized());
}

// ============================================================================
// Parameter catalog
// ============================================================================

#[tokio::test]
async fn test_get_cluster_params_updates_snapshot() {
    let server = MockServer::start().await;
    mock_params(&server).await;

    let client = logged_in_client(&server).await;
    assert!(client.cluster_params_snapshot().await.is_none());

    let params = client.get_cluster_params().await.unwrap();
    assert_eq!(params.channels.len(), 2);
    assert_eq!(params.plan_types[1].name, "Production S");
    assert_eq!(client.cluster_params_snapshot().await, Some(params));
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clusters/parameters"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    let err = client.get_cluster_params().await.unwrap_err();
    assert!(matches!(err, CoreError::Unauthorized { .. }));
    assert!(err.to_string().contains("token expired"));
}

// ============================================================================
// Cluster lookup
// ============================================================================

#[tokio::test]
async fn test_get_cluster_by_name() {
    let server = MockServer::start().await;
    mock_clusters(&server, json!([cluster("c-1", "orders"), cluster("c-2", "billing")])).await;

    let client = logged_in_client(&server).await;

    let found = client.get_cluster_by_name("billing").await.unwrap().unwrap();
    assert_eq!(found.id, "c-2");
    assert!(client.get_cluster_by_name("bill").await.unwrap().is_none());
}

#[tokio::test]
async fn test_ensure_cluster_name_available() {
    let server = MockServer::start().await;
    mock_clusters(&server, json!([cluster("c-1", "x")])).await;

    let client = logged_in_client(&server).await;

    let err = client.ensure_cluster_name_available("x").await.unwrap_err();
    assert!(err.is_conflict());
    assert!(err.to_string().contains("already exists"));

    client.ensure_cluster_name_available("y").await.unwrap();
}

#[tokio::test]
async fn test_get_cluster_details() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clusters/c-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uuid": "c-1",
            "status": {
                "ready": "Healthy",
                "zeebeStatus": "Healthy",
                "zeebeUrl": "c-1.bru-2.zeebe.camunda.io:443",
                "operateStatus": "Healthy",
                "operateUrl": "https://bru-2.operate.camunda.io/c-1",
                "tasklistStatus": "Healthy",
                "tasklistUrl": "https://bru-2.tasklist.camunda.io/c-1"
            }
        })))
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    let status = client.get_cluster_details("c-1").await.unwrap();
    assert_eq!(status.ready, "Healthy");
    assert_eq!(status.zeebe_url, "c-1.bru-2.zeebe.camunda.io:443");
    assert!(!status.is_not_found());
}

#[tokio::test]
async fn test_get_cluster_details_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clusters/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    let err = client.get_cluster_details("missing").await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }));
    assert_eq!(err.to_string(), "Cluster missing not found");
}

#[tokio::test]
async fn test_get_cluster_details_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clusters/c-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"uuid\": "))
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    let err = client.get_cluster_details("c-1").await.unwrap_err();
    assert!(matches!(err, CoreError::Decode { .. }));
    assert!(!err.is_not_found());
}

// ============================================================================
// Cluster creation
// ============================================================================

#[tokio::test]
async fn test_create_cluster_default() {
    let server = MockServer::start().await;
    mock_clusters(&server, json!([])).await;
    mock_params(&server).await;

    Mock::given(method("POST"))
        .and(path("/clusters"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .and(body_json(json!({
            "name": "demo",
            "channelId": "ch-stable",
            "generationId": "gen-new",
            "regionId": "reg-a",
            "planTypeId": "plan-dev"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"clusterId": "abc123"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    client.get_cluster_params().await.unwrap();

    let id = client.create_cluster_default("demo").await.unwrap();
    assert_eq!(id, "abc123");
}

#[tokio::test]
async fn test_create_cluster_fetches_missing_catalog() {
    let server = MockServer::start().await;
    mock_clusters(&server, json!([])).await;

    Mock::given(method("GET"))
        .and(path("/clusters/parameters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/clusters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"clusterId": "abc123"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    assert_eq!(client.create_cluster_default("demo").await.unwrap(), "abc123");
    assert!(client.cluster_params_snapshot().await.is_some());
}

#[tokio::test]
async fn test_create_cluster_with_params() {
    let server = MockServer::start().await;
    mock_clusters(&server, json!([])).await;
    mock_params(&server).await;

    Mock::given(method("POST"))
        .and(path("/clusters"))
        .and(body_json(json!({
            "name": "orders",
            "channelId": "ch-stable",
            "generationId": "gen-old",
            "regionId": "reg-b",
            "planTypeId": "plan-prod"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"clusterId": "c-9"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    let selection = ClusterSelection::new()
        .with_channel("Stable")
        .with_generation("Zeebe 0.26.0")
        .with_region("B")
        .with_plan("Production S");

    let id = client
        .create_cluster_with_params("orders", &selection)
        .await
        .unwrap();
    assert_eq!(id, "c-9");
}

#[tokio::test]
async fn test_create_cluster_unknown_region_sends_no_post() {
    let server = MockServer::start().await;
    mock_clusters(&server, json!([])).await;
    mock_params(&server).await;

    Mock::given(method("POST"))
        .and(path("/clusters"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    let err = client
        .create_cluster_with_params("orders", &ClusterSelection::new().with_region("Mars"))
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("No region found with name: Mars"));
}

#[tokio::test]
async fn test_create_cluster_existing_name_sends_no_post() {
    let server = MockServer::start().await;
    mock_clusters(&server, json!([cluster("c-1", "demo")])).await;
    mock_params(&server).await;

    Mock::given(method("POST"))
        .and(path("/clusters"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    let err = client.create_cluster_default("demo").await.unwrap_err();
    assert!(matches!(err, CoreError::ClusterExists { ref name } if name == "demo"));
}

#[tokio::test]
async fn test_create_cluster_custom_config() {
    let server = MockServer::start().await;
    mock_clusters(&server, json!([])).await;

    Mock::given(method("POST"))
        .and(path("/clusters"))
        .and(body_json(json!({
            "name": "custom",
            "channelId": "c",
            "generationId": "g",
            "regionId": "r",
            "planTypeId": "p"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"clusterId": "c-7"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    let request = ClusterCreationRequest::new("custom", "c", "g", "r", "p");
    assert_eq!(client.create_cluster_custom_config(&request).await.unwrap(), "c-7");
}

#[tokio::test]
async fn test_create_cluster_custom_config_missing_ids() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    let request = ClusterCreationRequest::new("custom", "c", "", "r", "");
    let err = client
        .create_cluster_custom_config(&request)
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("generationId"));
    assert!(err.to_string().contains("planTypeId"));
}

#[tokio::test]
async fn test_create_cluster_rejected_by_api() {
    let server = MockServer::start().await;
    mock_clusters(&server, json!([])).await;
    mock_params(&server).await;

    Mock::given(method("POST"))
        .and(path("/clusters"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "plan not allowed"})),
        )
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    let err = client.create_cluster_default("demo").await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(err.to_string().contains("plan not allowed"));
}

// ============================================================================
// Cluster deletion
// ============================================================================

#[tokio::test]
async fn test_delete_cluster() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/clusters/abc123"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    client.delete_cluster("abc123").await.unwrap();
}

#[tokio::test]
async fn test_delete_missing_cluster() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/clusters/abc123"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    let err = client.delete_cluster("abc123").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_delete_cluster_accepted_is_not_success() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/clusters/abc123"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    let err = client.delete_cluster("abc123").await.unwrap_err();
    assert_eq!(err.status(), Some(204));
}

// ============================================================================
// Zeebe clients
// ============================================================================

#[tokio::test]
async fn test_zeebe_client_validation_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;

    let err = client.get_zeebe_client_details("", "x").await.unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("Cluster id should not be empty"));

    let err = client.get_zeebe_client_details("c-1", "").await.unwrap_err();
    assert!(err.to_string().contains("Client id should not be empty"));

    let err = client.get_zeebe_clients("").await.unwrap_err();
    assert!(err.is_validation());

    let err = client.create_zeebe_client("c-1", "").await.unwrap_err();
    assert!(err.to_string().contains("Client name should not be empty"));

    let err = client.delete_zeebe_client("", "x").await.unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn test_validation_precedes_authentication() {
    let client = CamundaCloudClient::builder().build().unwrap();
    let err = client.get_zeebe_client_details("", "x").await.unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn test_get_zeebe_clients() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clusters/c-1/clients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "clientId": "worker-abc",
                "name": "worker",
                "created": "2021-05-04T10:00:00Z",
                "createdBy": "ops@example.com",
                "internal": false,
                "permissions": ["zeebe"]
            }
        ])))
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    let clients = client.get_zeebe_clients("c-1").await.unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].client_id, "worker-abc");
    assert_eq!(clients[0].permissions, vec!["zeebe".to_string()]);
}

#[tokio::test]
async fn test_get_zeebe_client_details() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clusters/c-1/clients/worker-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "worker",
            "ZEEBE_ADDRESS": "c-1.bru-2.zeebe.camunda.io:443",
            "ZEEBE_CLIENT_ID": "worker-abc",
            "ZEEBE_AUTHORIZATION_SERVER_URL": "https://login.cloud.camunda.io/oauth/token"
        })))
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    let details = client
        .get_zeebe_client_details("c-1", "worker-abc")
        .await
        .unwrap();
    assert_eq!(details.zeebe_address, "c-1.bru-2.zeebe.camunda.io:443");
    assert_eq!(details.zeebe_client_id, "worker-abc");
}

#[tokio::test]
async fn test_create_zeebe_client() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/clusters/c-1/clients"))
        .and(body_json(json!({"clientName": "worker"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "worker",
            "clientId": "worker-abc",
            "clientSecret": "shown-once"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    let created = client.create_zeebe_client("c-1", "worker").await.unwrap();
    assert_eq!(created.client_id, "worker-abc");
    assert_eq!(created.client_secret, "shown-once");
    assert!(!format!("{:?}", created).contains("shown-once"));
}

#[tokio::test]
async fn test_delete_zeebe_client() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/clusters/c-1/clients/worker-abc"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/clusters/c-1/clients/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    client.delete_zeebe_client("c-1", "worker-abc").await.unwrap();

    let err = client.delete_zeebe_client("c-1", "gone").await.unwrap_err();
    assert!(err.is_not_found());
}

// ============================================================================
// Shared use
// ============================================================================

#[tokio::test]
async fn test_clones_share_login_across_tasks() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clusters"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([cluster("c-1", "x")])))
        .expect(8)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.set_access_token(TOKEN).await;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.get_clusters().await })
        })
        .collect();

    for handle in handles {
        let clusters = handle.await.unwrap().unwrap();
        assert_eq!(clusters[0].name, "x");
    }
}

#[tokio::test]
async fn test_request_timeout_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clusters"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(std::time::Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = logged_in_client(&server)
        .await
        .with_timeout(std::time::Duration::from_millis(100));
    let err = client.get_clusters().await.unwrap_err();
    assert!(matches!(err, CoreError::Transport(_)));
}
