//! Span names emitted by client operations

use ccctl_core::CamundaCloudClient;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tracing::span::{Attributes, Id};
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Records `(span, parent)` for every span opened
#[derive(Clone, Default)]
struct SpanRecorder(Arc<Mutex<Vec<(String, Option<String>)>>>);

impl SpanRecorder {
    fn parent_of(&self, name: &str) -> Option<Option<String>> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .find(|(span, _)| span == name)
            .map(|(_, parent)| parent.clone())
    }
}

impl<S> Layer<S> for SpanRecorder
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let parent = ctx
            .span(id)
            .and_then(|span| span.parent())
            .map(|parent| parent.name().to_string());
        self.0
            .lock()
            .unwrap()
            .push((attrs.metadata().name().to_string(), parent));
    }
}

#[tokio::test]
async fn test_create_cluster_default_has_own_span() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/clusters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/clusters/parameters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "channels": [{
                "uuid": "ch-stable",
                "name": "Stable",
                "isDefault": true,
                "allowedGenerations": [{"uuid": "gen-1", "name": "Zeebe 1.0.0"}],
                "defaultGeneration": {"uuid": "gen-1", "name": "Zeebe 1.0.0"}
            }],
            "clusterPlanTypes": [{"uuid": "plan-dev", "name": "Development"}],
            "regions": [{"uuid": "reg-a", "name": "A", "region": "europe-west1", "zone": "d"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/clusters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"clusterId": "abc123"})))
        .mount(&server)
        .await;

    let recorder = SpanRecorder::default();
    let _guard = tracing_subscriber::registry()
        .with(recorder.clone())
        .set_default();

    let client = CamundaCloudClient::builder()
        .api_url(server.uri())
        .auth_url(server.uri())
        .build()
        .unwrap();
    client.set_access_token("token").await;

    assert_eq!(client.create_cluster_default("demo").await.unwrap(), "abc123");

    assert_eq!(recorder.parent_of("create_cluster_default"), Some(None));
    assert_eq!(
        recorder.parent_of("create_cluster"),
        Some(Some("create_cluster_default".to_string()))
    );
}
