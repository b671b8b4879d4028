//! End-to-end tests of the executor → harvest → submitter path.

use async_trait::async_trait;
use form_harvester::{
    HarvestExecutor, HiddenField, JsonSubmitter, LeafField, Node, StaticTree, SubmitError,
    SubmitMode, SubmitOutcome, Submitter, Transport, TransportPayload,
};
use serde_json::{json, Value};
use std::sync::Mutex;

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

struct RecordingTransport {
    payloads: Mutex<Vec<TransportPayload>>,
}

impl RecordingTransport {
    fn new() -> Self {
        RecordingTransport {
            payloads: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn dispatch(&self, payload: TransportPayload) -> Result<(), SubmitError> {
        self.payloads.lock().unwrap().push(payload);
        Ok(())
    }
}

fn user_form() -> Node {
    Node::object(
        "user",
        vec![
            Node::leaf("name", LeafField::text("Alice")),
            Node::array(
                "tags",
                vec![
                    Node::leaf("t", LeafField::text("x")).without_name(),
                    Node::leaf("t", LeafField::text("y")).without_name(),
                ],
            ),
        ],
    )
}

fn settings_form() -> Node {
    Node::object(
        "settings",
        vec![
            Node::leaf("retries", LeafField::integer("3")),
            Node::leaf("dark_mode", LeafField::checkbox("checked")),
        ],
    )
}

#[tokio::test]
async fn run_dispatches_one_payload_per_named_form() {
    init_tracing();

    let tree = StaticTree::new(vec![user_form(), settings_form()]);
    let submitter = JsonSubmitter::new(RecordingTransport::new());
    let executor = HarvestExecutor::new();

    let outcomes = executor
        .run(&tree, &submitter, Some("user"))
        .await
        .unwrap();

    // Only the named form is submitted.
    assert_eq!(outcomes, vec![SubmitOutcome::Dispatched]);
}

#[tokio::test]
async fn dispatched_payload_carries_harvested_object() {
    init_tracing();

    let transport = RecordingTransport::new();
    let tree = StaticTree::new(vec![user_form()]);
    let submitter = ProbeSubmitter::wrapping(JsonSubmitter::new(transport));
    let executor = HarvestExecutor::new();

    executor.run(&tree, &submitter, Some("user")).await.unwrap();

    let seen = submitter.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(
        seen[0],
        json!({"user": {"name": "Alice", "tags": ["x", "y"]}})
    );
}

#[tokio::test]
async fn run_without_id_processes_every_form_in_order() {
    init_tracing();

    let tree = StaticTree::new(vec![user_form(), settings_form()]);
    let submitter = ProbeSubmitter::wrapping(JsonSubmitter::new(RecordingTransport::new()));
    let executor = HarvestExecutor::new();

    let outcomes = executor.run(&tree, &submitter, None).await.unwrap();
    assert_eq!(outcomes.len(), 2);

    let seen = submitter.seen.lock().unwrap();
    assert_eq!(
        seen[0],
        json!({"user": {"name": "Alice", "tags": ["x", "y"]}})
    );
    assert_eq!(
        seen[1],
        json!({"settings": {"retries": 3, "dark_mode": true}})
    );
}

#[tokio::test]
async fn unknown_form_id_is_an_error() {
    init_tracing();

    let tree = StaticTree::new(vec![user_form()]);
    let submitter = JsonSubmitter::new(RecordingTransport::new());
    let executor = HarvestExecutor::new();

    let err = executor
        .run(&tree, &submitter, Some("missing"))
        .await
        .unwrap_err();

    assert!(matches!(err, SubmitError::FormNotFound(id) if id == "missing"));
}

#[tokio::test]
async fn attach_mode_returns_fields_for_caller_dispatch() {
    init_tracing();

    let tree = StaticTree::new(vec![settings_form()]);
    let submitter =
        JsonSubmitter::new(RecordingTransport::new()).with_mode(SubmitMode::Attach);
    let executor = HarvestExecutor::new();

    let outcomes = executor.run(&tree, &submitter, None).await.unwrap();

    match &outcomes[..] {
        [SubmitOutcome::Attached(HiddenField { name, value })] => {
            assert_eq!(name, "data");
            let sent: Value = serde_json::from_str(value).unwrap();
            assert_eq!(sent, json!({"settings": {"retries": 3, "dark_mode": true}}));
        }
        other => panic!("expected one Attached outcome, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_failure_surfaces_from_the_run() {
    init_tracing();

    struct FailingTransport;

    #[async_trait]
    impl Transport for FailingTransport {
        async fn dispatch(&self, _payload: TransportPayload) -> Result<(), SubmitError> {
            Err(SubmitError::Dispatch("refused".to_string()))
        }
    }

    let tree = StaticTree::new(vec![user_form()]);
    let submitter = JsonSubmitter::new(FailingTransport);
    let executor = HarvestExecutor::new();

    let err = executor.run(&tree, &submitter, None).await.unwrap_err();
    assert!(matches!(err, SubmitError::Dispatch(_)));
}

/// Wraps a submitter and records every harvested object it is handed.
struct ProbeSubmitter<S: Submitter> {
    inner: S,
    seen: Mutex<Vec<Value>>,
}

impl<S: Submitter> ProbeSubmitter<S> {
    fn wrapping(inner: S) -> Self {
        ProbeSubmitter {
            inner,
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl<S: Submitter> Submitter for ProbeSubmitter<S> {
    async fn submit(&self, form: &Node, data: &Value) -> Result<SubmitOutcome, SubmitError> {
        self.seen.lock().unwrap().push(data.clone());
        self.inner.submit(form, data).await
    }
}
