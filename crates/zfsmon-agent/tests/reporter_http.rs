//! Exercises the update-reporting protocol against an in-process HTTP
//! server bound to an ephemeral port.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Form, Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use zfsmon_agent::reporter::{Reporter, UpdateOutcome};
use zfsmon_collector::resource::ResourceObject;
use zfsmon_common::diag::{DiagLevel, DiagnosticSink, MemorySink};

#[derive(Debug, Clone, PartialEq)]
struct Recorded {
    method: &'static str,
    path: String,
    form: HashMap<String, String>,
}

#[derive(Clone)]
struct TestServer {
    requests: Arc<Mutex<Vec<Recorded>>>,
    host_known: bool,
    /// Resource name that answers 500 instead of success.
    fail_name: Option<String>,
    /// Success status for resource updates (201 or 200).
    update_status: StatusCode,
}

impl TestServer {
    fn record(&self, method: &'static str, path: String, form: HashMap<String, String>) {
        self.requests.lock().unwrap().push(Recorded { method, path, form });
    }
}

async fn check_host(State(server): State<TestServer>, Path(host): Path<String>) -> StatusCode {
    server.record("GET", format!("/{host}"), HashMap::new());
    if server.host_known {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn register_host(
    State(server): State<TestServer>,
    Path(host): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> StatusCode {
    server.record("POST", format!("/{host}"), form);
    StatusCode::CREATED
}

async fn update_resource(
    State(server): State<TestServer>,
    Path((host, collection, name)): Path<(String, String, String)>,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, &'static str) {
    server.record("POST", format!("/{host}/{collection}/{name}"), form);
    if server.fail_name.as_deref() == Some(name.as_str()) {
        (StatusCode::INTERNAL_SERVER_ERROR, "validation failed")
    } else {
        (server.update_status, "")
    }
}

async fn spawn_server(server: TestServer) -> String {
    let app = Router::new()
        .route("/:host", get(check_host).post(register_host))
        .route("/:host/:collection/:name", post(update_resource))
        .with_state(server);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn test_server(host_known: bool) -> TestServer {
    TestServer {
        requests: Arc::new(Mutex::new(Vec::new())),
        host_known,
        fail_name: None,
        update_status: StatusCode::OK,
    }
}

const MOUNT_FIELDS: &[&str] = &["name", "type", "creation", "used", "avail", "refer"];

fn mount_resource(name: &str, sink: &dyn DiagnosticSink) -> ResourceObject {
    let line = format!("{name}\tfilesystem\t-\t10G\t5G\t5G");
    ResourceObject::mount_with_fields(&line, false, MOUNT_FIELDS, sink).unwrap()
}

fn pool_resource(name: &str, sink: &dyn DiagnosticSink) -> ResourceObject {
    let line = format!("{name}\t2T");
    ResourceObject::pool_with_fields(&line, &["name", "size"], sink).unwrap()
}

fn reporter(base: &str, sink: Arc<MemorySink>) -> Reporter {
    Reporter::new(base, "testhost", Duration::from_secs(5), sink).unwrap()
}

#[tokio::test]
async fn unknown_host_is_registered_before_any_update() {
    let server = test_server(false);
    let requests = server.requests.clone();
    let base = spawn_server(server).await;
    let sink = Arc::new(MemorySink::default());
    let reporter = reporter(&base, sink.clone());

    reporter
        .ensure_host_registered("SunOS testhost 5.11 11.0 i86pc i386 i86pc")
        .await;
    let resource = mount_resource("tank", sink.as_ref());
    assert!(reporter.report(&[resource]).await);

    let requests = requests.lock().unwrap();
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/testhost");
    assert_eq!(requests[1].method, "POST");
    assert_eq!(requests[1].path, "/testhost");
    assert_eq!(
        requests[1].form.get("hostname").map(String::as_str),
        Some("testhost")
    );
    assert_eq!(
        requests[1].form.get("hostdescription").map(String::as_str),
        Some("SunOS testhost 5.11 11.0 i86pc i386 i86pc")
    );
    assert_eq!(requests[2].path, "/testhost/mounts/tank");
}

#[tokio::test]
async fn known_host_skips_registration() {
    let server = test_server(true);
    let requests = server.requests.clone();
    let base = spawn_server(server).await;
    let sink = Arc::new(MemorySink::default());
    let reporter = reporter(&base, sink.clone());

    reporter.ensure_host_registered("description").await;

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
}

#[tokio::test]
async fn registration_failure_is_logged_not_fatal() {
    // No server at all: the probe and the registration POST both fail.
    let sink = Arc::new(MemorySink::default());
    let reporter = reporter("http://127.0.0.1:1", sink.clone());

    reporter.ensure_host_registered("description").await;

    assert_eq!(sink.messages(DiagLevel::Warning).len(), 1);
    assert_eq!(sink.messages(DiagLevel::Error).len(), 1);
}

#[tokio::test]
async fn properties_round_trip_as_form_fields() {
    let server = test_server(true);
    let requests = server.requests.clone();
    let base = spawn_server(server).await;
    let sink = Arc::new(MemorySink::default());
    let reporter = reporter(&base, sink.clone());

    let resource = mount_resource("tank", sink.as_ref());
    assert_eq!(
        reporter.post_resource(&resource).await,
        UpdateOutcome::Updated
    );

    let requests = requests.lock().unwrap();
    let form = &requests[0].form;
    assert_eq!(form.get("name").map(String::as_str), Some("tank"));
    assert_eq!(form.get("type").map(String::as_str), Some("filesystem"));
    assert_eq!(form.get("creation").map(String::as_str), Some("-"));
    assert_eq!(form.get("used").map(String::as_str), Some("10737418240"));
    assert_eq!(form.get("avail").map(String::as_str), Some("5368709120"));
    assert_eq!(form.get("refer").map(String::as_str), Some("5368709120"));
}

#[tokio::test]
async fn created_and_updated_are_distinguished() {
    let mut server = test_server(true);
    server.update_status = StatusCode::CREATED;
    let base = spawn_server(server).await;
    let sink = Arc::new(MemorySink::default());
    let reporter = reporter(&base, sink.clone());

    let resource = mount_resource("tank", sink.as_ref());
    assert_eq!(
        reporter.post_resource(&resource).await,
        UpdateOutcome::Created
    );
    let info = sink.messages(DiagLevel::Info);
    assert_eq!(info.len(), 1);
    assert!(info[0].contains("created"));
}

#[tokio::test]
async fn one_failure_fails_the_cycle_but_not_its_siblings() {
    let mut server = test_server(true);
    server.fail_name = Some("sick".to_string());
    let base = spawn_server(server).await;
    let sink = Arc::new(MemorySink::default());
    let reporter = reporter(&base, sink.clone());

    let resources = [
        pool_resource("tank", sink.as_ref()),
        pool_resource("sick", sink.as_ref()),
        pool_resource("rpool", sink.as_ref()),
    ];
    assert!(!reporter.report(&resources).await);

    // The two healthy siblings are still individually reported as
    // updated; the failure carries the status and body.
    let info = sink.messages(DiagLevel::Info);
    assert_eq!(info.len(), 2);
    assert!(info.iter().any(|m| m.contains("tank")));
    assert!(info.iter().any(|m| m.contains("rpool")));
    let errors = sink.messages(DiagLevel::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("500"));
    assert!(errors[0].contains("validation failed"));
}

#[tokio::test]
async fn empty_cycle_reports_success() {
    let server = test_server(true);
    let base = spawn_server(server).await;
    let sink = Arc::new(MemorySink::default());
    let reporter = reporter(&base, sink.clone());

    assert!(reporter.report(&[]).await);
    assert!(sink.records().is_empty());
}
