#![allow(dead_code)]

use async_trait::async_trait;
use holiday_registry::domain::beneficiary::BeneficiaryRecord;
use holiday_registry::domain::form::FormState;
use holiday_registry::domain::payload::SubmissionPayload;
use holiday_registry::domain::ports::{SubmissionGateway, SubmissionReceipt};
use holiday_registry::error::Result;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{self, HeaderName};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::routing::post;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;
use tokio::net::TcpListener;
use tokio::sync::{Notify, oneshot};

pub const SAMPLE_PAYLOAD: &str = r#"{"general":{"direccion":"DAF"},"beneficiarios":[{"nombreFuncionario":"Juan","apellidoFuncionario":"Perez","apellido2Funcionario":"Cortes","nombreHijo":"Ana Ramires","sexo":"Femenino","edad":7}]}"#;

pub const SAMPLE_DRAFT: &str = r#"{
    "general": {"department": "DAF"},
    "beneficiaries": [{
        "staffFirstName": "Juan",
        "staffLastName1": "Perez",
        "staffLastName2": "Cortes",
        "role": "",
        "childName": "Ana Ramires",
        "childSex": "Femenino",
        "childAge": "7"
    }]
}"#;

pub fn beneficiary(first: &str) -> BeneficiaryRecord {
    BeneficiaryRecord {
        staff_first_name: first.to_string(),
        staff_last_name1: "Perez".to_string(),
        staff_last_name2: "Cortes".to_string(),
        role: String::new(),
        child_name: "Ana Ramires".to_string(),
        child_sex: "Femenino".to_string(),
        child_age: "7".to_string(),
    }
}

pub fn sample_form() -> FormState {
    let mut form = FormState::new();
    form.general.department = "DAF".to_string();
    form.beneficiaries = vec![beneficiary("Juan")];
    form
}

pub fn write_draft(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{json}").unwrap();
    file
}

/// A gateway that holds every submission until released.
#[derive(Clone, Default)]
pub struct GatedGateway {
    pub release: Arc<Notify>,
    pub entered: Arc<Notify>,
    pub calls: Arc<AtomicUsize>,
}

impl GatedGateway {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubmissionGateway for GatedGateway {
    async fn submit(&self, _payload: &SubmissionPayload) -> Result<SubmissionReceipt> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
        Ok(SubmissionReceipt {
            message: Some("Guardado".to_string()),
        })
    }
}

/// What the stub server saw of a request.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl CapturedRequest {
    pub fn content_type(&self) -> &str {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Clone)]
struct Stub {
    status: StatusCode,
    body: &'static str,
    captured: Arc<Mutex<Option<oneshot::Sender<CapturedRequest>>>>,
}

async fn capture(
    State(stub): State<Stub>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, [(HeaderName, &'static str); 1], &'static str) {
    let request = CapturedRequest {
        method,
        path: uri.path().to_string(),
        headers,
        body,
    };
    if let Some(tx) = stub.captured.lock().unwrap().take() {
        tx.send(request).ok();
    }
    (
        stub.status,
        [(header::CONTENT_TYPE, "application/json")],
        stub.body,
    )
}

/// Serves `POST /exec` with `status` and `body`, and hands back the first
/// request it received.
pub async fn respond_once(
    status: u16,
    body: &'static str,
) -> (String, oneshot::Receiver<CapturedRequest>) {
    let (tx, rx) = oneshot::channel();
    let stub = Stub {
        status: StatusCode::from_u16(status).unwrap(),
        body,
        captured: Arc::new(Mutex::new(Some(tx))),
    };
    let app = Router::new().route("/exec", post(capture)).with_state(stub);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/exec", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (url, rx)
}

/// A URL nothing listens on.
pub async fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/exec")
}
