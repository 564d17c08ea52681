#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::{json, Value};

use saas_console::api::ApiClient;
use saas_console::auth::{CredentialResolver, MemoryTokenStore, NavigationLog, SignInRedirect};

/// One request as the mock backend saw it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Clone)]
struct Canned {
    status: StatusCode,
    content_type: Option<String>,
    body: String,
}

#[derive(Default)]
struct Shared {
    routes: Mutex<HashMap<(Method, String), Canned>>,
    requests: Mutex<Vec<Recorded>>,
}

/// In-process stand-in for the SaaS backend. Routes answer with canned
/// responses and every request is recorded for assertions.
pub struct MockBackend {
    pub port: u16,
    pub base_url: String,
    shared: Arc<Shared>,
}

impl MockBackend {
    pub async fn start() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let shared = Arc::new(Shared::default());
        let app = Router::new().fallback(respond).with_state(shared.clone());

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind mock backend")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { port, base_url, shared })
    }

    /// Answer `method path` with a JSON body
    pub fn json(&self, method: Method, path: &str, status: u16, body: Value) -> &Self {
        self.canned(method, path, status, Some("application/json"), body.to_string())
    }

    /// Answer `method path` with a raw body and content type
    pub fn raw(&self, method: Method, path: &str, status: u16, content_type: &str, body: &str) -> &Self {
        self.canned(method, path, status, Some(content_type), body.to_string())
    }

    fn canned(&self, method: Method, path: &str, status: u16, content_type: Option<&str>, body: String) -> &Self {
        let canned = Canned {
            status: StatusCode::from_u16(status).expect("valid status"),
            content_type: content_type.map(str::to_string),
            body,
        };
        self.shared
            .routes
            .lock()
            .unwrap()
            .insert((method, path.to_string()), canned);
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.shared.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Recorded {
        self.requests().pop().expect("backend received no requests")
    }

    /// Plain client pointed at this backend, no credentials
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url)
    }
}

async fn respond(
    State(shared): State<Arc<Shared>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let query = uri
        .query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    shared.requests.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        query,
        headers,
        body,
    });

    let canned = shared.routes.lock().unwrap().get(&(method.clone(), path.clone())).cloned();
    match canned {
        Some(canned) => {
            let mut response = (canned.status, canned.body).into_response();
            if let Some(ct) = canned.content_type {
                if let Ok(value) = ct.parse() {
                    response.headers_mut().insert(header::CONTENT_TYPE, value);
                }
            }
            response
        }
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            json!({
                "message": format!("Cannot {} {}", method, path),
                "error": "Not Found",
                "statusCode": 404
            })
            .to_string(),
        )
            .into_response(),
    }
}

/// Base URL with nothing listening on it
pub fn unreachable_base_url() -> String {
    let port = portpicker::pick_unused_port().expect("free port");
    format!("http://127.0.0.1:{}", port)
}

/// Client wired the way the console wires it: token from a store, 401s
/// clear the store and navigate to sign-in.
pub struct Wired {
    pub client: ApiClient,
    pub store: Arc<MemoryTokenStore>,
    pub navigator: Arc<NavigationLog>,
}

pub fn wired_client(backend: &MockBackend, token: &str) -> Wired {
    let store = Arc::new(MemoryTokenStore::with_token(token));
    let navigator = Arc::new(NavigationLog::new());

    let client = backend
        .client()
        .with_credentials(Arc::new(CredentialResolver::new().with_store(store.clone())))
        .with_unauthorized_handler(Arc::new(
            SignInRedirect::new(navigator.clone())
                .clearing(store.clone())
                .sign_in_path("/sign-in"),
        ));

    Wired {
        client,
        store,
        navigator,
    }
}

pub fn company(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{}@example.test", id),
        "status": "ACTIVE",
        "_count": {"users": 1, "employees": 3}
    })
}

pub fn page(data: Vec<Value>, total: u64, page: u32, limit: u32) -> Value {
    let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit as u64) };
    json!({
        "data": data,
        "meta": {"total": total, "page": page, "limit": limit, "totalPages": total_pages}
    })
}
