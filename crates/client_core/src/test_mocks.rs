//! Scripted in-memory service used by the controller tests.

use std::{
    collections::{HashMap, VecDeque},
    io,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::oneshot;

use crate::transport::{ApiRequest, ApiResponse, HttpMethod, RemoteApi, TransportError};

type RouteKey = (HttpMethod, String, Option<u32>);

enum Reply {
    Respond { status: u16, body: Value },
    NetworkDown,
    Status(u16),
}

struct Scripted {
    reply: Reply,
    gate: Option<oneshot::Receiver<()>>,
}

/// Replies are queued per (method, path, page) and consumed in order.
/// Unscripted requests fail with a 404.
#[derive(Default)]
pub struct ScriptedApi {
    routes: Mutex<HashMap<RouteKey, VecDeque<Scripted>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn push(
        &self,
        method: HttpMethod,
        path: &str,
        page: Option<u32>,
        reply: Reply,
        gate: Option<oneshot::Receiver<()>>,
    ) {
        self.routes
            .lock()
            .expect("routes")
            .entry((method, path.to_string(), page))
            .or_default()
            .push_back(Scripted { reply, gate });
    }

    pub fn respond(
        &self,
        method: HttpMethod,
        path: &str,
        page: Option<u32>,
        status: u16,
        body: Value,
    ) {
        self.push(method, path, page, Reply::Respond { status, body }, None);
    }

    /// Like [`respond`](Self::respond), but the reply is held back until the
    /// returned sender fires.
    pub fn respond_gated(
        &self,
        method: HttpMethod,
        path: &str,
        page: Option<u32>,
        status: u16,
        body: Value,
    ) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        self.push(method, path, page, Reply::Respond { status, body }, Some(gate));
        release
    }

    pub fn fail_network(&self, method: HttpMethod, path: &str, page: Option<u32>) {
        self.push(method, path, page, Reply::NetworkDown, None);
    }

    pub fn fail_status(&self, method: HttpMethod, path: &str, page: Option<u32>, status: u16) {
        self.push(method, path, page, Reply::Status(status), None);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().expect("requests").clone()
    }

    pub fn requests_to(&self, method: HttpMethod, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.method == method && request.path == path)
            .collect()
    }

    /// Pages requested from `path` with GET, in issue order.
    pub fn pages_fetched(&self, path: &str) -> Vec<Option<u32>> {
        self.requests_to(HttpMethod::Get, path)
            .into_iter()
            .map(|request| request.page)
            .collect()
    }

    pub async fn wait_for_requests(&self, count: usize) {
        while self.requests.lock().expect("requests").len() < count {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl RemoteApi for ScriptedApi {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests
            .lock()
            .expect("requests")
            .push(request.clone());

        let key = (request.method, request.path.clone(), request.page);
        let scripted = self
            .routes
            .lock()
            .expect("routes")
            .get_mut(&key)
            .and_then(VecDeque::pop_front);

        let Some(Scripted { reply, gate }) = scripted else {
            return Err(TransportError::Status {
                path: request.path,
                status: 404,
                message: Some("unscripted request".into()),
            });
        };

        if let Some(gate) = gate {
            let _ = gate.await;
        }

        match reply {
            Reply::Respond { status, body } => Ok(ApiResponse { status, body }),
            Reply::NetworkDown => Err(TransportError::Network {
                path: request.path,
                source: Box::new(io::Error::new(
                    io::ErrorKind::ConnectionRefused,
                    "connection refused",
                )),
            }),
            Reply::Status(status) => Err(TransportError::Status {
                path: request.path,
                status,
                message: None,
            }),
        }
    }
}

pub fn page_body(items: Value, total_pages: u32) -> Value {
    json!({ "data": items, "totalPages": total_pages })
}

pub fn customer_json(id: i64, name: &str) -> Value {
    json!({ "id": id, "name": name })
}

pub fn packet_json(id: i64, name: &str) -> Value {
    json!({ "id": id, "name": name, "yearly_return": 5 })
}

pub fn account_json(id: i64) -> Value {
    json!({
        "id": id,
        "id_customer": 2,
        "balance": 500,
        "packet": 1,
        "startdate": "2023-01-01"
    })
}

pub fn accounts_json(ids: impl IntoIterator<Item = i64>) -> Value {
    Value::Array(ids.into_iter().map(account_json).collect())
}
