//! Scripted fakes for the platform seams.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::config::ClientConfig;
use crate::credential::{CredentialStore, MemoryCredentialStore};
use crate::gateway::AuthGateway;
use crate::navigator::Navigator;
use crate::store::SessionContext;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport, TransportError};
use crate::types::User;

pub(crate) const BASE: &str = "http://api.test/api/v1";

enum Scripted {
    Respond(u16, String),
    Fail(String),
}

/// Transport answering from per-route queues; unscripted routes get a 404.
#[derive(Default)]
pub(crate) struct FakeTransport {
    routes: RefCell<HashMap<String, VecDeque<Scripted>>>,
    gates: RefCell<HashMap<String, oneshot::Receiver<()>>>,
    requests: RefCell<Vec<ApiRequest>>,
}

fn route_key(method: Method, path: &str) -> String {
    format!("{method} {path}")
}

impl FakeTransport {
    pub(crate) fn respond(&self, method: Method, path: &str, status: u16, body: serde_json::Value) {
        self.routes
            .borrow_mut()
            .entry(route_key(method, path))
            .or_default()
            .push_back(Scripted::Respond(status, body.to_string()));
    }

    pub(crate) fn fail(&self, method: Method, path: &str, message: &str) {
        self.routes
            .borrow_mut()
            .entry(route_key(method, path))
            .or_default()
            .push_back(Scripted::Fail(message.to_owned()));
    }

    /// Hold the next request on this route until the returned sender fires.
    pub(crate) fn gate(&self, method: Method, path: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().insert(route_key(method, path), rx);
        tx
    }

    pub(crate) fn calls(&self, method: Method, path: &str) -> usize {
        let url = format!("{BASE}{path}");
        self.requests
            .borrow()
            .iter()
            .filter(|request| request.method == method && request.url == url)
            .count()
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.borrow_mut().push(request.clone());
        let path = request.url.strip_prefix(BASE).unwrap_or(&request.url);
        let key = route_key(request.method, path);
        let gate = self.gates.borrow_mut().remove(&key);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        let next = self.routes.borrow_mut().get_mut(&key).and_then(VecDeque::pop_front);
        match next {
            Some(Scripted::Respond(status, body)) => Ok(ApiResponse { status, body }),
            Some(Scripted::Fail(message)) => Err(TransportError(message)),
            None => Ok(ApiResponse { status: 404, body: r#"{"error":"not found"}"#.to_owned() }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Nav {
    Soft(String),
    Hard(String),
}

#[derive(Default)]
pub(crate) struct RecordingNavigator {
    events: RefCell<Vec<Nav>>,
}

impl RecordingNavigator {
    pub(crate) fn events(&self) -> Vec<Nav> {
        self.events.borrow().clone()
    }

    pub(crate) fn hard_redirects(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Nav::Hard(target) => Some(target.clone()),
                Nav::Soft(_) => None,
            })
            .collect()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.events.borrow_mut().push(Nav::Soft(path.to_owned()));
    }

    fn hard_redirect(&self, target: &str) {
        self.events.borrow_mut().push(Nav::Hard(target.to_owned()));
    }
}

pub(crate) struct Harness {
    pub(crate) transport: Rc<FakeTransport>,
    pub(crate) credentials: Rc<MemoryCredentialStore>,
    pub(crate) navigator: Rc<RecordingNavigator>,
    pub(crate) gateway: AuthGateway,
}

impl Harness {
    pub(crate) fn new(token: Option<&str>) -> Self {
        let transport = Rc::new(FakeTransport::default());
        let credentials = Rc::new(token.map_or_else(MemoryCredentialStore::new, MemoryCredentialStore::with_token));
        let navigator = Rc::new(RecordingNavigator::default());
        let context = SessionContext::new(credentials.clone(), navigator.clone());
        let gateway = AuthGateway::new(ClientConfig::new(BASE), transport.clone(), context);
        Self { transport, credentials, navigator, gateway }
    }

    pub(crate) fn token(&self) -> Option<String> {
        self.credentials.token()
    }
}

pub(crate) fn user_json(id: u64, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "email": format!("user{id}@example.com"),
        "name": format!("User {id}"),
        "role": "user",
        "status": status,
    })
}

pub(crate) fn user(id: u64, status: &str) -> User {
    serde_json::from_value(user_json(id, status)).unwrap()
}
