//! Test doubles for the transport, timer and session seams.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;

use crate::shared::api::transport::TransportError;
use crate::shared::api::{ApiClient, ApiRequest, ApiResponse, SessionContext, Transport};
use crate::shared::timer::Timer;

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

impl Timer for TokioTimer {
    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()>>> {
        Box::pin(tokio::time::sleep(duration))
    }
}

/// What the fake backend answers, and after how long.
#[derive(Debug, Clone)]
pub struct Scripted {
    pub delay: Duration,
    pub result: Result<ApiResponse, TransportError>,
}

impl Scripted {
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(ApiResponse {
                status,
                body: body.into(),
            }),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(TransportError("connection refused".to_string())),
        }
    }

    pub fn after(mut self, millis: u64) -> Self {
        self.delay = Duration::from_millis(millis);
        self
    }
}

type Responder = Box<dyn Fn(&ApiRequest) -> Scripted>;

pub struct FakeTransport {
    requests: RefCell<Vec<ApiRequest>>,
    responder: RefCell<Responder>,
}

impl FakeTransport {
    pub fn new(responder: impl Fn(&ApiRequest) -> Scripted + 'static) -> Rc<Self> {
        Rc::new(Self {
            requests: RefCell::new(Vec::new()),
            responder: RefCell::new(Box::new(responder)),
        })
    }

    /// Swaps the scripted backend mid-test.
    pub fn respond_with(&self, responder: impl Fn(&ApiRequest) -> Scripted + 'static) {
        *self.responder.borrow_mut() = Box::new(responder);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[async_trait(?Send)]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let scripted = (self.responder.borrow())(&request);
        self.requests.borrow_mut().push(request);
        tokio::time::sleep(scripted.delay).await;
        scripted.result
    }
}

/// Counts how often the session was reported invalid.
#[derive(Clone, Default)]
pub struct SessionProbe {
    unauthorized: Rc<Cell<usize>>,
}

impl SessionProbe {
    pub fn unauthorized_calls(&self) -> usize {
        self.unauthorized.get()
    }
}

pub fn session_with_token(token: Option<&str>) -> (SessionContext, SessionProbe) {
    let probe = SessionProbe::default();
    let counter = Rc::clone(&probe.unauthorized);
    let token = token.map(str::to_string);
    let session = SessionContext::new(move || token.clone(), move || counter.set(counter.get() + 1));
    (session, probe)
}

pub fn client_with(transport: &Rc<FakeTransport>) -> (ApiClient, SessionProbe) {
    let (session, probe) = session_with_token(Some("token-1"));
    (ApiClient::new(transport.clone(), session), probe)
}
