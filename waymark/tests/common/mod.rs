#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use waymark::{BoxError, Exchange, Next, Request};

// ============================================================================
// Test Request / Response Types
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct TestRequest {
    pub verb: String,
    pub data: String,
}

impl TestRequest {
    pub fn new(verb: &str) -> Self {
        Self {
            verb: verb.to_string(),
            data: String::new(),
        }
    }

    pub fn with_data(verb: &str, data: &str) -> Self {
        Self {
            verb: verb.to_string(),
            data: data.to_string(),
        }
    }
}

impl Request for TestRequest {
    fn verb(&self) -> &str {
        &self.verb
    }
}

/// A response handle that collects what handlers send through it.
#[derive(Clone, Debug, Default)]
pub struct TestResponse {
    sent: Arc<Mutex<Vec<String>>>,
}

impl TestResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn send(&self, body: impl Into<String>) {
        self.sent.lock().unwrap().push(body.into());
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

pub type Ex = Exchange<TestRequest, TestResponse>;
pub type Continuation = Next<Ex>;

// ============================================================================
// Test Handlers
// ============================================================================

/// Sends `body` and ends the chain.
pub fn reply(body: &'static str) -> impl Fn(Ex, Continuation) -> Result<(), BoxError> + Send + Sync + 'static {
    move |ex: Ex, _next: Continuation| {
        ex.response.send(body);
        Ok(())
    }
}

/// Sends `body` and calls the continuation.
pub fn pass(body: &'static str) -> impl Fn(Ex, Continuation) -> Result<(), BoxError> + Send + Sync + 'static {
    move |ex: Ex, next: Continuation| {
        ex.response.send(body);
        next.call(ex)
    }
}

/// Installs a test subscriber so tracing output shows up under `--nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .with_test_writer()
        .try_init();
}
