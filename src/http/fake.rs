use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::operation::Operation;
use crate::errors::SmartPingError;
use crate::http::Transport;

/// A request the fake received
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub operation: Operation,
    pub query: Vec<(String, String)>,
}

impl RecordedCall {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// In-memory transport answering from a queue of canned responses
#[derive(Default)]
pub struct FakeTransport {
    responses: Mutex<VecDeque<Result<String, SmartPingError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, body: impl Into<String>) -> Self {
        self.push(Ok(body.into()));
        self
    }

    pub fn fail(self, error: SmartPingError) -> Self {
        self.push(Err(error));
        self
    }

    fn push(&self, response: Result<String, SmartPingError>) {
        self.responses
            .lock()
            .expect("responses lock")
            .push_back(response);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, operation: Operation, query: &[(String, String)]) -> Result<String, SmartPingError> {
        self.calls.lock().expect("calls lock").push(RecordedCall {
            operation,
            query: query.to_vec(),
        });

        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or_else(|| Err(SmartPingError::Transport(format!("no canned response for {}", operation.path()))))
    }
}
