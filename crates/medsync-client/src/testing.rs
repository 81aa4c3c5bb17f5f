//! Test doubles for the transport seam.
//!
//! `StubTransport` answers from a queue of scripted responses, optionally
//! delaying each one so tests can interleave in-flight requests
//! deterministically under `tokio::time::pause`.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{SyncError, SyncResult};
use crate::gateway::ScriptTransport;
use crate::protocol::{Action, ScriptResponse};

type Scripted = (Duration, SyncResult<ScriptResponse>);

/// A scripted transport: each call pops the next queued response.
///
/// An exhausted queue answers a bare success with no data, which reads as
/// "acknowledged" for mutations and "empty payload" for reads.
pub(crate) struct StubTransport {
    queue: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<(Action, Value)>>,
}

impl StubTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(StubTransport {
            queue: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn push_ok(&self, data: Value) {
        self.push_envelope(ScriptResponse::ok(data));
    }

    pub fn push_ok_delayed(&self, delay: Duration, data: Value) {
        self.queue
            .lock()
            .expect("stub queue poisoned")
            .push_back((delay, Ok(ScriptResponse::ok(data))));
    }

    pub fn push_rejected(&self, message: &str) {
        self.push_envelope(ScriptResponse::rejected(message));
    }

    pub fn push_envelope(&self, envelope: ScriptResponse) {
        self.queue
            .lock()
            .expect("stub queue poisoned")
            .push_back((Duration::ZERO, Ok(envelope)));
    }

    pub fn push_err(&self, err: SyncError) {
        self.queue
            .lock()
            .expect("stub queue poisoned")
            .push_back((Duration::ZERO, Err(err)));
    }

    /// Every `(action, payload)` pair seen so far, in call order.
    pub fn calls(&self) -> Vec<(Action, Value)> {
        self.calls.lock().expect("stub calls poisoned").clone()
    }
}

#[async_trait]
impl ScriptTransport for StubTransport {
    async fn send(&self, action: Action, payload: Value) -> SyncResult<ScriptResponse> {
        self.calls
            .lock()
            .expect("stub calls poisoned")
            .push((action, payload));

        let next = self.queue.lock().expect("stub queue poisoned").pop_front();
        match next {
            Some((delay, result)) => {
                if delay > Duration::ZERO {
                    tokio::time::sleep(delay).await;
                }
                result
            }
            None => Ok(ScriptResponse::ok(Value::Null)),
        }
    }
}
