use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use ckdscreen::{Oracle, OracleRequest, PredictionError};

pub const DETECTED_HIGH: &str =
    r#"{"prediction":"CKD Detected","confidence":94,"riskLevel":"High","riskScore":88}"#;

#[allow(dead_code)]
pub const NOT_DETECTED_LOW: &str =
    r#"{"prediction":"No CKD Detected","confidence":91,"riskLevel":"Low","riskScore":9}"#;

type Reply = Box<dyn Fn() -> Result<String, PredictionError> + Send + Sync>;

/// Deterministic oracle that records every request it receives.
pub struct StubOracle {
    reply: Reply,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_request: Mutex<Option<OracleRequest>>,
}

#[allow(dead_code)]
impl StubOracle {
    pub fn replying(text: &str) -> Self {
        let text = text.to_string();
        Self::with_reply(Box::new(move || Ok(text.clone())))
    }

    pub fn failing(make_error: fn() -> PredictionError) -> Self {
        Self::with_reply(Box::new(move || Err(make_error())))
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            delay: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Sleep for `delay` before answering.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<OracleRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl Oracle for StubOracle {
    async fn generate(&self, request: &OracleRequest) -> Result<String, PredictionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.reply)()
    }

    fn name(&self) -> &str {
        "stub"
    }
}
