//! Shared test doubles for the `TextGenerator` seam.
//! Compiled for tests only.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::errors::{EngineError, Result};
use crate::llm_client::{GenerationConfig, TextGenerator};

/// Generator that always fails, counting how often it was asked. Used to
/// prove the waterfall makes exactly one attempt before degrading.
#[derive(Default)]
pub struct FailingGenerator {
    calls: AtomicUsize,
}

impl FailingGenerator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str, _config: &GenerationConfig) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(EngineError::RequestFailed {
            status: 500,
            body: "stubbed outage".to_string(),
        })
    }
}

/// Generator that replies with one canned text for every prompt.
pub struct CannedGenerator {
    reply: String,
    calls: AtomicUsize,
}

impl CannedGenerator {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(&self, _prompt: &str, _config: &GenerationConfig) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}
