//! Per-run callback handles passed to [`super::Llm`] calls

use serde_json::{Map, Value};
use tracing::{debug, warn};
use uuid::Uuid;

/// Callback manager for a single synchronous LLM run
#[derive(Debug, Clone)]
pub struct CallbackManagerForLlmRun {
    run_id: Uuid,
    tags: Vec<String>,
    metadata: Map<String, Value>,
}

impl CallbackManagerForLlmRun {
    /// Start a new run with a fresh id
    #[must_use]
    pub fn new(tags: Vec<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            tags,
            metadata: Map::new(),
        }
    }

    /// Attach metadata to the run
    #[must_use]
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    #[must_use]
    pub const fn run_id(&self) -> Uuid {
        self.run_id
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub const fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    pub fn on_llm_start(&self, llm_type: &str, prompt: &str) {
        debug!(
            run_id = %self.run_id,
            llm_type,
            tags = ?self.tags,
            prompt_len = prompt.len(),
            "LLM run started"
        );
    }

    pub fn on_llm_end(&self, text: &str) {
        debug!(run_id = %self.run_id, output_len = text.len(), "LLM run finished");
    }

    pub fn on_llm_error(&self, error: &(dyn std::error::Error + Send + Sync)) {
        warn!(run_id = %self.run_id, error = %error, "LLM run failed");
    }
}

/// Callback manager for a single asynchronous LLM run
#[derive(Debug, Clone)]
pub struct AsyncCallbackManagerForLlmRun {
    inner: CallbackManagerForLlmRun,
}

#[allow(clippy::unused_async)]
impl AsyncCallbackManagerForLlmRun {
    /// Start a new run with a fresh id
    #[must_use]
    pub fn new(tags: Vec<String>) -> Self {
        Self {
            inner: CallbackManagerForLlmRun::new(tags),
        }
    }

    /// Attach metadata to the run
    #[must_use]
    pub fn with_metadata(self, metadata: Map<String, Value>) -> Self {
        Self {
            inner: self.inner.with_metadata(metadata),
        }
    }

    #[must_use]
    pub const fn run_id(&self) -> Uuid {
        self.inner.run_id()
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        self.inner.tags()
    }

    #[must_use]
    pub const fn metadata(&self) -> &Map<String, Value> {
        self.inner.metadata()
    }

    pub async fn on_llm_start(&self, llm_type: &str, prompt: &str) {
        self.inner.on_llm_start(llm_type, prompt);
    }

    pub async fn on_llm_end(&self, text: &str) {
        self.inner.on_llm_end(text);
    }

    pub async fn on_llm_error(&self, error: &(dyn std::error::Error + Send + Sync)) {
        self.inner.on_llm_error(error);
    }
}

/// Marks a run as open until it reports an end or an error
///
/// Dropping it while still open (a batch sibling failed and the run's
/// future was discarded) logs the run as cancelled.
#[derive(Debug)]
pub(crate) struct OpenRun {
    run_id: Uuid,
    open: bool,
}

impl OpenRun {
    pub(crate) const fn new(run_id: Uuid) -> Self {
        Self { run_id, open: true }
    }

    pub(crate) fn close(&mut self) {
        self.open = false;
    }
}

impl Drop for OpenRun {
    fn drop(&mut self) {
        if self.open {
            debug!(run_id = %self.run_id, "LLM run cancelled before completion");
        }
    }
}
