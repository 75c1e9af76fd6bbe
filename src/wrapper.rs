//! Client wrapper exposing an [`LlmClient`] as a host [`Llm`]
//!
//! The wrapper forwards the prompt and stop list to the client and hands
//! back exactly what the client returns, errors included. Run managers and
//! call extras supplied by the host are accepted and ignored.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::{
    client::LlmClient,
    config::{Settings, DEFAULT_LLM_TYPE},
    host::{AsyncCallbackManagerForLlmRun, CallExtras, CallbackManagerForLlmRun, Llm},
};

/// Host-facing wrapper around a shared language-model client
pub struct LlmClientWrapper<C: LlmClient + ?Sized> {
    client: Arc<C>,
    llm_type: String,
    tags: Vec<String>,
}

impl<C: LlmClient + ?Sized> LlmClientWrapper<C> {
    /// Wrap `client` under the default identifier
    #[must_use]
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            llm_type: DEFAULT_LLM_TYPE.to_string(),
            tags: Vec::new(),
        }
    }

    /// Wrap `client` using the identity configured in `settings`
    #[must_use]
    pub fn from_settings(client: Arc<C>, settings: &Settings) -> Self {
        Self {
            client,
            llm_type: settings.llm_type.clone(),
            tags: settings.tags.clone(),
        }
    }

    /// Override the identifier reported to the host
    #[must_use]
    pub fn with_llm_type(mut self, llm_type: impl Into<String>) -> Self {
        self.llm_type = llm_type.into();
        self
    }

    /// Tags the host attaches to runs of this model
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// The wrapped client
    #[must_use]
    pub const fn client(&self) -> &Arc<C> {
        &self.client
    }
}

impl<C: LlmClient + ?Sized> Clone for LlmClientWrapper<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            llm_type: self.llm_type.clone(),
            tags: self.tags.clone(),
        }
    }
}

impl<C: LlmClient + ?Sized> std::fmt::Debug for LlmClientWrapper<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClientWrapper")
            .field("llm_type", &self.llm_type)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<C: LlmClient + ?Sized> Llm for LlmClientWrapper<C> {
    type Error = C::Error;

    fn llm_type(&self) -> &str {
        &self.llm_type
    }

    fn identifying_params(&self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert("llm_type".to_string(), Value::String(self.llm_type.clone()));
        params
    }

    fn tags(&self) -> Vec<String> {
        self.tags.clone()
    }

    fn call(
        &self,
        prompt: &str,
        stop: Option<&[String]>,
        _run_manager: Option<&CallbackManagerForLlmRun>,
        _extras: &CallExtras,
    ) -> Result<String, Self::Error> {
        self.client.generate(prompt, stop)
    }

    async fn acall(
        &self,
        prompt: &str,
        stop: Option<&[String]>,
        _run_manager: Option<&AsyncCallbackManagerForLlmRun>,
        _extras: &CallExtras,
    ) -> Result<String, Self::Error> {
        self.client.generate_async(prompt, stop).await
    }
}
