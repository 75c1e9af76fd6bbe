//! Host framework plugin interface
//!
//! An orchestration host drives language models through [`Llm`]: two
//! required call shapes (blocking and async) plus batch helpers built on
//! top of them. Anything implementing the trait can be registered with the
//! host polymorphically.

pub mod callbacks;

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use self::callbacks::OpenRun;
pub use self::callbacks::{AsyncCallbackManagerForLlmRun, CallbackManagerForLlmRun};

/// Free-form keyword data the host attaches to a call
pub type CallExtras = Map<String, Value>;

/// One completion produced for one prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generation {
    pub text: String,
}

/// Output of a batch run, in prompt order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmResult {
    pub generations: Vec<Generation>,
    pub run_ids: Vec<Uuid>,
}

impl LlmResult {
    fn push(&mut self, run_id: Uuid, text: String) {
        self.run_ids.push(run_id);
        self.generations.push(Generation { text });
    }

    /// Generated texts in prompt order
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.generations.iter().map(|g| g.text.as_str()).collect()
    }
}

/// Plugin contract for text-completion models
#[async_trait]
pub trait Llm: Send + Sync {
    /// Failure type surfaced to the host
    type Error: std::error::Error + Send + Sync + 'static;

    /// Identifier the host uses to recognise this kind of model
    fn llm_type(&self) -> &str;

    /// Parameters that distinguish this instance in host logs and caches
    fn identifying_params(&self) -> Map<String, Value> {
        Map::new()
    }

    /// Tags attached to every run the host starts for this model
    fn tags(&self) -> Vec<String> {
        Vec::new()
    }

    /// Run the model on `prompt`, blocking until it answers
    fn call(
        &self,
        prompt: &str,
        stop: Option<&[String]>,
        run_manager: Option<&CallbackManagerForLlmRun>,
        extras: &CallExtras,
    ) -> Result<String, Self::Error>;

    /// Run the model on `prompt` asynchronously
    async fn acall(
        &self,
        prompt: &str,
        stop: Option<&[String]>,
        run_manager: Option<&AsyncCallbackManagerForLlmRun>,
        extras: &CallExtras,
    ) -> Result<String, Self::Error>;

    /// Run every prompt in order, stopping at the first failure
    fn generate(
        &self,
        prompts: &[String],
        stop: Option<&[String]>,
        extras: &CallExtras,
    ) -> Result<LlmResult, Self::Error> {
        let mut result = LlmResult::default();

        for prompt in prompts {
            let run = CallbackManagerForLlmRun::new(self.tags());
            run.on_llm_start(self.llm_type(), prompt);

            match self.call(prompt, stop, Some(&run), extras) {
                Ok(text) => {
                    run.on_llm_end(&text);
                    result.push(run.run_id(), text);
                }
                Err(err) => {
                    run.on_llm_error(&err);
                    return Err(err);
                }
            }
        }

        Ok(result)
    }

    /// Run every prompt concurrently; output keeps prompt order
    ///
    /// The first failure wins. Runs still in flight at that point are
    /// dropped and logged as cancelled.
    async fn agenerate(
        &self,
        prompts: &[String],
        stop: Option<&[String]>,
        extras: &CallExtras,
    ) -> Result<LlmResult, Self::Error> {
        let tags = self.tags();

        let runs = prompts.iter().map(|prompt| {
            let run = AsyncCallbackManagerForLlmRun::new(tags.clone());
            async move {
                run.on_llm_start(self.llm_type(), prompt).await;
                let mut open = OpenRun::new(run.run_id());
                let outcome = self.acall(prompt, stop, Some(&run), extras).await;
                open.close();
                match outcome {
                    Ok(text) => {
                        run.on_llm_end(&text).await;
                        Ok((run.run_id(), text))
                    }
                    Err(err) => {
                        run.on_llm_error(&err).await;
                        Err(err)
                    }
                }
            }
        });

        let mut result = LlmResult::default();
        for (run_id, text) in try_join_all(runs).await? {
            result.push(run_id, text);
        }
        Ok(result)
    }
}

/// Trait object type for dynamic dispatch
pub type DynLlm<E> = Arc<dyn Llm<Error = E>>;

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    #[derive(Debug, PartialEq, Eq, thiserror::Error)]
    #[error("rejected prompt: {0}")]
    struct Rejected(String);

    /// Echoes prompts back and fails on the prompt "bad"
    #[derive(Default)]
    struct Echo {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Llm for Echo {
        type Error = Rejected;

        fn llm_type(&self) -> &str {
            "echo"
        }

        fn tags(&self) -> Vec<String> {
            vec!["test".to_string()]
        }

        fn call(
            &self,
            prompt: &str,
            _stop: Option<&[String]>,
            run_manager: Option<&CallbackManagerForLlmRun>,
            _extras: &CallExtras,
        ) -> Result<String, Rejected> {
            let tags = run_manager.map(CallbackManagerForLlmRun::tags);
            assert_eq!(tags, Some(&["test".to_string()][..]));
            self.seen.lock().push(prompt.to_string());
            if prompt == "bad" {
                return Err(Rejected(prompt.to_string()));
            }
            Ok(format!("echo: {prompt}"))
        }

        async fn acall(
            &self,
            prompt: &str,
            _stop: Option<&[String]>,
            _run_manager: Option<&AsyncCallbackManagerForLlmRun>,
            _extras: &CallExtras,
        ) -> Result<String, Rejected> {
            // Shorter prompts take longer so completion order differs from input order
            for _ in prompt.len()..8 {
                tokio::task::yield_now().await;
            }
            self.seen.lock().push(prompt.to_string());
            if prompt == "bad" {
                return Err(Rejected(prompt.to_string()));
            }
            Ok(format!("echo: {prompt}"))
        }
    }

    fn prompts(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_generate_preserves_order() {
        let llm = Echo::default();
        let result = llm
            .generate(&prompts(&["one", "two", "three"]), None, &CallExtras::new())
            .unwrap();

        assert_eq!(result.texts(), vec!["echo: one", "echo: two", "echo: three"]);
        assert_eq!(result.run_ids.len(), 3);
        assert_ne!(result.run_ids[0], result.run_ids[1]);
    }

    #[test]
    fn test_generate_stops_at_first_error() {
        let llm = Echo::default();
        let err = llm
            .generate(&prompts(&["one", "bad", "three"]), None, &CallExtras::new())
            .unwrap_err();

        assert_eq!(err, Rejected("bad".to_string()));
        assert_eq!(*llm.seen.lock(), prompts(&["one", "bad"]));
    }

    #[tokio::test]
    async fn test_agenerate_preserves_order() {
        let llm = Echo::default();
        let result = llm
            .agenerate(&prompts(&["a", "longer", "mid"]), None, &CallExtras::new())
            .await
            .unwrap();

        assert_eq!(result.texts(), vec!["echo: a", "echo: longer", "echo: mid"]);
        // Completion order followed prompt length, not input order
        assert_eq!(*llm.seen.lock(), prompts(&["longer", "mid", "a"]));
    }

    #[tokio::test]
    async fn test_agenerate_reports_error() {
        let llm = Echo::default();
        let err = llm
            .agenerate(&prompts(&["fine", "bad"]), None, &CallExtras::new())
            .await
            .unwrap_err();

        assert_eq!(err, Rejected("bad".to_string()));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_agenerate_logs_dropped_siblings() {
        let llm = Echo::default();
        // "x" needs more yields than "bad", so it is still pending when "bad" fails
        let err = llm
            .agenerate(&prompts(&["bad", "x"]), None, &CallExtras::new())
            .await
            .unwrap_err();

        assert_eq!(err, Rejected("bad".to_string()));
        assert_eq!(*llm.seen.lock(), prompts(&["bad"]));
        assert!(logs_contain("LLM run failed"));
        assert!(logs_contain("cancelled before completion"));
    }

    #[test]
    fn test_default_identifying_params_empty() {
        assert!(Echo::default().identifying_params().is_empty());
    }
}
