use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{debug, error, warn};

use super::error::{ClassifyError, CompletionError};
use super::rotation::{Provider, ProviderRotation};
use crate::TARGET_CLASSIFY;

/// A text-completion service. Implementations own the HTTP client and map
/// service failures onto [`CompletionError`].
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, provider: &Provider, prompt: &str) -> Result<String, CompletionError>;
}

/// How hard to try each provider before moving on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: usize,
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay: Duration::from_secs(2),
        }
    }
}

/// Complete `prompt` with the first provider in `rotation` that answers.
///
/// Rate limits and rejections give up on a provider immediately; transient
/// failures and empty answers are retried up to `policy.max_retries` times.
/// Providers given up on stay skipped for later calls with the same rotation.
pub async fn complete_with_fallback<B>(
    backend: &B,
    rotation: &mut ProviderRotation,
    prompt: &str,
    policy: &RetryPolicy,
) -> Result<String, ClassifyError>
where
    B: CompletionBackend + ?Sized,
{
    let max_retries = policy.max_retries.max(1);
    let mut attempts = 0;

    'providers: while let Some(provider) = rotation.current().cloned() {
        for retry_count in 0..max_retries {
            attempts += 1;
            match backend.complete(&provider, prompt).await {
                Ok(text) if !text.trim().is_empty() => {
                    debug!(target: TARGET_CLASSIFY, "{} answered after {} attempts", provider, attempts);
                    return Ok(text);
                }
                Ok(_) => {
                    warn!(target: TARGET_CLASSIFY, "{}: {}", provider, CompletionError::EmptyResponse);
                }
                Err(e) if e.skips_provider() => {
                    warn!(target: TARGET_CLASSIFY, "{}: {}, switching provider", provider, e);
                    rotation.advance();
                    continue 'providers;
                }
                Err(e) => {
                    warn!(
                        target: TARGET_CLASSIFY,
                        "{}: {} ({}/{})",
                        provider,
                        e,
                        retry_count + 1,
                        max_retries
                    );
                }
            }

            if retry_count < max_retries - 1 {
                sleep(policy.retry_delay).await;
            }
        }

        warn!(target: TARGET_CLASSIFY, "{}: giving up after {} retries", provider, max_retries);
        rotation.advance();
    }

    error!(target: TARGET_CLASSIFY, "All providers exhausted after {} attempts", attempts);
    Err(ClassifyError::AllProvidersExhausted { attempts })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    /// Answers from per-model scripts; an exhausted script falls back to
    /// `default`.
    pub(crate) struct ScriptedBackend {
        scripts: Mutex<HashMap<String, VecDeque<Result<String, CompletionError>>>>,
        default: Result<String, CompletionError>,
        pub(crate) calls: Mutex<Vec<String>>,
    }

    impl ScriptedBackend {
        pub(crate) fn new(default: Result<String, CompletionError>) -> Self {
            Self {
                scripts: Mutex::new(HashMap::new()),
                default,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn script(
            self,
            model: &str,
            responses: Vec<Result<String, CompletionError>>,
        ) -> Self {
            self.scripts
                .lock()
                .unwrap()
                .insert(model.to_string(), responses.into());
            self
        }

        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionBackend for ScriptedBackend {
        async fn complete(
            &self,
            provider: &Provider,
            _prompt: &str,
        ) -> Result<String, CompletionError> {
            self.calls.lock().unwrap().push(provider.model.clone());
            self.scripts
                .lock()
                .unwrap()
                .get_mut(&provider.model)
                .and_then(|script| script.pop_front())
                .unwrap_or_else(|| self.default.clone())
        }
    }

    pub(crate) fn rotation(models: &[&str]) -> ProviderRotation {
        ProviderRotation::new(models.iter().map(|m| Provider::new("test", *m)).collect())
    }

    pub(crate) fn no_delay() -> RetryPolicy {
        RetryPolicy {
            max_retries: 3,
            retry_delay: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn test_first_provider_answers() {
        let backend = ScriptedBackend::new(Ok("{\"s\": 7}".to_string()));
        let mut rotation = rotation(&["a", "b"]);
        let text = complete_with_fallback(&backend, &mut rotation, "p", &no_delay())
            .await
            .unwrap();
        assert_eq!(text, "{\"s\": 7}");
        assert_eq!(backend.calls(), vec!["a"]);
        assert_eq!(rotation.current().map(|p| p.model.as_str()), Some("a"));
    }

    #[tokio::test]
    async fn test_rate_limit_switches_immediately() {
        let backend = ScriptedBackend::new(Ok("ok".to_string()))
            .script("a", vec![Err(CompletionError::RateLimited)]);
        let mut rotation = rotation(&["a", "b"]);
        let text = complete_with_fallback(&backend, &mut rotation, "p", &no_delay())
            .await
            .unwrap();
        assert_eq!(text, "ok");
        assert_eq!(backend.calls(), vec!["a", "b"]);

        // The rate-limited provider stays skipped for the next call
        complete_with_fallback(&backend, &mut rotation, "p", &no_delay())
            .await
            .unwrap();
        assert_eq!(backend.calls(), vec!["a", "b", "b"]);
    }

    #[tokio::test]
    async fn test_transient_errors_are_retried() {
        let backend = ScriptedBackend::new(Ok("ok".to_string())).script(
            "a",
            vec![
                Err(CompletionError::Transient("timeout".to_string())),
                Ok("   ".to_string()),
            ],
        );
        let mut rotation = rotation(&["a", "b"]);
        let text = complete_with_fallback(&backend, &mut rotation, "p", &no_delay())
            .await
            .unwrap();
        assert_eq!(text, "ok");
        assert_eq!(backend.calls(), vec!["a", "a", "a"]);
    }

    #[tokio::test]
    async fn test_retries_exhausted_moves_on() {
        let backend = ScriptedBackend::new(Ok("ok".to_string())).script(
            "a",
            vec![Err(CompletionError::Transient("502".to_string())); 3],
        );
        let mut rotation = rotation(&["a", "b"]);
        complete_with_fallback(&backend, &mut rotation, "p", &no_delay())
            .await
            .unwrap();
        assert_eq!(backend.calls(), vec!["a", "a", "a", "b"]);
    }

    #[tokio::test]
    async fn test_all_providers_exhausted() {
        let backend = ScriptedBackend::new(Err(CompletionError::Rejected {
            status: 404,
            message: "model not found".to_string(),
        }));
        let mut rotation = rotation(&["a", "b"]);
        let err = complete_with_fallback(&backend, &mut rotation, "p", &no_delay())
            .await
            .unwrap_err();
        assert_eq!(err, ClassifyError::AllProvidersExhausted { attempts: 2 });
        assert!(rotation.is_exhausted());
    }
}
