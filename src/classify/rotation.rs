use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};

/// Default fallback order, best model first.
pub const DEFAULT_PROVIDERS: &[(&str, &str)] = &[
    ("groq", "openai/gpt-oss-120b"),
    ("groq", "openai/gpt-oss-20b"),
    ("groq", "openai/gpt-oss-safeguard-20b"),
    ("groq", "moonshotai/kimi-k2-instruct"),
    ("groq", "moonshotai/kimi-k2-instruct-0905"),
    ("groq", "llama-3.3-70b-versatile"),
    ("groq", "qwen/qwen3-32b"),
    ("gemini", "gemma-3-27b-it"),
    ("groq", "meta-llama/llama-4-maverick-17b-128e-instruct"),
    ("groq", "meta-llama/llama-4-scout-17b-16e-instruct"),
];

/// One model at one completion service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Provider {
    pub service: String,
    pub model: String,
}

impl Provider {
    pub fn new(service: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            model: model.into(),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.service, self.model)
    }
}

/// Parses `service:model`; the model may itself contain colons or slashes.
impl FromStr for Provider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (service, model) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| anyhow!("Invalid provider {:?}, expected SERVICE:MODEL", s))?;
        if service.is_empty() || model.is_empty() {
            return Err(anyhow!("Invalid provider {:?}, expected SERVICE:MODEL", s));
        }
        Ok(Provider::new(service, model))
    }
}

/// Ordered providers plus the position of the first one not yet given up on.
///
/// Passed by `&mut` through every completion call, so providers that failed
/// for one article are skipped for the rest of the batch. Each batch owns its
/// own rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRotation {
    providers: Vec<Provider>,
    offset: usize,
}

impl Default for ProviderRotation {
    fn default() -> Self {
        Self::new(
            DEFAULT_PROVIDERS
                .iter()
                .map(|(service, model)| Provider::new(*service, *model))
                .collect(),
        )
    }
}

impl ProviderRotation {
    pub fn new(providers: Vec<Provider>) -> Self {
        Self {
            providers,
            offset: 0,
        }
    }

    /// The provider to try next, or `None` once every provider has failed.
    pub fn current(&self) -> Option<&Provider> {
        self.providers.get(self.offset)
    }

    /// Give up on the current provider.
    pub fn advance(&mut self) {
        if self.offset < self.providers.len() {
            self.offset += 1;
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.offset >= self.providers.len()
    }

    /// Start over from the first provider, e.g. for a new batch.
    pub fn reset(&mut self) {
        self.offset = 0;
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn remaining(&self) -> usize {
        self.providers.len() - self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_advances_and_resets() {
        let mut rotation = ProviderRotation::new(vec![
            Provider::new("groq", "a"),
            Provider::new("groq", "b"),
        ]);
        assert_eq!(rotation.current().map(|p| p.model.as_str()), Some("a"));
        rotation.advance();
        assert_eq!(rotation.current().map(|p| p.model.as_str()), Some("b"));
        assert_eq!(rotation.remaining(), 1);
        rotation.advance();
        assert!(rotation.is_exhausted());
        assert!(rotation.current().is_none());
        rotation.advance();
        assert_eq!(rotation.remaining(), 0);

        rotation.reset();
        assert!(!rotation.is_exhausted());
        assert_eq!(rotation.current().map(|p| p.model.as_str()), Some("a"));
    }

    #[test]
    fn test_default_order() {
        let rotation = ProviderRotation::default();
        assert_eq!(rotation.providers().len(), DEFAULT_PROVIDERS.len());
        assert_eq!(
            rotation.current().map(|p| p.to_string()).as_deref(),
            Some("groq:openai/gpt-oss-120b")
        );
    }

    #[test]
    fn test_provider_parsing() {
        let provider: Provider = "groq:qwen/qwen3-32b".parse().unwrap();
        assert_eq!(provider, Provider::new("groq", "qwen/qwen3-32b"));
        let tagged: Provider = "ollama:llama3:8b".parse().unwrap();
        assert_eq!(tagged.model, "llama3:8b");
        assert!("no-separator".parse::<Provider>().is_err());
        assert!(":model".parse::<Provider>().is_err());
    }

    #[test]
    fn test_empty_rotation_is_exhausted() {
        assert!(ProviderRotation::new(Vec::new()).is_exhausted());
    }
}
