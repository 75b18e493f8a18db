use std::env;

use anyhow::{Context, Result};

use crate::classify::{Provider, ProviderRotation};
use crate::dedup::{parse_ngram_range, parse_threshold, DedupConfig, NeighborSearch};

/// Retrieves an environment variable and splits it into a vector of strings based on a delimiter.
///
/// # Arguments
/// - `var`: The name of the environment variable.
/// - `delimiter`: The character to split the environment variable's value by.
///
/// # Returns
/// - `Vec<String>`, without empty entries
pub fn get_env_var_as_vec(var: &str, delimiter: char) -> Vec<String> {
    split_list(&env::var(var).unwrap_or_default(), delimiter)
}

fn split_list(value: &str, delimiter: char) -> Vec<String> {
    value
        .split(delimiter)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Clustering settings from `DEDUP_*` variables, on top of the defaults.
///
/// - `DEDUP_THRESHOLD`: `strict`, `normal`, `loose` or a number in [0, 1]
/// - `DEDUP_MAX_PER_CLUSTER`, `DEDUP_TOP_K`: positive integers
/// - `DEDUP_NGRAM_RANGE`: `MIN-MAX`, e.g. `3-5`
/// - `DEDUP_NEIGHBOR_SEARCH`: `exhaustive` or `indexed`
pub fn dedup_config_from_env() -> Result<DedupConfig> {
    dedup_config_from_lookup(|name| env::var(name).ok())
}

fn dedup_config_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<DedupConfig> {
    let mut config = DedupConfig::default();

    if let Some(value) = lookup("DEDUP_THRESHOLD") {
        config.threshold = parse_threshold(&value).context("DEDUP_THRESHOLD")?;
    }
    if let Some(value) = lookup("DEDUP_MAX_PER_CLUSTER") {
        config.max_per_cluster = value
            .trim()
            .parse()
            .with_context(|| format!("DEDUP_MAX_PER_CLUSTER={:?}", value))?;
    }
    if let Some(value) = lookup("DEDUP_TOP_K") {
        config.top_k = value
            .trim()
            .parse()
            .with_context(|| format!("DEDUP_TOP_K={:?}", value))?;
    }
    if let Some(value) = lookup("DEDUP_NGRAM_RANGE") {
        let (min, max) = parse_ngram_range(&value).context("DEDUP_NGRAM_RANGE")?;
        config.ngram_min = min;
        config.ngram_max = max;
    }
    if let Some(value) = lookup("DEDUP_NEIGHBOR_SEARCH") {
        config.neighbor_search = value
            .parse::<NeighborSearch>()
            .context("DEDUP_NEIGHBOR_SEARCH")?;
    }

    config.validate()?;
    Ok(config)
}

/// Provider fallback order from `CLASSIFY_PROVIDERS`, a comma-separated list
/// of `service:model`. Unset or empty means the built-in order.
pub fn provider_rotation_from_env() -> Result<ProviderRotation> {
    let entries = get_env_var_as_vec("CLASSIFY_PROVIDERS", ',');
    rotation_from_entries(&entries)
}

fn rotation_from_entries(entries: &[String]) -> Result<ProviderRotation> {
    if entries.is_empty() {
        return Ok(ProviderRotation::default());
    }
    let providers = entries
        .iter()
        .map(|entry| entry.parse::<Provider>())
        .collect::<Result<Vec<_>>>()
        .context("CLASSIFY_PROVIDERS")?;
    Ok(ProviderRotation::new(providers))
}
