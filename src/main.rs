use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use newsdigest::dedup::{
    cluster_dedup, deduplicate_news, parse_ngram_range, parse_threshold, NeighborSearch,
};
use newsdigest::environment::dedup_config_from_env;
use newsdigest::filter::{FilterConfig, RelevancePipeline};
use newsdigest::logging::configure_logging;
use newsdigest::news::NewsItem;
use newsdigest::TARGET_DEDUP;

#[derive(Parser)]
#[command(author, version, about = "Filter and deduplicate a batch of news articles", long_about = None)]
struct Cli {
    /// JSON array of news items
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the surviving items (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Similarity threshold: strict, normal, loose or a number in [0, 1]
    #[arg(short, long)]
    threshold: Option<String>,

    /// Representatives kept per cluster
    #[arg(short, long)]
    max_per_cluster: Option<usize>,

    /// Nearest neighbors considered per article
    #[arg(long)]
    top_k: Option<usize>,

    /// Character n-gram range, e.g. 3-5
    #[arg(long)]
    ngram_range: Option<String>,

    /// Neighbor search strategy (exhaustive, indexed)
    #[arg(long)]
    neighbor_search: Option<NeighborSearch>,

    /// JSON file replacing the built-in relevance tables
    #[arg(short, long)]
    filters: Option<PathBuf>,

    /// Skip the keyword, company and noise filters
    #[arg(long, default_value_t = false)]
    skip_filters: bool,

    /// Skip the exact title-containment pass
    #[arg(long, default_value_t = false)]
    skip_exact: bool,
}

fn main() -> Result<()> {
    configure_logging();
    let cli = Cli::parse();

    let mut config = dedup_config_from_env()?;
    if let Some(threshold) = &cli.threshold {
        config = config.with_threshold(parse_threshold(threshold)?);
    }
    if let Some(max_per_cluster) = cli.max_per_cluster {
        config = config.with_max_per_cluster(max_per_cluster);
    }
    if let Some(top_k) = cli.top_k {
        config = config.with_top_k(top_k);
    }
    if let Some(range) = &cli.ngram_range {
        let (min, max) = parse_ngram_range(range)?;
        config = config.with_ngram_range(min, max);
    }
    if let Some(neighbor_search) = cli.neighbor_search {
        config = config.with_neighbor_search(neighbor_search);
    }
    config.validate()?;

    let raw = fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    let mut items: Vec<NewsItem> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse news items from {}", cli.input.display()))?;
    info!(target: TARGET_DEDUP, "Loaded {} items from {}", items.len(), cli.input.display());

    if !cli.skip_exact {
        items = deduplicate_news(items);
    }

    if !cli.skip_filters {
        let filter_config = match &cli.filters {
            Some(path) => FilterConfig::from_file(path)?,
            None => FilterConfig::default(),
        };
        items = RelevancePipeline::from_config(&filter_config)?.apply(items);
    }

    let outcome = cluster_dedup(items, &config);
    let json = serde_json::to_string_pretty(&outcome.representatives)
        .context("Failed to serialize news items")?;

    match &cli.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            info!(
                target: TARGET_DEDUP,
                "Wrote {} items to {}",
                outcome.representatives.len(),
                path.display()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}
