pub mod classify;
pub mod dedup;
pub mod environment;
pub mod filter;
pub mod logging;
pub mod news;
pub mod prompts;

pub const TARGET_DEDUP: &str = "dedup";
pub const TARGET_FILTER: &str = "filter";
pub const TARGET_CLASSIFY: &str = "classify";
