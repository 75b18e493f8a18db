//! News record types shared by every pipeline stage.

mod date;
mod publisher;
mod types;

pub use self::date::parse_date;
pub use self::publisher::{publisher_from_url, DOMAIN_PUBLISHERS};
pub use self::types::*;
