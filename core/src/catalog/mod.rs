pub mod aggregator;
pub mod baseline;
pub mod normalize;
pub mod types;

pub use aggregator::{cap, combine, dedup, filter, load_remote, Catalog, DedupPolicy};
pub use baseline::{StaticBaseline, StaticProject};
pub use types::{ProjectStatus, ProjectSummary, Source};
