pub mod engine;
pub mod enrichment;

pub use engine::{dedupe, keywords, Recommender, Stage, StageOutcome, MAX_RECOMMENDATIONS};
pub use enrichment::enrich;
