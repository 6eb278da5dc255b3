pub mod aggregator;
pub mod data_fetcher;
pub mod filter;
pub mod match_cache;
pub mod normalizer;
pub mod perspective;
pub mod stats_engine;

#[cfg(test)]
pub(crate) mod test_support;

pub use aggregator::*;
pub use data_fetcher::*;
pub use filter::*;
pub use match_cache::*;
pub use normalizer::*;
pub use perspective::*;
pub use stats_engine::*;
