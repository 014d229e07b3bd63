mod classify;
mod collector;
mod dataset;
mod resolve;

pub use collector::{collect, CollectStats};
pub use dataset::Dataset;
