pub mod generator;
pub mod latency;
pub mod seed;
pub mod statistics;

pub use generator::*;
pub use seed::*;
pub use statistics::*;
