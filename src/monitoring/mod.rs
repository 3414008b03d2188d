pub mod events;
pub mod latency;
pub mod metrics;
pub mod types;

pub use latency::*;
pub use metrics::init_prometheus;
pub use types::*;
