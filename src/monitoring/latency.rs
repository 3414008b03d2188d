use std::borrow::Cow;

use tracing::Level;

use crate::config::LoggingProfile;

use super::types::{LatencyGuard, LatencyMetadata};

pub fn guard_with_level(
    operation: impl Into<Cow<'static, str>>,
    level: Level,
    metadata: LatencyMetadata,
) -> LatencyGuard {
    LatencyGuard::new(operation, level, metadata)
}

/// verbose 档位下耗时走 INFO，否则降到 DEBUG。
pub fn profile_level(profile: LoggingProfile) -> Level {
    if profile.is_verbose() {
        Level::INFO
    } else {
        Level::DEBUG
    }
}
