use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tracing::Level;

#[derive(Debug, Clone, Default)]
pub struct LatencyMetadata {
    fields: Arc<BTreeMap<String, String>>,
}

impl LatencyMetadata {
    pub fn new(fields: BTreeMap<String, String>) -> Self {
        Self {
            fields: Arc::new(fields),
        }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    fn summary(&self) -> Option<String> {
        if self.fields.is_empty() {
            return None;
        }
        Some(
            self.fields
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join(" "),
        )
    }
}

/// 记录一次报价往返耗时；`finish` 或 drop 时只输出一次，超过慢阈值时升级为 WARN。
#[derive(Debug)]
pub struct LatencyGuard {
    operation: Cow<'static, str>,
    start: Instant,
    level: Level,
    slow_after: Option<Duration>,
    metadata: LatencyMetadata,
    ended: AtomicBool,
}

impl LatencyGuard {
    pub fn new(
        operation: impl Into<Cow<'static, str>>,
        level: Level,
        metadata: LatencyMetadata,
    ) -> Self {
        Self {
            operation: operation.into(),
            start: Instant::now(),
            level,
            slow_after: None,
            metadata,
            ended: AtomicBool::new(false),
        }
    }

    pub fn with_slow_threshold(mut self, threshold: Duration) -> Self {
        self.slow_after = Some(threshold);
        self
    }

    fn is_slow(&self, elapsed: Duration) -> bool {
        self.slow_after.is_some_and(|threshold| elapsed > threshold)
    }

    pub fn finish(&self) -> Duration {
        let elapsed = self.start.elapsed();
        if !self.ended.swap(true, Ordering::SeqCst) {
            let slow = self.is_slow(elapsed);
            let level = if slow { Level::WARN } else { self.level };
            log_latency(level, &self.operation, elapsed, slow, &self.metadata);
        }
        elapsed
    }
}

impl Drop for LatencyGuard {
    fn drop(&mut self) {
        self.finish();
    }
}

fn log_latency(
    level: Level,
    operation: &str,
    elapsed: Duration,
    slow: bool,
    metadata: &LatencyMetadata,
) {
    let elapsed_us = elapsed.as_micros();
    let elapsed_ms = format!("{:.3}", elapsed.as_secs_f64() * 1_000.0);
    let metadata = metadata.summary().unwrap_or_default();

    macro_rules! log_event {
        ($macro:ident) => {
            tracing::$macro!(
                target: "latency",
                %operation,
                elapsed_us,
                elapsed_ms = %elapsed_ms,
                slow,
                metadata = %metadata,
                "耗时统计"
            )
        };
    }

    match level {
        Level::ERROR => log_event!(error),
        Level::WARN => log_event!(warn),
        Level::INFO => log_event!(info),
        Level::DEBUG => log_event!(debug),
        Level::TRACE => log_event!(trace),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_reports_elapsed_once() {
        let guard = LatencyGuard::new("test.op", Level::DEBUG, LatencyMetadata::default());
        let first = guard.finish();
        let second = guard.finish();
        assert!(second >= first);
        assert!(guard.ended.load(Ordering::SeqCst));
    }

    #[test]
    fn slow_threshold_flags_long_calls() {
        let guard = LatencyGuard::new("test.op", Level::DEBUG, LatencyMetadata::default())
            .with_slow_threshold(Duration::ZERO);
        std::thread::sleep(Duration::from_millis(2));
        assert!(guard.is_slow(guard.finish()));

        let unbounded = LatencyGuard::new("test.op", Level::DEBUG, LatencyMetadata::default());
        assert!(!unbounded.is_slow(Duration::from_secs(3600)));
    }

    #[test]
    fn metadata_summary_is_sorted() {
        let metadata = LatencyMetadata::from_pairs([("url", "https://a"), ("stage", "quote")]);
        assert_eq!(
            metadata.summary().as_deref(),
            Some("stage=quote url=https://a")
        );
        assert_eq!(LatencyMetadata::default().summary(), None);
    }
}
