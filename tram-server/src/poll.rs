//! Concurrent, cached polling of countdowns for a run of stops.
//!
//! One planning pass asks for the countdown at every stop between the
//! rider's stop and the line origin. Those requests are independent, so they
//! run concurrently with a bounded width; results come back in the order the
//! stops were given regardless of which request finished first.
//!
//! Lines are planned concurrently, so a second bound (`max_in_flight`) caps
//! requests across every batch sharing the poller. A fetch's timeout starts
//! only once it holds one of those permits.

use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use tokio::sync::Semaphore;
use tracing::{debug, trace, warn};

use crate::cache::{CacheConfig, TtlCache};
use crate::catalog::{LineCode, Stop, StopCode};
use crate::signal::{Countdown, SignalSource};

/// Cache key: the same stop reports different countdowns for different lines.
type ReadingKey = (StopCode, LineCode);

/// Configuration for the poller.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Maximum in-flight fetches within one batch.
    pub workers: usize,

    /// Maximum in-flight fetches across all batches on this poller.
    pub max_in_flight: usize,

    /// Upper bound on a single fetch; expiry counts as unavailable.
    pub fetch_timeout: Duration,

    /// Reading cache settings.
    pub cache: CacheConfig,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            workers: 10,
            max_in_flight: 10,
            fetch_timeout: Duration::from_secs(8),
            cache: CacheConfig::default(),
        }
    }
}

impl PollConfig {
    /// Set the batch width.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the process-wide in-flight limit.
    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight;
        self
    }

    /// Set the per-fetch timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Set the cache configuration.
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }
}

/// Signal source wrapped with a reading cache and batch fetching.
///
/// Failures never escape: a stop that errors or times out reads as
/// [`Countdown::Unavailable`] and is not cached, so the next pass retries it.
pub struct Poller<S> {
    source: S,
    cache: TtlCache<ReadingKey, Countdown>,
    permits: Semaphore,
    workers: usize,
    fetch_timeout: Duration,
}

impl<S: SignalSource> Poller<S> {
    /// Create a poller around a signal source.
    pub fn new(source: S, config: &PollConfig) -> Self {
        Self {
            source,
            cache: TtlCache::new(&config.cache),
            permits: Semaphore::new(config.max_in_flight.max(1)),
            workers: config.workers.max(1),
            fetch_timeout: config.fetch_timeout,
        }
    }

    /// Fetch countdowns for `stops` on `line`.
    ///
    /// The result has the same length and order as `stops`. At most
    /// `workers` fetches are in flight; all of them are awaited before
    /// returning.
    pub async fn fetch_batch(&self, stops: &[&Stop], line: &LineCode) -> Vec<Countdown> {
        let started = Instant::now();

        let fetches: Vec<_> = stops.iter().map(|stop| self.fetch_one(stop, line)).collect();
        let readings: Vec<Countdown> = stream::iter(fetches)
            .buffered(self.workers)
            .collect()
            .await;

        debug!(
            line = %line,
            stops = stops.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            ?readings,
            "fetched batch"
        );

        readings
    }

    /// Fetch one countdown, consulting the cache first.
    ///
    /// Waiting for an in-flight permit does not count towards
    /// `fetch_timeout`.
    pub async fn fetch_one(&self, stop: &Stop, line: &LineCode) -> Countdown {
        let key = (stop.code.clone(), line.clone());

        if let Some(hit) = self.cache.get(&key).await {
            trace!(stop = %stop.code, line = %line, "reading cache hit");
            return hit;
        }

        // The semaphore is never closed
        let Ok(_permit) = self.permits.acquire().await else {
            return Countdown::Unavailable;
        };

        match tokio::time::timeout(self.fetch_timeout, self.source.fetch(&stop.code, line)).await {
            Ok(Ok(countdown)) => {
                self.cache.insert(key, countdown).await;
                countdown
            }
            Ok(Err(e)) => {
                warn!(
                    stop = %stop.code,
                    stop_name = %stop.name,
                    line = %line,
                    error = %e,
                    "signal fetch failed, treating as unavailable"
                );
                Countdown::Unavailable
            }
            Err(_) => {
                warn!(
                    stop = %stop.code,
                    stop_name = %stop.name,
                    line = %line,
                    timeout_ms = self.fetch_timeout.as_millis() as u64,
                    "signal fetch timed out, treating as unavailable"
                );
                Countdown::Unavailable
            }
        }
    }

    /// Access the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Drop all cached readings.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::signal::SignalError;
    use proptest::prelude::*;

    /// Source whose outcome is encoded in the stop code: "ok-N-i", "err-N-i", "slow-N-i".
    struct EncodedSource;

    impl SignalSource for EncodedSource {
        async fn fetch(&self, stop: &StopCode, _line: &LineCode) -> Result<Countdown, SignalError> {
            let mut parts = stop.as_str().split('-');
            let kind = parts.next().unwrap_or("ok");
            let n: u32 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
            match kind {
                "err" => Err(SignalError::NotConfigured("injected".into())),
                "slow" => {
                    tokio::time::sleep(Duration::from_millis(u64::from(n % 5))).await;
                    Ok(Countdown::Minutes(n))
                }
                _ => Ok(Countdown::Minutes(n)),
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Output length and order always match the input
        #[test]
        fn batch_matches_input(spec in prop::collection::vec((0u8..3, 0u32..30), 0..20)) {
            let stops: Vec<Stop> = spec
                .iter()
                .enumerate()
                .map(|(i, (kind, n))| {
                    let kind = ["ok", "err", "slow"][*kind as usize];
                    Stop {
                        name: String::new(),
                        code: StopCode::parse(&format!("{kind}-{n}-{i}")).unwrap(),
                        index: i,
                    }
                })
                .collect();

            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .unwrap();

            let readings = rt.block_on(async {
                let poller = Poller::new(EncodedSource, &PollConfig::default().with_workers(4));
                let refs: Vec<&Stop> = stops.iter().collect();
                poller.fetch_batch(&refs, &LineCode::parse("15").unwrap()).await
            });

            prop_assert_eq!(readings.len(), spec.len());
            for ((kind, n), reading) in spec.iter().zip(&readings) {
                let expected = if *kind == 1 { Countdown::Unavailable } else { Countdown::Minutes(*n) };
                prop_assert_eq!(*reading, expected);
            }
        }
    }
}
