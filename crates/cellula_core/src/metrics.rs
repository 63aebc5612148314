//! Generation metrics for the engine.
//!
//! Provides structured logging and counters for monitoring a run.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Metrics collector shared by a grid and its ruleset.
pub struct Metrics {
    generation_count: AtomicU64,
    cell_count: AtomicU64,
    changed_count: AtomicU64,
    log_interval: AtomicU64,
    pub counters: Mutex<HashMap<String, AtomicU64>>,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics")
            .field("generation_count", &self.generation_count())
            .field("cell_count", &self.cell_count())
            .field("changed_count", &self.changed_count())
            .finish()
    }
}

impl Metrics {
    /// Creates a new metrics collector.
    #[must_use]
    pub fn new() -> Self {
        Self {
            generation_count: AtomicU64::new(0),
            cell_count: AtomicU64::new(0),
            changed_count: AtomicU64::new(0),
            log_interval: AtomicU64::new(100),
            counters: Mutex::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    pub fn set_log_interval(&self, interval: u64) {
        self.log_interval.store(interval.max(1), Ordering::Relaxed);
    }

    /// Records a committed generation.
    pub fn record_generation(&self, duration: Duration, cells: usize, changed: usize) {
        self.generation_count.fetch_add(1, Ordering::Relaxed);
        self.cell_count.store(cells as u64, Ordering::Relaxed);
        self.changed_count.store(changed as u64, Ordering::Relaxed);

        let generation = self.generation_count.load(Ordering::Relaxed);
        if generation % self.log_interval.load(Ordering::Relaxed) == 0 {
            tracing::info!(
                generation = generation,
                cells = cells,
                changed = changed,
                duration_us = duration.as_micros() as u64,
                "Generation committed"
            );
        }
    }

    /// Increments a named counter.
    pub fn increment_counter(&self, name: &str) {
        self.add_to_counter(name, 1);
    }

    pub fn add_to_counter(&self, name: &str, amount: u64) {
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters
            .entry(name.to_string())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(amount, Ordering::Relaxed);
    }

    /// Current value of a named counter, zero if it was never touched.
    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        let counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters
            .get(name)
            .map_or(0, |c| c.load(Ordering::Relaxed))
    }

    #[must_use]
    pub fn generation_count(&self) -> u64 {
        self.generation_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn cell_count(&self) -> u64 {
        self.cell_count.load(Ordering::Relaxed)
    }

    /// Cells whose state changed in the last committed generation.
    #[must_use]
    pub fn changed_count(&self) -> u64 {
        self.changed_count.load(Ordering::Relaxed)
    }

    /// Gets elapsed time since metrics creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Logs a simulation event.
    pub fn log_event(&self, event_type: &str, details: &str) {
        tracing::info!(
            event_type = event_type,
            details = details,
            "Simulation event"
        );
    }
}

/// Initialize tracing subscriber for logging. Honours `RUST_LOG`.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish(),
    )
    .ok();
}
