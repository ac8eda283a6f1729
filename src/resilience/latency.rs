//! Probabilistic latency injection per route class.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{LatencyConfig, LatencyRule};
use crate::observability::metrics;

/// Group of routes sharing one latency rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteClass {
    Post,
    Get,
}

impl RouteClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteClass::Post => "post",
            RouteClass::Get => "get",
        }
    }
}

/// Source of uniform draws in `[0, 100)`.
pub trait PercentSource: Send + Sync {
    fn draw(&self) -> f64;
}

/// Thread-local RNG; nothing is shared between draws.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngSource;

impl PercentSource for ThreadRngSource {
    fn draw(&self) -> f64 {
        rand::thread_rng().gen_range(0.0..100.0)
    }
}

/// Reproducible sequence of draws from a fixed seed.
#[derive(Debug)]
pub struct SeededSource {
    rng: Mutex<StdRng>,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl PercentSource for SeededSource {
    fn draw(&self) -> f64 {
        self.rng
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .gen_range(0.0..100.0)
    }
}

/// Always returns the same draw.
#[derive(Debug, Clone, Copy)]
pub struct FixedSource(pub f64);

impl PercentSource for FixedSource {
    fn draw(&self) -> f64 {
        self.0
    }
}

pub struct LatencyInjector {
    config: LatencyConfig,
    source: Arc<dyn PercentSource>,
}

impl LatencyInjector {
    pub fn new(config: LatencyConfig) -> Self {
        Self::with_source(config, Arc::new(ThreadRngSource))
    }

    pub fn with_source(config: LatencyConfig, source: Arc<dyn PercentSource>) -> Self {
        Self { config, source }
    }

    /// Injector that never delays.
    pub fn disabled() -> Self {
        Self::new(LatencyConfig::default())
    }

    pub fn rule(&self, class: RouteClass) -> LatencyRule {
        match class {
            RouteClass::Post => self.config.post,
            RouteClass::Get => self.config.get,
        }
    }

    /// Decide whether this call is delayed, without sleeping.
    ///
    /// Inactive rules never consume a draw.
    pub fn decide(&self, class: RouteClass) -> Option<Duration> {
        let rule = self.rule(class);
        if !rule.is_active() {
            return None;
        }

        let r = self.source.draw();
        if r < f64::from(rule.pct) {
            Some(Duration::from_millis(rule.ms))
        } else {
            None
        }
    }

    /// Apply the rule for `class`, returning the delay that was slept.
    pub async fn inject(&self, class: RouteClass) -> Option<Duration> {
        let delay = self.decide(class)?;
        tracing::debug!(class = class.as_str(), delay_ms = delay.as_millis() as u64, "Injecting latency");
        tokio::time::sleep(delay).await;
        metrics::record_injected_delay(class.as_str(), delay);
        Some(delay)
    }
}
