// src/pacing.rs

//! Delay scheduling between rounds, adapters and campaigns.
//!
//! All waiting goes through the [`Pacer`] trait so tests can run the full
//! orchestration with a zero-delay implementation and assert ordering
//! without wall-clock waits.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use crate::models::PacingConfig;

/// Scheduler for the three pauses the polling loop makes.
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Pause before each polling round.
    async fn round_delay(&self);

    /// Small randomized pause before an individual adapter's fetch, so the
    /// backends are never hit in one synchronized burst.
    async fn adapter_jitter(&self);

    /// Long cooldown between two campaigns in a batch.
    async fn campaign_cooldown(&self);
}

/// Wall-clock pacing driven by configuration.
pub struct WallClockPacer {
    round_delay: Duration,
    jitter_max_ms: u64,
    cooldown: Duration,
}

impl WallClockPacer {
    pub fn from_config(config: &PacingConfig) -> Self {
        Self {
            round_delay: Duration::from_millis(config.round_delay_ms),
            jitter_max_ms: config.adapter_jitter_max_ms,
            cooldown: Duration::from_secs(config.campaign_cooldown_secs),
        }
    }
}

#[async_trait]
impl Pacer for WallClockPacer {
    async fn round_delay(&self) {
        if !self.round_delay.is_zero() {
            tokio::time::sleep(self.round_delay).await;
        }
    }

    async fn adapter_jitter(&self) {
        if self.jitter_max_ms == 0 {
            return;
        }
        // The rng handle must not live across the await.
        let ms = rand::thread_rng().gen_range(0..=self.jitter_max_ms);
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }

    async fn campaign_cooldown(&self) {
        if !self.cooldown.is_zero() {
            log::info!(
                "Cooling down {}s before the next campaign...",
                self.cooldown.as_secs()
            );
            tokio::time::sleep(self.cooldown).await;
        }
    }
}

/// Zero-delay pacing for tests and dry runs.
pub struct NoDelayPacer;

#[async_trait]
impl Pacer for NoDelayPacer {
    async fn round_delay(&self) {}

    async fn adapter_jitter(&self) {}

    async fn campaign_cooldown(&self) {}
}
