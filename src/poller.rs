use crate::alerts::{self, AlertSink};
use crate::config::{Config, Thresholds};
use crate::fetch::StatsSource;
use crate::snapshot::Snapshot;
use std::time::Duration;
use tracing::{debug, error, warn};

pub const GIVE_UP_NOTICE: &str = "Unable to fetch server statistic";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStatus {
    Polling,
    Terminated,
}

pub struct Poller<S, A> {
    source: S,
    sink: A,
    thresholds: Thresholds,
    interval: Duration,
    failure_budget: u32,
    consecutive_failures: u32,
}

impl<S: StatsSource, A: AlertSink> Poller<S, A> {
    pub fn new(cfg: &Config, source: S, sink: A) -> Self {
        Self {
            source,
            sink,
            thresholds: cfg.thresholds.clone(),
            interval: Duration::from_secs(cfg.interval_secs),
            failure_budget: cfg.failure_budget,
            consecutive_failures: 0,
        }
    }

    pub async fn poll_once(&mut self) -> PollStatus {
        let body = match self.source.fetch().await {
            Ok(body) => body,
            Err(err) => return self.record_failure("fetch", &err),
        };

        let snapshot = match Snapshot::decode(&body) {
            Ok(snapshot) => snapshot,
            Err(err) => return self.record_failure("decode", &err),
        };

        self.consecutive_failures = 0;
        let alerts = alerts::evaluate(&snapshot, &self.thresholds);
        debug!(alerts = alerts.len(), "snapshot evaluated");
        for alert in &alerts {
            debug!(kind = ?alert.kind, "threshold breached");
            self.sink.emit(&alert.text);
        }

        PollStatus::Polling
    }

    pub async fn run(mut self) {
        loop {
            if self.poll_once().await == PollStatus::Terminated {
                return;
            }
            tokio::time::sleep(self.interval).await;
        }
    }

    fn record_failure(&mut self, stage: &'static str, err: &impl std::fmt::Display) -> PollStatus {
        self.consecutive_failures += 1;
        warn!(
            stage = %stage,
            error = %err,
            failures = self.consecutive_failures,
            "stats poll failed"
        );
        if self.consecutive_failures >= self.failure_budget {
            error!(
                failures = self.consecutive_failures,
                "failure budget exhausted, giving up"
            );
            self.sink.emit(GIVE_UP_NOTICE);
            return PollStatus::Terminated;
        }
        PollStatus::Polling
    }
}
