use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use driftwatch_application::MonitoringEngine;
use driftwatch_domain::DriftwatchConfig;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{error, info};

use crate::bootstrap::build_engine;

pub async fn run_service(config: DriftwatchConfig) -> Result<()> {
    let period = config.schedule.interval();
    let engine = tokio::task::spawn_blocking(move || build_engine(&config)).await??;
    info!(
        "Monitoring started: every {}s, detector {}",
        period.as_secs(),
        engine.detector_method().as_str()
    );
    run_ticks(Arc::new(engine), period, None).await;
    Ok(())
}

/// Ticks the engine every `period`, running each cycle on the blocking
/// pool. Stops after `limit` ticks when given.
pub async fn run_ticks(
    engine: Arc<MonitoringEngine>,
    period: Duration,
    limit: Option<usize>,
) -> usize {
    let mut timer = interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut completed = 0;

    while limit.is_none_or(|limit| completed < limit) {
        timer.tick().await;
        let engine = Arc::clone(&engine);
        match tokio::task::spawn_blocking(move || engine.tick()).await {
            Ok(Some(report)) => info!(
                "Cycle: drift_score={:.3} detected={} late_ratio={:.3} schema_failures={}",
                report.drift.score,
                report.drift.detected,
                report.late_data_ratio,
                report.compliance.failure_count
            ),
            Ok(None) => {}
            Err(e) => error!("Monitoring cycle aborted: {}", e),
        }
        completed += 1;
    }
    completed
}
