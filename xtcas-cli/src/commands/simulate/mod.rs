//! `xtcas simulate` - synthetic session with scripted traffic.
//!
//! Plays the host simulator on a tokio runtime:
//!
//! - **render task** - advances the scripted host at the frame rate and
//!   calls the sampler after every frame
//! - **logic task** - ticks the flight loop with a [`ProximityMonitor`]
//! - **traffic logger** - DEBUG dump of tracked traffic (`--debug` only)
//!
//! The session ends after the configured duration or on Ctrl-C.

mod monitor;
mod scenario;

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Args;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use xtcas::config::defaults::MAX_SIM_FRAME_RATE;
use xtcas::telemetry::MemoryTelemetry;
use xtcas::traffic::{
    spawn_traffic_logger, FlightLoop, SampleOutcome, Sampler, TrafficContext, DEFAULT_LOG_INTERVAL,
    MAX_TRAFFIC_SLOTS,
};

use crate::error::CliError;
use crate::runner::CliRunner;
use monitor::ProximityMonitor;
use scenario::Scenario;

/// Arguments for `xtcas simulate`. Unset values come from `[simulation]`.
#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// Session length in seconds
    #[arg(long)]
    duration: Option<u64>,

    /// Number of scripted intruders (0-19)
    #[arg(long, value_parser = clap::value_parser!(u16).range(0..=MAX_TRAFFIC_SLOTS as i64))]
    traffic: Option<u16>,

    /// Rendering frames per second
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_SIM_FRAME_RATE as i64))]
    frame_rate: Option<u32>,

    /// Enable debug logging, including periodic traffic dumps
    #[arg(long)]
    debug: bool,
}

/// Counters collected by the render task.
#[derive(Debug, Default, Clone, Copy)]
struct RenderStats {
    frames: u64,
    samples: u64,
    throttled: u64,
    unavailable: u64,
}

impl RenderStats {
    fn record(&mut self, outcome: SampleOutcome) {
        self.frames += 1;
        match outcome {
            SampleOutcome::Sampled { .. } => self.samples += 1,
            SampleOutcome::Throttled => self.throttled += 1,
            SampleOutcome::Unavailable => self.unavailable += 1,
        }
    }
}

/// Run the simulate command.
pub fn run(args: SimulateArgs, config_path: Option<&Path>) -> Result<(), CliError> {
    let runner = CliRunner::new(config_path, args.debug)?;
    runner.log_startup("simulate");

    let config = runner.config().clone();
    let sim = &config.simulation;
    let duration = Duration::from_secs(args.duration.unwrap_or(sim.duration));
    let traffic = args.traffic.map(usize::from).unwrap_or(sim.traffic);
    let frame_rate = args.frame_rate.unwrap_or(sim.frame_rate);

    if duration.is_zero() {
        return Err(CliError::Config("duration must be at least 1 second".into()));
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;

    let scenario = Scenario::new(sim.reference(), traffic);
    let host = Arc::new(MemoryTelemetry::with_default_datarefs());
    let context = Arc::new(TrafficContext::new());
    context.init(&*host);

    let sampler = Sampler::new(
        context.clone(),
        host.clone(),
        Arc::new(scenario.plane()),
        config.sampler_config(),
    );
    let flight_loop = FlightLoop::new(context.clone(), host.clone(), config.flight_loop_config());

    info!(
        traffic,
        frame_rate,
        duration_secs = duration.as_secs(),
        reference = %sim.reference(),
        "Starting simulated session"
    );

    let result = runtime.block_on(async {
        let cancellation = CancellationToken::new();

        let logger = tracing::enabled!(tracing::Level::DEBUG).then(|| {
            spawn_traffic_logger(context.clone(), cancellation.clone(), DEFAULT_LOG_INTERVAL)
        });
        let render = spawn_render(scenario, host, sampler, frame_rate, cancellation.clone());
        let logic = spawn_logic(flight_loop, cancellation.clone());

        tokio::select! {
            _ = tokio::time::sleep(duration) => info!("Session complete"),
            _ = tokio::signal::ctrl_c() => warn!("Interrupted, stopping session"),
        }
        cancellation.cancel();

        let render = render.await;
        let logic = logic.await;
        if let Some(logger) = logger {
            let _ = logger.await;
        }
        match (render, logic) {
            (Ok(render), Ok(logic)) => Ok((render, logic)),
            (Err(e), _) | (_, Err(e)) => Err(CliError::Simulation(e.to_string())),
        }
    });

    let tracked_at_end = context.count();
    context.fini();

    let (render, monitor) = result?;
    print_summary(&render, &monitor, tracked_at_end);
    Ok(())
}

fn spawn_render(
    scenario: Scenario,
    host: Arc<MemoryTelemetry>,
    mut sampler: Sampler,
    frame_rate: u32,
    cancellation: CancellationToken,
) -> JoinHandle<RenderStats> {
    tokio::spawn(async move {
        let mut frame = tokio::time::interval(Duration::from_secs_f64(1.0 / frame_rate as f64));
        let start = Instant::now();
        let mut stats = RenderStats::default();

        loop {
            tokio::select! {
                _ = frame.tick() => {
                    scenario.write(&host, start.elapsed().as_secs_f64());
                    stats.record(sampler.on_frame());
                }
                _ = cancellation.cancelled() => break,
            }
        }
        stats
    })
}

fn spawn_logic(
    flight_loop: FlightLoop,
    cancellation: CancellationToken,
) -> JoinHandle<ProximityMonitor> {
    tokio::spawn(async move {
        let mut monitor = ProximityMonitor::default();
        let mut next_call = Duration::from_secs_f64(flight_loop.interval());

        loop {
            tokio::select! {
                _ = tokio::time::sleep(next_call) => {
                    let outcome = flight_loop.tick(&mut monitor);
                    next_call = Duration::from_secs_f64(outcome.next_call);
                }
                _ = cancellation.cancelled() => break,
            }
        }
        monitor
    })
}

fn print_summary(render: &RenderStats, monitor: &ProximityMonitor, tracked_at_end: usize) {
    println!();
    println!("Session summary");
    println!("  Frames rendered:     {}", render.frames);
    println!("  Samples taken:       {}", render.samples);
    println!("  Frames throttled:    {}", render.throttled);
    println!("  Frames unavailable:  {}", render.unavailable);
    println!("  Logic ticks:         {}", monitor.ticks);
    println!("  Max traffic tracked: {}", monitor.max_tracked);
    println!("  Tracked at end:      {}", tracked_at_end);
    println!("  Proximate ticks:     {}", monitor.proximate_ticks);
    if let Some(contact) = monitor.closest {
        println!(
            "  Last closest:        {} at {:.2}nm ({:+.0})",
            contact.entity_id, contact.range_nm, contact.relative_alt
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_stats() {
        let mut stats = RenderStats::default();
        stats.record(SampleOutcome::Sampled {
            tracked: 2,
            skipped_slots: 0,
        });
        stats.record(SampleOutcome::Throttled);
        stats.record(SampleOutcome::Throttled);
        stats.record(SampleOutcome::Unavailable);

        assert_eq!(stats.frames, 4);
        assert_eq!(stats.samples, 1);
        assert_eq!(stats.throttled, 2);
        assert_eq!(stats.unavailable, 1);
    }

    #[tokio::test]
    async fn test_short_session_tracks_traffic() {
        let config = xtcas::config::ConfigFile::default();
        let scenario = Scenario::new(config.simulation.reference(), 4);
        let host = Arc::new(MemoryTelemetry::with_default_datarefs());
        let context = Arc::new(TrafficContext::new());
        context.init(&*host);

        let sampler = Sampler::new(
            context.clone(),
            host.clone(),
            Arc::new(scenario.plane()),
            config.sampler_config(),
        );
        let flight_loop =
            FlightLoop::new(context.clone(), host.clone(), config.flight_loop_config());

        let cancellation = CancellationToken::new();
        let render = spawn_render(scenario, host, sampler, 60, cancellation.clone());
        let logic = spawn_logic(flight_loop, cancellation.clone());

        tokio::time::sleep(Duration::from_millis(400)).await;
        cancellation.cancel();

        let render = render.await.unwrap();
        let monitor = logic.await.unwrap();

        assert!(render.samples >= 1);
        assert!(monitor.ticks >= 1);
        assert_eq!(context.count(), 4);
        context.fini();
    }
}
