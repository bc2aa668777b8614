use anyhow::Context;
use clap::Parser;
use generator::profile::build_sweep;
use gui_bridge::bridge::GuiBridge;
use radarcore::{GeoPosition, RadarFrame};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::runner::{summarize, Runner};
use workflow::state::{HostState, SharedState};

mod generator;
mod gui_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Proximity radar host driver")]
struct Args {
    /// Run a single refresh over a synthetic sweep and print the ranking
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Radar range in metres
    #[arg(long, default_value_t = 10.0)]
    range: f64,
    #[arg(long, default_value_t = 3.1390, allow_hyphen_values = true)]
    lat: f64,
    #[arg(long, default_value_t = 101.6869, allow_hyphen_values = true)]
    lon: f64,
    /// Start without an observer fix
    #[arg(long, default_value_t = false)]
    no_fix: bool,
    #[arg(long, default_value_t = 24)]
    devices: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value_t = 450.0)]
    canvas_size: f64,
    /// Keep the HTTP bridge and refresh loop alive
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        let observer = (!args.no_fix).then(|| GeoPosition::new(args.lat, args.lon));
        WorkflowConfig::from_args(args.range, args.canvas_size, observer, args.devices, args.seed)
    };

    let radar_config = workflow_config.to_radar_config()?;
    let scope = workflow_config.to_scope()?;
    let runner = Arc::new(Runner::new(scope));

    let mut host = HostState::new(radar_config);
    host.replace_entities(
        build_sweep(&workflow_config.generator)?,
        Some(workflow_config.generator.clone()),
    );
    let state = SharedState::new(host);
    let gui_bridge = GuiBridge::new(state.clone(), runner.clone());

    if args.offline {
        let frame = runner.execute(&state.read());
        let report = render_report(&frame, radar_config.max_range_m());
        print!("{report}");
        gui_bridge.publish_status(&summarize(&frame, radar_config.max_range_m()));

        let report_path = PathBuf::from("tools/data/radar_report.log");
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&report_path)
            .with_context(|| format!("opening report {}", report_path.display()))?;
        file.write_all(report.as_bytes())?;
    }
    if args.serve {
        gui_bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_multi_thread()
            .enable_all()
            .build()
            .context("creating runtime for the bridge")?;
        let period = Duration::from_secs(workflow_config.refresh_secs.max(1));
        runtime.block_on(async {
            tokio::spawn(gui_bridge.serve(workflow_config.bind));
            let mut ticker = tokio::time::interval(period);
            let mut tick: u64 = 0;
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        runner.tick(&state, tick);
                        tick = tick.wrapping_add(1);
                    }
                    result = signal::ctrl_c() => {
                        result.context("awaiting Ctrl+C to exit")?;
                        break;
                    }
                }
            }
            Ok::<(), anyhow::Error>(())
        })?;
        let metrics = runner.metrics().snapshot();
        log::info!(
            "bridge stopped after {} frames ({} without fix)",
            metrics.frames,
            metrics.frames_without_fix
        );
    }

    Ok(())
}

fn render_report(frame: &RadarFrame, max_range_m: f64) -> String {
    let mut report = format!("{}\n", summarize(frame, max_range_m));
    for (rank, entry) in frame.ranked.iter().enumerate() {
        report.push_str(&format!(
            "#{:<3} {:<17} {:<22} {:>4} dBm {:<4} {:>8.1} m{}\n",
            rank + 1,
            entry.entity_id,
            entry.display_name.as_deref().unwrap_or("HIDDEN"),
            entry.signal_strength,
            entry.signal_tier().label(),
            entry.distance_m,
            if entry.in_range { "" } else { "  (out of range)" }
        ));
    }
    report
}
