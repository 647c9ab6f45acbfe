use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use safezone::ZoneCfg;
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

mod input;
mod provenance;
mod report;

use input::{load_scene, Scene};
use provenance::{write_sidecar, Payload};
use report::{evaluate, ContainmentAlgo, EvalOpts, HullAlgo, Report};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Cone-defined safe zone checks for worker positions")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Evaluate a scene file (.csv with kind,x,y or .json) and write a JSON report
    Run {
        #[arg(long)]
        input: String,
        #[arg(long)]
        out: String,
        /// Distance from an edge still reported as OnBoundary (0 = exact)
        #[arg(long, default_value_t = 0.0)]
        boundary_eps: f64,
        #[arg(long, value_enum, default_value_t = HullAlgo::Monotone)]
        hull: HullAlgo,
        #[arg(long, value_enum, default_value_t = ContainmentAlgo::Crossing)]
        containment: ContainmentAlgo,
        /// Exit with an error when any worker is outside the zone
        #[arg(long)]
        fail_on_danger: bool,
    },
    /// Evaluate the built-in sample layout; prints the report unless --out is given
    Demo {
        #[arg(long)]
        out: Option<String>,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Run {
            input,
            out,
            boundary_eps,
            hull,
            containment,
            fail_on_danger,
        } => {
            let opts = EvalOpts {
                hull,
                containment,
                cfg: ZoneCfg::with_boundary_eps(boundary_eps),
            };
            run(input, out, opts, fail_on_danger)
        }
        Action::Demo { out } => demo(out),
        Action::Report => report(),
    }
}

fn run(input: String, out: String, opts: EvalOpts, fail_on_danger: bool) -> Result<()> {
    tracing::info!(
        input = %input,
        out = %out,
        hull = ?opts.hull,
        containment = ?opts.containment,
        "run"
    );
    let scene = load_scene(&input)?;
    tracing::info!(
        cones = scene.cones.len(),
        workers = scene.workers.len(),
        "scene_loaded"
    );
    let report = evaluate(&scene, &opts).with_context(|| format!("evaluating {input}"))?;
    write_report(&report, &out)?;

    let payload = Payload::new(serde_json::json!({
        "cones": scene.cones.len(),
        "workers": scene.workers.len(),
        "fail_on_danger": fail_on_danger
    }))
    .with_input(&input)
    .with_zone(&report);
    let prov = write_sidecar(&out, payload)?;
    tracing::info!(
        safe = report.summary.safe,
        danger = report.summary.danger,
        provenance = %prov.display(),
        "run_done"
    );

    if fail_on_danger && report.summary.danger > 0 {
        bail!(
            "{} of {} workers outside the safe zone",
            report.summary.danger,
            report.workers.len()
        );
    }
    Ok(())
}

fn demo(out: Option<String>) -> Result<()> {
    let report = evaluate(&Scene::sample(), &EvalOpts::default())?;
    match out {
        Some(out) => {
            write_report(&report, &out)?;
            let payload =
                Payload::new(serde_json::json!({ "scene": "sample" })).with_zone(&report);
            write_sidecar(&out, payload)?;
            tracing::info!(out = %out, "demo_written");
        }
        None => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn report() -> Result<()> {
    let payload = Payload::new(serde_json::json!({}));
    let doc = provenance::document(&payload, &[]);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn write_report(report: &Report, out: &str) -> Result<()> {
    let out_path = Path::new(out);
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    std::fs::write(out_path, serde_json::to_vec_pretty(report)?)
        .with_context(|| format!("writing {out}"))?;
    Ok(())
}
