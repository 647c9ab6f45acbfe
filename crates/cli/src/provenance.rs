//! Provenance sidecars for zone reports.
//!
//! Every report gets `<stem>.provenance.json` next to it: code revision,
//! library version, callsite, inputs, free-form params, and a `zone` record
//! naming the hull and containment strategies together with what they
//! produced (reference vertex, vertex count, area, safe/danger tally).

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::ffi::OsStr;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::report::{ContainmentAlgo, HullAlgo, Report};

/// Zone-level facts of one evaluation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ZoneRecord {
    pub hull: HullAlgo,
    pub containment: ContainmentAlgo,
    pub boundary_eps: f64,
    pub reference: [f64; 2],
    pub vertices: usize,
    pub area: f64,
    pub safe: usize,
    pub danger: usize,
}

impl ZoneRecord {
    pub fn of(report: &Report) -> Self {
        Self {
            hull: report.hull,
            containment: report.containment,
            boundary_eps: report.boundary_eps,
            reference: report.reference,
            vertices: report.ring.len(),
            area: report.area,
            safe: report.summary.safe,
            danger: report.summary.danger,
        }
    }
}

/// What a run consumed and decided, recorded next to its report.
pub struct Payload {
    pub params: Value,
    pub inputs: Vec<String>,
    pub zone: Option<ZoneRecord>,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self {
            params,
            inputs: Vec::new(),
            zone: None,
        }
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.inputs.push(input.into());
        self
    }

    pub fn with_zone(mut self, report: &Report) -> Self {
        self.zone = Some(ZoneRecord::of(report));
        self
    }
}

#[derive(Debug, Serialize)]
pub struct Callsite {
    pub file: &'static str,
    pub line: u32,
}

/// Sidecar document; field order is the JSON key order.
#[derive(Debug, Serialize)]
pub struct Provenance<'a> {
    pub code_rev: String,
    pub version: &'static str,
    pub callsite: Callsite,
    pub inputs: &'a [String],
    pub params: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<&'a ZoneRecord>,
    pub outputs: &'a [String],
}

/// Provenance for a run that produced `outputs`, attributed to the caller.
#[track_caller]
pub fn document<'a>(payload: &'a Payload, outputs: &'a [String]) -> Provenance<'a> {
    let at = Location::caller();
    Provenance {
        code_rev: current_git_rev(),
        version: safezone::VERSION,
        callsite: Callsite {
            file: at.file(),
            line: at.line(),
        },
        inputs: &payload.inputs,
        params: &payload.params,
        zone: payload.zone.as_ref(),
        outputs,
    }
}

/// Write the sidecar for `report_path`; returns where it landed.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(report_path: P, payload: Payload) -> Result<PathBuf> {
    let report_path = report_path.as_ref();
    let path = sidecar_path(report_path);
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let outputs = [report_path.to_string_lossy().into_owned()];
    let doc = document(&payload, &outputs);
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// `dir/zone.json` → `dir/zone.provenance.json`.
fn sidecar_path(report_path: &Path) -> PathBuf {
    let mut name = report_path
        .file_stem()
        .unwrap_or_else(|| OsStr::new("report"))
        .to_os_string();
    name.push(".provenance.json");
    report_path.with_file_name(name)
}

/// `GIT_COMMIT` (build time, then run time), else `git rev-parse HEAD`, else "unknown".
pub fn current_git_rev() -> String {
    let pinned = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .into_iter()
        .chain(std::env::var("GIT_COMMIT").ok())
        .find(|rev| !rev.is_empty());
    pinned
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".to_string())
}

fn git_head() -> Option<String> {
    let out = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let rev = String::from_utf8(out.stdout).ok()?;
    Some(rev.trim().to_string()).filter(|r| !r.is_empty())
}
