//! Whole-run pipeline from input text to rendered scripts.
//!
//! ## Stages
//!
//! 1. **Template** — read the shared constants; a missing server key aborts
//! 2. **Scan** — collect complete peers from the export section
//! 3. **Reconcile** — merge each peer with the template
//! 4. **Render** — produce one installer script per peer
//!
//! Nothing here touches the filesystem; callers decide where scripts go.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::peer::{scan_peers, PeerRecord, RejectedEntry};
use crate::reconcile::{reconcile, ReconciledPeer};
use crate::script::{render_script, script_file_name, ScriptError};
use crate::settings::Settings;
use crate::template::{parse_template, TemplateDefaults, TemplateError};

/// Fatal errors for a whole run.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("no peers found in export ({section})")]
    NoPeers { section: String },
}

/// One script ready to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptJob {
    pub name: String,
    /// Client IP without prefix; the script and its `.conf` are named after it.
    pub ip: String,
    pub file_name: String,
    pub peer: ReconciledPeer,
    #[serde(skip)]
    pub contents: String,
}

/// A valid peer whose script could not be rendered, or whose script name
/// is already taken by an earlier peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPeer {
    pub name: String,
    pub client_address: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub template: TemplateDefaults,
    pub jobs: Vec<ScriptJob>,
    pub skipped: Vec<SkippedPeer>,
    pub rejected: Vec<RejectedEntry>,
}

/// Build the full plan from template and export text.
///
/// # Errors
///
/// Returns error if:
/// - the template has no `[Peer] PublicKey`
/// - the export section holds no complete peer
pub fn build(template: &str, export: &str, settings: &Settings) -> Result<Plan, PlanError> {
    let defaults = parse_template(template)?;
    let scan = scan_peers(export, &settings.section_filter());
    if scan.peers.is_empty() {
        return Err(PlanError::NoPeers {
            section: settings.export.section.clone(),
        });
    }

    let mut jobs = Vec::new();
    let mut skipped = Vec::new();
    let mut taken = HashSet::new();
    for peer in &scan.peers {
        let reason = match plan_peer(peer, &defaults, settings) {
            Ok(job) if taken.insert(job.file_name.clone()) => {
                jobs.push(job);
                continue;
            }
            Ok(job) => format!("duplicate script name {}", job.file_name),
            Err(err) => err.to_string(),
        };
        skipped.push(SkippedPeer {
            name: peer.name.clone(),
            client_address: peer.client_address.clone(),
            reason,
        });
    }

    Ok(Plan {
        template: defaults,
        jobs,
        skipped,
        rejected: scan.rejected,
    })
}

fn plan_peer(
    peer: &PeerRecord,
    defaults: &TemplateDefaults,
    settings: &Settings,
) -> Result<ScriptJob, ScriptError> {
    let ip = peer.ip();
    let file_name = script_file_name(ip, &settings.script)?;
    let reconciled = reconcile(peer, defaults);
    let contents = render_script(ip, &reconciled, &settings.script)?;
    Ok(ScriptJob {
        name: peer.name.clone(),
        ip: ip.to_string(),
        file_name,
        peer: reconciled,
        contents,
    })
}
