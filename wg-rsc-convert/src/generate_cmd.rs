use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use wg_rsc_convert::report::{render_generate_summary, GenerateSummary};

use crate::cli::GenerateArgs;
use crate::input::build_plan;
use crate::path_guard::ensure_output_not_same;

/// Write one installer script per planned peer.
///
/// A failed write is logged and counted; the remaining peers are still
/// written. With `--strict` the run fails afterwards if anything failed.
pub fn run_generate(args: GenerateArgs) -> Result<()> {
    let plan = build_plan(&args.input)?;
    info!(
        peers = plan.jobs.len(),
        rejected = plan.rejected.len(),
        "parsed export"
    );

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create output directory {}", args.out_dir.display()))?;

    let mut summary = GenerateSummary {
        skipped: plan.skipped.len(),
        rejected: plan.rejected.len(),
        ..GenerateSummary::default()
    };
    for skipped in &plan.skipped {
        warn!(address = %skipped.client_address, reason = %skipped.reason, "skipping peer");
    }

    let inputs = [args.input.template.as_path(), args.input.export.as_path()];
    for job in &plan.jobs {
        let out_path = args.out_dir.join(&job.file_name);
        match write_script(&out_path, &job.contents, &inputs) {
            Ok(()) => {
                summary.written += 1;
                println!("Wrote {}", out_path.display());
            }
            Err(err) => {
                summary.failed += 1;
                warn!("skipping {}: {err:#}", job.ip);
            }
        }
    }

    println!("{}", render_generate_summary(summary));

    if args.strict && summary.failed > 0 {
        bail!(
            "strict mode failed: {} script(s) could not be written",
            summary.failed
        );
    }
    Ok(())
}

fn write_script(path: &Path, contents: &str, inputs: &[&Path]) -> Result<()> {
    ensure_output_not_same(path, inputs)?;
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}
