use colored::Colorize;
use serde::Serialize;

use crate::plan::Plan;

/// Counts for one `generate` run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenerateSummary {
    pub written: usize,
    pub failed: usize,
    pub skipped: usize,
    pub rejected: usize,
}

/// Render the final `generate` counts line.
pub fn render_generate_summary(summary: GenerateSummary) -> String {
    let line = format!(
        "generate_summary written={} failed={} skipped={} rejected={}",
        summary.written, summary.failed, summary.skipped, summary.rejected
    );
    if summary.failed > 0 {
        line.yellow().to_string()
    } else {
        line.cyan().to_string()
    }
}

/// Render a plan for terminal output. Keys other than the server's are never shown.
pub fn render_plan(plan: &Plan) -> String {
    let mut out = Vec::new();
    let t = &plan.template;
    out.push(format!(
        "template listen_port={} dns={} allowed_ips={} server_public_key={}",
        or_dash(&t.listen_port),
        or_dash(&t.fallback_dns),
        or_dash(&t.allowed_ips_template),
        t.server_public_key
    ));

    out.push(format!("peers count={}", plan.jobs.len()));
    for job in &plan.jobs {
        out.push(
            format!(
                "+ {} name={} address={} dns={} allowed_ips={} endpoint={}",
                job.file_name,
                or_dash(&job.name),
                job.peer.address,
                or_dash(&job.peer.dns),
                job.peer.allowed_ips,
                job.peer.endpoint
            )
            .green()
            .to_string(),
        );
    }

    for skipped in &plan.skipped {
        out.push(
            format!(
                "! name={} address={} reason={}",
                or_dash(&skipped.name),
                skipped.client_address,
                skipped.reason
            )
            .magenta()
            .to_string(),
        );
    }

    out.push(format!("rejected count={}", plan.rejected.len()));
    for entry in &plan.rejected {
        out.push(
            format!(
                "- line={} reason={} keys={}",
                entry.line,
                entry.reason,
                entry.keys.join(",")
            )
            .yellow()
            .to_string(),
        );
    }

    out.join("\n")
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
