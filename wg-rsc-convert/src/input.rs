use anyhow::{Context, Result};
use rsc_core::read_export;
use tracing::debug;
use wg_rsc_convert::plan::{build, Plan};
use wg_rsc_convert::settings::{default_settings, load_settings, Settings};
use wg_rsc_convert::template::read_template;

use crate::cli::InputArgs;

/// Everything a run reads from disk.
pub struct Inputs {
    pub template: String,
    pub export: String,
    pub settings: Settings,
}

pub fn load_inputs(args: &InputArgs) -> Result<Inputs> {
    let mut settings = match &args.settings {
        Some(path) => load_settings(path)?,
        None => default_settings(),
    };
    if let Some(section) = &args.section {
        settings.export.section = section.clone();
    }
    debug!(section = %settings.export.section, entry = %settings.export.entry, "using export settings");

    let template = read_template(&args.template)?;
    let export = read_export(&args.export)?;
    Ok(Inputs {
        template,
        export,
        settings,
    })
}

pub fn build_plan(args: &InputArgs) -> Result<Plan> {
    let inputs = load_inputs(args)?;
    build(&inputs.template, &inputs.export, &inputs.settings).with_context(|| {
        format!(
            "failed to build scripts from {} and {}",
            args.template.display(),
            args.export.display()
        )
    })
}
