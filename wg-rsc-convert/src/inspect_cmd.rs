use anyhow::Result;
use wg_rsc_convert::report::render_plan;

use crate::cli::{InspectArgs, OutputFormat};
use crate::input::build_plan;

pub fn run_inspect(args: InspectArgs) -> Result<()> {
    let plan = build_plan(&args.input)?;

    match args.format {
        OutputFormat::Text => println!("{}", render_plan(&plan)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
    }

    Ok(())
}
