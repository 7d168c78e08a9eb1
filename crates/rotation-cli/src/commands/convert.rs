//! One-shot timeline <-> rotation conversion commands.

use clap::Args;
use rotation_core::{
    compile as compile_timeline, decompile as decompile_events, export_json, parse_events, Timeline,
};
use std::path::PathBuf;

use super::read_input;

#[derive(Args)]
pub struct CompileArgs {
    /// Timeline JSON file (reads stdin if omitted)
    pub file: Option<PathBuf>,
}

#[derive(Args)]
pub struct DecompileArgs {
    /// Exported rotation JSON file (reads stdin if omitted)
    pub file: Option<PathBuf>,
}

pub fn compile(args: CompileArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(args.file.as_deref())?;
    let timeline: Timeline = serde_json::from_str(&text)?;
    let events = compile_timeline(&timeline);
    tracing::debug!(blocks = timeline.len(), events = events.len(), "compiled timeline");
    println!("{}", export_json(&events)?);
    Ok(())
}

pub fn decompile(args: DecompileArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(args.file.as_deref())?;
    let events = parse_events(&text)?;
    let timeline = decompile_events(&events)?;
    tracing::debug!(events = events.len(), blocks = timeline.len(), "decompiled rotation");
    println!("{}", serde_json::to_string_pretty(&timeline)?);
    Ok(())
}
