// textprobe/src/commands/check.rs
//! The `check` command: validates an object without opening any file.

use anyhow::Result;
use log::info;

use textprobe_core::{Backend, Pattern};

use crate::cli::ObjectArgs;
use crate::commands::probe::build_object;
use crate::commands::EXIT_OK;

/// Resolves the object, compiles its pattern and prints the resolved object as JSON.
pub fn run_check_opts(args: &ObjectArgs) -> Result<i32> {
    let object = build_object(args)?;
    let resolved = object.resolve()?;
    let backend: Backend = args.backend.map(Into::into).unwrap_or_default();
    let pattern = Pattern::compile_with(&resolved.pattern, resolved.behaviors.pattern_flags(), backend)?;
    info!("Pattern '{}' compiles with the {} backend.", pattern.as_str(), pattern.backend());

    let report = serde_json::json!({
        "backend": backend,
        "object": resolved,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(EXIT_OK)
}
