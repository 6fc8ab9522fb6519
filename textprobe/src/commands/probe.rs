// textprobe/src/commands/probe.rs
//! The `probe` command: builds the object, evaluates it against the local
//! filesystem and writes the collected object as JSON.

use std::fs;
use std::io::Write;

use anyhow::{Context, Result};
use log::{debug, info, warn};

use textprobe_core::{
    probe_literal, BehaviorsInput, CollectionFlag, InstanceEntity, Operation, ProbeObject,
    ProbeOptions,
};

use crate::cli::{ObjectArgs, ProbeArgs};
use crate::commands::{EXIT_FAILURE, EXIT_OK};

/// Builds the probe object from `--object` (if any) with inline flags applied on top.
pub fn build_object(args: &ObjectArgs) -> Result<ProbeObject> {
    let mut object = match &args.object {
        Some(path) => ProbeObject::load_from_file(path)?,
        None => ProbeObject::default(),
    };

    if let Some(path) = &args.path {
        object.path = Some(path.clone());
    }
    if let Some(filename) = &args.filename {
        object.filename = Some(filename.clone());
    }
    if let Some(filepath) = &args.filepath {
        object.filepath = Some(filepath.clone());
    }
    if let Some(pattern) = &args.pattern {
        object.pattern = Some(pattern.clone());
    }
    if let Some(value) = args.instance {
        let operation = args.operation.map(Operation::from).unwrap_or_default();
        object.instance = Some(InstanceEntity::new(operation, value));
    }

    let has_behavior_flags = args.ignore_case
        || args.no_multiline
        || args.singleline
        || args.max_depth.is_some()
        || args.recurse_direction.is_some();
    if has_behavior_flags {
        let behaviors = object.behaviors.get_or_insert_with(BehaviorsInput::default);
        if args.ignore_case {
            behaviors.ignore_case = Some(true);
        }
        if args.no_multiline {
            behaviors.multiline = Some(false);
        }
        if args.singleline {
            behaviors.singleline = Some(true);
        }
        if let Some(depth) = args.max_depth {
            behaviors.max_depth = Some(depth);
        }
        if let Some(direction) = args.recurse_direction {
            behaviors.recurse_direction = Some(direction.into());
        }
    }

    debug!("Probe object: {:?}", object);
    Ok(object)
}

pub fn build_options(args: &ProbeArgs) -> ProbeOptions {
    ProbeOptions {
        backend: args.object.backend.map(Into::into).unwrap_or_default(),
        read_chunk_size: args.chunk_size,
    }
}

/// Runs the `probe` command and returns the process exit code.
pub fn run_probe_opts(args: &ProbeArgs) -> Result<i32> {
    let object = build_object(&args.object)?;
    let options = build_options(args);
    info!("Running probe with backend {}", options.backend);

    let collected = probe_literal(&object, &options)?;
    let json = collected.to_json_pretty()?;

    match &args.out {
        Some(path) => {
            fs::write(path, json.as_bytes())
                .with_context(|| format!("Failed to write result to {}", path.display()))?;
            info!("Result written to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", json).context("Failed to write result to stdout")?;
        }
    }

    for message in &collected.messages {
        warn!("{:?}: {}", message.level, message.text);
    }

    Ok(match collected.flag {
        CollectionFlag::Complete => EXIT_OK,
        CollectionFlag::Error => EXIT_FAILURE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{OperationArg, RecurseDirectionArg};
    use std::fs;
    use tempfile::tempdir;
    use textprobe_core::RecurseDirection;

    #[test]
    fn test_inline_object() {
        let args = ObjectArgs {
            filepath: Some("/etc/hosts".to_string()),
            pattern: Some("localhost".to_string()),
            instance: Some(1),
            operation: Some(OperationArg::GreaterThanOrEqual),
            ..ObjectArgs::default()
        };
        let object = build_object(&args).unwrap();
        assert_eq!(object.filepath.as_deref(), Some("/etc/hosts"));
        assert_eq!(object.instance, Some(InstanceEntity::greater_than_or_equal(1)));
        assert!(object.behaviors.is_none());
    }

    #[test]
    fn test_flags_override_object_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("object.yaml");
        fs::write(
            &file,
            "path: /srv\nfilename: app.conf\npattern: 'a'\ninstance: 1\nbehaviors:\n  singleline: true\n",
        )
        .unwrap();
        let args = ObjectArgs {
            object: Some(file),
            pattern: Some("b".to_string()),
            no_multiline: true,
            recurse_direction: Some(RecurseDirectionArg::Down),
            ..ObjectArgs::default()
        };

        let object = build_object(&args).unwrap();
        assert_eq!(object.pattern.as_deref(), Some("b"));
        assert_eq!(object.instance, Some(InstanceEntity::equals(1)));
        let behaviors = object.behaviors.unwrap();
        assert_eq!(behaviors.singleline, Some(true));
        assert_eq!(behaviors.multiline, Some(false));
        assert_eq!(behaviors.recurse_direction, Some(RecurseDirection::Down));
    }
}
