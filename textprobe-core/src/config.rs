//! Configuration management for `textprobe-core`.
//!
//! This module defines the probe object (the input of one evaluation), its
//! behaviors, and the engine options. It handles YAML deserialization and the
//! canonicalization of inputs and behavior defaults that happens before any I/O.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

use crate::buffer::DEFAULT_CHUNK_SIZE;
use crate::engine::{Backend, PatternFlags};
use crate::errors::ProbeError;
use crate::instance::InstanceEntity;

/// Direction the enumerator recurses from the starting directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurseDirection {
    #[default]
    None,
    Up,
    Down,
}

/// Behavior attributes as supplied on the object. Unset attributes are `None`
/// so that "explicitly given" can be told apart from "defaulted".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BehaviorsInput {
    pub max_depth: Option<i64>,
    pub recurse_direction: Option<RecurseDirection>,
    pub ignore_case: Option<bool>,
    pub multiline: Option<bool>,
    pub singleline: Option<bool>,
}

/// Behaviors with every attribute resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Behaviors {
    /// `-1` means unlimited depth.
    pub max_depth: i64,
    pub recurse_direction: RecurseDirection,
    pub ignore_case: bool,
    pub multiline: bool,
    pub singleline: bool,
}

impl Default for Behaviors {
    fn default() -> Self {
        Self {
            max_depth: 1,
            recurse_direction: RecurseDirection::None,
            ignore_case: false,
            multiline: true,
            singleline: false,
        }
    }
}

impl Behaviors {
    /// Fills in defaults for every attribute that was not given.
    ///
    /// With a `filepath` target the recursion attributes are forced back to
    /// their no-recursion defaults; the regex flags are still honoured.
    pub fn canonicalize(input: Option<&BehaviorsInput>, uses_filepath: bool) -> Self {
        let defaults = Behaviors::default();
        let Some(input) = input else {
            return defaults;
        };

        let mut behaviors = Behaviors {
            ignore_case: input.ignore_case.unwrap_or(defaults.ignore_case),
            multiline: input.multiline.unwrap_or(defaults.multiline),
            singleline: input.singleline.unwrap_or(defaults.singleline),
            ..defaults
        };

        if uses_filepath {
            if input.max_depth.is_some() || input.recurse_direction.is_some() {
                debug!("Ignoring recursion behaviors because 'filepath' was supplied.");
            }
        } else {
            behaviors.max_depth = input.max_depth.unwrap_or(defaults.max_depth);
            behaviors.recurse_direction = input.recurse_direction.unwrap_or(defaults.recurse_direction);
        }
        behaviors
    }

    pub fn pattern_flags(&self) -> PatternFlags {
        PatternFlags {
            case_insensitive: self.ignore_case,
            multiline: self.multiline,
            dotall: self.singleline,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InstanceInput {
    Literal(i64),
    Entity(InstanceEntity),
}

/// Accepts either a bare integer (an `equals` comparison) or a full entity.
fn deserialize_instance<'de, D>(deserializer: D) -> std::result::Result<Option<InstanceEntity>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<InstanceInput>::deserialize(deserializer)?.map(|input| match input {
        InstanceInput::Literal(value) => InstanceEntity::equals(value),
        InstanceInput::Entity(entity) => entity,
    }))
}

/// A `textfilecontent54_object`: the input of one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeObject {
    pub path: Option<String>,
    pub filename: Option<String>,
    /// Alternative to `path` + `filename`.
    pub filepath: Option<String>,
    pub pattern: Option<String>,
    #[serde(deserialize_with = "deserialize_instance")]
    pub instance: Option<InstanceEntity>,
    pub behaviors: Option<BehaviorsInput>,
}

/// Where the enumerator should look for candidate files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileTarget {
    Filepath(String),
    PathAndFilename { path: String, filename: String },
}

impl FileTarget {
    pub fn uses_filepath(&self) -> bool {
        matches!(self, FileTarget::Filepath(_))
    }

    /// The location enumeration starts from, for diagnostics.
    pub fn root(&self) -> &str {
        match self {
            FileTarget::Filepath(filepath) => filepath,
            FileTarget::PathAndFilename { path, .. } => path,
        }
    }
}

/// A probe object with all required elements present and behaviors canonicalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedObject {
    pub target: FileTarget,
    pub pattern: String,
    pub instance: InstanceEntity,
    pub behaviors: Behaviors,
}

impl ProbeObject {
    /// Loads a probe object from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading probe object from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read object file {}", path.display()))?;
        Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to parse object file {}", path.display()))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let object: ProbeObject = serde_yml::from_str(text).context("Invalid probe object")?;
        Ok(object)
    }

    /// Checks required elements and canonicalizes behaviors.
    ///
    /// Requires (`path` and `filename`) or `filepath`, plus `instance` and
    /// `pattern`. When `filepath` is present it takes precedence.
    pub fn resolve(&self) -> std::result::Result<ResolvedObject, ProbeError> {
        let target = match (&self.filepath, &self.path, &self.filename) {
            (Some(filepath), _, _) => FileTarget::Filepath(filepath.clone()),
            (None, Some(path), Some(filename)) => FileTarget::PathAndFilename {
                path: path.clone(),
                filename: filename.clone(),
            },
            (None, Some(_), None) => return Err(ProbeError::MissingElement("filename")),
            (None, None, Some(_)) => return Err(ProbeError::MissingElement("path")),
            (None, None, None) => return Err(ProbeError::MissingElement("filepath")),
        };
        let instance = self
            .instance
            .clone()
            .ok_or(ProbeError::MissingElement("instance"))?;
        let pattern = self
            .pattern
            .clone()
            .ok_or(ProbeError::MissingElement("pattern"))?;
        let behaviors = Behaviors::canonicalize(self.behaviors.as_ref(), target.uses_filepath());

        debug!("Resolved object: target={:?}, behaviors={:?}", target, behaviors);
        Ok(ResolvedObject {
            target,
            pattern,
            instance,
            behaviors,
        })
    }
}

/// Engine settings that are not part of the object itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeOptions {
    pub backend: Backend,
    pub read_chunk_size: usize,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            read_chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object() -> ProbeObject {
        ProbeObject {
            path: Some("/etc".to_string()),
            filename: Some("hosts".to_string()),
            pattern: Some("localhost".to_string()),
            instance: Some(InstanceEntity::equals(1)),
            ..ProbeObject::default()
        }
    }

    #[test]
    fn test_defaults_without_behaviors() {
        let resolved = object().resolve().unwrap();
        assert_eq!(resolved.behaviors, Behaviors::default());
        assert_eq!(resolved.behaviors.max_depth, 1);
        assert!(resolved.behaviors.multiline);
        assert!(!resolved.behaviors.ignore_case);
        assert!(!resolved.behaviors.singleline);
    }

    #[test]
    fn test_partial_behaviors_are_filled() {
        let mut obj = object();
        obj.behaviors = Some(BehaviorsInput {
            recurse_direction: Some(RecurseDirection::Down),
            ignore_case: Some(true),
            ..BehaviorsInput::default()
        });
        let behaviors = obj.resolve().unwrap().behaviors;
        assert_eq!(behaviors.recurse_direction, RecurseDirection::Down);
        assert_eq!(behaviors.max_depth, 1);
        assert!(behaviors.ignore_case);
        assert!(behaviors.multiline);
    }

    #[test]
    fn test_filepath_forces_no_recursion_but_keeps_flags() {
        let obj = ProbeObject {
            filepath: Some("/etc/hosts".to_string()),
            pattern: Some("x".to_string()),
            instance: Some(InstanceEntity::equals(1)),
            behaviors: Some(BehaviorsInput {
                max_depth: Some(5),
                recurse_direction: Some(RecurseDirection::Down),
                multiline: Some(false),
                singleline: Some(true),
                ..BehaviorsInput::default()
            }),
            ..ProbeObject::default()
        };
        let resolved = obj.resolve().unwrap();
        assert_eq!(resolved.target, FileTarget::Filepath("/etc/hosts".to_string()));
        assert_eq!(resolved.behaviors.max_depth, 1);
        assert_eq!(resolved.behaviors.recurse_direction, RecurseDirection::None);
        assert!(!resolved.behaviors.multiline);
        assert!(resolved.behaviors.singleline);
    }

    #[test]
    fn test_missing_elements() {
        let mut obj = object();
        obj.filename = None;
        assert!(matches!(obj.resolve(), Err(ProbeError::MissingElement("filename"))));

        let mut obj = object();
        obj.path = None;
        obj.filename = None;
        assert!(matches!(obj.resolve(), Err(ProbeError::MissingElement("filepath"))));

        let mut obj = object();
        obj.instance = None;
        assert!(matches!(obj.resolve(), Err(ProbeError::MissingElement("instance"))));

        let mut obj = object();
        obj.pattern = None;
        assert!(matches!(obj.resolve(), Err(ProbeError::MissingElement("pattern"))));
    }

    #[test]
    fn test_pattern_flags_mapping() {
        let behaviors = Behaviors {
            ignore_case: true,
            multiline: false,
            singleline: true,
            ..Behaviors::default()
        };
        let flags = behaviors.pattern_flags();
        assert!(flags.case_insensitive);
        assert!(!flags.multiline);
        assert!(flags.dotall);
    }

    #[test]
    fn test_yaml_with_literal_instance() {
        let obj = ProbeObject::from_yaml_str(
            r#"
filepath: /etc/ssh/sshd_config
pattern: '^PermitRootLogin\s+(\S+)'
instance: 1
behaviors:
  ignore_case: true
"#,
        )
        .unwrap();
        assert_eq!(obj.instance, Some(InstanceEntity::equals(1)));
        assert_eq!(obj.behaviors.unwrap().ignore_case, Some(true));
    }
}
