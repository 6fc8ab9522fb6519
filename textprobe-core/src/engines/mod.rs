// textprobe-core/src/engines/mod.rs
//! Concrete `MatchEngine` backends.
//!
//! `regex_engine` is always built. `pcre2_engine` is built only with the
//! `pcre2` cargo feature; asking for it otherwise fails with
//! `ProbeError::BackendUnavailable`.
//!
//! # License
//! MIT OR APACHE 2.0

pub mod regex_engine;
#[cfg(feature = "pcre2")]
pub mod pcre2_engine;

use crate::engine::{Backend, MatchEngine, PatternFlags};
use crate::errors::ProbeError;

/// Compiles `pattern` with the requested backend and hides it behind the trait.
pub fn compile_engine(
    pattern: &str,
    flags: PatternFlags,
    backend: Backend,
) -> Result<Box<dyn MatchEngine>, ProbeError> {
    match backend {
        Backend::Regex => Ok(Box::new(regex_engine::RegexEngine::compile(pattern, flags)?)),
        Backend::Pcre2 => compile_pcre2(pattern, flags),
    }
}

#[cfg(feature = "pcre2")]
fn compile_pcre2(pattern: &str, flags: PatternFlags) -> Result<Box<dyn MatchEngine>, ProbeError> {
    Ok(Box::new(pcre2_engine::Pcre2Engine::compile(pattern, flags)?))
}

#[cfg(not(feature = "pcre2"))]
fn compile_pcre2(_pattern: &str, _flags: PatternFlags) -> Result<Box<dyn MatchEngine>, ProbeError> {
    Err(ProbeError::BackendUnavailable(Backend::Pcre2.name()))
}
