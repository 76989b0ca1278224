//! Error types.
//!
//! Focus operations are total and never fail; only the widget tree and the
//! configuration loader report errors.

use thiserror::Error;

use crate::types::ViewId;

/// Errors surfaced by [`ViewTree`](crate::engine::ViewTree) mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("view {0} is not alive")]
    StaleView(ViewId),
    #[error("parent view {0} is not alive")]
    StaleParent(ViewId),
    #[error("view name `{0}` is already in use")]
    DuplicateName(String),
    #[error("cannot parent {child} under its own descendant {parent}")]
    Cycle { child: ViewId, parent: ViewId },
}

/// Errors surfaced while loading a [`FocusConfig`](crate::config::FocusConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config value: {0}")]
    Invalid(String),
}

pub type TreeResult<T> = std::result::Result<T, TreeError>;
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
