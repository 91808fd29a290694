pub mod classify;
pub mod error;
pub mod node;
pub mod resolve;
pub mod types;
pub mod validate;

/// Maximum length for authored field identifiers.
pub const MAX_FIELD_NAME_LEN: usize = 64;

/// Maximum length for authored target identifiers.
pub const MAX_TARGET_NAME_LEN: usize = 64;

/// Group name that carries the shared defaults scope.
pub const DEFAULTS_SCOPE: &str = "defaults";

use crate::{node::NodeError, resolve::ResolveError};
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        err,
        error::ErrorTree,
        node::*,
        types::{Kind, Template, TemplateTable},
    };
    pub use serde::{Deserialize, Serialize};
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    NodeError(#[from] NodeError),

    #[error(transparent)]
    ResolveError(#[from] ResolveError),
}
