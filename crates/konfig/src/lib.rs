//! ## Crate layout
//! - `manifest`: the `konfig.toml` authoring surface.
//! - `generate`: the pass that resolves the manifest, emits every unit, and
//!   writes them to per-source-set output directories.
//! - `fingerprint`: cache-invalidation key over the resolved input.
//!
//! The `prelude` module mirrors the surface a host integration needs.

pub use konfig_build as build;
pub use konfig_schema as schema;

pub mod fingerprint;
pub mod generate;
pub mod manifest;

use thiserror::Error as ThisError;

//
// Consts
//

/// Workspace version re-export for downstream tooling and cache keys.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] konfig_schema::Error),

    #[error(transparent)]
    Manifest(#[from] manifest::ManifestError),

    #[error(transparent)]
    Generate(#[from] generate::GenerateError),
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Error, VERSION,
        generate::{GeneratePass, PassSummary, WrittenUnit},
        manifest::Manifest,
    };
    pub use konfig_build::{EmitMode, GeneratedUnit, GenerationUnit, Visibility};
    pub use konfig_schema::{
        node::ConfigGroup,
        resolve::{Resolution, resolve},
        types::TemplateTable,
    };
}
