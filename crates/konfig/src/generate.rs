//! The generation pass: resolve the manifest, emit every unit, write them to
//! per-source-set output directories, and report what was written.
//!
//! Scheduling, up-to-date checks, and compile-input registration stay with
//! the host; this module only performs one pass.

use crate::{Error, VERSION, fingerprint, manifest::Manifest};
use konfig_build::{GenerationUnit, generate};
use konfig_schema::{resolve::resolve, types::TemplateTable};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error as ThisError;
use tracing::{debug, info};

///
/// GenerateError
///

#[derive(Debug, ThisError)]
pub enum GenerateError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

///
/// GeneratePass
///
/// One synchronous generation invocation over an immutable manifest.
///

#[derive(Clone, Debug)]
pub struct GeneratePass {
    manifest: Manifest,
    flavor: String,
    out_dir: PathBuf,
}

///
/// WrittenUnit
///

#[derive(Clone, Debug, Serialize)]
pub struct WrittenUnit {
    pub target: Option<String>,
    pub path: PathBuf,
}

///
/// PassSummary
///

#[derive(Clone, Debug, Serialize)]
pub struct PassSummary {
    pub fingerprint: String,
    pub units: Vec<WrittenUnit>,
}

impl GeneratePass {
    #[must_use]
    pub fn new(manifest: Manifest, flavor: impl Into<String>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            manifest,
            flavor: flavor.into(),
            out_dir: out_dir.into(),
        }
    }

    /// Resolve, emit, and write every unit of the pass.
    pub fn run(&self) -> Result<PassSummary, Error> {
        let templates = TemplateTable::DEFAULT;
        let groups = self.manifest.config_groups()?;
        let resolution = resolve(&self.manifest.targets, &groups, &self.flavor, &templates)
            .map_err(konfig_schema::Error::from)?;

        let fingerprint = fingerprint::digest(&resolution);
        info!(
            flavor = %self.flavor,
            targets = resolution.targets.len(),
            %fingerprint,
            "resolved configuration"
        );

        let unit = GenerationUnit {
            package: self.manifest.package.clone(),
            object: self.manifest.object_name.clone(),
            visibility: self.manifest.visibility(),
            resolution,
        };

        let mut units = Vec::new();
        for generated in generate(&unit, &templates) {
            let dir = self.out_dir.join(source_set(generated.target.as_deref()));
            let path = dir.join(&generated.file_name);
            write_unit(&path, &generated.source)?;
            debug!(path = %path.display(), "wrote generated unit");

            units.push(WrittenUnit {
                target: generated.target,
                path,
            });
        }

        Ok(PassSummary { fingerprint, units })
    }
}

// commonMain for the declaration unit, <target>Main per implementation
fn source_set(target: Option<&str>) -> String {
    target.map_or_else(|| "commonMain".to_string(), |t| format!("{t}Main"))
}

fn write_unit(path: &Path, source: &str) -> Result<(), GenerateError> {
    let write = |path: &Path| -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let banner = format!("// @generated by konfig {VERSION}. Do not edit.\n\n");

        fs::write(path, format!("{banner}{source}"))
    };

    write(path).map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })
}
