//! The `konfig.toml` authoring surface.
//!
//! A manifest declares the package path, the generated object name, the
//! target list, and the override tables. Scalar TOML values (string, integer,
//! boolean) become raw literals for the classifier; nothing else is accepted.

use konfig_build::Visibility;
use konfig_schema::{DEFAULTS_SCOPE, node::ConfigGroup, validate::naming::validate_ident};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error as ThisError;
use toml::Value;

///
/// ManifestError
///

#[derive(Debug, ThisError)]
pub enum ManifestError {
    #[error("failed to read manifest {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse manifest: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid package path '{package}': {reason}")]
    InvalidPackage { package: String, reason: String },

    #[error("invalid object name '{object}': {reason}")]
    InvalidObject { object: String, reason: String },

    #[error("no targets declared")]
    NoTargets,

    #[error(
        "field '{field}' in group '{group}' has unsupported type {ty}; use a string, integer, or boolean"
    )]
    UnsupportedValue {
        group: String,
        field: String,
        ty: &'static str,
    },
}

///
/// Manifest
///

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Manifest {
    /// Rust path of the module that hosts the common declaration unit.
    pub package: String,

    /// Generated object name.
    #[serde(default = "default_object_name")]
    pub object_name: String,

    /// Emit `pub` items instead of `pub(crate)`.
    #[serde(default)]
    pub expose: bool,

    /// Declared targets; override tables may only name these.
    pub targets: Vec<String>,

    #[serde(default)]
    pub defaults: BTreeMap<String, Value>,

    /// Per-target override tables.
    #[serde(default)]
    pub target: BTreeMap<String, BTreeMap<String, Value>>,

    /// Per-flavor override tables.
    #[serde(default)]
    pub flavor: BTreeMap<String, FlavorTables>,
}

///
/// FlavorTables
///

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlavorTables {
    #[serde(default)]
    pub defaults: BTreeMap<String, Value>,

    #[serde(default)]
    pub target: BTreeMap<String, BTreeMap<String, Value>>,
}

impl Manifest {
    /// Load and validate a manifest file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml(&text)
    }

    /// Parse and validate manifest text.
    pub fn from_toml(text: &str) -> Result<Self, ManifestError> {
        let manifest: Self = toml::from_str(text)?;
        manifest.validate()?;

        Ok(manifest)
    }

    fn validate(&self) -> Result<(), ManifestError> {
        if self.targets.is_empty() {
            return Err(ManifestError::NoTargets);
        }
        for (i, segment) in self.package.split("::").enumerate() {
            // a leading `crate` keeps same-crate module paths expressible
            if i == 0 && segment == "crate" {
                continue;
            }
            validate_ident(segment).map_err(|reason| ManifestError::InvalidPackage {
                package: self.package.clone(),
                reason,
            })?;
        }
        validate_ident(&self.object_name).map_err(|reason| ManifestError::InvalidObject {
            object: self.object_name.clone(),
            reason,
        })?;

        Ok(())
    }

    /// Flatten the manifest tables into resolution-ready config groups.
    pub fn config_groups(&self) -> Result<Vec<ConfigGroup>, ManifestError> {
        let mut groups = Vec::new();

        if !self.defaults.is_empty() {
            groups.push(group_from(DEFAULTS_SCOPE, "", &self.defaults)?);
        }
        for (name, fields) in &self.target {
            groups.push(group_from(name, "", fields)?);
        }
        for (flavor, tables) in &self.flavor {
            if !tables.defaults.is_empty() {
                groups.push(group_from(DEFAULTS_SCOPE, flavor, &tables.defaults)?);
            }
            for (name, fields) in &tables.target {
                groups.push(group_from(name, flavor, fields)?);
            }
        }

        Ok(groups)
    }

    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        if self.expose {
            Visibility::Exposed
        } else {
            Visibility::Internal
        }
    }
}

fn default_object_name() -> String {
    "BuildKonfig".to_string()
}

fn group_from(
    name: &str,
    flavor: &str,
    fields: &BTreeMap<String, Value>,
) -> Result<ConfigGroup, ManifestError> {
    let mut group = ConfigGroup::with_flavor(name, flavor);
    for (field, value) in fields {
        group = group.field(field, raw_value(name, field, value)?);
    }

    Ok(group)
}

// Scalar TOML values become raw literals for the classifier.
fn raw_value(group: &str, field: &str, value: &Value) -> Result<String, ManifestError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Boolean(b) => Ok(b.to_string()),
        other => Err(ManifestError::UnsupportedValue {
            group: group.to_string(),
            field: field.to_string(),
            ty: other.type_str(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
        package = "shared_config"
        object-name = "BuildKonfig"
        expose = true
        targets = ["android", "ios"]

        [defaults]
        debug = false
        retries = 3

        [target.ios]
        debug = true

        [flavor.paid.defaults]
        tier = "gold"

        [flavor.paid.target.ios]
        debug = "always-on"
    "#;

    #[test]
    fn a_full_manifest_parses_into_groups() {
        let manifest = Manifest::from_toml(FULL).unwrap();
        let groups = manifest.config_groups().unwrap();

        assert_eq!(manifest.visibility(), Visibility::Exposed);
        assert_eq!(groups.len(), 4);

        let defaults = groups.iter().find(|g| g.is_defaults() && g.flavor.is_empty()).unwrap();
        assert_eq!(defaults.fields.get("debug").map(String::as_str), Some("false"));
        assert_eq!(defaults.fields.get("retries").map(String::as_str), Some("3"));

        let paid_ios = groups
            .iter()
            .find(|g| g.name == "ios" && g.flavor == "paid")
            .unwrap();
        assert_eq!(
            paid_ios.fields.get("debug").map(String::as_str),
            Some("always-on")
        );
    }

    #[test]
    fn object_name_defaults_when_omitted() {
        let manifest = Manifest::from_toml(
            r#"
            package = "shared_config"
            targets = ["ios"]
            "#,
        )
        .unwrap();

        assert_eq!(manifest.object_name, "BuildKonfig");
        assert_eq!(manifest.visibility(), Visibility::Internal);
    }

    #[test]
    fn non_scalar_values_are_rejected_with_context() {
        let manifest = Manifest::from_toml(
            r#"
            package = "shared_config"
            targets = ["ios"]

            [defaults]
            ratio = 1.5
            "#,
        )
        .unwrap();
        let err = manifest.config_groups().unwrap_err();

        let ManifestError::UnsupportedValue { group, field, ty } = err else {
            panic!("expected UnsupportedValue, got {err:?}");
        };
        assert_eq!(group, "defaults");
        assert_eq!(field, "ratio");
        assert_eq!(ty, "float");
    }

    #[test]
    fn empty_target_list_is_rejected() {
        let err = Manifest::from_toml(
            r#"
            package = "shared_config"
            targets = []
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, ManifestError::NoTargets));
    }

    #[test]
    fn bad_package_paths_are_rejected() {
        for package in ["", "shared config", "shared::", "3rd::party"] {
            let text = format!(
                r#"
                package = "{package}"
                targets = ["ios"]
                "#
            );
            assert!(
                matches!(
                    Manifest::from_toml(&text),
                    Err(ManifestError::InvalidPackage { .. })
                ),
                "package '{package}' should be rejected"
            );
        }
    }

    #[test]
    fn crate_prefixed_package_paths_are_accepted() {
        let manifest = Manifest::from_toml(
            r#"
            package = "crate::shared::config"
            targets = ["ios"]
            "#,
        );

        assert!(manifest.is_ok());
    }

    #[test]
    fn unknown_manifest_keys_are_rejected() {
        let err = Manifest::from_toml(
            r#"
            package = "shared_config"
            targets = ["ios"]
            flavour = "nope"
            "#,
        );

        assert!(matches!(err, Err(ManifestError::Parse(_))));
    }
}
