use crate::{DEFAULTS_SCOPE, prelude::*};
use std::collections::BTreeMap;

///
/// ConfigGroup
///
/// Authored bucket of raw field values: a target name or the defaults
/// sentinel, an optional flavor qualifier, and name to raw-literal pairs.
/// Immutable once handed to resolution.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ConfigGroup {
    pub name: String,

    #[serde(default)]
    pub flavor: String,

    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl ConfigGroup {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flavor: String::new(),
            fields: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_flavor(name: impl Into<String>, flavor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flavor: flavor.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Add or replace a raw field value.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, raw: impl Into<String>) -> Self {
        self.fields.insert(name.into(), raw.into());
        self
    }

    #[must_use]
    pub fn is_defaults(&self) -> bool {
        self.name == DEFAULTS_SCOPE
    }
}
