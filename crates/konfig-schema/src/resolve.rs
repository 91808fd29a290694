//! Override resolution: defaults, target, and flavor groups in, one resolved
//! field set per declared target plus the common declaration set out.

use crate::{
    error::ErrorTree,
    node::{ConfigGroup, FieldSpec, NodeError},
    prelude::*,
    validate,
};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error as ThisError;

///
/// ResolveError
///

#[derive(Debug, ThisError)]
pub enum ResolveError {
    #[error(transparent)]
    InvalidField(#[from] NodeError),

    #[error("invalid target '{name}': {reason}")]
    InvalidTarget { name: String, reason: String },

    #[error("override group '{0}' does not match a declared target")]
    UnknownTarget(String),

    #[error("duplicate config group '{name}' for flavor '{flavor}'")]
    DuplicateGroup { name: String, flavor: String },

    #[error("inconsistent shape: {0}")]
    InconsistentShape(ErrorTree),
}

///
/// ResolvedConfig
///
/// Final field set for one target after override resolution.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ResolvedConfig {
    pub target: String,
    pub fields: BTreeMap<String, FieldSpec>,
}

impl ResolvedConfig {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    /// Fields that satisfy the common declaration.
    pub fn shared_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.values().filter(|f| !f.target_specific)
    }

    /// Fields that exist only for this target.
    pub fn own_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.values().filter(|f| f.target_specific)
    }
}

///
/// DeclarationSet
///
/// The common declaration-only set: names and kinds, no values.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct DeclarationSet {
    pub fields: BTreeMap<String, Kind>,
}

impl DeclarationSet {
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }
}

///
/// Resolution
///
/// Output of one resolve pass: targets sorted by name for deterministic
/// emission.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Resolution {
    pub common: DeclarationSet,
    pub targets: Vec<ResolvedConfig>,
}

/// Resolve every declared target against the authored override groups.
///
/// Precedence, low to high: plain defaults, target overrides, flavor-wide
/// defaults, flavor-scoped target overrides. Flavor matching is exact and
/// case-sensitive; an empty active flavor applies no flavored group. A
/// missing defaults group resolves against an empty base.
pub fn resolve(
    targets: &[String],
    groups: &[ConfigGroup],
    flavor: &str,
    templates: &TemplateTable,
) -> Result<Resolution, ResolveError> {
    let declared: BTreeSet<&str> = targets.iter().map(String::as_str).collect();
    for name in &declared {
        validate::naming::validate_target_name(name).map_err(|reason| {
            ResolveError::InvalidTarget {
                name: (*name).to_string(),
                reason,
            }
        })?;
    }

    let layers = Layers::split(groups, flavor, &declared)?;

    // effective defaults scope, also the source of the common declarations
    let mut base: BTreeMap<String, FieldSpec> = BTreeMap::new();
    apply_group(&mut base, layers.plain_defaults, templates)?;
    apply_group(&mut base, layers.flavor_defaults, templates)?;

    let mut resolved = Vec::with_capacity(declared.len());
    for target in &declared {
        let mut fields: BTreeMap<String, FieldSpec> = BTreeMap::new();
        apply_group(&mut fields, layers.plain_defaults, templates)?;
        apply_group(&mut fields, layers.plain_targets.get(target).copied(), templates)?;
        apply_group(&mut fields, layers.flavor_defaults, templates)?;
        apply_group(&mut fields, layers.flavor_targets.get(target).copied(), templates)?;

        // a name outside both defaults scopes exists only for this target
        for (name, field) in &mut fields {
            field.target_specific = !base.contains_key(name);
        }

        resolved.push(ResolvedConfig {
            target: (*target).to_string(),
            fields,
        });
    }

    let common = DeclarationSet {
        fields: base.iter().map(|(n, f)| (n.clone(), f.kind)).collect(),
    };

    validate::validate_resolution(&common, &resolved)
        .map_err(ResolveError::InconsistentShape)?;

    Ok(Resolution {
        common,
        targets: resolved,
    })
}

///
/// Layers
///
/// The four precedence layers an authored group list splits into. Groups for
/// an inactive flavor are dropped here and never applied.
///

#[derive(Default)]
struct Layers<'a> {
    plain_defaults: Option<&'a ConfigGroup>,
    flavor_defaults: Option<&'a ConfigGroup>,
    plain_targets: BTreeMap<&'a str, &'a ConfigGroup>,
    flavor_targets: BTreeMap<&'a str, &'a ConfigGroup>,
}

impl<'a> Layers<'a> {
    fn split(
        groups: &'a [ConfigGroup],
        flavor: &str,
        declared: &BTreeSet<&str>,
    ) -> Result<Self, ResolveError> {
        let mut layers = Self::default();

        for group in groups {
            let flavored = !group.flavor.is_empty();
            if flavored && group.flavor != flavor {
                continue;
            }
            if !group.is_defaults() && !declared.contains(group.name.as_str()) {
                return Err(ResolveError::UnknownTarget(group.name.clone()));
            }

            let duplicate = match (group.is_defaults(), flavored) {
                (true, false) => layers.plain_defaults.replace(group).is_some(),
                (true, true) => layers.flavor_defaults.replace(group).is_some(),
                (false, false) => layers
                    .plain_targets
                    .insert(group.name.as_str(), group)
                    .is_some(),
                (false, true) => layers
                    .flavor_targets
                    .insert(group.name.as_str(), group)
                    .is_some(),
            };
            if duplicate {
                return Err(ResolveError::DuplicateGroup {
                    name: group.name.clone(),
                    flavor: group.flavor.clone(),
                });
            }
        }

        Ok(layers)
    }
}

// Overlay one group onto the accumulating field map. Later layers replace
// whole fields, re-classifying their raw values.
fn apply_group(
    fields: &mut BTreeMap<String, FieldSpec>,
    group: Option<&ConfigGroup>,
    templates: &TemplateTable,
) -> Result<(), NodeError> {
    let Some(group) = group else { return Ok(()) };

    for (name, raw) in &group.fields {
        let spec = FieldSpec::new(&group.name, name, raw, templates)?;
        fields.insert(name.clone(), spec);
    }

    Ok(())
}
