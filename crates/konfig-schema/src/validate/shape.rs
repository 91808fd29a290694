//! Cross-target shape contract: every shared field keeps one name and one
//! kind across the common declaration and every target implementation.

use crate::{
    err,
    error::ErrorTree,
    resolve::{DeclarationSet, ResolvedConfig},
};

/// Verify every common field appears with an identical kind in every target.
/// A mismatch reports the field with the kind seen in each target.
pub(crate) fn validate_shape(
    common: &DeclarationSet,
    targets: &[ResolvedConfig],
    errs: &mut ErrorTree,
) {
    for (name, kind) in &common.fields {
        let mut mismatch = false;
        let mut per_target = Vec::with_capacity(targets.len());

        for config in targets {
            match config.get(name) {
                Some(field) => {
                    mismatch |= field.kind != *kind;
                    per_target.push(format!("{}: {}", config.target, field.kind));
                }
                None => {
                    mismatch = true;
                    per_target.push(format!("{}: missing", config.target));
                }
            }
        }

        if mismatch {
            err!(
                errs,
                "field '{name}' is {kind} in the common declaration but resolved as {}",
                per_target.join(", "),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{node::FieldSpec, prelude::*};

    fn config(target: &str, fields: &[(&str, Kind)]) -> ResolvedConfig {
        ResolvedConfig {
            target: target.to_string(),
            fields: fields
                .iter()
                .map(|(name, kind)| {
                    (
                        (*name).to_string(),
                        FieldSpec {
                            name: (*name).to_string(),
                            kind: *kind,
                            raw: String::new(),
                            target_specific: false,
                        },
                    )
                })
                .collect(),
        }
    }

    fn common(fields: &[(&str, Kind)]) -> DeclarationSet {
        DeclarationSet {
            fields: fields
                .iter()
                .map(|(name, kind)| ((*name).to_string(), *kind))
                .collect(),
        }
    }

    #[test]
    fn matching_shapes_pass() {
        let common = common(&[("debug", Kind::Bool)]);
        let targets = [
            config("android", &[("debug", Kind::Bool)]),
            config("ios", &[("debug", Kind::Bool)]),
        ];

        let mut errs = ErrorTree::new();
        validate_shape(&common, &targets, &mut errs);
        assert!(errs.is_empty());
    }

    #[test]
    fn a_missing_field_is_a_shape_violation() {
        let common = common(&[("debug", Kind::Bool)]);
        let targets = [config("ios", &[])];

        let mut errs = ErrorTree::new();
        validate_shape(&common, &targets, &mut errs);
        assert_eq!(errs.len(), 1);
        assert!(errs.to_string().contains("ios: missing"));
    }

    #[test]
    fn extra_target_fields_are_not_shape_violations() {
        let common = common(&[]);
        let targets = [config("ios", &[("apiKey", Kind::Str)])];

        let mut errs = ErrorTree::new();
        validate_shape(&common, &targets, &mut errs);
        assert!(errs.is_empty());
    }
}
