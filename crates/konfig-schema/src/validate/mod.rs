//! Resolution validation orchestration and shared helpers.

pub mod naming;
pub mod reserved;
pub mod shape;

use crate::{
    error::ErrorTree,
    resolve::{DeclarationSet, ResolvedConfig},
};

/// Run full resolution validation in a staged, deterministic order.
pub(crate) fn validate_resolution(
    common: &DeclarationSet,
    targets: &[ResolvedConfig],
) -> Result<(), ErrorTree> {
    // Phase 1: per-set invariants (rendered constant names stay unique).
    let mut errors = ErrorTree::new();
    for config in targets {
        naming::validate_const_names(config, &mut errors);
    }

    // Phase 2: enforce the cross-target shape contract.
    shape::validate_shape(common, targets, &mut errors);

    errors.result()
}
