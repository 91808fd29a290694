mod field;
mod group;

pub use field::FieldSpec;
pub use group::ConfigGroup;

use thiserror::Error as ThisError;

///
/// NodeError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum NodeError {
    #[error("invalid field '{field}' in group '{group}': {reason}")]
    InvalidField {
        group: String,
        field: String,
        reason: String,
    },
}
