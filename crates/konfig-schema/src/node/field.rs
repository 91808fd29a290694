use crate::{classify, prelude::*, validate::naming::validate_ident};

///
/// FieldSpec
///
/// One configuration entry after classification. Values stay in their raw
/// authored form; the kind's template turns them into Rust literals at
/// emission time.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: Kind,
    pub raw: String,

    /// Set during resolution when the name exists in no defaults scope.
    pub target_specific: bool,
}

impl FieldSpec {
    /// Classify a raw value authored inside `group` into a field.
    pub fn new(
        group: &str,
        name: &str,
        raw: &str,
        templates: &TemplateTable,
    ) -> Result<Self, NodeError> {
        validate_ident(name).map_err(|reason| NodeError::InvalidField {
            group: group.to_string(),
            field: name.to_string(),
            reason,
        })?;

        let (kind, _) = classify::classify(raw, templates);

        Ok(Self {
            name: name.to_string(),
            kind,
            raw: raw.to_string(),
            target_specific: false,
        })
    }

    /// Render the raw value as a Rust literal via the kind's template.
    #[must_use]
    pub fn render(&self, templates: &TemplateTable) -> String {
        templates.get(self.kind).render(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: TemplateTable = TemplateTable::DEFAULT;

    #[test]
    fn construction_classifies_the_raw_value() {
        let field = FieldSpec::new("defaults", "debug", "false", &TABLE).unwrap();

        assert_eq!(field.kind, Kind::Bool);
        assert_eq!(field.render(&TABLE), "false");
        assert!(!field.target_specific);
    }

    #[test]
    fn empty_name_is_rejected_with_group_context() {
        let err = FieldSpec::new("ios", "", "1", &TABLE).unwrap_err();
        let NodeError::InvalidField { group, field, .. } = err;

        assert_eq!(group, "ios");
        assert_eq!(field, "");
    }

    #[test]
    fn non_identifier_names_are_rejected() {
        assert!(FieldSpec::new("defaults", "api key", "x", &TABLE).is_err());
        assert!(FieldSpec::new("defaults", "1key", "x", &TABLE).is_err());
        assert!(FieldSpec::new("defaults", "fn", "x", &TABLE).is_err());
    }
}
