mod object;

pub use object::{EmitMode, ObjectBuilder};

use konfig_schema::{resolve::Resolution, types::TemplateTable};

///
/// Visibility
///
/// Generation-wide visibility of emitted objects and properties.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Visibility {
    /// `pub`
    Exposed,
    /// `pub(crate)`
    #[default]
    Internal,
}

///
/// GenerationUnit
///
/// Aggregate handed to the emitter: the common declaration set plus one
/// resolved field set per target, with the generation-wide settings.
/// Constructed once per pass, consumed and discarded.
///

#[derive(Clone, Debug)]
pub struct GenerationUnit {
    /// Rust path of the module hosting the common declaration unit.
    pub package: String,
    pub object: String,
    pub visibility: Visibility,
    pub resolution: Resolution,
}

///
/// GeneratedUnit
///
/// One self-contained generated source artifact.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedUnit {
    /// Owning target; `None` for the common declaration unit.
    pub target: Option<String>,
    pub file_name: String,
    pub source: String,
}

/// Emit every unit of a generation pass: the common declaration first, then
/// one implementation per target.
#[must_use]
pub fn generate(unit: &GenerationUnit, templates: &TemplateTable) -> Vec<GeneratedUnit> {
    let builder = ObjectBuilder::new(unit, templates);

    let mut out = Vec::with_capacity(unit.resolution.targets.len() + 1);
    out.push(builder.emit(EmitMode::Declaration(&unit.resolution.common)));
    for config in &unit.resolution.targets {
        out.push(builder.emit(EmitMode::Implementation(config)));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use konfig_schema::{node::ConfigGroup, resolve::resolve};

    const TABLE: TemplateTable = TemplateTable::DEFAULT;

    fn unit() -> GenerationUnit {
        let groups = vec![
            ConfigGroup::new("defaults").field("debug", "false"),
            ConfigGroup::new("android").field("apiKey", "xyz"),
        ];
        let targets = ["android".to_string(), "ios".to_string()];
        let resolution = resolve(&targets, &groups, "", &TABLE).unwrap();

        GenerationUnit {
            package: "shared_config".to_string(),
            object: "BuildKonfig".to_string(),
            visibility: Visibility::Internal,
            resolution,
        }
    }

    #[test]
    fn a_pass_emits_common_then_each_target_in_order() {
        let units = generate(&unit(), &TABLE);
        let owners: Vec<Option<&str>> = units.iter().map(|u| u.target.as_deref()).collect();

        assert_eq!(owners, [None, Some("android"), Some("ios")]);
    }

    #[test]
    fn file_names_derive_from_the_object_name() {
        let units = generate(&unit(), &TABLE);

        assert!(units.iter().all(|u| u.file_name == "build_konfig.rs"));
    }

    #[test]
    fn every_emitted_unit_is_valid_rust() {
        for generated in generate(&unit(), &TABLE) {
            syn::parse_file(&generated.source).unwrap();
        }
    }
}
