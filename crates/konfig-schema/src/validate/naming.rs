use crate::{
    MAX_FIELD_NAME_LEN, MAX_TARGET_NAME_LEN, err, error::ErrorTree, resolve::ResolvedConfig,
    validate::reserved::WORDS,
};
use convert_case::{Case, Casing};
use std::collections::BTreeMap;

/// Constant identifier a field name renders to in emitted objects.
#[must_use]
pub fn const_name(name: &str) -> String {
    name.to_case(Case::UpperSnake)
}

// Two authored names must not collapse onto one rendered constant.
pub(crate) fn validate_const_names(config: &ResolvedConfig, errs: &mut ErrorTree) {
    let mut seen: BTreeMap<String, &str> = BTreeMap::new();

    for name in config.fields.keys() {
        let rendered = const_name(name);
        if let Some(prev) = seen.insert(rendered.clone(), name.as_str()) {
            err!(
                errs,
                "fields '{prev}' and '{name}' in target '{}' both render to constant '{rendered}'",
                config.target,
            );
        }
    }
}

/// Ensure an authored field name is a usable Rust identifier.
pub fn validate_ident(ident: &str) -> Result<(), String> {
    if ident.is_empty() {
        return Err("ident is empty".to_string());
    }
    if ident.len() > MAX_FIELD_NAME_LEN {
        return Err(format!(
            "ident '{ident}' exceeds max length {MAX_FIELD_NAME_LEN}"
        ));
    }
    if !is_ident_shaped(ident) {
        return Err(format!(
            "ident '{ident}' must be ASCII letters, digits, and underscores, not starting with a digit"
        ));
    }

    // reserved?
    is_reserved(ident)?;

    Ok(())
}

/// Ensure a target name is non-empty, ASCII, and within the maximum length.
pub fn validate_target_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("target name is empty".to_string());
    }
    if name.len() > MAX_TARGET_NAME_LEN {
        return Err(format!(
            "target name '{name}' exceeds max length {MAX_TARGET_NAME_LEN}"
        ));
    }
    if !is_ident_shaped(name) {
        return Err(format!(
            "target name '{name}' must be ASCII letters, digits, and underscores, not starting with a digit"
        ));
    }

    Ok(())
}

fn is_ident_shaped(ident: &str) -> bool {
    let mut chars = ident.chars();
    let leading_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');

    leading_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_reserved(word: &str) -> Result<(), String> {
    if WORDS.contains(word) {
        return Err(format!("the word '{word}' is reserved"));
    }

    Ok(())
}
