//! Literal classification: a raw value and nothing else in, a kind and its
//! rendering template out. Total by construction.

use crate::types::{Kind, Template, TemplateTable};

/// Classify a raw literal and pick its rendering template.
#[must_use]
pub fn classify<'t>(raw: &str, templates: &'t TemplateTable) -> (Kind, &'t Template) {
    let kind = kind_of(raw);

    (kind, templates.get(kind))
}

// First match wins: bool, then i32, then i64, then string.
fn kind_of(raw: &str) -> Kind {
    if raw == "true" || raw == "false" {
        return Kind::Bool;
    }
    if is_integer_literal(raw) {
        if raw.parse::<i32>().is_ok() {
            return Kind::Int;
        }
        if raw.parse::<i64>().is_ok() {
            return Kind::Long;
        }
    }

    Kind::Str
}

// Only forms that survive as Rust integer literals count: an optional leading
// minus and ASCII digits. Anything else (signs, whitespace, separators) is a
// string.
fn is_integer_literal(raw: &str) -> bool {
    let digits = raw.strip_prefix('-').unwrap_or(raw);

    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TABLE: TemplateTable = TemplateTable::DEFAULT;

    fn kind(raw: &str) -> Kind {
        classify(raw, &TABLE).0
    }

    #[test]
    fn bool_literals_are_case_sensitive() {
        assert_eq!(kind("true"), Kind::Bool);
        assert_eq!(kind("false"), Kind::Bool);
        assert_eq!(kind("True"), Kind::Str);
        assert_eq!(kind("FALSE"), Kind::Str);
    }

    #[test]
    fn i32_bounds_stay_int() {
        assert_eq!(kind("2147483647"), Kind::Int);
        assert_eq!(kind("-2147483648"), Kind::Int);
    }

    #[test]
    fn beyond_i32_becomes_long() {
        assert_eq!(kind("2147483648"), Kind::Long);
        assert_eq!(kind("-2147483649"), Kind::Long);
        assert_eq!(kind("9223372036854775807"), Kind::Long);
    }

    #[test]
    fn beyond_i64_falls_back_to_str() {
        assert_eq!(kind("9223372036854775808"), Kind::Str);
    }

    #[test]
    fn non_literal_forms_are_str() {
        assert_eq!(kind(""), Kind::Str);
        assert_eq!(kind("+5"), Kind::Str);
        assert_eq!(kind(" 5"), Kind::Str);
        assert_eq!(kind("1_000"), Kind::Str);
        assert_eq!(kind("1.5"), Kind::Str);
        assert_eq!(kind("https://example.com"), Kind::Str);
    }

    proptest! {
        #[test]
        fn every_i32_classifies_as_int(v: i32) {
            prop_assert_eq!(kind(&v.to_string()), Kind::Int);
        }

        #[test]
        fn every_i64_outside_i32_classifies_as_long(
            v in prop_oneof![
                i64::from(i32::MAX) + 1..=i64::MAX,
                i64::MIN..=i64::from(i32::MIN) - 1,
            ]
        ) {
            prop_assert_eq!(kind(&v.to_string()), Kind::Long);
        }

        #[test]
        fn int_and_long_round_trip_through_render(v: i64) {
            let raw = v.to_string();
            let (k, template) = classify(&raw, &TABLE);
            let rendered = template.render(&raw);
            let parsed = rendered.trim_end_matches("i64").parse::<i64>().unwrap();

            prop_assert!(k.is_numeric());
            prop_assert_eq!(parsed, v);
        }

        #[test]
        fn classification_is_total(raw in ".*") {
            let (_, template) = classify(&raw, &TABLE);
            // rendering never panics either
            let _ = template.render(&raw);
        }

        #[test]
        fn str_render_round_trips(raw in r#"[a-z "\\]{0,24}"#) {
            prop_assume!(kind(&raw) == Kind::Str);
            let rendered = TABLE.get(Kind::Str).render(&raw);
            let unescaped = unquote(&rendered);

            prop_assert_eq!(unescaped, raw);
        }
    }

    // minimal Rust string-literal parser for the round-trip property
    fn unquote(lit: &str) -> String {
        let inner = lit.strip_prefix('"').unwrap().strip_suffix('"').unwrap();
        let mut out = String::new();
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                out.push(chars.next().unwrap());
            } else {
                out.push(c);
            }
        }

        out
    }
}
