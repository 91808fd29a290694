use crate::prelude::*;
use derive_more::{Display, FromStr};

///
/// Kind
///
/// The closed set of classified field types. Every raw literal maps to
/// exactly one kind; unrecognised input falls through to `Str`.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, PartialEq, Serialize)]
#[remain::sorted]
pub enum Kind {
    Bool,
    Int,
    Long,
    Str,
}

impl Kind {
    /// Rust type the kind declares as in emitted objects.
    #[must_use]
    pub const fn rust_type(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "i32",
            Self::Long => "i64",
            Self::Str => "&'static str",
        }
    }

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Long)
    }
}

///
/// Template
///
/// Kind-specific recipe for rendering a raw value as a Rust literal.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Template {
    pub kind: Kind,
    suffix: &'static str,
    quoted: bool,
}

impl Template {
    #[must_use]
    pub fn render(&self, raw: &str) -> String {
        if self.quoted {
            let mut out = String::with_capacity(raw.len() + 2);
            out.push('"');
            for c in raw.chars() {
                match c {
                    '"' => out.push_str("\\\""),
                    '\\' => out.push_str("\\\\"),
                    _ => out.push(c),
                }
            }
            out.push('"');
            out
        } else {
            format!("{raw}{}", self.suffix)
        }
    }
}

///
/// TemplateTable
///
/// Immutable kind to template registry. Constructed once and passed by
/// reference into classification and emission; never module-level state.
///

#[derive(Clone, Copy, Debug)]
pub struct TemplateTable {
    templates: [Template; 4],
}

impl TemplateTable {
    pub const DEFAULT: Self = Self {
        templates: [
            Template {
                kind: Kind::Bool,
                suffix: "",
                quoted: false,
            },
            Template {
                kind: Kind::Int,
                suffix: "",
                quoted: false,
            },
            Template {
                kind: Kind::Long,
                suffix: "i64",
                quoted: false,
            },
            Template {
                kind: Kind::Str,
                suffix: "",
                quoted: true,
            },
        ],
    };

    #[must_use]
    pub const fn get(&self, kind: Kind) -> &Template {
        match kind {
            Kind::Bool => &self.templates[0],
            Kind::Int => &self.templates[1],
            Kind::Long => &self.templates[2],
            Kind::Str => &self.templates[3],
        }
    }
}

impl Default for TemplateTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}
