//! Parsing of compound Swift names like `foo(a:b:)` or `foo(_:)` into a base
//! name plus a sequence of parameter labels.

use crate::error::RenameError;

/// One parameter slot in a compound name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parameter {
    /// An externally labelled parameter, e.g. `a` in `foo(a:)`.
    Label(String),
    /// An unlabelled parameter, written `_` in compound-name syntax.
    Wildcard,
}

impl Parameter {
    fn parse(segment: &str) -> Self {
        if segment == "_" {
            Parameter::Wildcard
        } else {
            Parameter::Label(segment.to_string())
        }
    }
}

/// A parsed compound name: a base name plus zero or more parameter slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundName {
    pub base_name: String,
    pub parameters: Vec<Parameter>,
}

impl CompoundName {
    /// Parse `name`. Fails with [`RenameError::InvalidName`] if a `(` has
    /// no matching closing `)`, or a `)` is present but is not the final
    /// character.
    pub fn parse(name: &str) -> Result<Self, RenameError> {
        let Some(open) = name.find('(') else {
            return Ok(CompoundName { base_name: name.to_string(), parameters: Vec::new() });
        };

        if !name.ends_with(')') {
            return Err(RenameError::InvalidName(name.to_string()));
        }

        let base_name = name[..open].to_string();
        let body = &name[open + 1..name.len() - 1];

        if body.contains(')') || body.contains('(') {
            return Err(RenameError::InvalidName(name.to_string()));
        }

        let parameters = if body.is_empty() {
            Vec::new()
        } else {
            body.split(':')
                .filter(|segment| !segment.is_empty())
                .map(Parameter::parse)
                .collect()
        };

        Ok(CompoundName { base_name, parameters })
    }
}
