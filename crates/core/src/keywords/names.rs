#![forbid(unsafe_code)]

const MAX_RELATION_NAME_LEN: usize = 64;
const GENERATED_PREFIX: &str = "kw_";

/// Physical relation identifier of a keyword table.
///
/// Only `[a-z0-9_]` is accepted, first char a lowercase letter, so the name can be
/// spliced into DDL without escaping surprises.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RelationName(String);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelationNameError {
    Empty,
    TooLong,
    InvalidFirstChar,
    InvalidChar { ch: char, index: usize },
}

impl RelationName {
    pub fn try_new(value: impl Into<String>) -> Result<Self, RelationNameError> {
        let value = value.into();
        validate_relation_name(&value)?;
        Ok(Self(value))
    }

    pub fn generated(seq: i64) -> Self {
        Self(format!("{GENERATED_PREFIX}{seq:06}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }

    pub fn holding(&self) -> Self {
        Self(format!("{}__hold", self.0))
    }
}

impl std::fmt::Display for RelationName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn validate_relation_name(value: &str) -> Result<(), RelationNameError> {
    if value.is_empty() {
        return Err(RelationNameError::Empty);
    }
    if value.len() > MAX_RELATION_NAME_LEN {
        return Err(RelationNameError::TooLong);
    }
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return Err(RelationNameError::Empty);
    };
    if !first.is_ascii_lowercase() {
        return Err(RelationNameError::InvalidFirstChar);
    }
    for (index, ch) in value.chars().enumerate().skip(1) {
        if !(ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_') {
            return Err(RelationNameError::InvalidChar { ch, index });
        }
    }
    Ok(())
}

/// Column name of the field at `position` in a keyword relation.
pub fn field_column(position: usize) -> String {
    format!("field_{position}")
}
