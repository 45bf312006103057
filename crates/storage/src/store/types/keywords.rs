#![forbid(unsafe_code)]

use sl_core::ids::{DefId, RowId};
use sl_core::keywords::{RelationName, ValueType};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeywordTableDef {
    pub id: DefId,
    pub name: String,
    pub relation: RelationName,
    pub order_index: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeywordFieldDef {
    pub id: DefId,
    pub table: DefId,
    pub name: String,
    pub value_type: ValueType,
    pub supply: String,
    pub order_index: usize,
}

/// One entry of the column list handed to `keyword_tablefields_adjust`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub value_type: ValueType,
    /// `;`-separated labels for `Enum`, target relation name for `TableRef`.
    pub supply: String,
    /// Old field position whose column data seeds this field; `None` starts empty.
    pub source: Option<usize>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            supply: String::new(),
            source: None,
        }
    }

    pub fn with_supply(mut self, supply: impl Into<String>) -> Self {
        self.supply = supply.into();
        self
    }

    pub fn from_field(mut self, position: usize) -> Self {
        self.source = Some(position);
        self
    }

    /// Spec that keeps an existing field unchanged, sourcing its own column.
    pub fn keep(field: &KeywordFieldDef) -> Self {
        Self {
            name: field.name.clone(),
            value_type: field.value_type,
            supply: field.supply.clone(),
            source: Some(field.order_index),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum KeywordValue {
    Null,
    Number(f64),
    Text(String),
    Ordinal(i64),
    Row(RowId),
}

impl KeywordValue {
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            KeywordValue::Null => None,
            KeywordValue::Number(_) => Some(ValueType::Number),
            KeywordValue::Text(_) => Some(ValueType::String),
            KeywordValue::Ordinal(_) => Some(ValueType::Enum),
            KeywordValue::Row(_) => Some(ValueType::TableRef),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedValue {
    Empty,
    Number(f64),
    Text(String),
    Label(String),
    Reference { id: RowId, name: String },
    /// Transitive resolution of a reference (recursive queries only).
    Record(Box<KeywordRecord>),
    /// Null reference, reference to a vanished row, or an enum ordinal outside the label list.
    Dangling,
}

impl ResolvedValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, ResolvedValue::Empty)
    }

    pub fn display_name(&self) -> Option<&str> {
        match self {
            ResolvedValue::Text(text) | ResolvedValue::Label(text) => Some(text),
            ResolvedValue::Reference { name, .. } => Some(name),
            ResolvedValue::Record(record) => Some(&record.name),
            ResolvedValue::Empty | ResolvedValue::Number(_) | ResolvedValue::Dangling => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct KeywordRecord {
    pub id: RowId,
    pub name: String,
    pub values: Vec<ResolvedValue>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceCandidate {
    pub id: RowId,
    pub name: String,
}
