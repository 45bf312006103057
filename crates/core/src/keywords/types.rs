#![forbid(unsafe_code)]

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    Number,
    String,
    Enum,
    TableRef,
}

impl ValueType {
    pub const ALL: [ValueType; 4] = [
        ValueType::Number,
        ValueType::String,
        ValueType::Enum,
        ValueType::TableRef,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Enum => "enum",
            ValueType::TableRef => "table_ref",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == value.trim())
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
