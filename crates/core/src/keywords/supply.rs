#![forbid(unsafe_code)]

pub const ENUM_LABEL_SEPARATOR: &str = ";";

pub fn parse_enum_labels(supply: &str) -> Vec<String> {
    supply
        .split(ENUM_LABEL_SEPARATOR)
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_enum_labels<S: AsRef<str>>(labels: &[S]) -> String {
    labels
        .iter()
        .map(|label| label.as_ref().trim())
        .filter(|label| !label.is_empty())
        .collect::<Vec<_>>()
        .join(ENUM_LABEL_SEPARATOR)
}

pub fn enum_label(supply: &str, ordinal: i64) -> Option<String> {
    let index = usize::try_from(ordinal).ok()?;
    parse_enum_labels(supply).into_iter().nth(index)
}
