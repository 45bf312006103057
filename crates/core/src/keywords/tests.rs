use super::*;

#[test]
fn value_type_storage_tags() {
    for value_type in ValueType::ALL {
        assert_eq!(ValueType::parse(value_type.as_str()), Some(value_type));
    }
    assert_eq!(ValueType::parse("blob"), None);
}

#[test]
fn enum_labels_skip_blank_segments() {
    assert_eq!(
        parse_enum_labels("warrior; mage;;rogue ;"),
        vec!["warrior".to_string(), "mage".to_string(), "rogue".to_string()]
    );
    assert!(parse_enum_labels("").is_empty());
    assert_eq!(join_enum_labels(&["warrior", " mage ", ""]), "warrior;mage");
}

#[test]
fn enum_label_lookup_is_bounds_checked() {
    assert_eq!(enum_label("warrior;mage", 1).as_deref(), Some("mage"));
    assert_eq!(enum_label("warrior;mage", 2), None);
    assert_eq!(enum_label("warrior;mage", -1), None);
}

#[test]
fn relation_name_validation() {
    assert_eq!(RelationName::try_new("").unwrap_err(), RelationNameError::Empty);
    assert_eq!(
        RelationName::try_new("9lives").unwrap_err(),
        RelationNameError::InvalidFirstChar
    );
    assert_eq!(
        RelationName::try_new("bad\"name").unwrap_err(),
        RelationNameError::InvalidChar { ch: '"', index: 3 }
    );
    assert_eq!(
        RelationName::try_new("a".repeat(65)).unwrap_err(),
        RelationNameError::TooLong
    );
    assert!(RelationName::try_new("kw_000001").is_ok());
}

#[test]
fn generated_names_are_valid_and_quoted() {
    let name = RelationName::generated(42);
    assert_eq!(name.as_str(), "kw_000042");
    assert!(RelationName::try_new(name.as_str()).is_ok());
    assert_eq!(name.quoted(), "\"kw_000042\"");
    assert_eq!(name.holding().as_str(), "kw_000042__hold");
    assert_eq!(field_column(3), "field_3");
}
