#![forbid(unsafe_code)]

use super::*;

mod adjust;
mod defs;
mod domain;
mod items;
mod query;
mod tables;

const RELATION_COUNTER: &str = "keyword_relation";

fn tables_of(root: DefId) -> SiblingSet {
    SiblingSet::DefChildren {
        parent: root,
        kind: DefKind::Table,
    }
}

fn field_at(fields: &[KeywordFieldDef], position: usize) -> Result<&KeywordFieldDef, StoreError> {
    fields.get(position).ok_or(StoreError::IndexOutOfRange {
        index: position,
        count: fields.len(),
    })
}
