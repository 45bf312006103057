#![forbid(unsafe_code)]

use super::*;

mod chapters;
mod edit;
mod insert;
mod navigate;
mod remove;

fn children_of(parent: &TreeNodeRow, kind: NodeKind) -> Result<SiblingSet, StoreError> {
    if !parent.kind.accepts_child(kind) {
        return Err(StoreError::type_mismatch(
            kind.parent_kind().map_or("none", NodeKind::as_str),
            parent.kind,
        ));
    }
    Ok(SiblingSet::TreeChildren {
        parent: parent.id,
        kind,
    })
}

fn siblings_of(node: &TreeNodeRow) -> Option<SiblingSet> {
    node.parent.map(|parent| SiblingSet::TreeChildren {
        parent,
        kind: node.kind,
    })
}
