#![forbid(unsafe_code)]

use sl_core::ids::NodeId;
use sl_core::model::NodeKind;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeNodeRow {
    pub id: NodeId,
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub order_index: usize,
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug)]
pub struct InsertChildRequest {
    pub parent: NodeId,
    pub kind: NodeKind,
    /// Positions at or past the current sibling count append.
    pub index: usize,
    pub title: String,
    pub description: String,
}

impl InsertChildRequest {
    pub fn new(parent: NodeId, kind: NodeKind, index: usize, title: impl Into<String>) -> Self {
        Self {
            parent,
            kind,
            index,
            title: title.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
