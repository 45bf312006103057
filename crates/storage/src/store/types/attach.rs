#![forbid(unsafe_code)]

use sl_core::ids::{NodeId, PointId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttachPointRow {
    pub id: PointId,
    pub despline: NodeId,
    pub chapter: Option<NodeId>,
    pub storyblock: Option<NodeId>,
    pub order_index: usize,
    pub title: String,
    pub description: String,
}

impl AttachPointRow {
    /// A point bound to neither a chapter nor a storyblock is still open.
    pub fn is_open(&self) -> bool {
        self.chapter.is_none() && self.storyblock.is_none()
    }
}

#[derive(Clone, Debug)]
pub struct InsertPointRequest {
    pub despline: NodeId,
    pub index: usize,
    pub title: String,
    pub description: String,
}

impl InsertPointRequest {
    pub fn new(despline: NodeId, index: usize, title: impl Into<String>) -> Self {
        Self {
            despline,
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
