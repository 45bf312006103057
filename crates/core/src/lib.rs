#![forbid(unsafe_code)]

pub mod keywords;

pub mod ids {
    macro_rules! row_handle {
        ($name:ident) => {
            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
            pub struct $name(i64);

            impl $name {
                pub const fn new(value: i64) -> Self {
                    Self(value)
                }

                pub const fn get(self) -> i64 {
                    self.0
                }
            }

            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.0)
                }
            }
        };
    }

    // Opaque handles: each wraps the INTEGER primary key of its owning relation.
    row_handle!(NodeId);
    row_handle!(PointId);
    row_handle!(DefId);
    row_handle!(RowId);
}

pub mod model {
    /// Structural node types of the story outline.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum NodeKind {
        Novel,
        Volume,
        Chapter,
        Storyblock,
        Keypoint,
        Despline,
    }

    impl NodeKind {
        pub const ALL: [NodeKind; 6] = [
            NodeKind::Novel,
            NodeKind::Volume,
            NodeKind::Chapter,
            NodeKind::Storyblock,
            NodeKind::Keypoint,
            NodeKind::Despline,
        ];

        pub fn as_str(self) -> &'static str {
            match self {
                NodeKind::Novel => "novel",
                NodeKind::Volume => "volume",
                NodeKind::Chapter => "chapter",
                NodeKind::Storyblock => "storyblock",
                NodeKind::Keypoint => "keypoint",
                NodeKind::Despline => "despline",
            }
        }

        pub fn parse(value: &str) -> Option<Self> {
            Self::ALL
                .into_iter()
                .find(|kind| kind.as_str() == value.trim())
        }

        /// The only node type allowed to own this one; `None` for the sentinel root.
        pub fn parent_kind(self) -> Option<NodeKind> {
            match self {
                NodeKind::Novel => None,
                NodeKind::Volume => Some(NodeKind::Novel),
                NodeKind::Chapter | NodeKind::Storyblock | NodeKind::Despline => {
                    Some(NodeKind::Volume)
                }
                NodeKind::Keypoint => Some(NodeKind::Storyblock),
            }
        }

        pub fn accepts_child(self, child: NodeKind) -> bool {
            self.child_kinds().contains(&child)
        }

        pub fn child_kinds(self) -> &'static [NodeKind] {
            match self {
                NodeKind::Novel => &[NodeKind::Volume],
                NodeKind::Volume => &[NodeKind::Chapter, NodeKind::Storyblock, NodeKind::Despline],
                NodeKind::Storyblock => &[NodeKind::Keypoint],
                NodeKind::Chapter | NodeKind::Keypoint | NodeKind::Despline => &[],
            }
        }
    }

    impl std::fmt::Display for NodeKind {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.as_str())
        }
    }

    /// Row tag of the keyword definition tree.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum DefKind {
        Root,
        Table,
        Field,
    }

    impl DefKind {
        pub fn as_str(self) -> &'static str {
            match self {
                DefKind::Root => "root",
                DefKind::Table => "table",
                DefKind::Field => "field",
            }
        }

        pub fn parse(value: &str) -> Option<Self> {
            match value.trim() {
                "root" => Some(DefKind::Root),
                "table" => Some(DefKind::Table),
                "field" => Some(DefKind::Field),
                _ => None,
            }
        }
    }

}
