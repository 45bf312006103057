#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE INDEX IF NOT EXISTS idx_tree_nodes_siblings ON tree_nodes(parent, type, order_index);
        CREATE INDEX IF NOT EXISTS idx_attach_points_despline ON attach_points(despline_ref, order_index);
        CREATE INDEX IF NOT EXISTS idx_attach_points_chapter ON attach_points(chapter_ref);
        CREATE INDEX IF NOT EXISTS idx_attach_points_storyblock ON attach_points(storyblock_ref);
        CREATE INDEX IF NOT EXISTS idx_table_defs_siblings ON table_defs(parent, kind, order_index);
        CREATE INDEX IF NOT EXISTS idx_table_defs_supply ON table_defs(kind, supply);
"#;
