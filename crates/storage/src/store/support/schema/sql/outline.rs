#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        -- Typed ordered outline tree. `order_index` is contiguous per (parent, type).
        CREATE TABLE IF NOT EXISTS tree_nodes (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          type TEXT NOT NULL,
          parent INTEGER REFERENCES tree_nodes(id) ON DELETE CASCADE,
          order_index INTEGER NOT NULL,
          title TEXT NOT NULL DEFAULT '',
          description TEXT NOT NULL DEFAULT '',
          CHECK(order_index >= 0),
          CHECK(parent IS NOT NULL OR type = 'novel')
        );

        -- Attach points of a despline. `order_index` is contiguous per despline_ref.
        CREATE TABLE IF NOT EXISTS attach_points (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          despline_ref INTEGER NOT NULL REFERENCES tree_nodes(id) ON DELETE CASCADE,
          chapter_ref INTEGER REFERENCES tree_nodes(id) ON DELETE CASCADE,
          storyblock_ref INTEGER REFERENCES tree_nodes(id) ON DELETE CASCADE,
          order_index INTEGER NOT NULL,
          title TEXT NOT NULL DEFAULT '',
          description TEXT NOT NULL DEFAULT '',
          CHECK(order_index >= 0)
        );
"#;
