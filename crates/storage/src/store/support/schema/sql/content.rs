#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE TABLE IF NOT EXISTS chapter_content (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          chapter_ref INTEGER NOT NULL UNIQUE REFERENCES tree_nodes(id) ON DELETE CASCADE,
          content TEXT NOT NULL DEFAULT ''
        );
"#;
