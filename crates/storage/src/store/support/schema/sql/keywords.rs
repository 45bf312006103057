#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        -- Two-level keyword metadata tree: root -> table rows -> field rows.
        -- Table rows keep their physical relation name in `supply`.
        CREATE TABLE IF NOT EXISTS table_defs (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          kind TEXT NOT NULL,
          parent INTEGER REFERENCES table_defs(id) ON DELETE CASCADE,
          order_index INTEGER NOT NULL,
          name TEXT NOT NULL DEFAULT '',
          value_type TEXT,
          supply TEXT NOT NULL DEFAULT '',
          CHECK(order_index >= 0),
          CHECK(kind IN ('root', 'table', 'field')),
          CHECK(kind <> 'field' OR value_type IS NOT NULL)
        );
"#;
