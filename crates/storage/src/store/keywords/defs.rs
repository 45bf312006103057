#![forbid(unsafe_code)]

use super::*;

impl SqliteStore {
    pub fn keyword_def_root(&self) -> Result<DefId, StoreError> {
        def_root(&self.conn)
    }

    pub fn keyword_tables(&self) -> Result<Vec<KeywordTableDef>, StoreError> {
        load_table_defs(&self.conn)
    }

    pub fn keyword_table(&self, table: DefId) -> Result<KeywordTableDef, StoreError> {
        load_table_def(&self.conn, table)
    }

    pub fn keyword_table_by_name(&self, name: &str) -> Result<Option<KeywordTableDef>, StoreError> {
        table_def_by_name(&self.conn, name.trim())
    }

    pub fn keyword_fields(&self, table: DefId) -> Result<Vec<KeywordFieldDef>, StoreError> {
        load_table_def(&self.conn, table)?;
        load_table_fields(&self.conn, table)
    }

    pub fn keyword_field(&self, field: DefId) -> Result<KeywordFieldDef, StoreError> {
        load_field_def(&self.conn, field)
    }
}
