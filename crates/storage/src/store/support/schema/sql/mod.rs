#![forbid(unsafe_code)]

mod content;
mod core;
mod indexes;
mod keywords;
mod outline;

pub(super) fn full_schema_sql() -> String {
    let mut sql = String::new();
    sql.push_str(core::SQL);
    sql.push_str(outline::SQL);
    sql.push_str(content::SQL);
    sql.push_str(keywords::SQL);
    sql.push_str(indexes::SQL);
    sql
}
