#![forbid(unsafe_code)]

mod counters;
mod migrator;
mod rows;
mod schema;
mod siblings;

pub(super) use counters::*;
pub(super) use migrator::*;
pub(super) use rows::*;
pub(super) use schema::migrate_sqlite_schema;
pub(super) use siblings::*;
