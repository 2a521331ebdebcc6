//! Data access layer repositories.
//!
//! Repositories are generic over [`sea_orm::ConnectionTrait`] so the lifecycle services
//! can run the same queries on a plain connection or inside a transaction.

pub mod donation;
pub mod notification;
pub mod rating;
pub mod request;
pub mod user;

use sea_orm::{ConnectionTrait, DbBackend, EntityTrait, QuerySelect, Select};

/// Adds `FOR UPDATE` to `query` on backends with row level locks.
///
/// SQLite locks the whole database for the duration of a write transaction instead.
pub(crate) fn for_update<E, C>(query: Select<E>, db: &C) -> Select<E>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    match db.get_database_backend() {
        DbBackend::Sqlite => query,
        _ => query.lock_exclusive(),
    }
}
