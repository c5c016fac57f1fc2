//! Repository layer for database operations

pub mod pos_checks;
pub mod revenue_days;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub revenue_days: revenue_days::RevenueDaysRepository,
    pub pos_checks: pos_checks::PosChecksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            revenue_days: revenue_days::RevenueDaysRepository::new(pool.clone()),
            pos_checks: pos_checks::PosChecksRepository::new(pool.clone()),
            pool,
        }
    }
}
