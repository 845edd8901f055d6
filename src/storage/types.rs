//! Type lookup table queries.
//!
//! The table is reference data: filled once from the upstream type list and
//! read-only afterwards.

use super::db::{Database, DatabaseError};
use super::models::PokemonType;

impl Database {
    /// Insert type names that are not already present.
    ///
    /// Returns the number of newly created rows. Idempotent.
    pub async fn seed_types(&self, names: &[String]) -> Result<u64, DatabaseError> {
        let mut created = 0;
        for name in names {
            let result =
                sqlx::query("INSERT OR IGNORE INTO pokemon_types (description) VALUES (?)")
                    .bind(name)
                    .execute(self.pool())
                    .await?;
            created += result.rows_affected();
        }
        Ok(created)
    }

    /// List all known types.
    pub async fn list_types(&self) -> Result<Vec<PokemonType>, DatabaseError> {
        let types =
            sqlx::query_as::<_, PokemonType>("SELECT * FROM pokemon_types ORDER BY description")
                .fetch_all(self.pool())
                .await?;

        Ok(types)
    }
}
