//! Collection member queries: favorites and the 6-member battle team.

use super::db::{unix_timestamp, Database, DatabaseError};
use super::models::{CollectionMember, NewMember};

/// Maximum number of battle-team members per user.
pub const TEAM_CAPACITY: i64 = 6;

/// Outcome of a team insert attempt.
#[derive(Debug)]
pub enum TeamInsert {
    Added(CollectionMember),
    TeamFull,
}

impl Database {
    /// Add a battle-team member, enforcing the per-owner cap.
    ///
    /// The capacity check and the insert run as one guarded statement;
    /// SQLite executes it atomically, so two adds racing at count 5 cannot
    /// both land.
    pub async fn add_team_member(
        &self,
        owner_id: i64,
        member: &NewMember,
    ) -> Result<TeamInsert, DatabaseError> {
        let now = unix_timestamp();

        let result = sqlx::query(
            "INSERT INTO collection_members \
                 (owner_id, type_id, code, image_url, name, is_team_member, is_favorite, created_at, updated_at) \
             SELECT ?, ?, ?, ?, ?, 1, ?, ?, ? \
             WHERE (SELECT COUNT(*) FROM collection_members \
                    WHERE owner_id = ? AND is_team_member = 1) < ?",
        )
        .bind(owner_id)
        .bind(member.type_id)
        .bind(&member.code)
        .bind(&member.image_url)
        .bind(&member.name)
        .bind(member.is_favorite)
        .bind(now)
        .bind(now)
        .bind(owner_id)
        .bind(TEAM_CAPACITY)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Ok(TeamInsert::TeamFull);
        }

        let member = self.get_member(result.last_insert_rowid()).await?;
        Ok(TeamInsert::Added(member))
    }

    /// Add a favorite. Favorites have no capacity limit.
    pub async fn add_favorite(
        &self,
        owner_id: i64,
        member: &NewMember,
    ) -> Result<CollectionMember, DatabaseError> {
        let now = unix_timestamp();

        let result = sqlx::query(
            "INSERT INTO collection_members \
                 (owner_id, type_id, code, image_url, name, is_team_member, is_favorite, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, 1, ?, ?)",
        )
        .bind(owner_id)
        .bind(member.type_id)
        .bind(&member.code)
        .bind(&member.image_url)
        .bind(&member.name)
        .bind(member.is_team_member)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await?;

        self.get_member(result.last_insert_rowid()).await
    }

    /// Get a collection member by ID.
    pub async fn get_member(&self, id: i64) -> Result<CollectionMember, DatabaseError> {
        sqlx::query_as::<_, CollectionMember>("SELECT * FROM collection_members WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Member {id}")))
    }

    /// Delete a team membership row.
    ///
    /// Ownership and the team flag gate the delete in the same statement, so
    /// a row belonging to another user reads as absent.
    pub async fn remove_team_member(&self, owner_id: i64, id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "DELETE FROM collection_members \
             WHERE id = ? AND owner_id = ? AND is_team_member = 1",
        )
        .bind(id)
        .bind(owner_id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("Member {id}")));
        }
        Ok(())
    }

    /// Delete a favorite row, gated on ownership and the favorite flag.
    pub async fn remove_favorite(&self, owner_id: i64, id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "DELETE FROM collection_members \
             WHERE id = ? AND owner_id = ? AND is_favorite = 1",
        )
        .bind(id)
        .bind(owner_id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("Member {id}")));
        }
        Ok(())
    }

    /// List an owner's battle team.
    pub async fn list_team(&self, owner_id: i64) -> Result<Vec<CollectionMember>, DatabaseError> {
        let members = sqlx::query_as::<_, CollectionMember>(
            "SELECT * FROM collection_members \
             WHERE owner_id = ? AND is_team_member = 1 ORDER BY id",
        )
        .bind(owner_id)
        .fetch_all(self.pool())
        .await?;

        Ok(members)
    }

    /// List an owner's favorites.
    pub async fn list_favorites(
        &self,
        owner_id: i64,
    ) -> Result<Vec<CollectionMember>, DatabaseError> {
        let members = sqlx::query_as::<_, CollectionMember>(
            "SELECT * FROM collection_members \
             WHERE owner_id = ? AND is_favorite = 1 ORDER BY id",
        )
        .bind(owner_id)
        .fetch_all(self.pool())
        .await?;

        Ok(members)
    }

    /// Count an owner's team members.
    pub async fn count_team(&self, owner_id: i64) -> Result<i64, DatabaseError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM collection_members \
             WHERE owner_id = ? AND is_team_member = 1",
        )
        .bind(owner_id)
        .fetch_one(self.pool())
        .await?;

        Ok(count.0)
    }
}
