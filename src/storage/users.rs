//! User queries.

use super::db::{unix_timestamp, Database, DatabaseError};
use super::models::User;

impl Database {
    /// Create a new user.
    ///
    /// The admin flag is derived inside the insert statement from the user
    /// count at that instant, so the first registered user becomes admin
    /// even when registrations race.
    pub async fn create_user(
        &self,
        name: &str,
        login: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, DatabaseError> {
        let now = unix_timestamp();

        let result = sqlx::query(
            "INSERT INTO users (name, login, email, password_hash, is_admin, created_at, updated_at) \
             VALUES (?, ?, ?, ?, (SELECT COUNT(*) FROM users) = 0, ?, ?)",
        )
        .bind(name)
        .bind(login)
        .bind(email)
        .bind(password_hash)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await?;

        self.get_user(result.last_insert_rowid()).await
    }

    /// Get a user by ID.
    pub async fn get_user(&self, id: i64) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("User {id}")))
    }

    /// Find a user by login handle, if any.
    pub async fn find_user_by_login(&self, login: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE login = ?")
            .bind(login)
            .fetch_optional(self.pool())
            .await?;

        Ok(user)
    }

    /// Find a user whose login or email matches the given handle.
    pub async fn find_user_by_login_or_email(
        &self,
        handle: &str,
    ) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE login = ? OR email = ?")
            .bind(handle)
            .bind(handle)
            .fetch_optional(self.pool())
            .await?;

        Ok(user)
    }

    /// Find a user by email, if any.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(self.pool())
            .await?;

        Ok(user)
    }

    /// Replace a user's password hash.
    pub async fn update_password(
        &self,
        id: i64,
        password_hash: &str,
    ) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(password_hash)
            .bind(unix_timestamp())
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("User {id}")));
        }
        Ok(())
    }

    /// List all users, newest first.
    pub async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        let users =
            sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC, id DESC")
                .fetch_all(self.pool())
                .await?;

        Ok(users)
    }

    /// Delete a user; collection members cascade.
    pub async fn delete_user(&self, id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("User {id}")));
        }
        Ok(())
    }
}
