//! Data models for Pokédex storage.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub login: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PokemonType {
    pub id: i64,
    pub description: String,
}

/// One favorite-or-team membership row. A single row may carry both flags;
/// removal deletes the row rather than toggling a flag.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CollectionMember {
    pub id: i64,
    pub owner_id: i64,
    pub type_id: Option<i64>,
    pub code: String,
    pub image_url: Option<String>,
    pub name: String,
    pub is_team_member: bool,
    pub is_favorite: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Insert payload for a new collection member.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub type_id: Option<i64>,
    pub code: String,
    pub image_url: Option<String>,
    pub name: String,
    pub is_team_member: bool,
    pub is_favorite: bool,
}
