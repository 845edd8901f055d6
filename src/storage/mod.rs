//! Storage Module
//!
//! SQLite persistence for users, the type lookup table, and per-user
//! collection members.

mod collection;
mod db;
mod models;
mod types;
mod users;


pub use collection::{TeamInsert, TEAM_CAPACITY};
pub use db::{Database, DatabaseError};
pub use models::{CollectionMember, NewMember, PokemonType, User};
