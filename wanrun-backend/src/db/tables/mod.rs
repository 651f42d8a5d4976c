//! Table modules - extend Database with domain-specific methods
//!
//! Each module adds `impl Database` blocks for one table group, plus the
//! port implementations that table group backs.

mod bookmarks; // dogrun_bookmarks
mod checkins;  // dogrun_checkins
mod dogruns;   // dogruns
mod dogs;      // dog_owners, dogs
mod sessions;  // auth_sessions
