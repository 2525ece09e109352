// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between the CLI and Services
// - Commands accept plain parameters, return DTOs
// - Commands NEVER contain business logic

pub mod detail_commands;
pub mod favorite_commands;
pub mod listing_commands;

pub use detail_commands::*;
pub use favorite_commands::*;
pub use listing_commands::*;
