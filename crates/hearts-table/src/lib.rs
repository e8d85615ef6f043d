#![deny(warnings)]
pub mod autoplay;
pub mod config;
pub mod facade;
pub mod logging;
pub mod roster;

pub use config::{GameRules, MoonRule, TableTheme};
pub use facade::GameSession;
pub use roster::Roster;
