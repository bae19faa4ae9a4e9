//! Wrap Snake - snake on a wrap-around grid, played in the terminal
//!
//! This library provides:
//! - Core game logic (game module), free of I/O
//! - TUI rendering (render module)
//! - Keyboard bindings (input module)
//! - Per-session score keeping (metrics module)
//! - The interactive game loop (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
