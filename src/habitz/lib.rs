//! # Habitz Architecture
//!
//! Habitz is a **UI-agnostic daily habit checklist library** with a CLI client on top.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prompts, formats output, exit codes    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, input normalization           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One operation per module, returns CmdResult              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session (session.rs) + Habit Store (habits.rs)             │
//! │  - Daily load rule, write-through on every mutation         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Persistence adapter, ordered write queue, KV backends    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Daily Reset
//!
//! Completion flags only mean something for one calendar day. When a session opens,
//! the stored day stamp is compared with today (local time): same day keeps the
//! flags, a different day clears them, and no stored data yields the built-in
//! default list. See [`session`].
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward nothing writes to stdout/stderr or exits the process.
//! Persistence problems never fail an operation: reads fall back to defaults and
//! write failures are logged and reported back through [`api::HabitzApi::flush`].
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each command
//! - [`session`]: Load rule and write-through
//! - [`habits`]: The in-memory habit list
//! - [`store`]: Persistence adapter, write queue, backends
//! - [`model`]: `HabitRecord` and the default list
//! - [`day`]: Day stamps and clocks
//! - [`index`]: Display positions and selectors
//! - [`config`]: Configuration file
//! - [`logging`]: File logging bootstrap
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod day;
pub mod error;
pub mod habits;
pub mod index;
pub mod init;
pub mod logging;
pub mod model;
pub mod session;
pub mod store;
