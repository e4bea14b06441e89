//! # CLI Behavior
//!
//! This is **one possible UI client** for habitz. It is the only place that knows
//! about terminal I/O, prompts, exit codes, and output formatting.
//!
//! ## Naked Execution (`habitz`)
//!
//! Running `habitz` with no arguments defaults to `habitz list`: checking what is left
//! for today is the common case.
//!
//! ## Addressing Habits
//!
//! Commands take the numbers shown by `list` (`habitz done 2`), ranges
//! (`habitz done 1-3`), or a habit name (`habitz done drink water`).
//!
//! ## Destructive Commands
//!
//! `reset` (uncheck everything) and `clear` (delete stored habits) ask for
//! confirmation unless `--yes` is given or `confirm-destructive` is off.
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap
//! - `commands`: Context wiring, dispatch, prompts
//! - `render`: Output formatting (checklist, messages)

mod commands;
mod render;
pub mod setup;

pub use commands::run;
