//! # Refined Architecture
//!
//! Refined is a **renderer-agnostic** library for the "current refinements" part of a
//! search UI: the list of filters the user has applied, each with a way to remove it,
//! plus a way to remove them all. It does not execute searches and it does not draw
//! anything. It reads a query state and computes new ones.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Loads state/results/config files, prints refinements     │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - CurrentRefinements widget: validated config              │
//! │  - Builds RenderParams, applies clears through a helper     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - extract: enumerate, order, filter, label                 │
//! │  - clear: one refinement, or all of them                    │
//! │  - Pure functions, no I/O                                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  State Layer (state/)                                       │
//! │  - QueryState trait: the host client's contract             │
//! │  - SearchState (value type), LocalHelper (in-memory owner)  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: States Are Values
//!
//! Clearing never mutates a state. `clear_one` and `clear_all` return a new state,
//! and the caller decides when it replaces the live one. This keeps every command
//! trivially testable and lets a renderer precompute "what would the state be if
//! this filter were removed" for every refinement on screen (clear URLs).
//!
//! ## Ordering
//!
//! Refinements on declared attributes come first, in declaration order. The rest
//! follow in the order the state first reported their attribute. Within one
//! attribute, refinements sort by name.
//!
//! ## Module Overview
//!
//! - [`api`]: The widget facade
//! - [`commands`]: Extraction, clearing and labeling
//! - [`state`]: Query state contract and implementations
//! - [`model`]: Refinement records and kinds
//! - [`config`]: Widget configuration
//! - [`template`]: Per-item text rendering
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod state;
pub mod template;
