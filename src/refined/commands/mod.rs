//! Pure refinement logic.
//!
//! - [`extract`]: enumerate, order, filter and label the active refinements
//! - [`clear`]: compute states with one or all refinements removed
//! - [`label`]: human-readable labels for refinement records
//!
//! Nothing here executes a search or touches I/O.

pub mod clear;
pub mod extract;
pub mod label;

pub use clear::{clear_all, clear_one};
pub use label::{compute_label, display_operator};
