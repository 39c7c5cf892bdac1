//! Order-specific REST mapping, including the status transition action.

mod actions;
pub mod entity;

pub use actions::*;
