//! Product-specific REST mapping and admin form handling.

pub mod dtos;
pub mod entity;

pub use dtos::*;
