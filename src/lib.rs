//! DAP Note Helper - Terminal Library
//!
//! A step-by-step wizard that turns structured answers into DATA /
//! ASSESSMENT / PLAN case notes ready to paste into a records system.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
