//! Page handlers module
//!
//! This module contains the page-level entry points organized by area:
//! - Layout bootstrap shared by every authenticated page
//! - Catalog, classroom and certificate pages
//! - Hub (admin) actions

pub mod catalog;
pub mod certificates;
pub mod classroom;
pub mod hub;
pub mod layout;

// Re-export commonly used handler functions
pub use catalog::*;
pub use certificates::*;
pub use classroom::*;
pub use hub::*;
pub use layout::*;
