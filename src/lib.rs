//! Medstore
//!
//! Catalog model, form validation and creation wizards for a medical equipment
//! store's admin console. Everything here is synchronous and free of I/O; the
//! `medstore-app` crate drives it against the store API.

pub mod catalog;
pub mod categories;
pub mod enquiries;
pub mod forms;
pub mod ids;
pub mod money;
pub mod prelude;
pub mod search;
pub mod sections;
pub mod validation;
pub mod wizard;
