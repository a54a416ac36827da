//! Medstore client
//!
//! The typed catalog API client and the stateful pieces of the admin
//! dashboard: section editors, staged creation wizards and list views. The
//! `medstore` binary drives them from the command line.

pub mod api;
pub mod config;
pub mod context;
pub mod drafts;
pub mod editor;
pub mod listing;
pub mod notify;
pub mod observability;
pub mod storefront;
pub mod submit;
pub mod wizards;
