//! Deed module - the `POST /api/createdeed` submission flow.
//!
//! - `models` - wire request and stored record types
//! - `validation` - per-field rules shared with the browser form
//! - `service` - the validate / persist / render / generate pipeline
//! - `handlers` - actix-web routes and error responses

pub mod handlers;
pub mod models;
pub mod service;
pub mod validation;

pub use handlers::config;
