//! Contacts-core - Contact book domain logic
//!
//! This crate provides:
//! - Phone and email validators
//! - The `Contact` record and partial updates
//! - The `ContactStore` and its JSON document lifecycle
//! - Command handlers returning `Outcome` values
//! - Layered configuration

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod commands;
pub mod config;
pub mod contact;
pub mod error;
pub mod store;
pub mod validation;

pub use commands::Outcome;
pub use config::Config;
pub use contact::{Contact, ContactUpdate, NewContact};
pub use error::{Error, Result};
pub use store::{ContactStore, Selection};
pub use validation::{is_valid_email, is_valid_phone};
