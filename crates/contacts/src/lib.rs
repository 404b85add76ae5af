//! Contacts - interactive command-line contact book
//!
//! The binary parses arguments, resolves configuration and hands the loaded
//! store to the [`shell`].

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod cli;
pub mod shell;

pub use shell::Shell;
