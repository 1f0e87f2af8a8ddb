//! Core library components.
//!
//! Everything the commands need that does not touch the terminal:
//! configuration resolution, the credential store, the CMS client, the
//! login state machine and the code generators.

pub mod aliases;
pub mod auth;
pub mod config;
pub mod constants;
pub mod deploy;
pub mod dotenv;
pub mod environment;
pub mod preload;
pub mod remote;
pub mod store;
pub mod sync;
