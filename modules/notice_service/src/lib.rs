//! Notice Service Module
//!
//! Site-wide notice ("Notiblock") for the admin dashboard and rendered pages.
//! A single settings record holds the message, an optional display window
//! and an always-show override; the blocks render it only while it is active.

// Public exports
pub mod contract;
pub use contract::{
    client::NoticeApi, error::NoticeError, AuthContext, Capability, NoticeSettings, NoticeStatus,
};

pub mod module;
pub use module::{ModuleCtx, NoticeServiceModule};

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
