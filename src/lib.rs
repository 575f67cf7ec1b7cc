//! The `idsync` crate extracts user/identity data from SaaS platforms and
//! reconciles identity records across two sources (SAML export vs. platform user export).
//!
//! Two cooperating cores:
//! - The endpoint resolver ([`resolver`]) maps a base host to the REST and GraphQL roots
//!   of a deployment (public cloud vs. self-hosted) and holds the credential used to
//!   authenticate against them.
//! - The request engine ([`webc`]) issues authenticated calls and drains cursor-paginated
//!   list endpoints into a pull-based stream, absorbing rate-limit responses.
//!
//! A [`Client`] only exists once its credential has been validated against the
//! deployment's identity endpoint. The [`extract`] and [`reconcile`] modules consume the
//! records the engine produces.

// region:    --- Modules

mod client;
mod error;
mod record;

pub mod extract;
pub mod reconcile;
pub mod resolver;
pub mod webc;

pub use client::*;
pub use error::{Error, Result};
pub use record::*;
pub use webc::{ListQuery, PageStream, RetryPolicy};

// endregion: --- Modules
