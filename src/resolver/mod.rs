//! The resolver module maps a user-supplied base host to the endpoint family of a
//! deployment and holds the credential used to authenticate against it.
//!
//! Resolution is a pure function of the hostname; it never depends on response data.
//! This is what lets one client serve both the public cloud and self-hosted
//! enterprise instances without configuration flags.

// region:    --- Modules

mod auth;
mod deployment;
mod endpoint;

pub use auth::*;
pub use deployment::*;
pub use endpoint::*;

// endregion: --- Modules
