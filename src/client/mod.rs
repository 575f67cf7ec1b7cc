// region:    --- Modules

mod client_impl;
mod service_target;

pub use client_impl::*;
pub use service_target::*;

// endregion: --- Modules
