//! Typed client and view-models for the groups administration console.
//!
//! Everything here is UI-framework agnostic: async command functions talk to
//! an [`AccessApi`] and return outcomes, and the view-model types apply those
//! outcomes synchronously.

pub mod api;
pub mod config;
pub mod error;
pub mod grants;
pub mod groups;
pub mod load;
pub mod notice;
pub mod session;
pub mod time;

#[cfg(test)]
mod testing;

pub use api::{AccessApi, ApiClient};
pub use config::Config;
pub use error::{ConsoleError, Result};
pub use load::{LoadHandle, cancellable};
pub use notice::Notice;
pub use session::{Session, load_session};
