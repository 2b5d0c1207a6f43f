//! Authority configuration model.
//!
//! Provides:
//! - Raw per-authority records with explicit present/absent optional fields
//! - The closed set of listing strategies
//! - The resolver that turns a raw record into engine-ready parameters

pub mod authority;
pub mod error;
pub mod list_mode;
pub mod resolver;

pub use authority::AuthorityConfig;
pub use error::{ConfigError, ConfigResult};
pub use list_mode::ListMode;
pub use resolver::{MaxPages, ResolvedConfig, resolve};
