//! # Kernel
//!
//! Bootstrapping helpers shared by SDK hosts.
//!
//! ```rust,no_run
//! use dataverse_kernel::config::load_sdk_config;
//!
//! let cfg = load_sdk_config(Some("config/dataverse")).unwrap_or_default();
//! println!("talking to {}", cfg.client.host);
//! ```

pub mod config;

pub use dataverse_domain as domain;
