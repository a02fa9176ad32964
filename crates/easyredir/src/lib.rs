#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Typed client for the Easyredir redirect-management API.
//!
//! Layout:
//! - `config.rs`: connection settings (base URL, credentials, timeout)
//! - `client.rs`: transport, response classification, operations facade
//! - `error.rs`: error taxonomy
//! - `options.rs`: list filters, pagination cursors, query building
//! - `page.rs`: resource envelope and the sequential paginator
//! - `rules.rs` / `hosts.rs`: resource DTOs and per-resource operations
//!
//! ```no_run
//! use easyredir::{Client, Config, ListOptions};
//!
//! # async fn example() -> Result<(), easyredir::Error> {
//! let client = Client::new(Config::new("key", "secret"))?;
//! let rules = client.list_all_rules(&ListOptions::new().with_limit(100)).await?;
//! println!("{} rules", rules.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod hosts;
mod options;
mod page;
mod rules;

pub use client::Client;
pub use config::{Config, DEFAULT_BASE_URL};
pub use error::{ApiErrors, ApiFieldError, Error};
pub use hosts::{
    CertificateStatus, DnsRecordType, DnsStatus, DnsValues, Host, HostAttributes, HostDetail,
    HostDetailAttributes, HostLinks, HostUpdateAttributes, MatchOptions, NotFoundAction,
    RequiredDnsEntries, ResponseCode, Security,
};
pub use options::ListOptions;
pub use page::{Links, Meta, Page};
pub use rules::{
    ResponseType, Rule, RuleAttributes, RuleRelationships, SourceHostRef, SourceHosts,
    SourceHostsLinks,
};
