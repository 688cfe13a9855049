//! Core library for adftools
//!
//! This crate implements the **Functional Core** of the adftools application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`adftools_core`** (this crate): Pure transformation functions with zero I/O
//! - **`adftools`**: I/O operations and orchestration (the Imperative Shell)
//!
//! All functions in this crate are pure: the same markdown always produces the
//! same Atlassian Document Format tree, and no function reads from or writes to
//! the outside world.
//!
//! # Module Organization
//!
//! - [`adf`]: The ADF data model, the markdown to ADF converter and the
//!   plain-text extractor
//! - [`atlassian`]: Jira and Confluence helpers built on top of [`adf`]
//! - [`error`]: The crate error type
//!
//! # Example Usage
//!
//! ```rust
//! use adftools_core::adf;
//!
//! # fn main() -> adftools_core::Result<()> {
//! let json = adf::to_json(b"# Title\n\nSome **bold** text")?;
//! assert!(json.starts_with(r#"{"type":"doc","version":1"#));
//!
//! let document = adf::to_document("- one\n- two").unwrap();
//! assert_eq!(document.to_plain_text(), "- one\n- two\n\n");
//! # Ok(())
//! # }
//! ```

pub mod adf;
pub mod atlassian;
pub mod error;

pub use error::{Error, Result};
