//! # stackscrub - call-stack snapshot normalization
//!
//! Turns a raw call-stack snapshot, as captured at an error or diagnostic
//! point, into a cleaned, filterable, human-readable sequence of frames
//! suitable for logging.
//!
//! ## Pipeline
//!
//! ```text
//!  raw frames ──▶ resolve ──▶ filter ──▶ fold paths ──▶ Frame list
//!                 │            │          │
//!                 │            │          └─ elide folder segments shared
//!                 │            │             by ≥ 2 frames
//!                 │            └─ line-number check, deny-list, allow-list
//!                 └─ method metadata, state-machine unwinding, "?" fallback
//! ```
//!
//! Parsing is total: degenerate input degrades to sentinels instead of
//! errors, so a trace cleaner never becomes the thing that crashes the error
//! handler it serves.
//!
//! ## Modules
//!
//! - [`metadata`]: type/method records and the table adapters fill in place
//!   of runtime reflection
//! - [`snapshot`]: raw captured frames bound to their metadata, plus the
//!   [`Traced`] trait for error types that carry one
//! - [`options`]: allow/deny/line-number filter configuration
//! - [`parser`]: the resolve/filter/fold pipeline
//! - [`frame`]: cleaned output frames and their `Display` rendering
//! - [`export`]: JSON export for log pipelines
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//! use stackscrub::{MetadataTable, MethodRecord, RawFrame, ScrubOptions, StackSnapshot, TypeRecord};
//!
//! let mut table = MetadataTable::new();
//! let service = table.add_type(TypeRecord::new("CheckoutService").with_namespace("Acme.Billing"));
//! let submit = table.add_method(MethodRecord::new("Submit").declared_on(service));
//!
//! let snapshot = StackSnapshot::new(
//!     Arc::new(table),
//!     vec![RawFrame {
//!         file_path: Some("/work/acme/src/billing/checkout.rs".to_owned()),
//!         line_number: 42,
//!         column_number: 0,
//!         method: Some(submit),
//!     }],
//! );
//!
//! let frames = snapshot.parse(&ScrubOptions::default());
//! assert_eq!(
//!     frames[0].to_string(),
//!     "/work/acme/src/billing/checkout.rs; Submit(); Line:42"
//! );
//! ```
//!
//! Capture adapters translate a concrete runtime's stack representation into
//! [`StackSnapshot`]; the `stackscrub-backtrace` crate does this for native
//! Rust backtraces.

pub mod errors;
pub mod export;
pub mod frame;
pub mod metadata;
pub mod options;
pub mod parser;
pub mod snapshot;

mod fold;
mod resolve;

pub use errors::{ConfigError, ExportError};
pub use frame::{ArgMode, Frame, MethodArg, TypeName, UNKNOWN_METHOD};
pub use metadata::{
    MetadataTable, MethodId, MethodKind, MethodRecord, ParamRecord, TypeId, TypeRecord,
};
pub use options::ScrubOptions;
pub use parser::{filtered_raw_frames, parse};
pub use snapshot::{RawFrame, StackSnapshot, Traced};
