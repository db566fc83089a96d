//! Split Kubernetes manifest files into one file per object
//!
//! Every document of every input becomes a file in a tree laid out by scope:
//!
//! ```text
//! {output_dir}/
//!   cluster-scoped/{filename}
//!   namespaces/{namespace}/{filename}
//! ```
//!
//! where `{filename}` is rendered from a Go text/template (see [`template`]).
//!
//! ```rust,no_run
//! use ktool_split::{split, SplitConfig, TracingSink};
//!
//! let config = SplitConfig::new(["all.yaml"]).output_dir("out");
//! let summary = split(&config, &mut TracingSink)?;
//! println!("wrote {} objects", summary.objects);
//! # Ok::<(), ktool_split::Error>(())
//! ```
#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub use config::SplitConfig;

pub mod decoder;
pub use decoder::{Decoded, Decoder, Location};

pub mod events;
pub use events::{Event, EventSink, TracingSink};

pub mod pipeline;
pub use pipeline::{split, split_from, Summary};

pub mod template;
pub use template::FilenameTemplate;

pub mod writer;
pub use writer::Writer;

mod error;
pub use error::{DecodeError, DecodeReason, Error, IoAction, TemplateError, ValidationError};

/// Convient alias for `Result<T, Error>`
pub type Result<T, E = Error> = std::result::Result<T, E>;
