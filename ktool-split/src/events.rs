//! Progress events emitted while splitting
//!
//! The pipeline never logs directly. It hands [`Event`]s to an [`EventSink`] supplied
//! by the caller; [`TracingSink`] forwards them to `tracing`.
use std::path::PathBuf;

use ktool_core::GroupVersionKind;
use tracing::{debug, info, trace};

use crate::decoder::Location;

/// Something that happened during a run
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Output directories are in place and decoding starts
    Started {
        /// Number of inputs given
        file_count: usize,
        /// Root of the generated tree
        output_dir: PathBuf,
    },
    /// An object was decoded and is about to be processed
    Object {
        /// Where the object was read from
        location: Location,
        /// Its namespace, if any
        namespace: Option<String>,
        /// Its name
        name: String,
        /// Its type
        gvk: GroupVersionKind,
    },
    /// An object is being written to `path`
    Writing {
        /// Destination file
        path: PathBuf,
    },
    /// Every object was written
    Finished {
        /// Number of inputs given
        file_count: usize,
        /// Number of objects written
        objects: usize,
    },
}

/// Receiver of [`Event`]s
pub trait EventSink {
    /// Handle one event
    fn emit(&mut self, event: Event);
}

/// Collects events, mostly useful in tests
impl EventSink for Vec<Event> {
    fn emit(&mut self, event: Event) {
        self.push(event);
    }
}

/// Forwards events to `tracing`
///
/// Start and finish are logged at `INFO`, objects at `DEBUG` and file writes at `TRACE`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: Event) {
        match event {
            Event::Started { file_count, output_dir } => {
                info!(file_count, output_dir = %output_dir.display(), "Starting file processing");
            }
            Event::Object {
                location,
                namespace,
                name,
                gvk,
            } => {
                debug!(
                    namespace = namespace.as_deref().unwrap_or_default(),
                    name = name.as_str(),
                    gvk = %gvk,
                    source = %location,
                    "Processing object"
                );
            }
            Event::Writing { path } => trace!(path = %path.display(), "Writing down file"),
            Event::Finished { file_count, objects } => {
                info!(file_count, objects, "Successfully processed all files");
            }
        }
    }
}
