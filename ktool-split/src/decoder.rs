//! Decoding of manifest files into a stream of objects
//!
//! Inputs are visited in the order they were given. Every source is split at YAML
//! document boundaries, or into its top-level values when it is a stream of JSON
//! objects, and each document becomes one [`Decoded`] item; `List` documents are
//! flattened into their items. Nothing is read before the
//! iterator is polled, and only one source is held in memory at a time.
use std::{
    collections::VecDeque,
    fmt,
    io::{self, Cursor, Read},
    path::{Path, PathBuf},
};

use ktool_core::{dynamic::ParseDynamicObjectError, DynamicObject, GroupVersionKind, ObjectList, TypeMeta};
use serde::Deserialize;
use serde_json::Value;
use tracing::trace;
use walkdir::WalkDir;

use crate::{
    error::{DecodeError, DecodeReason, Error, IoAction},
    Result,
};

/// The input marker that reads from standard input
pub const STDIN_MARKER: &str = "-";

/// Location reported for objects read from standard input
const STDIN_LOCATION: &str = "STDIN";

/// File extensions picked up when a directory is given as input
const MANIFEST_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Where an object was read from
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    /// File path, or `STDIN`
    pub path: String,
    /// Zero-based index of the document within the source
    pub document: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (document {})", self.path, self.document)
    }
}

/// An object produced by the [`Decoder`]
#[derive(Clone, Debug, PartialEq)]
pub struct Decoded {
    /// The object itself
    pub object: DynamicObject,
    /// Its type, parsed from `apiVersion` and `kind`
    pub gvk: GroupVersionKind,
    /// Where it was read from
    pub location: Location,
}

enum Input {
    Stdin,
    Path(PathBuf),
}

/// The documents of the source currently being read
struct Documents {
    path: String,
    stream: Stream,
    next_index: usize,
}

type JsonStream = serde_json::StreamDeserializer<'static, serde_json::de::IoRead<Cursor<Vec<u8>>>, Value>;

enum Stream {
    Yaml(serde_yaml::Deserializer<'static>),
    Json(JsonStream),
}

impl Stream {
    /// JSON input is read as a sequence of concatenated values, anything else as YAML
    fn new(data: Vec<u8>) -> Self {
        let is_json = data.iter().find(|b| !b.is_ascii_whitespace()) == Some(&b'{');
        if is_json {
            Stream::Json(serde_json::Deserializer::from_reader(Cursor::new(data)).into_iter())
        } else {
            Stream::Yaml(serde_yaml::Deserializer::from_reader(Cursor::new(data)))
        }
    }

    fn next_document(&mut self) -> Option<Result<Value, DecodeReason>> {
        match self {
            Stream::Yaml(stream) => stream.next().map(yaml_document),
            Stream::Json(stream) => stream.next().map(|doc| doc.map_err(DecodeReason::Json)),
        }
    }
}

/// Read one YAML document, resolving `<<` merge keys
fn yaml_document(document: serde_yaml::Deserializer<'_>) -> Result<Value, DecodeReason> {
    let mut value = serde_yaml::Value::deserialize(document).map_err(DecodeReason::Yaml)?;
    value.apply_merge().map_err(DecodeReason::Yaml)?;
    serde_json::to_value(value).map_err(DecodeReason::Json)
}

/// Lazy iterator of objects over a set of manifest inputs
///
/// Yields `Err` at most once: after the first error the iterator is exhausted.
pub struct Decoder {
    inputs: VecDeque<Input>,
    recursive: bool,
    stdin: Option<Box<dyn Read>>,
    current: Option<Documents>,
    pending: VecDeque<Decoded>,
    failed: bool,
}

impl Decoder {
    /// Decode the given inputs, where `-` stands for standard input
    ///
    /// Directories are expanded into the manifest files they contain. Sub-directories
    /// are only entered when `recursive` is set.
    pub fn new<P: AsRef<Path>>(inputs: &[P], recursive: bool) -> Self {
        let inputs = inputs
            .iter()
            .map(|p| {
                let p = p.as_ref();
                if p.as_os_str() == STDIN_MARKER {
                    Input::Stdin
                } else {
                    Input::Path(p.to_path_buf())
                }
            })
            .collect();
        Self {
            inputs,
            recursive,
            stdin: Some(Box::new(io::stdin())),
            current: None,
            pending: VecDeque::new(),
            failed: false,
        }
    }

    /// Read the `-` input from `reader` instead of the process stdin
    #[must_use]
    pub fn with_stdin(mut self, reader: impl Read + 'static) -> Self {
        self.stdin = Some(Box::new(reader));
        self
    }

    /// Open the next input, expanding directories in place
    ///
    /// Returns `Ok(false)` once all inputs are consumed.
    fn open_next(&mut self) -> Result<bool> {
        let Some(input) = self.inputs.pop_front() else {
            return Ok(false);
        };
        let (path, data) = match input {
            Input::Stdin => {
                let mut reader = self.stdin.take().ok_or_else(|| Error::Io {
                    action: IoAction::Read,
                    path: STDIN_LOCATION.into(),
                    source: io::Error::new(io::ErrorKind::UnexpectedEof, "stdin can only be read once"),
                })?;
                let mut data = Vec::new();
                reader
                    .read_to_end(&mut data)
                    .map_err(Error::io(IoAction::Read, STDIN_LOCATION))?;
                (STDIN_LOCATION.to_string(), data)
            }
            Input::Path(path) => {
                if path.is_dir() {
                    let files = self.expand_dir(&path)?;
                    for file in files.into_iter().rev() {
                        self.inputs.push_front(Input::Path(file));
                    }
                    return Ok(true);
                }
                let data = std::fs::read(&path).map_err(Error::io(IoAction::Read, &path))?;
                (path.display().to_string(), data)
            }
        };
        trace!(source = %path, bytes = data.len(), "Reading manifests");
        self.current = Some(Documents {
            path,
            stream: Stream::new(data),
            next_index: 0,
        });
        Ok(true)
    }

    /// Manifest files under `dir` in lexical order
    fn expand_dir(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let mut files = vec![];
        for entry in WalkDir::new(dir).min_depth(1).max_depth(max_depth).sort_by_file_name() {
            let entry = entry.map_err(|err| {
                let path = err.path().unwrap_or(dir).to_path_buf();
                Error::Io {
                    action: IoAction::Read,
                    path,
                    source: err.into(),
                }
            })?;
            if entry.file_type().is_file() && is_manifest_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    /// Decode the next document of the current source into `self.pending`
    ///
    /// Returns `Ok(false)` when the current source has no documents left.
    fn decode_next_document(&mut self) -> Result<bool> {
        let Some(current) = self.current.as_mut() else {
            return Ok(false);
        };
        let Some(document) = current.stream.next_document() else {
            self.current = None;
            return Ok(false);
        };
        let location = Location {
            path: current.path.clone(),
            document: current.next_index,
        };
        current.next_index += 1;

        let value = document.map_err(|reason| DecodeError {
            location: location.clone(),
            reason,
        })?;
        // documents holding nothing but comments or `---`
        if value.is_null() {
            return Ok(true);
        }
        flatten_into(value, None, &location, &mut self.pending)
            .map_err(|reason| DecodeError { location, reason })?;
        Ok(true)
    }
}

impl Iterator for Decoder {
    type Item = Result<Decoded>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            if let Some(decoded) = self.pending.pop_front() {
                return Some(Ok(decoded));
            }
            let step = if self.current.is_some() {
                self.decode_next_document()
            } else {
                match self.open_next() {
                    Ok(false) => return None,
                    other => other,
                }
            };
            if let Err(err) = step {
                self.failed = true;
                self.current = None;
                self.pending.clear();
                return Some(Err(err));
            }
        }
    }
}

impl std::iter::FusedIterator for Decoder {}

fn is_manifest_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MANIFEST_EXTENSIONS.contains(&ext))
}

/// Turn one document into objects, unwrapping (nested) lists
///
/// Items of a typed list (`PodList`, ...) that carry neither `apiVersion` nor `kind`
/// take them from the list, the way the API server returns them.
fn flatten_into(
    mut value: Value,
    list_type: Option<&TypeMeta>,
    location: &Location,
    out: &mut VecDeque<Decoded>,
) -> Result<(), DecodeReason> {
    if !value.is_object() {
        return Err(DecodeReason::NotAnObject(json_type(&value)));
    }
    if let (Some(types), Some(map)) = (list_type, value.as_object_mut()) {
        let unset = |key: &str| map.get(key).and_then(Value::as_str).is_none_or(str::is_empty);
        if unset("apiVersion") && unset("kind") {
            map.insert("apiVersion".into(), types.api_version.clone().into());
            map.insert("kind".into(), types.kind.clone().into());
        }
    }

    let kind = value.get("kind").and_then(Value::as_str).unwrap_or_default();
    if ObjectList::<Value>::is_list_kind(kind) && value.get("items").is_some_and(Value::is_array) {
        let list: ObjectList<Value> = serde_json::from_value(value)
            .map_err(|err| DecodeReason::Structure(ParseDynamicObjectError::from(err)))?;
        let item_type = list.types.as_ref().map(|types| TypeMeta {
            api_version: types.api_version.clone(),
            kind: types.kind.strip_suffix("List").unwrap_or(&types.kind).to_string(),
        });
        for item in list {
            flatten_into(item, item_type.as_ref(), location, out)?;
        }
        return Ok(());
    }

    require_type(&value)?;
    let object = DynamicObject::try_from_value(value).map_err(DecodeReason::Structure)?;
    let gvk = object.gvk().map_err(DecodeReason::GroupVersion)?;
    out.push_back(Decoded {
        object,
        gvk,
        location: location.clone(),
    });
    Ok(())
}

/// Both `apiVersion` and `kind` must be set to non-empty strings
fn require_type(value: &Value) -> Result<(), DecodeReason> {
    let set = |name: &str| value.get(name).and_then(Value::as_str).is_some_and(|s| !s.is_empty());
    if !set("kind") {
        return Err(DecodeReason::MissingKind);
    }
    if !set("apiVersion") {
        return Err(DecodeReason::MissingApiVersion);
    }
    Ok(())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
