//! Output filenames from Go text/template expressions
use std::{collections::HashMap, fmt};

use gtmpl::{Context, Template, Value};
use ktool_core::{DynamicObject, GroupVersionKind};

use crate::{
    error::{Error, TemplateError},
    Result,
};

/// The filename template used when none is configured
///
/// Renders `web.deployment.yaml` for a `Deployment` named `web`, and `web.yaml`
/// when the kind is empty.
pub const DEFAULT_FILENAME_TEMPLATE: &str = "{{ .Name }}{{ if .GVK.Kind }}.{{ end }}{{ .GVK.Kind }}.yaml";

/// A parsed filename template
///
/// The template sees the fields
/// - `.Namespace` and `.Name` as they appear in the object,
/// - `.GVK.Group`, `.GVK.Version` and `.GVK.Kind`, lower-cased.
///
/// `.GroupVersionKind` is an alias of `.GVK`. Referring to any other field is an execution error.
pub struct FilenameTemplate {
    source: String,
    template: Template,
}

impl FilenameTemplate {
    /// Parse `text` as a Go text/template
    pub fn parse(text: &str) -> Result<Self, TemplateError> {
        if let Some(offset) = unclosed_action(text) {
            return Err(TemplateError::Parse {
                template: text.to_string(),
                message: format!("unclosed action starting at byte {offset}"),
            });
        }
        let mut template = Template::default();
        template.parse(text).map_err(|err| TemplateError::Parse {
            template: text.to_string(),
            message: err.to_string(),
        })?;
        Ok(Self {
            source: text.to_string(),
            template,
        })
    }

    /// The template text this was parsed from
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Render the filename for an object of type `gvk`
    ///
    /// An empty result is an error rather than falling back to a default name.
    pub fn render(&self, obj: &DynamicObject, gvk: &GroupVersionKind) -> Result<String> {
        let context = Context::from(template_data(obj, gvk));
        let filename = self
            .template
            .render(&context)
            .map_err(|err| TemplateError::Execute {
                message: err.to_string(),
            })?;
        if filename.is_empty() {
            return Err(Error::EmptyFilename);
        }
        Ok(filename)
    }
}

impl fmt::Debug for FilenameTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FilenameTemplate").field(&self.source).finish()
    }
}

/// Offset of the first `{{` without a matching `}}`
///
/// gtmpl's lexer does not terminate on some unclosed actions, so they are rejected up front.
fn unclosed_action(text: &str) -> Option<usize> {
    let mut offset = 0;
    while let Some(open) = text[offset..].find("{{") {
        let start = offset + open;
        match text[start + 2..].find("}}") {
            Some(close) => offset = start + 2 + close + 2,
            None => return Some(start),
        }
    }
    None
}

/// Fields exposed to the template, shaped like a Go struct so unknown fields fail
fn template_data(obj: &DynamicObject, gvk: &GroupVersionKind) -> Value {
    let GroupVersionKind { group, version, kind } = gvk.to_lowercase();
    let gvk = Value::Object(HashMap::from([
        ("Group".to_string(), Value::String(group)),
        ("Version".to_string(), Value::String(version)),
        ("Kind".to_string(), Value::String(kind)),
    ]));
    Value::Object(HashMap::from([
        (
            "Namespace".to_string(),
            Value::String(obj.metadata.namespace.clone().unwrap_or_default()),
        ),
        ("Name".to_string(), Value::String(obj.name_any())),
        ("GroupVersionKind".to_string(), gvk.clone()),
        ("GVK".to_string(), gvk),
    ]))
}
