//! The split run: decode, classify, name and write every object
use ktool_core::Scope;

use crate::{
    config::SplitConfig,
    decoder::{Decoded, Decoder},
    error::{Error, ValidationError},
    events::{Event, EventSink},
    template::FilenameTemplate,
    writer::Writer,
    Result,
};

/// Outcome of a successful run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    /// Number of inputs given
    pub file_count: usize,
    /// Number of objects written
    pub objects: usize,
}

/// Split every object found in `config.inputs` into its own file
///
/// Processing is sequential and stops at the first error, which is returned as-is.
/// Files written before that point are left in place.
pub fn split(config: &SplitConfig, sink: &mut dyn EventSink) -> Result<Summary> {
    let decoder = Decoder::new(&config.inputs, config.recursive);
    split_from(config, decoder, sink)
}

/// Like [`split`], reading objects from an already configured [`Decoder`]
pub fn split_from(config: &SplitConfig, decoder: Decoder, sink: &mut dyn EventSink) -> Result<Summary> {
    config.validate()?;
    let template = FilenameTemplate::parse(&config.filename_template)?;
    let writer = Writer::new(config);
    writer.prepare()?;

    let file_count = config.inputs.len();
    sink.emit(Event::Started {
        file_count,
        output_dir: writer.output_dir().to_path_buf(),
    });

    let mut objects = 0;
    for decoded in decoder {
        write_object(decoded?, &template, &writer, sink)?;
        objects += 1;
    }

    sink.emit(Event::Finished { file_count, objects });
    Ok(Summary { file_count, objects })
}

fn write_object(
    decoded: Decoded,
    template: &FilenameTemplate,
    writer: &Writer,
    sink: &mut dyn EventSink,
) -> Result<()> {
    let Decoded {
        object,
        gvk,
        location,
    } = decoded;
    let name = object.name_any();
    sink.emit(Event::Object {
        location: location.clone(),
        namespace: object.namespace().map(String::from),
        name: name.clone(),
        gvk: gvk.clone(),
    });

    // Sanity checks
    if name.is_empty() {
        return Err(ValidationError::EmptyName { location, gvk }.into());
    }

    let contents = serde_yaml::to_string(&object).map_err(|source| Error::Serialize {
        name: name.clone(),
        source,
    })?;
    let filename = template.render(&object, &gvk)?;
    let dir = writer.target_dir(Scope::of(&object), object.namespace())?;

    let path = dir.join(&filename);
    sink.emit(Event::Writing { path });
    writer.write(&dir, &filename, contents.as_bytes())?;
    Ok(())
}
