use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use fst_native::{
    FstFilter, FstHeader, FstHierarchyEntry, FstReader, FstSignalHandle, FstSignalValue,
};
use tracing::debug;

use crate::decoder::{Decoder, HierEvent, VarHandle};
use crate::error::{Error, Result};

/// Production [`Decoder`] backed by the `fst-native` reader.
///
/// The decoding context lives as long as this value and is released on drop
/// on every exit path. Header scalars are captured at open time.
pub struct FstDecoder {
    path: PathBuf,
    reader: FstReader<BufReader<File>>,
    header: FstHeader,
}

impl std::fmt::Debug for FstDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FstDecoder")
            .field("path", &self.path)
            .field("header", &self.header)
            .finish()
    }
}

impl FstDecoder {
    /// Opens an FST capture for reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|err| Error::Open {
            path: path.clone(),
            detail: err.to_string(),
        })?;
        let mut reader = FstReader::open(BufReader::new(file)).map_err(|err| Error::Open {
            path: path.clone(),
            detail: format!("{err:?}"),
        })?;
        let header = FstReader::get_header(&mut reader);
        debug!(
            path = %path.display(),
            start = header.start_time,
            end = header.end_time,
            vars = header.var_count,
            "opened capture"
        );
        Ok(Self {
            path,
            reader,
            header,
        })
    }

    /// Path this decoder was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Decoder for FstDecoder {
    fn start_time(&self) -> u64 {
        self.header.start_time
    }

    fn end_time(&self) -> u64 {
        self.header.end_time
    }

    fn timescale_magnitude(&self) -> i8 {
        self.header.timescale_exponent
    }

    fn version(&self) -> &str {
        &self.header.version
    }

    fn date(&self) -> &str {
        &self.header.date
    }

    fn var_count(&self) -> u64 {
        self.header.var_count
    }

    fn for_each_hier_event(&mut self, visit: &mut dyn FnMut(HierEvent)) -> Result<()> {
        self.reader
            .read_hierarchy(|entry| visit(convert_entry(entry)))
            .map_err(|err| Error::Open {
                path: self.path.clone(),
                detail: format!("hierarchy iteration failed: {err:?}"),
            })
    }

    fn for_each_value_change(
        &mut self,
        selection: &[VarHandle],
        visit: &mut dyn FnMut(u64, VarHandle, &[u8]),
    ) -> Result<()> {
        let signals: Vec<FstSignalHandle> = selection
            .iter()
            .map(|handle| FstSignalHandle::from_index(handle.index()))
            .collect();
        let filter = FstFilter::filter_signals(signals);
        self.reader
            .read_signals(&filter, |time, handle, value| match value {
                FstSignalValue::String(raw) => {
                    visit(time, VarHandle::from_index(handle.get_index()), raw.as_ref());
                }
                // Real-valued signals carry no bit-level activity.
                FstSignalValue::Real(_) => {}
            })
            .map_err(|err| Error::ValueIteration {
                detail: format!("{err:?}"),
            })
    }
}

fn convert_entry(entry: FstHierarchyEntry) -> HierEvent {
    match entry {
        FstHierarchyEntry::Scope {
            tpe,
            name,
            component,
        } => HierEvent::ScopeBegin {
            kind: tpe as u8,
            name,
            component,
        },
        FstHierarchyEntry::UpScope => HierEvent::ScopeEnd,
        FstHierarchyEntry::Var {
            tpe,
            name,
            length,
            handle,
            is_alias,
            ..
        } => HierEvent::VarDecl {
            kind: tpe as u8,
            name,
            length,
            handle: VarHandle::from_index(handle.get_index()),
            is_alias,
        },
        FstHierarchyEntry::AttributeEnd => HierEvent::AttrEnd,
        // Path names, source stems, comments, and enum tables are all
        // attribute metadata to the pipeline.
        _ => HierEvent::AttrBegin,
    }
}
