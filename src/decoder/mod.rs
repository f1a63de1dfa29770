//! Interface consumed from the low-level waveform decoder.
//!
//! The block-compressed FST container itself is parsed by an external
//! library; this module pins down the narrow surface the pipeline relies on —
//! header scalars, a single-pass hierarchy record stream, and a selective
//! value-change iteration — so the loader, value reader, and activity
//! computer stay independent of any concrete decoder. [`FstDecoder`] is the
//! production implementation.

use std::fmt;

use crate::error::Result;

mod fst;
pub use fst::FstDecoder;

/// Opaque stable identifier the decoder assigns to each declared variable.
///
/// Handles are 1-based (matching the FST convention) and unique within a
/// capture; aliased declarations share the handle of their target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarHandle(pub u32);

impl VarHandle {
    /// Builds a handle from a 0-based decoder index.
    pub fn from_index(index: usize) -> Self {
        Self(index as u32 + 1)
    }

    /// Returns the 0-based decoder index for this handle.
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl fmt::Display for VarHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.0)
    }
}

/// One record of the hierarchy declaration stream.
///
/// Scope and variable kinds are opaque 8-bit codes as stored in the
/// container; [`crate::types::ScopeKind`] and [`crate::types::VarKind`]
/// classify the ones the pipeline cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HierEvent {
    /// A scope opens; all following declarations belong to it until the
    /// matching [`HierEvent::ScopeEnd`].
    ScopeBegin {
        kind: u8,
        name: String,
        component: String,
    },
    /// The innermost open scope closes.
    ScopeEnd,
    /// A variable declaration inside the currently open scope.
    VarDecl {
        kind: u8,
        name: String,
        length: u32,
        handle: VarHandle,
        is_alias: bool,
    },
    /// Attribute metadata opens; ignored by the pipeline.
    AttrBegin,
    /// Attribute metadata closes; ignored by the pipeline.
    AttrEnd,
}

/// Access to one opened waveform capture.
///
/// Implementations own the underlying decoding context and release it on
/// drop regardless of how a pass ends. Both iteration methods are foreign
/// callback surfaces: visitors must not panic and must stash their own
/// failures for inspection after the call returns.
pub trait Decoder {
    /// First recorded timestamp, in ticks.
    fn start_time(&self) -> u64;

    /// Last recorded timestamp, in ticks.
    fn end_time(&self) -> u64;

    /// Base-10 exponent of seconds per tick, as stored in the header.
    fn timescale_magnitude(&self) -> i8;

    /// Producer version string.
    fn version(&self) -> &str;

    /// Producer date string.
    fn date(&self) -> &str;

    /// Number of variable declarations in the capture.
    fn var_count(&self) -> u64;

    /// Yields every hierarchy record in declaration (depth-first) order.
    ///
    /// The sequence is finite and single-pass per call.
    fn for_each_hier_event(&mut self, visit: &mut dyn FnMut(HierEvent)) -> Result<()>;

    /// Yields every recorded transition of the selected variables in
    /// non-decreasing time order across the whole selection.
    ///
    /// `raw` is the decoder's bit string — most-significant bit first, case
    /// not guaranteed — and is only valid for the duration of one callback
    /// invocation. The selection applies to this pass only.
    fn for_each_value_change(
        &mut self,
        selection: &[VarHandle],
        visit: &mut dyn FnMut(u64, VarHandle, &[u8]),
    ) -> Result<()>;
}
