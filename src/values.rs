//! Streaming of value changes into the capture's cache.
//!
//! Values are loaded per chunk of variables: one decoder pass covers a whole
//! chunk, which is the chief performance reason to chunk at all. Each raw
//! value is normalized on ingest — byte-reversed so index 0 holds the
//! least-significant bit, then uppercased — so every later stage indexes a
//! single convention.

use std::ops::Range;

use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::capture::Capture;
use crate::decoder::{Decoder, VarHandle};
use crate::error::{Error, Result};
use crate::types::VarValue;

/// Inline capacity tuned to the default activity chunk size.
type ChunkVec<T> = SmallVec<[T; 32]>;

/// Loads the value stream of the single variable at `index` in the capture's
/// variable list. Used for the trailing variables past the last whole chunk.
pub fn read_values_for<D: Decoder>(
    decoder: &mut D,
    capture: &mut Capture,
    index: usize,
) -> Result<()> {
    read_values_for_chunk(decoder, capture, index..index + 1)
}

/// Loads the value streams of every variable in `range` (indices into the
/// capture's variable list) with a single decoder pass.
///
/// Width mismatches between a value and its variable's declared length are
/// soft: each one is reported and the value kept, and the pass as a whole
/// fails afterwards so partial data stays available for diagnostics.
pub fn read_values_for_chunk<D: Decoder>(
    decoder: &mut D,
    capture: &mut Capture,
    range: Range<usize>,
) -> Result<()> {
    let spans: ChunkVec<(VarHandle, u32)> = capture.vars()[range]
        .iter()
        .map(|var| (var.handle, var.length))
        .collect();
    let selection: ChunkVec<VarHandle> = spans.iter().map(|&(handle, _)| handle).collect();

    // The decoder iteration is a foreign callback surface: mismatches are
    // counted here and raised only after the pass returns.
    let mut mismatches = 0usize;
    decoder.for_each_value_change(&selection, &mut |time, handle, raw| {
        let Some(&(_, length)) = spans.iter().find(|&&(h, _)| h == handle) else {
            return;
        };
        let bits = normalize_bits(raw);
        trace!(%handle, time, bits = %bits, "value change");
        if bits.len() != length as usize {
            warn!(
                code = 7789,
                %handle,
                declared = length,
                got = bits.len(),
                "variable length does not match value length"
            );
            mismatches += 1;
        }
        capture.insert_value(handle, VarValue { time, bits });
    })?;

    if mismatches > 0 {
        return Err(Error::ValueWidth { mismatches });
    }
    Ok(())
}

/// Normalizes one raw decoder value: owned copy, reversed so index `i` holds
/// bus bit `i`, and uppercased so unknown and high-impedance states read as
/// `X` and `Z`.
pub(crate) fn normalize_bits(raw: &[u8]) -> String {
    raw.iter()
        .rev()
        .map(|byte| byte.to_ascii_uppercase() as char)
        .collect()
}
