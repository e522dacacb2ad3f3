/*
# Patch Module

 In-place edits are modelled as `Patch` records: an offset plus the bytes
 expected there and the bytes to write. Planning only reads; applying checks
 the expected bytes before writing, so a patch planned against an older state
 of the file fails instead of corrupting it.
*/

use crate::bits::reader::{u24_from_be_bytes, u24_to_be_bytes};
use crate::errors::{Mp4FlagsResult, PatchError};
use crate::mp4::r#box::FourCC;
use crate::mp4::stsd::{first_entry_format_position, is_forced_format, FORCED_SAMPLE_ENTRY};
use crate::mp4::tkhd::with_default;
use crate::streams::{SeekableStream, WritableStream};
use log::{debug, info};
use std::fmt;

/// A byte-exact in-place edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub offset: u64,
    pub old: Vec<u8>,
    pub new: Vec<u8>,
}

impl Patch {
    pub fn is_noop(&self) -> bool {
        self.old == self.new
    }

    /// The patch that undoes this one.
    pub fn reverted(&self) -> Patch {
        Patch {
            offset: self.offset,
            old: self.new.clone(),
            new: self.old.clone(),
        }
    }
}

impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "offset {}: {:02X?} -> {:02X?}", self.offset, self.old, self.new)
    }
}

/// Plan setting or clearing the default bit in the three tkhd flag bytes at `flags_offset`.
pub fn plan_default<S: SeekableStream + ?Sized>(
    stream: &mut S,
    flags_offset: u64,
    value: bool,
) -> Mp4FlagsResult<Patch> {
    let mut old = [0u8; 3];
    stream.read_exact_at(flags_offset, &mut old)?;
    let flags = with_default(u24_from_be_bytes(old), value);
    Ok(Patch {
        offset: flags_offset,
        old: old.to_vec(),
        new: u24_to_be_bytes(flags).to_vec(),
    })
}

/// Plan marking the first sample entry of the stsd payload at `stsd_offset` forced.
///
/// Setting replaces the entry format with `FORCED_SAMPLE_ENTRY`. Clearing needs
/// the format that was there before; without `restore` a forced entry cannot be
/// cleared and `PatchError::Unrestorable` is returned. An stsd with no entries
/// is refused with `PatchError::NoSampleEntry`, since the bytes after it belong
/// to the next box.
pub fn plan_forced<S: SeekableStream + ?Sized>(
    stream: &mut S,
    stsd_offset: u64,
    value: bool,
    restore: Option<FourCC>,
) -> Mp4FlagsResult<Patch> {
    if stream.read_u32_at(stsd_offset + 4)? == 0 {
        return Err(PatchError::NoSampleEntry {
            offset: stsd_offset,
        }
        .into());
    }
    let offset = first_entry_format_position(stsd_offset);
    let mut old = [0u8; 4];
    stream.read_exact_at(offset, &mut old)?;
    let current = FourCC(old);

    let new = match (value, is_forced_format(&current)) {
        (true, true) | (false, false) => current,
        (true, false) => FORCED_SAMPLE_ENTRY,
        (false, true) => restore.ok_or(PatchError::Unrestorable { offset })?,
    };
    Ok(Patch {
        offset,
        old: old.to_vec(),
        new: new.as_bytes().to_vec(),
    })
}

/// Write a planned patch, refusing if the bytes on disk changed since planning.
pub fn apply<W: WritableStream + ?Sized>(stream: &mut W, patch: &Patch) -> Mp4FlagsResult<()> {
    if patch.is_noop() {
        debug!("Patch at {} changes nothing, skipping write", patch.offset);
        return Ok(());
    }
    let mut current = vec![0u8; patch.old.len()];
    stream.read_exact_at(patch.offset, &mut current)?;
    if current != patch.old {
        return Err(PatchError::Stale {
            offset: patch.offset,
        }
        .into());
    }
    stream.write_all_at(patch.offset, &patch.new)?;
    info!("Patched {}", patch);
    Ok(())
}

/// Read-modify-write of the default bit at `flags_offset`.
pub fn set_default<W: WritableStream + ?Sized>(
    stream: &mut W,
    flags_offset: u64,
    value: bool,
) -> Mp4FlagsResult<Patch> {
    let patch = plan_default(stream, flags_offset, value)?;
    apply(stream, &patch)?;
    Ok(patch)
}

/// Mark or unmark the first sample entry at `stsd_offset` as forced.
pub fn set_forced<W: WritableStream + ?Sized>(
    stream: &mut W,
    stsd_offset: u64,
    value: bool,
) -> Mp4FlagsResult<Patch> {
    let patch = plan_forced(stream, stsd_offset, value, None)?;
    apply(stream, &patch)?;
    Ok(patch)
}
