use crate::errors::Mp4FlagsResult;
use crate::mp4::r#box::BoxHeader;
use crate::streams::SeekableStream;

/// tkhd flag bit marking the track enabled, which players treat as the default track
pub const TRACK_ENABLED: u32 = 0x00_0001;

/// Fields of a track header needed to report and patch the default flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackHeader {
    /// Offset of the first of the three flag bytes
    pub flags_offset: u64,
    pub version: u8,
    pub flags: u32,
    /// 0 when the box is too short to carry one
    pub track_id: u32,
}

impl TrackHeader {
    pub fn is_default(&self) -> bool {
        is_default(self.flags)
    }
}

pub fn is_default(flags: u32) -> bool {
    flags & TRACK_ENABLED != 0
}

/// Set or clear the enabled bit, leaving the other 23 flag bits alone.
pub fn with_default(flags: u32, value: bool) -> u32 {
    if value {
        flags | TRACK_ENABLED
    } else {
        flags & !TRACK_ENABLED
    }
}

/// Parse the version, flags and track id of a tkhd box.
///
/// Returns `None` if the box cannot even hold its version and flags.
pub fn parse_tkhd<S: SeekableStream + ?Sized>(
    stream: &mut S,
    tkhd: &BoxHeader,
) -> Mp4FlagsResult<Option<TrackHeader>> {
    let payload = tkhd.payload_start();
    if !tkhd.contains(payload, 4) {
        return Ok(None);
    }
    let version = stream.read_u8_at(payload)?;
    let flags = stream.read_u24_at(payload + 1)?;

    // creation and modification times are 64-bit in version 1
    let id_pos = payload + 4 + if version == 1 { 16 } else { 8 };
    let track_id = if tkhd.contains(id_pos, 4) {
        stream.read_u32_at(id_pos)?
    } else {
        0
    };

    Ok(Some(TrackHeader {
        flags_offset: payload + 1,
        version,
        flags,
        track_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_default_preserves_other_bits() {
        assert_eq!(with_default(0x000006, true), 0x000007);
        assert_eq!(with_default(0x000007, false), 0x000006);
        assert_eq!(with_default(0x800001, true), 0x800001);
        assert!(is_default(0x000003));
        assert!(!is_default(0x000002));
    }
}
