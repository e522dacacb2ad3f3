use crate::errors::Mp4FlagsResult;
use crate::mp4::r#box::{BoxHeader, FourCC};
use crate::streams::SeekableStream;

/// Sample entry format written over the first entry to mark a track forced
pub const FORCED_SAMPLE_ENTRY: FourCC = FourCC(*b"fcd ");

/// Sample description fields the track listing needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleDescription {
    /// Start of the stsd payload
    pub offset: u64,
    pub first_entry_format: Option<FourCC>,
}

impl SampleDescription {
    pub fn is_forced(&self) -> bool {
        self.first_entry_format.as_ref().is_some_and(is_forced_format)
    }
}

/// Position of the first sample entry header, past version, flags and entry count.
pub fn first_entry_position(stsd_payload: u64) -> u64 {
    stsd_payload + 8
}

/// Position of the first sample entry's format tag.
pub fn first_entry_format_position(stsd_payload: u64) -> u64 {
    first_entry_position(stsd_payload) + 4
}

/// A sample entry counts as forced if its format carries the forced marker.
pub fn is_forced_format(format: &FourCC) -> bool {
    format.contains_ignore_case("forced") || format.contains_ignore_case("fcd")
}

/// Extract the first sample entry format from stsd box
pub fn parse_stsd<S: SeekableStream + ?Sized>(
    stream: &mut S,
    stsd: &BoxHeader,
) -> Mp4FlagsResult<SampleDescription> {
    let offset = stsd.payload_start();
    let entry = first_entry_position(offset);
    let mut description = SampleDescription {
        offset,
        first_entry_format: None,
    };
    if stsd.contains(entry, 8) {
        let mut entry_header = [0u8; 8];
        stream.read_exact_at(entry, &mut entry_header)?;
        description.first_entry_format = Some(FourCC([
            entry_header[4],
            entry_header[5],
            entry_header[6],
            entry_header[7],
        ]));
    }
    Ok(description)
}
