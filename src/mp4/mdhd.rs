use crate::errors::Mp4FlagsResult;
use crate::mp4::r#box::BoxHeader;
use crate::streams::SeekableStream;
use crate::tracks::Language;

/// Media header fields the track listing needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaHeader {
    /// Start of the mdhd payload
    pub offset: u64,
    pub language: Option<Language>,
}

/// Parse mdhd box to get its language
pub fn parse_mdhd<S: SeekableStream + ?Sized>(
    stream: &mut S,
    mdhd: &BoxHeader,
) -> Mp4FlagsResult<MediaHeader> {
    let offset = mdhd.payload_start();
    let mut header = MediaHeader {
        offset,
        language: None,
    };
    if !mdhd.contains(offset, 1) {
        return Ok(header);
    }

    let version = stream.read_u8_at(offset)?;
    // version+flags, creation+modification, timescale, duration
    let lang_pos = if version == 1 {
        offset + 4 + 16 + 4 + 8
    } else {
        offset + 4 + 8 + 4 + 4
    };
    if mdhd.contains(lang_pos, 2) {
        header.language = decode_language(stream.read_u16_at(lang_pos)?);
    }
    Ok(header)
}

/// Decode a packed ISO 639-2/T code.
///
/// Format: [pad bit][char1: 5 bits][char2: 5 bits][char3: 5 bits], each char
/// stored as an offset from 0x60. Only a zero code means no language; the pad
/// bit is dropped after that test.
pub fn decode_language(packed: u16) -> Option<Language> {
    if packed == 0 {
        return None;
    }
    let packed = packed & 0x7FFF;
    let char1 = ((packed >> 10) & 0x1F) as u8 + 0x60;
    let char2 = ((packed >> 5) & 0x1F) as u8 + 0x60;
    let char3 = (packed & 0x1F) as u8 + 0x60;
    Some(Language([char1, char2, char3]))
}

/// Pack a language code back into its 15-bit form.
pub fn pack_language(language: &Language) -> u16 {
    language
        .as_bytes()
        .iter()
        .fold(0u16, |acc, &c| (acc << 5) | (c.wrapping_sub(0x60) & 0x1F) as u16)
}
