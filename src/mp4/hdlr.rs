use crate::errors::Mp4FlagsResult;
use crate::mp4::r#box::{BoxHeader, FourCC};
use crate::streams::SeekableStream;
use crate::tracks::MediaType;

/// Read the handler subtype of an hdlr box and classify it.
pub fn parse_hdlr<S: SeekableStream + ?Sized>(
    stream: &mut S,
    hdlr: &BoxHeader,
) -> Mp4FlagsResult<Option<MediaType>> {
    // version+flags (4) and pre_defined (4)
    let pos = hdlr.payload_start() + 8;
    if !hdlr.contains(pos, 4) {
        return Ok(None);
    }
    let mut subtype = [0u8; 4];
    stream.read_exact_at(pos, &mut subtype)?;
    Ok(Some(MediaType::from_handler(FourCC(subtype))))
}
