use crate::errors::Mp4FlagsResult;
use crate::mp4::hdlr::parse_hdlr;
use crate::mp4::mdhd::parse_mdhd;
use crate::mp4::r#box::{for_each_box, BoxHeader};
use crate::mp4::stsd::parse_stsd;
use crate::mp4::tkhd::parse_tkhd;
use crate::streams::SeekableStream;
use crate::tracks::Track;
use log::debug;

/// Extract track metadata and patch offsets from a trak box.
///
/// Missing children leave their fields at the default value; the caller decides
/// what to do with a record whose track id is still 0.
pub fn extract_track_from_trak<S: SeekableStream + ?Sized>(
    stream: &mut S,
    trak: &BoxHeader,
) -> Mp4FlagsResult<Track> {
    let mut track = Track::default();
    for_each_box(stream, trak.payload_start(), trak.end(), |stream, child| {
        match child.box_type.as_bytes() {
            b"tkhd" => {
                if let Some(tkhd) = parse_tkhd(stream, child)? {
                    track.track_header_flags_offset = Some(tkhd.flags_offset);
                    track.default_flag = tkhd.is_default();
                    track.track_id = tkhd.track_id;
                }
            }
            b"mdia" => parse_mdia(stream, child, &mut track)?,
            _ => {}
        }
        Ok(())
    })?;
    debug!(
        "trak at {}: id={} type={:?} tkhd_flags={:?} stsd={:?}",
        trak.offset,
        track.track_id,
        track.media_type,
        track.track_header_flags_offset,
        track.sample_description_offset
    );
    Ok(track)
}

fn parse_mdia<S: SeekableStream + ?Sized>(
    stream: &mut S,
    mdia: &BoxHeader,
    track: &mut Track,
) -> Mp4FlagsResult<()> {
    for_each_box(stream, mdia.payload_start(), mdia.end(), |stream, child| {
        match child.box_type.as_bytes() {
            b"mdhd" => {
                let mdhd = parse_mdhd(stream, child)?;
                track.media_header_offset = Some(mdhd.offset);
                track.language = mdhd.language;
            }
            b"hdlr" => track.media_type = parse_hdlr(stream, child)?,
            b"minf" => parse_minf(stream, child, track)?,
            _ => {}
        }
        Ok(())
    })
}

fn parse_minf<S: SeekableStream + ?Sized>(
    stream: &mut S,
    minf: &BoxHeader,
    track: &mut Track,
) -> Mp4FlagsResult<()> {
    for_each_box(stream, minf.payload_start(), minf.end(), |stream, child| {
        if child.box_type.as_bytes() == b"stbl" {
            parse_stbl(stream, child, track)?;
        }
        Ok(())
    })
}

fn parse_stbl<S: SeekableStream + ?Sized>(
    stream: &mut S,
    stbl: &BoxHeader,
    track: &mut Track,
) -> Mp4FlagsResult<()> {
    for_each_box(stream, stbl.payload_start(), stbl.end(), |stream, child| {
        if child.box_type.as_bytes() == b"stsd" {
            let stsd = parse_stsd(stream, child)?;
            track.sample_description_offset = Some(stsd.offset);
            track.forced_flag = stsd.is_forced();
            track.sample_entry_format = stsd.first_entry_format;
        }
        Ok(())
    })
}
