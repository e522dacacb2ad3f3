use crate::errors::Mp4FlagsResult;
use crate::mp4::r#box::{for_each_box, BoxHeader};
use crate::mp4::trak::extract_track_from_trak;
use crate::streams::SeekableStream;
use crate::tracks::Track;
use log::{debug, info};

/// Walk the whole file and return one record per track box, in file order.
///
/// Every moov box found at the top level is searched. Tracks without a track id
/// are dropped.
pub fn collect_tracks<S: SeekableStream + ?Sized>(stream: &mut S) -> Mp4FlagsResult<Vec<Track>> {
    let length = stream.length()?;
    let mut tracks = Vec::new();

    for_each_box(stream, 0, length, |stream, top| {
        if top.box_type.as_bytes() == b"moov" {
            debug!("moov box at {} ({} bytes)", top.offset, top.size);
            collect_tracks_from_moov(stream, top, &mut tracks)?;
        }
        Ok(())
    })?;

    info!("Found {} tracks", tracks.len());
    Ok(tracks)
}

fn collect_tracks_from_moov<S: SeekableStream + ?Sized>(
    stream: &mut S,
    moov: &BoxHeader,
    tracks: &mut Vec<Track>,
) -> Mp4FlagsResult<()> {
    for_each_box(stream, moov.payload_start(), moov.end(), |stream, child| {
        if child.box_type.as_bytes() == b"trak" {
            let track = extract_track_from_trak(stream, child)?;
            if track.track_id == 0 {
                debug!("Skipping trak at {} without a track id", child.offset);
            } else {
                tracks.push(track);
            }
        }
        Ok(())
    })
}
