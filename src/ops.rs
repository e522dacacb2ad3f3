use crate::errors::{ArgumentError, Mp4FlagsResult};
use crate::mp4::collect_tracks;
use crate::mp4::r#box::FourCC;
use crate::patch::{apply, plan_default, plan_forced, Patch};
use crate::streams::{LocalSeekableStream, SeekableStream, WritableStream};
use crate::tracks::{Track, TrackFlag};
use log::{debug, info};
use std::path::Path;

/// Knobs for flag patching
#[derive(Debug, Clone, Default)]
pub struct PatchOptions {
    /// Plan the patch but leave the file untouched
    pub dry_run: bool,
    /// Sample entry format to put back when clearing the forced flag
    pub restore_format: Option<FourCC>,
}

/// Everything the tool can do to a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    List,
    SetFlag {
        track_id: u32,
        flag: TrackFlag,
        value: bool,
    },
}

#[derive(Debug)]
pub enum Outcome {
    Tracks(Vec<Track>),
    Patched(Patch),
}

impl Operation {
    pub fn run<P: AsRef<Path>>(&self, path: P, options: &PatchOptions) -> Mp4FlagsResult<Outcome> {
        match *self {
            Operation::List => list_tracks(path).map(Outcome::Tracks),
            Operation::SetFlag {
                track_id,
                flag,
                value,
            } => set_flag(path, track_id, flag, value, options).map(Outcome::Patched),
        }
    }
}

/// List every track of a local file
pub fn list_tracks<P: AsRef<Path>>(path: P) -> Mp4FlagsResult<Vec<Track>> {
    let mut stream = LocalSeekableStream::open(path)?;
    collect_tracks(&mut stream)
}

/// Set or clear one flag of one track in a local file.
///
/// The file is opened once; tracks are read and the patch is written through
/// the same handle.
pub fn set_flag<P: AsRef<Path>>(
    path: P,
    track_id: u32,
    flag: TrackFlag,
    value: bool,
    options: &PatchOptions,
) -> Mp4FlagsResult<Patch> {
    if options.dry_run {
        let mut stream = LocalSeekableStream::open(path)?;
        let patch = plan_flag(&mut stream, track_id, flag, value, options.restore_format)?;
        info!("Dry run, not writing {}", patch);
        return Ok(patch);
    }
    let mut stream = LocalSeekableStream::open_rw(path)?;
    apply_flag(&mut stream, track_id, flag, value, options.restore_format)
}

/// Walk `stream`, find the track and plan the flag change without writing.
pub fn plan_flag<S: SeekableStream + ?Sized>(
    stream: &mut S,
    track_id: u32,
    flag: TrackFlag,
    value: bool,
    restore_format: Option<FourCC>,
) -> Mp4FlagsResult<Patch> {
    let tracks = collect_tracks(stream)?;
    let track = tracks
        .iter()
        .find(|t| t.track_id == track_id)
        .ok_or_else(|| ArgumentError::new(format!("track {} not found", track_id)))?;
    debug!(
        "Track {}: {} is currently {}",
        track_id,
        flag,
        track.flag(flag)
    );

    match flag {
        TrackFlag::Default => {
            let offset = track.track_header_flags_offset.ok_or_else(|| {
                ArgumentError::new(format!("track {} has no track header", track_id))
            })?;
            plan_default(stream, offset, value)
        }
        TrackFlag::Forced => {
            let offset = track.sample_description_offset.ok_or_else(|| {
                ArgumentError::new(format!("track {} has no sample description", track_id))
            })?;
            if track.sample_entry_format.is_none() {
                return Err(
                    ArgumentError::new(format!("track {} has no sample entry", track_id)).into(),
                );
            }
            plan_forced(stream, offset, value, restore_format)
        }
    }
}

/// Plan and apply a flag change in one pass over `stream`.
pub fn apply_flag<W: WritableStream + ?Sized>(
    stream: &mut W,
    track_id: u32,
    flag: TrackFlag,
    value: bool,
    restore_format: Option<FourCC>,
) -> Mp4FlagsResult<Patch> {
    let patch = plan_flag(stream, track_id, flag, value, restore_format)?;
    apply(stream, &patch)?;
    info!("Track {}: {} -> {}", track_id, flag, value);
    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Mp4FlagsError;
    use crate::mp4::fixtures::*;
    use std::io::Cursor;

    #[test]
    fn test_apply_flag_scenario() {
        let mut stream = Cursor::new(two_track_file());
        apply_flag(&mut stream, 1, TrackFlag::Default, true, None).unwrap();
        let tracks = collect_tracks(&mut stream).unwrap();
        assert!(tracks[0].default_flag);
        assert!(tracks[1].default_flag);
    }

    #[test]
    fn test_unknown_track_writes_nothing() {
        let original = two_track_file();
        let mut stream = Cursor::new(original.clone());
        let err = apply_flag(&mut stream, 42, TrackFlag::Forced, true, None).unwrap_err();
        assert!(matches!(err, Mp4FlagsError::InvalidArgument(_)));
        assert_eq!(stream.get_ref(), &original);
    }

    #[test]
    fn test_forced_needs_a_sample_entry() {
        let mut stbl = make_box("stsd", &[0; 8]);
        stbl.extend_from_slice(&make_box("stts", &[0; 8]));
        let traks = [trak_with_stbl(&TrakParams::audio(1, 0x000003), &stbl)];
        let original = [ftyp(), moov(&traks)].concat();
        let mut stream = Cursor::new(original.clone());

        let err = apply_flag(&mut stream, 1, TrackFlag::Forced, true, None).unwrap_err();
        assert!(matches!(err, Mp4FlagsError::InvalidArgument(_)));
        assert_eq!(stream.get_ref(), &original);

        // the default flag lives in tkhd and is still patchable
        apply_flag(&mut stream, 1, TrackFlag::Default, false, None).unwrap();
        assert!(!collect_tracks(&mut stream).unwrap()[0].flag(TrackFlag::Default));
    }

    #[test]
    fn test_track_flag_reports_current_state() {
        let mut stream = Cursor::new(two_track_file());
        let tracks = collect_tracks(&mut stream).unwrap();
        assert!(!tracks[0].flag(TrackFlag::Default));
        assert!(tracks[1].flag(TrackFlag::Default));

        apply_flag(&mut stream, 1, TrackFlag::Forced, true, None).unwrap();
        let tracks = collect_tracks(&mut stream).unwrap();
        assert!(tracks[0].flag(TrackFlag::Forced));
        assert!(!tracks[1].flag(TrackFlag::Forced));
    }

    #[test]
    fn test_flag_names() {
        assert_eq!("default".parse::<TrackFlag>().unwrap(), TrackFlag::Default);
        assert_eq!("forced".parse::<TrackFlag>().unwrap(), TrackFlag::Forced);
        assert!("hidden".parse::<TrackFlag>().is_err());
    }
}
