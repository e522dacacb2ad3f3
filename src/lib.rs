pub mod bits;

pub mod errors;
pub use errors::{ArgumentError, Mp4Error, Mp4FlagsError, Mp4FlagsResult, PatchError};

pub mod streams;
pub use streams::{LocalSeekableStream, SeekableStream, WritableStream};

pub mod mp4;
pub use mp4::{collect_tracks, FourCC};

pub mod tracks;
pub use tracks::{Language, MediaType, Track, TrackFlag};

pub mod patch;
pub use patch::{apply, set_default, set_forced, Patch};

pub mod ops;
pub use ops::{list_tracks, set_flag, Operation, Outcome, PatchOptions};
