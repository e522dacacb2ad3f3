pub mod r#box;
pub use r#box::{for_each_box, read_box_header, BoxHeader, FourCC};
pub mod moov;
pub use moov::collect_tracks;
pub mod trak;
pub use trak::extract_track_from_trak;
pub mod tkhd;
pub mod mdhd;
pub use mdhd::{decode_language, pack_language};
pub mod hdlr;
pub mod stsd;
pub use stsd::FORCED_SAMPLE_ENTRY;

#[cfg(test)]
pub(crate) mod fixtures;
