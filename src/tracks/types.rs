use crate::errors::ArgumentError;
use crate::mp4::r#box::FourCC;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Kind of media a track carries, from its handler reference subtype
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaType {
    Video,
    Audio,
    Subtitle,
    Other(FourCC),
}

impl MediaType {
    pub fn from_handler(subtype: FourCC) -> Self {
        match &subtype.0 {
            b"vide" => MediaType::Video,
            b"soun" => MediaType::Audio,
            b"subt" | b"sbtl" | b"text" => MediaType::Subtitle,
            _ => MediaType::Other(subtype),
        }
    }

    pub fn name(&self) -> String {
        match self {
            MediaType::Video => "video".to_string(),
            MediaType::Audio => "audio".to_string(),
            MediaType::Subtitle => "subtitle".to_string(),
            MediaType::Other(tag) => tag.to_string(),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl Serialize for MediaType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name())
    }
}

/// Three-letter language code as stored in a media header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language(pub [u8; 3]);

impl Language {
    pub fn as_bytes(&self) -> &[u8; 3] {
        &self.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}

impl FromStr for Language {
    type Err = ArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            [a, b, c] if s.bytes().all(|ch| ch.is_ascii_lowercase()) => Ok(Language([*a, *b, *c])),
            _ => Err(ArgumentError::new(format!(
                "'{}' is not a three-letter lowercase language code",
                s
            ))),
        }
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// A track without a handler reference lists as "unknown".
fn serialize_media_type<S: Serializer>(
    media_type: &Option<MediaType>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match media_type {
        Some(media_type) => media_type.serialize(serializer),
        None => serializer.serialize_str("unknown"),
    }
}

/// The two per-track flags that can be patched in place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackFlag {
    Default,
    Forced,
}

impl TrackFlag {
    pub fn name(&self) -> &'static str {
        match self {
            TrackFlag::Default => "default",
            TrackFlag::Forced => "forced",
        }
    }
}

impl fmt::Display for TrackFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TrackFlag {
    type Err = ArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(TrackFlag::Default),
            "forced" => Ok(TrackFlag::Forced),
            _ => Err(ArgumentError::new(format!("unknown flag '{}'", s))),
        }
    }
}

/// Metadata for one track box, with the offsets needed to patch it later.
///
/// Offsets are only valid for the file state they were read from; build a new
/// record after any mutation.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct Track {
    #[serde(rename = "id")]
    pub track_id: u32,
    #[serde(rename = "type", serialize_with = "serialize_media_type")]
    pub media_type: Option<MediaType>,
    #[serde(rename = "lang")]
    pub language: Option<Language>,
    #[serde(rename = "default")]
    pub default_flag: bool,
    #[serde(rename = "forced")]
    pub forced_flag: bool,
    /// First of the three flag bytes inside the tkhd payload
    #[serde(skip)]
    pub track_header_flags_offset: Option<u64>,
    /// Start of the stsd payload
    #[serde(skip)]
    pub sample_description_offset: Option<u64>,
    /// Start of the mdhd payload
    #[serde(skip)]
    pub media_header_offset: Option<u64>,
    /// Format tag of the first sample entry, as read
    #[serde(skip)]
    pub sample_entry_format: Option<FourCC>,
}

impl Track {
    pub fn flag(&self, flag: TrackFlag) -> bool {
        match flag {
            TrackFlag::Default => self.default_flag,
            TrackFlag::Forced => self.forced_flag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_without_handler_lists_as_unknown() {
        let track = Track {
            track_id: 4,
            ..Track::default()
        };
        let json = serde_json::to_value(&track).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 4, "type": "unknown", "lang": null, "default": false, "forced": false})
        );
    }

    #[test]
    fn test_other_handler_lists_its_tag() {
        let track = Track {
            track_id: 5,
            media_type: Some(MediaType::from_handler(FourCC(*b"meta"))),
            ..Track::default()
        };
        let json = serde_json::to_value(&track).unwrap();
        assert_eq!(json["type"], "meta");
    }
}
