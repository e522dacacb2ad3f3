use crate::errors::{ArgumentError, Mp4Error, Mp4FlagsError, Mp4FlagsResult};
use crate::streams::SeekableStream;
use log::{debug, warn};
use std::fmt;
use std::str::FromStr;

/// Four character code identifying a box or a sample entry format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Case-insensitive substring test over the raw tag bytes.
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        let tag = self.0.to_ascii_lowercase();
        let needle = needle.to_ascii_lowercase();
        if needle.is_empty() {
            return true;
        }
        tag.windows(needle.len()).any(|w| w == needle.as_bytes())
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl FromStr for FourCC {
    type Err = ArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes: [u8; 4] = s
            .as_bytes()
            .try_into()
            .map_err(|_| ArgumentError::new(format!("'{}' is not a four character code", s)))?;
        Ok(FourCC(bytes))
    }
}

/// Box header information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxHeader {
    pub box_type: FourCC,
    /// Absolute offset of the first header byte
    pub offset: u64,
    /// Resolved size including the header; never 0 or 1
    pub size: u64,
    pub header_size: u64,
}

impl BoxHeader {
    pub fn name(&self) -> String {
        self.box_type.to_string()
    }

    pub fn payload_start(&self) -> u64 {
        self.offset + self.header_size
    }

    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.size)
    }

    /// True when `len` bytes starting at `pos` lie inside this box.
    pub fn contains(&self, pos: u64, len: u64) -> bool {
        pos >= self.payload_start() && pos.checked_add(len).is_some_and(|e| e <= self.end())
    }
}

/// Read the box header at `pos` inside a scope ending at `scope_end`.
///
/// A size of 1 means a 64-bit size follows the type; a size of 0 means the box
/// runs to the end of the enclosing scope.
pub fn read_box_header<S: SeekableStream + ?Sized>(
    stream: &mut S,
    pos: u64,
    scope_end: u64,
) -> Mp4FlagsResult<BoxHeader> {
    if !fits(pos, 8, scope_end) {
        return Err(Mp4Error::Truncated {
            offset: pos,
            end: scope_end,
        }
        .into());
    }
    let mut raw = [0u8; 8];
    stream.read_exact_at(pos, &mut raw).map_err(|e| {
        Mp4FlagsError::Mp4(Mp4Error::Error {
            message: format!("Failed to read box header at {}: {}", pos, e),
        })
    })?;
    let size32 = u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]);
    let box_type = FourCC([raw[4], raw[5], raw[6], raw[7]]);

    let (size, header_size) = match size32 {
        0 => (scope_end - pos, 8),
        1 => {
            if !fits(pos, 16, scope_end) {
                return Err(Mp4Error::Truncated {
                    offset: pos,
                    end: scope_end,
                }
                .into());
            }
            let size = stream.read_u64_at(pos + 8).map_err(|e| {
                Mp4FlagsError::Mp4(Mp4Error::Error {
                    message: format!("Failed to read extended box size at {}: {}", pos, e),
                })
            })?;
            (size, 16)
        }
        n => (n as u64, 8),
    };

    Ok(BoxHeader {
        box_type,
        offset: pos,
        size,
        header_size,
    })
}

/// Visit every box in `[start, end)` in file order.
///
/// Unrecognized boxes are skipped whole. Iteration stops silently at the first
/// header that does not fit, declares a size smaller than its own header, or
/// reaches past `end`; everything visited before that point stands.
pub fn for_each_box<S, F>(stream: &mut S, start: u64, end: u64, mut visit: F) -> Mp4FlagsResult<()>
where
    S: SeekableStream + ?Sized,
    F: FnMut(&mut S, &BoxHeader) -> Mp4FlagsResult<()>,
{
    let mut pos = start;
    while fits(pos, 8, end) {
        let header = match read_box_header(stream, pos, end) {
            Ok(header) => header,
            Err(Mp4FlagsError::Mp4(Mp4Error::Truncated { offset, end })) => {
                debug!("Truncated box header at {} (scope ends at {})", offset, end);
                break;
            }
            Err(e) => return Err(e),
        };

        if header.size < header.header_size {
            debug!(
                "Box '{}' at {} declares size {}, ending scope",
                header.name(),
                header.offset,
                header.size
            );
            break;
        }

        if header.end() > end {
            warn!(
                "Box '{}' at {} runs past its parent ({} > {}), ending scope",
                header.name(),
                header.offset,
                header.end(),
                end
            );
            break;
        }

        visit(stream, &header)?;
        pos = header.end();
    }
    Ok(())
}

fn fits(pos: u64, len: u64, end: u64) -> bool {
    pos.checked_add(len).is_some_and(|e| e <= end)
}

/// Write a box header to a vector
pub fn write_box_header(output: &mut Vec<u8>, name: &str, size: u32) {
    output.extend_from_slice(&size.to_be_bytes());
    output.extend_from_slice(name.as_bytes());
}

/// Write a box header that carries a 64-bit size
pub fn write_large_box_header(output: &mut Vec<u8>, name: &str, size: u64) {
    output.extend_from_slice(&1u32.to_be_bytes());
    output.extend_from_slice(name.as_bytes());
    output.extend_from_slice(&size.to_be_bytes());
}
