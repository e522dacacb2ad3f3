use crate::bits::reader::{read_u16_be, read_u24, read_u32_be, read_u64_be, read_u8};
use crate::errors::{Mp4FlagsResult, PatchError};
use std::fs::OpenOptions;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// A random-access byte source. Every read names its absolute position, so
/// callers never depend on where a previous read left the cursor.
pub trait SeekableStream: Read + Seek {
    /// Total length of the source in bytes. Leaves the cursor where it was.
    fn length(&mut self) -> io::Result<u64> {
        let current = self.stream_position()?;
        let end = self.seek(SeekFrom::End(0))?;
        if current != end {
            self.seek(SeekFrom::Start(current))?;
        }
        Ok(end)
    }

    fn read_exact_at(&mut self, pos: u64, buf: &mut [u8]) -> io::Result<()> {
        self.seek(SeekFrom::Start(pos))?;
        self.read_exact(buf)
    }

    fn read_u8_at(&mut self, pos: u64) -> io::Result<u8> {
        self.seek(SeekFrom::Start(pos))?;
        read_u8(self)
    }

    fn read_u16_at(&mut self, pos: u64) -> io::Result<u16> {
        self.seek(SeekFrom::Start(pos))?;
        read_u16_be(self)
    }

    fn read_u24_at(&mut self, pos: u64) -> io::Result<u32> {
        self.seek(SeekFrom::Start(pos))?;
        read_u24(self)
    }

    fn read_u32_at(&mut self, pos: u64) -> io::Result<u32> {
        self.seek(SeekFrom::Start(pos))?;
        read_u32_be(self)
    }

    fn read_u64_at(&mut self, pos: u64) -> io::Result<u64> {
        self.seek(SeekFrom::Start(pos))?;
        read_u64_be(self)
    }
}

impl<T: Read + Seek + ?Sized> SeekableStream for T {}

/// A byte source that can also be patched in place.
pub trait WritableStream: SeekableStream + Write {
    /// Overwrite `bytes` at `pos`. The source never grows: a write that would
    /// reach past the current end is rejected before anything is written.
    fn write_all_at(&mut self, pos: u64, bytes: &[u8]) -> Mp4FlagsResult<()> {
        let length = self.length()?;
        let len = bytes.len() as u64;
        if pos.checked_add(len).map_or(true, |end| end > length) {
            return Err(PatchError::OutOfBounds {
                offset: pos,
                len,
                length,
            }
            .into());
        }
        self.seek(SeekFrom::Start(pos))?;
        self.write_all(bytes)?;
        self.flush()?;
        Ok(())
    }
}

impl<T: SeekableStream + Write + ?Sized> WritableStream for T {}

/// Local file wrapper
pub struct LocalSeekableStream(std::fs::File);

impl LocalSeekableStream {
    /// Open a file for reading only.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(LocalSeekableStream(std::fs::File::open(path)?))
    }

    /// Open an existing file for in-place patching. Never creates or truncates.
    pub fn open_rw<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        Ok(LocalSeekableStream(file))
    }
}

impl Read for LocalSeekableStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl Seek for LocalSeekableStream {
    fn seek(&mut self, pos: io::SeekFrom) -> io::Result<u64> {
        self.0.seek(pos)
    }
}

impl Write for LocalSeekableStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}
