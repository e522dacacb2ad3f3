/*
# Bits Reader Module

 Byte-aligned big-endian readers for the fixed-width integers found in box headers
 and full-box fields (u8, u16, u24, u32, u64), plus the 24-bit flag helpers used
 when patching a full box's flags in place.
*/

use std::io::{self, Read};

/// Read one byte from a `Read` implementation.
pub fn read_u8<R: Read + ?Sized>(r: &mut R) -> io::Result<u8> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Read a 16-bit big endian value from `r`.
pub fn read_u16_be<R: Read + ?Sized>(r: &mut R) -> io::Result<u16> {
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf)?;
    Ok(u16::from_be_bytes(buf))
}

/// Read a 24-bit big endian value from `r`.
pub fn read_u24<R: Read + ?Sized>(r: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 3];
    r.read_exact(&mut buf)?;
    Ok(u24_from_be_bytes(buf))
}

/// Read a 32-bit big endian value from `r`.
pub fn read_u32_be<R: Read + ?Sized>(r: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

/// Read a 64-bit big endian value from `r`.
pub fn read_u64_be<R: Read + ?Sized>(r: &mut R) -> io::Result<u64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_be_bytes(buf))
}

pub fn u24_from_be_bytes(buf: [u8; 3]) -> u32 {
    ((buf[0] as u32) << 16) | ((buf[1] as u32) << 8) | buf[2] as u32
}

/// Low 24 bits of `value` as big endian bytes; the top byte is dropped.
pub fn u24_to_be_bytes(value: u32) -> [u8; 3] {
    [(value >> 16) as u8, (value >> 8) as u8, value as u8]
}
