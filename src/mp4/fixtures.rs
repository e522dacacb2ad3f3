//! Synthetic box trees for unit tests.

use crate::mp4::r#box::{write_box_header, write_large_box_header};

pub fn make_box(name: &str, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    write_box_header(&mut buf, name, (payload.len() + 8) as u32);
    buf.extend_from_slice(payload);
    buf
}

pub fn make_large_box(name: &str, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    write_large_box_header(&mut buf, name, (payload.len() + 16) as u64);
    buf.extend_from_slice(payload);
    buf
}

pub fn tkhd(version: u8, flags: u32, track_id: u32) -> Vec<u8> {
    let mut payload = vec![version];
    payload.extend_from_slice(&flags.to_be_bytes()[1..]);
    if version == 1 {
        payload.extend_from_slice(&[0; 16]); // creation + modification
        payload.extend_from_slice(&track_id.to_be_bytes());
        payload.extend_from_slice(&[0; 4]); // reserved
        payload.extend_from_slice(&[0; 8]); // duration
    } else {
        payload.extend_from_slice(&[0; 8]);
        payload.extend_from_slice(&track_id.to_be_bytes());
        payload.extend_from_slice(&[0; 4]);
        payload.extend_from_slice(&[0; 4]);
    }
    // reserved, layer, alternate group, volume, reserved, matrix, width, height
    payload.extend_from_slice(&[0; 60]);
    make_box("tkhd", &payload)
}

pub fn mdhd(version: u8, language: u16) -> Vec<u8> {
    let mut payload = vec![version, 0, 0, 0];
    if version == 1 {
        payload.extend_from_slice(&[0; 16]);
        payload.extend_from_slice(&1000u32.to_be_bytes());
        payload.extend_from_slice(&[0; 8]);
    } else {
        payload.extend_from_slice(&[0; 8]);
        payload.extend_from_slice(&1000u32.to_be_bytes());
        payload.extend_from_slice(&[0; 4]);
    }
    payload.extend_from_slice(&language.to_be_bytes());
    payload.extend_from_slice(&[0; 2]);
    make_box("mdhd", &payload)
}

pub fn hdlr(subtype: &[u8; 4]) -> Vec<u8> {
    let mut payload = vec![0u8; 8];
    payload.extend_from_slice(subtype);
    payload.extend_from_slice(&[0; 12]);
    payload.push(0); // empty name
    make_box("hdlr", &payload)
}

pub fn stsd(format: &[u8; 4]) -> Vec<u8> {
    let mut payload = vec![0, 0, 0, 0, 0, 0, 0, 1];
    payload.extend_from_slice(&16u32.to_be_bytes());
    payload.extend_from_slice(format);
    payload.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 1]);
    make_box("stsd", &payload)
}

#[derive(Debug, Clone)]
pub struct TrakParams {
    pub id: u32,
    pub version: u8,
    pub flags: u32,
    pub handler: [u8; 4],
    pub language: u16,
    pub format: [u8; 4],
}

impl TrakParams {
    pub fn video(id: u32, flags: u32) -> Self {
        TrakParams {
            id,
            version: 0,
            flags,
            handler: *b"vide",
            language: 0x55C4,
            format: *b"avc1",
        }
    }

    pub fn audio(id: u32, flags: u32) -> Self {
        TrakParams {
            id,
            version: 0,
            flags,
            handler: *b"soun",
            language: 0x15C7,
            format: *b"mp4a",
        }
    }
}

pub fn trak(params: &TrakParams) -> Vec<u8> {
    trak_with_stbl(params, &stsd(&params.format))
}

/// Like `trak`, with the stbl payload given verbatim.
pub fn trak_with_stbl(params: &TrakParams, stbl_payload: &[u8]) -> Vec<u8> {
    let stbl = make_box("stbl", stbl_payload);
    let minf = make_box("minf", &stbl);
    let mdia = make_box(
        "mdia",
        &[mdhd(params.version, params.language), hdlr(&params.handler), minf].concat(),
    );
    make_box("trak", &[tkhd(params.version, params.flags, params.id), mdia].concat())
}

pub fn ftyp() -> Vec<u8> {
    make_box("ftyp", b"isom\0\0\0\0isomiso2")
}

pub fn moov(traks: &[Vec<u8>]) -> Vec<u8> {
    let mut payload = make_box("mvhd", &[0; 100]);
    for trak in traks {
        payload.extend_from_slice(trak);
    }
    make_box("moov", &payload)
}

/// One video track (id 1, not default) and one audio track (id 2, default)
pub fn two_track_file() -> Vec<u8> {
    let traks = [
        trak(&TrakParams::video(1, 0x000002)),
        trak(&TrakParams::audio(2, 0x000003)),
    ];
    [ftyp(), moov(&traks), make_box("mdat", &[0xAB; 32])].concat()
}
