use mp4flags::mp4::r#box::write_box_header;
use std::io::Write;
use tempfile::NamedTempFile;

fn make_box(name: &str, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    write_box_header(&mut buf, name, (payload.len() + 8) as u32);
    buf.extend_from_slice(payload);
    buf
}

fn trak(id: u32, flags: u32, handler: &[u8; 4], language: u16, format: &[u8; 4]) -> Vec<u8> {
    let mut tkhd = vec![0u8];
    tkhd.extend_from_slice(&flags.to_be_bytes()[1..]);
    tkhd.extend_from_slice(&[0; 8]);
    tkhd.extend_from_slice(&id.to_be_bytes());
    tkhd.extend_from_slice(&[0; 68]);

    let mut mdhd = vec![0u8; 20];
    mdhd.extend_from_slice(&language.to_be_bytes());
    mdhd.extend_from_slice(&[0; 2]);

    let mut hdlr = vec![0u8; 8];
    hdlr.extend_from_slice(handler);
    hdlr.extend_from_slice(&[0; 13]);

    let mut stsd = vec![0, 0, 0, 0, 0, 0, 0, 1];
    stsd.extend_from_slice(&16u32.to_be_bytes());
    stsd.extend_from_slice(format);
    stsd.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 1]);

    let stbl = make_box("stbl", &make_box("stsd", &stsd));
    let minf = make_box("minf", &stbl);
    let mdia = make_box(
        "mdia",
        &[make_box("mdhd", &mdhd), make_box("hdlr", &hdlr), minf].concat(),
    );
    make_box("trak", &[make_box("tkhd", &tkhd), mdia].concat())
}

/// ftyp, then a moov with a video track (id 1, not default), an audio track
/// (id 2, default) and a subtitle track (id 3, forced), then mdat.
pub fn sample_movie() -> Vec<u8> {
    let traks = [
        trak(1, 0x000002, b"vide", 0x55C4, b"avc1"),
        trak(2, 0x000003, b"soun", 0x15C7, b"mp4a"),
        trak(3, 0x000000, b"sbtl", 0x15C7, b"fcd "),
    ]
    .concat();
    [
        make_box("ftyp", b"isom\0\0\0\0isomiso2"),
        make_box("moov", &[make_box("mvhd", &[0; 100]), traks].concat()),
        make_box("mdat", &[0x5A; 64]),
    ]
    .concat()
}

pub fn write_temp(data: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(data).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}
