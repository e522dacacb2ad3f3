pub mod seekable_stream;
pub use seekable_stream::{LocalSeekableStream, SeekableStream, WritableStream};
