use std::io;

use bytes::{Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder, LengthDelimitedCodec};

/// Largest payload a 2-byte length prefix can describe.
pub const MAX_FRAME_LEN: usize = u16::MAX as usize;

/// Text frames: a 2-byte big-endian length followed by that many bytes of
/// UTF-8. Used in both directions.
#[derive(Debug)]
pub struct Utf8FrameCodec {
    inner: LengthDelimitedCodec,
}

impl Utf8FrameCodec {
    pub fn new() -> Self {
        Self {
            inner: LengthDelimitedCodec::builder()
                .length_field_length(2)
                .max_frame_length(MAX_FRAME_LEN)
                .new_codec(),
        }
    }
}

impl Default for Utf8FrameCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for Utf8FrameCodec {
    type Item = String;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.inner.decode(src)? {
            Some(frame) => String::from_utf8(frame.to_vec())
                .map(Some)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            None => Ok(None),
        }
    }
}

impl Encoder<String> for Utf8FrameCodec {
    type Error = io::Error;

    fn encode(&mut self, item: String, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.inner.encode(Bytes::from(item), dst)
    }
}

impl Encoder<&str> for Utf8FrameCodec {
    type Error = io::Error;

    fn encode(&mut self, item: &str, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.inner.encode(Bytes::copy_from_slice(item.as_bytes()), dst)
    }
}
