//! Decompression of the transport payload.
//!
//! Two interchangeable [`Inflater`]s exist. The primary one wraps `flate2`'s
//! streaming decoders. The fallback drives `miniz_oxide` directly and parses
//! the gzip framing and trailer (CRC32 and length) itself; it is only
//! initialised the first time a caller asks for it. Both accept gzip and zlib
//! containers, reject the same corrupt streams and yield identical bytes.

use std::io::Read;

use flate2::read::{GzDecoder, ZlibDecoder};
use flate2::Crc;
use once_cell::sync::Lazy;

use crate::error::{DecodeError, InflatePath};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const DEFLATE_METHOD: u8 = 8;

const FHCRC: u8 = 0x02;
const FEXTRA: u8 = 0x04;
const FNAME: u8 = 0x08;
const FCOMMENT: u8 = 0x10;

/// Compressed container detected from the leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Gzip,
    Zlib,
}

/// Identify the container format, if any.
pub fn sniff(bytes: &[u8]) -> Option<Container> {
    match bytes {
        [a, b, ..] if [*a, *b] == GZIP_MAGIC => Some(Container::Gzip),
        [cmf, flg, ..] if cmf & 0x0f == DEFLATE_METHOD && (u16::from(*cmf) << 8 | u16::from(*flg)) % 31 == 0 => {
            Some(Container::Zlib)
        }
        _ => None,
    }
}

/// A decompression routine.
pub trait Inflater: Send + Sync {
    fn path(&self) -> InflatePath;

    fn inflate(&self, bytes: &[u8], container: Container) -> Result<Vec<u8>, DecodeError>;
}

/// `flate2` backed decoder.
pub struct StreamInflater;

impl Inflater for StreamInflater {
    fn path(&self) -> InflatePath {
        InflatePath::Primary
    }

    fn inflate(&self, bytes: &[u8], container: Container) -> Result<Vec<u8>, DecodeError> {
        let mut out = Vec::with_capacity(bytes.len() * 4);
        let result = match container {
            Container::Gzip => GzDecoder::new(bytes).read_to_end(&mut out),
            Container::Zlib => ZlibDecoder::new(bytes).read_to_end(&mut out),
        };
        result.map_err(|e| DecodeError::Inflate {
            path: InflatePath::Primary,
            message: e.to_string(),
        })?;
        Ok(out)
    }
}

/// `miniz_oxide` backed decoder with its own gzip framing.
pub struct BlockInflater;

impl Inflater for BlockInflater {
    fn path(&self) -> InflatePath {
        InflatePath::Fallback
    }

    fn inflate(&self, bytes: &[u8], container: Container) -> Result<Vec<u8>, DecodeError> {
        match container {
            Container::Zlib => {
                miniz_oxide::inflate::decompress_to_vec_zlib(bytes).map_err(|e| fallback_error(format!("{:?}", e.status)))
            }
            Container::Gzip => {
                let body_start = gzip_header_len(bytes)?;
                if bytes.len() < body_start + 8 {
                    return Err(fallback_error("truncated gzip stream"));
                }
                let out = miniz_oxide::inflate::decompress_to_vec(&bytes[body_start..])
                    .map_err(|e| fallback_error(format!("{:?}", e.status)))?;

                let trailer = &bytes[bytes.len() - 8..];
                let stored_crc = u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
                let mut crc = Crc::new();
                crc.update(&out);
                if crc.sum() != stored_crc {
                    return Err(fallback_error(format!(
                        "gzip CRC32 mismatch (stored {:08x}, computed {:08x})",
                        stored_crc,
                        crc.sum()
                    )));
                }

                let expected = u32::from_le_bytes([trailer[4], trailer[5], trailer[6], trailer[7]]);
                // ISIZE is the uncompressed length modulo 2^32.
                if out.len() as u32 != expected {
                    return Err(DecodeError::LengthMismatch {
                        expected,
                        actual: out.len(),
                    });
                }
                Ok(out)
            }
        }
    }
}

fn fallback_error(message: impl Into<String>) -> DecodeError {
    DecodeError::Inflate {
        path: InflatePath::Fallback,
        message: message.into(),
    }
}

/// Length of the RFC 1952 member header, including optional fields.
fn gzip_header_len(bytes: &[u8]) -> Result<usize, DecodeError> {
    if bytes.len() < 10 {
        return Err(fallback_error("truncated gzip header"));
    }
    if bytes[2] != DEFLATE_METHOD {
        return Err(fallback_error(format!(
            "unsupported gzip compression method {}",
            bytes[2]
        )));
    }

    let flags = bytes[3];
    let mut pos = 10;

    if flags & FEXTRA != 0 {
        let len_bytes = bytes
            .get(pos..pos + 2)
            .ok_or_else(|| fallback_error("truncated gzip extra field"))?;
        let extra_len = usize::from(u16::from_le_bytes([len_bytes[0], len_bytes[1]]));
        pos += 2 + extra_len;
    }
    if flags & FNAME != 0 {
        pos = skip_zero_terminated(bytes, pos)?;
    }
    if flags & FCOMMENT != 0 {
        pos = skip_zero_terminated(bytes, pos)?;
    }
    if flags & FHCRC != 0 {
        pos += 2;
    }

    if pos > bytes.len() {
        return Err(fallback_error("truncated gzip header"));
    }
    Ok(pos)
}

fn skip_zero_terminated(bytes: &[u8], start: usize) -> Result<usize, DecodeError> {
    bytes
        .get(start..)
        .and_then(|rest| rest.iter().position(|&b| b == 0))
        .map(|offset| start + offset + 1)
        .ok_or_else(|| fallback_error("unterminated gzip header string"))
}

static PRIMARY: StreamInflater = StreamInflater;

static FALLBACK: Lazy<BlockInflater> = Lazy::new(|| {
    log::debug!("Fast inflate path unavailable, initialising fallback inflater");
    BlockInflater
});

/// Pick the decompression routine for this run.
pub fn select(fast_path: bool) -> &'static dyn Inflater {
    if fast_path {
        &PRIMARY
    } else {
        &*FALLBACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::{GzEncoder, ZlibEncoder};
    use flate2::{Compression, GzBuilder};
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    }

    fn zlib(data: &[u8]) -> Vec<u8> {
        let mut enc = ZlibEncoder::new(Vec::new(), Compression::best());
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    }

    #[test]
    fn test_sniff_containers() {
        assert_eq!(sniff(&gzip(b"x")), Some(Container::Gzip));
        assert_eq!(sniff(&zlib(b"x")), Some(Container::Zlib));
        assert_eq!(sniff(b"{\"a\":1}"), None);
        assert_eq!(sniff(b""), None);
    }

    #[test]
    fn test_both_paths_produce_identical_bytes() {
        let text = "const metricsData = {\"packageStats\": []};".repeat(200);
        for (compressed, container) in [
            (gzip(text.as_bytes()), Container::Gzip),
            (zlib(text.as_bytes()), Container::Zlib),
        ] {
            let primary = StreamInflater.inflate(&compressed, container).unwrap();
            let fallback = BlockInflater.inflate(&compressed, container).unwrap();
            assert_eq!(primary, fallback);
            assert_eq!(primary, text.as_bytes());
        }
    }

    #[test]
    fn test_fallback_skips_optional_header_fields() {
        let mut enc = GzBuilder::new()
            .filename("metrics.js")
            .comment("generated")
            .extra(vec![1, 2, 3])
            .write(Vec::new(), Compression::fast());
        enc.write_all(b"hello metrics").unwrap();
        let compressed = enc.finish().unwrap();

        let out = BlockInflater.inflate(&compressed, Container::Gzip).unwrap();
        assert_eq!(out, b"hello metrics");
    }

    #[test]
    fn test_truncated_stream_fails_on_both_paths() {
        let compressed = gzip(&b"abcdefghij".repeat(100));
        let truncated = &compressed[..compressed.len() / 2];
        assert!(StreamInflater.inflate(truncated, Container::Gzip).is_err());
        assert!(BlockInflater.inflate(truncated, Container::Gzip).is_err());
    }

    #[test]
    fn test_corrupted_crc_fails_on_both_paths() {
        let mut compressed = gzip(&b"const metricsData = {};".repeat(20));
        let crc_offset = compressed.len() - 8;
        compressed[crc_offset] ^= 0xff;

        assert!(StreamInflater.inflate(&compressed, Container::Gzip).is_err());
        let err = BlockInflater.inflate(&compressed, Container::Gzip).unwrap_err();
        assert!(
            matches!(err, DecodeError::Inflate { path: InflatePath::Fallback, .. }),
            "{err:?}"
        );
    }

    #[test]
    fn test_corrupted_length_fails_on_both_paths() {
        let mut compressed = gzip(b"hello metrics");
        let last = compressed.len() - 1;
        compressed[last] ^= 0x01;

        assert!(StreamInflater.inflate(&compressed, Container::Gzip).is_err());
        assert!(BlockInflater.inflate(&compressed, Container::Gzip).is_err());
    }

    #[test]
    fn test_select_reports_path() {
        assert_eq!(select(true).path(), InflatePath::Primary);
        assert_eq!(select(false).path(), InflatePath::Fallback);
    }
}
