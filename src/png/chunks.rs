//! Sequential PNG chunk walk.
//!
//! Layout after the 8-byte signature: `length (u32 BE) | type (4 ASCII) |
//! payload (length bytes) | CRC (4 bytes)`, repeated. CRCs are not verified.

use crate::error::FormatError;

pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

const LENGTH_LEN: usize = 4;
const TYPE_LEN: usize = 4;
const CRC_LEN: usize = 4;

pub const IHDR: [u8; 4] = *b"IHDR";
pub const TEXT: [u8; 4] = *b"tEXt";
pub const IEND: [u8; 4] = *b"IEND";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub kind: [u8; 4],
    pub data: &'a [u8],
    /// Offset of the chunk's length field.
    pub offset: usize,
}

impl Chunk<'_> {
    pub fn kind_name(&self) -> &str {
        std::str::from_utf8(&self.kind).unwrap_or("????")
    }
}

pub fn check_signature(bytes: &[u8]) -> Result<(), FormatError> {
    match bytes.get(..PNG_SIGNATURE.len()) {
        Some(head) if head == PNG_SIGNATURE => Ok(()),
        _ => Err(FormatError::InvalidSignature),
    }
}

/// Iterator over the chunks of a PNG stream. Stops after `IEND`, at the end of
/// the buffer, or after yielding the first error.
pub struct ChunkReader<'a> {
    bytes: &'a [u8],
    offset: usize,
    done: bool,
}

impl<'a> ChunkReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Result<Self, FormatError> {
        check_signature(bytes)?;
        Ok(ChunkReader {
            bytes,
            offset: PNG_SIGNATURE.len(),
            done: false,
        })
    }

    fn read_chunk(&mut self) -> Result<Chunk<'a>, FormatError> {
        let start = self.offset;
        let header = self.slice(start, LENGTH_LEN + TYPE_LEN)?;

        let length = u32::from_be_bytes([header[0], header[1], header[2], header[3]]);
        let kind = [header[4], header[5], header[6], header[7]];

        let data_start = start + LENGTH_LEN + TYPE_LEN;
        let data_len = usize::try_from(length)
            .map_err(|_| FormatError::LengthOverflow { offset: start })?;
        let data_end = data_start
            .checked_add(data_len)
            .ok_or(FormatError::LengthOverflow { offset: start })?;
        let chunk_end = data_end
            .checked_add(CRC_LEN)
            .ok_or(FormatError::LengthOverflow { offset: start })?;

        self.slice(start, chunk_end - start)?;
        self.offset = chunk_end;

        Ok(Chunk {
            kind,
            data: &self.bytes[data_start..data_end],
            offset: start,
        })
    }

    fn slice(&self, start: usize, len: usize) -> Result<&'a [u8], FormatError> {
        let available = self.bytes.len().saturating_sub(start);
        if len > available {
            return Err(FormatError::Truncated {
                offset: start,
                needed: len,
                available,
            });
        }
        Ok(&self.bytes[start..start + len])
    }
}

impl<'a> Iterator for ChunkReader<'a> {
    type Item = Result<Chunk<'a>, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.offset >= self.bytes.len() {
            return None;
        }
        let result = self.read_chunk();
        match &result {
            Ok(chunk) => self.done = chunk.kind == IEND,
            Err(_) => self.done = true,
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(kind: &[u8; 4], data: &[u8]) -> Vec<u8> {
        let mut out = (data.len() as u32).to_be_bytes().to_vec();
        out.extend_from_slice(kind);
        out.extend_from_slice(data);
        out.extend_from_slice(&[0, 0, 0, 0]);
        out
    }

    fn stream(chunks: &[Vec<u8>]) -> Vec<u8> {
        let mut out = PNG_SIGNATURE.to_vec();
        for c in chunks {
            out.extend_from_slice(c);
        }
        out
    }

    #[test]
    fn rejects_bad_signature() {
        assert_eq!(
            ChunkReader::new(b"GIF89a\0\0rest").err(),
            Some(FormatError::InvalidSignature)
        );
        assert_eq!(
            ChunkReader::new(&PNG_SIGNATURE[..5]).err(),
            Some(FormatError::InvalidSignature)
        );
    }

    #[test]
    fn walks_chunks_in_order() {
        let bytes = stream(&[chunk(b"IHDR", &[0; 13]), chunk(b"tEXt", b"a\0b"), chunk(b"IEND", &[])]);
        let kinds: Vec<String> = ChunkReader::new(&bytes)
            .unwrap()
            .map(|c| c.unwrap().kind_name().to_string())
            .collect();
        assert_eq!(kinds, vec!["IHDR", "tEXt", "IEND"]);
    }

    #[test]
    fn stops_at_iend() {
        let mut bytes = stream(&[chunk(b"IEND", &[])]);
        bytes.extend_from_slice(b"trailing garbage");
        assert_eq!(ChunkReader::new(&bytes).unwrap().count(), 1);
    }

    #[test]
    fn signature_only_has_no_chunks() {
        assert_eq!(ChunkReader::new(&PNG_SIGNATURE).unwrap().count(), 0);
    }

    #[test]
    fn payload_past_end_is_truncated() {
        let mut bytes = stream(&[]);
        bytes.extend_from_slice(&100u32.to_be_bytes());
        bytes.extend_from_slice(b"tEXt");
        bytes.extend_from_slice(b"short");
        let results: Vec<_> = ChunkReader::new(&bytes).unwrap().collect();
        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0],
            Err(FormatError::Truncated { offset: 8, needed: 112, available: 13 })
        );
    }

    #[test]
    fn partial_header_is_truncated() {
        let mut bytes = stream(&[]);
        bytes.extend_from_slice(&[0, 0]);
        let first = ChunkReader::new(&bytes).unwrap().next();
        assert!(matches!(first, Some(Err(FormatError::Truncated { offset: 8, needed: 8, available: 2 }))));
    }

    #[test]
    fn missing_crc_is_truncated() {
        let mut bytes = stream(&[]);
        bytes.extend_from_slice(&1u32.to_be_bytes());
        bytes.extend_from_slice(b"tEXt");
        bytes.push(b'x');
        let first = ChunkReader::new(&bytes).unwrap().next();
        assert!(matches!(first, Some(Err(FormatError::Truncated { .. }))));
    }
}
