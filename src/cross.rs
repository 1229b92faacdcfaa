// Cross codec: tight packing, values may span word boundaries (§4.2).

use crate::bits::{extract_bits, words_for_bits, BitReader, BitWriter};
use crate::codec::PackedCodec;
use crate::error::{PackError, Result};
use crate::header::CrossAlignedHeader;
use crate::token::{decode_value, encode_value};
use serde::{Deserialize, Serialize};

const MAX_LEN: usize = u16::MAX as usize;

/// Tight cross-word bit-packing codec: `k` bits per value, values may
/// span a 32-bit word boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossCodec {
    pub k: u32,
    pub use_zigzag: bool,
}

impl CrossCodec {
    pub fn new(k: u32, use_zigzag: bool) -> Self {
        CrossCodec { k, use_zigzag }
    }

    fn header(&self, words: &[u32]) -> Result<CrossAlignedHeader> {
        let word = words.first().copied().unwrap_or(0);
        let header = CrossAlignedHeader::decode(word);
        if header.k == 0 || header.k > 32 {
            return Err(PackError::MalformedStream {
                reason: format!("header k out of range: {}", header.k),
            }
            .into());
        }
        let expected = 1 + words_for_bits(header.n, header.k);
        if words.len() < expected {
            return Err(PackError::MalformedStream {
                reason: format!(
                    "stream has {} words, expected at least {}",
                    words.len(),
                    expected
                ),
            }
            .into());
        }
        Ok(header)
    }
}

impl PackedCodec for CrossCodec {
    fn compress(&self, values: &[i64]) -> Result<Vec<u32>> {
        if values.len() > MAX_LEN {
            return Err(PackError::LengthOutOfRange { len: values.len() }.into());
        }
        let mut writer = BitWriter::new();
        for (i, &v) in values.iter().enumerate() {
            let token = encode_value(i, v, self.k, self.use_zigzag)?;
            writer.push(token, self.k);
        }
        let body = writer.finish();
        let header = CrossAlignedHeader {
            k: self.k,
            n: values.len(),
        }
        .encode();
        let mut out = Vec::with_capacity(1 + body.len());
        out.push(header);
        out.extend(body);
        Ok(out)
    }

    fn decompress(&self, words: &[u32], out: &mut Vec<i64>) -> Result<()> {
        let header = self.header(words)?;
        out.clear();
        let mut reader = BitReader::new(&words[1..]);
        for _ in 0..header.n {
            let token = reader.pull(header.k);
            out.push(decode_value(token, self.use_zigzag));
        }
        Ok(())
    }

    fn get(&self, words: &[u32], index: usize) -> Result<i64> {
        let header = self.header(words)?;
        if index >= header.n {
            return Err(PackError::IndexOutOfBounds {
                index,
                len: header.n,
            }
            .into());
        }
        let bitpos = index * header.k as usize;
        let token = extract_bits(&words[1..], bitpos, header.k);
        Ok(decode_value(token, self.use_zigzag))
    }
}
