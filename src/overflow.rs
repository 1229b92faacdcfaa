// Overflow codec: small-k packing with an escape token plus an
// overflow tail for outliers that don't fit in `small_k` bits (§4.4).
//
// Token alphabet: `[0, M - 1]` encode fitted values directly, where
// `M = (1 << small_k) - 1`. The reserved token `M` means "the real
// value is in the overflow tail." Note the boundary is exactly `M - 1`:
// a value equal to `M - 1` is still storable inline; only a value
// greater than `M - 1` escapes (see spec "Open questions").

use crate::bits::{extract_bits, words_for_bits, BitReader, BitWriter};
use crate::codec::PackedCodec;
use crate::error::{PackError, Result};
use crate::header::OverflowHeader;
use crate::token::{decode_value, encode_value};
use serde::{Deserialize, Serialize};

const MAX_LEN: usize = u16::MAX as usize;
const MAX_OVERFLOW: usize = u8::MAX as usize;

/// Escape-coded bit-packing codec: `small_k` bits per token, with an
/// overflow tail holding one full 32-bit word per escaped value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverflowCodec {
    pub small_k: u32,
    pub use_zigzag: bool,
}

impl OverflowCodec {
    pub fn new(small_k: u32, use_zigzag: bool) -> Self {
        OverflowCodec {
            small_k,
            use_zigzag,
        }
    }

    fn reserved_token(&self) -> u32 {
        (1u64 << self.small_k) as u32 - 1
    }

    fn max_inline(&self) -> u32 {
        self.reserved_token() - 1
    }

    fn header(&self, words: &[u32]) -> Result<(OverflowHeader, usize)> {
        let word = words.first().copied().unwrap_or(0);
        let header = OverflowHeader::decode(word);
        if header.small_k == 0 || header.small_k >= 32 {
            return Err(PackError::MalformedStream {
                reason: format!("header small_k out of range: {}", header.small_k),
            }
            .into());
        }
        let body_words = words_for_bits(header.n, header.small_k);
        let overflow_start = 1 + body_words;
        let expected = overflow_start + header.overflow_count;
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
        Ok((header, overflow_start))
    }
}

impl PackedCodec for OverflowCodec {
    fn compress(&self, values: &[i64]) -> Result<Vec<u32>> {
        if values.len() > MAX_LEN {
            return Err(PackError::LengthOutOfRange { len: values.len() }.into());
        }
        let reserved = self.reserved_token();
        let max_inline = self.max_inline();

        let mut writer = BitWriter::new();
        let mut overflow = Vec::new();
        for (i, &v) in values.iter().enumerate() {
            let val = encode_value(i, v, 32, self.use_zigzag)?;
            if val <= max_inline {
                writer.push(val, self.small_k);
            } else {
                if overflow.len() >= MAX_OVERFLOW {
                    return Err(PackError::TooManyOverflows {
                        count: overflow.len() + 1,
                    }
                    .into());
                }
                writer.push(reserved, self.small_k);
                overflow.push(val);
            }
        }
        let body = writer.finish();

        let header = OverflowHeader {
            small_k: self.small_k,
            n: values.len(),
            overflow_count: overflow.len(),
        }
        .encode();

        let mut out = Vec::with_capacity(1 + body.len() + overflow.len());
        out.push(header);
        out.extend(body);
        out.extend(overflow);
        Ok(out)
    }

    fn decompress(&self, words: &[u32], out: &mut Vec<i64>) -> Result<()> {
        let (header, overflow_start) = self.header(words)?;
        out.clear();
        let reserved = (1u64 << header.small_k) as u32 - 1;
        let body = &words[1..overflow_start];
        let mut reader = BitReader::new(body);
        let mut overflow_idx = overflow_start;
        for _ in 0..header.n {
            let token = reader.pull(header.small_k);
            if token == reserved {
                let real = words.get(overflow_idx).copied().unwrap_or(0);
                overflow_idx += 1;
                out.push(decode_value(real, self.use_zigzag));
            } else {
                out.push(decode_value(token, self.use_zigzag));
            }
        }
        Ok(())
    }

    fn get(&self, words: &[u32], index: usize) -> Result<i64> {
        let (header, overflow_start) = self.header(words)?;
        if index >= header.n {
            return Err(PackError::IndexOutOfBounds {
                index,
                len: header.n,
            }
            .into());
        }
        let reserved = (1u64 << header.small_k) as u32 - 1;
        let body = &words[1..overflow_start];
        let bitpos = index * header.small_k as usize;
        let token = extract_bits(body, bitpos, header.small_k);
        if token != reserved {
            return Ok(decode_value(token, self.use_zigzag));
        }
        // Escaped: count reserved tokens before `index` to find the tail offset.
        let mut reader = BitReader::new(body);
        let mut escapes_before = 0usize;
        for _ in 0..index {
            if reader.pull(header.small_k) == reserved {
                escapes_before += 1;
            }
        }
        let real = words
            .get(overflow_start + escapes_before)
            .copied()
            .unwrap_or(0);
        Ok(decode_value(real, self.use_zigzag))
    }
}
