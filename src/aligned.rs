// Aligned codec: values never span a word boundary, each word holds
// exactly `p = floor(32/k)` values (§4.3). Trades up to `32 mod k`
// wasted bits per word for branch-free O(1) extraction with a single
// word read and no 64-bit combine.

use crate::bits::mask;
use crate::codec::PackedCodec;
use crate::error::{PackError, Result};
use crate::header::CrossAlignedHeader;
use crate::token::{decode_value, encode_value};
use serde::{Deserialize, Serialize};

const MAX_LEN: usize = u16::MAX as usize;

/// Word-aligned bit-packing codec: `k` bits per value, `p = 32 / k`
/// values per body word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedCodec {
    pub k: u32,
    pub use_zigzag: bool,
}

impl AlignedCodec {
    pub fn new(k: u32, use_zigzag: bool) -> Self {
        AlignedCodec { k, use_zigzag }
    }

    fn per_word(&self) -> usize {
        (32 / self.k) as usize
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
        let per_word = (32 / header.k) as usize;
        let body_words = if header.n == 0 {
            0
        } else {
            (header.n + per_word - 1) / per_word
        };
        if words.len() < 1 + body_words {
            return Err(PackError::MalformedStream {
                reason: format!(
                    "stream has {} words, expected at least {}",
                    words.len(),
                    1 + body_words
                ),
            }
            .into());
        }
        Ok(header)
    }
}

impl PackedCodec for AlignedCodec {
    fn compress(&self, values: &[i64]) -> Result<Vec<u32>> {
        if values.len() > MAX_LEN {
            return Err(PackError::LengthOutOfRange { len: values.len() }.into());
        }
        let per_word = self.per_word();
        let body_words = if values.is_empty() {
            0
        } else {
            (values.len() + per_word - 1) / per_word
        };
        let mut out = Vec::with_capacity(1 + body_words);
        out.push(
            CrossAlignedHeader {
                k: self.k,
                n: values.len(),
            }
            .encode(),
        );

        let mut accum: u32 = 0;
        let mut used = 0usize;
        for (i, &v) in values.iter().enumerate() {
            let token = encode_value(i, v, self.k, self.use_zigzag)?;
            accum |= token << (used as u32 * self.k);
            used += 1;
            if used == per_word {
                out.push(accum);
                accum = 0;
                used = 0;
            }
        }
        if used > 0 {
            out.push(accum);
        }
        Ok(out)
    }

    fn decompress(&self, words: &[u32], out: &mut Vec<i64>) -> Result<()> {
        let header = self.header(words)?;
        out.clear();
        let per_word = (32 / header.k) as usize;
        let value_mask = mask(header.k) as u32;
        let mut word_idx = 1;
        while out.len() < header.n && word_idx < words.len() {
            let mut cur = words[word_idx];
            for _ in 0..per_word {
                if out.len() >= header.n {
                    break;
                }
                let token = cur & value_mask;
                cur >>= header.k;
                out.push(decode_value(token, self.use_zigzag));
            }
            word_idx += 1;
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
        let per_word = (32 / header.k) as usize;
        let word_idx = 1 + index / per_word;
        let slot = index % per_word;
        let word = words.get(word_idx).copied().unwrap_or(0);
        let token = (word >> (slot as u32 * header.k)) & mask(header.k) as u32;
        Ok(decode_value(token, self.use_zigzag))
    }
}
