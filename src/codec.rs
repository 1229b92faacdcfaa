// The codec contract shared by all three packing strategies.

use crate::error::Result;

/// Compress/decompress/get, with the invariants of the crate-level
/// documentation: `decompress(compress(a)) == a`, and
/// `get(compress(a), i) == a[i]` for every in-range `i`.
///
/// Implementors carry only immutable configuration scalars (`k`,
/// `small_k`, `use_zigzag`) and are therefore `Send + Sync` and safe
/// to share across threads for read-only use; `compress` and
/// `decompress` never mutate `self`.
pub trait PackedCodec {
    /// Pack `values` into a self-describing sequence of 32-bit words.
    fn compress(&self, values: &[i64]) -> Result<Vec<u32>>;

    /// Decode `words` fully, clearing `out` first and then appending
    /// the `n` decoded values in order.
    fn decompress(&self, words: &[u32], out: &mut Vec<i64>) -> Result<()>;

    /// Decode a single element at `index` without decompressing the
    /// rest of the stream.
    fn get(&self, words: &[u32], index: usize) -> Result<i64>;
}
