//! Fixed-width bit-packing codecs for integer arrays.
//!
//! Three packing strategies share one contract: compress, decompress,
//! get, over a self-describing stream of 32-bit words:
//!
//! - [`cross::CrossCodec`]: tight packing, values may span a word boundary.
//! - [`aligned::AlignedCodec`]: word-aligned packing, `p = 32 / k` values per word.
//! - [`overflow::OverflowCodec`]: small-`k` packing with an escape token and
//!   an overflow tail for outliers.
//!
//! Build a codec through [`factory::create`] rather than constructing
//! the strategy structs directly: the factory validates `k`/`small_k`
//! up front, the same place spec-level "configuration error" is meant
//! to surface.
//!
//! ```
//! use bitpack_core::{create, Mode, Params, PackedCodec};
//!
//! let codec = create(Mode::Cross, Params { k: Some(5), ..Default::default() }).unwrap();
//! let words = codec.compress(&[1, 2, 3, 4, 5, 6, 7]).unwrap();
//! let mut out = Vec::new();
//! codec.decompress(&words, &mut out).unwrap();
//! assert_eq!(out, vec![1, 2, 3, 4, 5, 6, 7]);
//! assert_eq!(codec.get(&words, 6).unwrap(), 7);
//! ```

pub mod aligned;
pub mod bits;
pub mod codec;
pub mod cross;
pub mod error;
pub mod factory;
pub mod header;
pub mod overflow;
pub mod token;
pub mod zigzag;

pub use codec::PackedCodec;
pub use error::{BitpackError, ConfigError, PackError, Result};
pub use factory::{create, Codec, Mode, Params};
