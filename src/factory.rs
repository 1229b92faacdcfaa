// Factory: mode dispatch. Given a mode tag and parameters, constructs
// the matching codec, or rejects with a configuration error (§4.5).
//
// Dispatch is a tagged enum carrying only configuration scalars, not
// inheritance with abstract methods (see spec "Redesign flags":
// dynamic dispatch across modes).

use serde::{Deserialize, Serialize};

use crate::aligned::AlignedCodec;
use crate::codec::PackedCodec;
use crate::cross::CrossCodec;
use crate::error::{ConfigError, Result};
use crate::overflow::OverflowCodec;

/// Packing strategy selector, serializable so a caller embedding this
/// codec inside a larger self-describing format can persist the
/// choice of codec and parameters alongside the word stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Cross,
    Aligned,
    Overflow,
}

/// Parameters accepted by [`create`]. `k` is required for `Cross` and
/// `Aligned`; `small_k` is required for `Overflow`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    pub k: Option<u32>,
    pub small_k: Option<u32>,
    pub use_zigzag: bool,
}

/// A constructed codec, tagged by strategy. Carries only immutable
/// configuration scalars and is `Send + Sync`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Codec {
    Cross(CrossCodec),
    Aligned(AlignedCodec),
    Overflow(OverflowCodec),
}

impl PackedCodec for Codec {
    fn compress(&self, values: &[i64]) -> Result<Vec<u32>> {
        match self {
            Codec::Cross(c) => c.compress(values),
            Codec::Aligned(c) => c.compress(values),
            Codec::Overflow(c) => c.compress(values),
        }
    }

    fn decompress(&self, words: &[u32], out: &mut Vec<i64>) -> Result<()> {
        match self {
            Codec::Cross(c) => c.decompress(words, out),
            Codec::Aligned(c) => c.decompress(words, out),
            Codec::Overflow(c) => c.decompress(words, out),
        }
    }

    fn get(&self, words: &[u32], index: usize) -> Result<i64> {
        match self {
            Codec::Cross(c) => c.get(words, index),
            Codec::Aligned(c) => c.get(words, index),
            Codec::Overflow(c) => c.get(words, index),
        }
    }
}

fn validate_k(k: Option<u32>, use_zigzag: bool) -> std::result::Result<u32, ConfigError> {
    let k = k.ok_or(ConfigError::MissingK)?;
    if k == 0 && use_zigzag {
        return Err(ConfigError::ZigzagWithZeroK);
    }
    if k == 0 || k > 32 {
        return Err(ConfigError::KOutOfRange(k));
    }
    Ok(k)
}

fn validate_small_k(
    small_k: Option<u32>,
    use_zigzag: bool,
) -> std::result::Result<u32, ConfigError> {
    let small_k = small_k.ok_or(ConfigError::MissingSmallK)?;
    if small_k == 0 && use_zigzag {
        return Err(ConfigError::ZigzagWithZeroK);
    }
    if small_k == 0 || small_k >= 32 {
        return Err(ConfigError::SmallKOutOfRange(small_k));
    }
    Ok(small_k)
}

/// Construct the codec named by `mode` with `params`.
pub fn create(mode: Mode, params: Params) -> Result<Codec> {
    match mode {
        Mode::Cross => {
            let k = validate_k(params.k, params.use_zigzag)?;
            Ok(Codec::Cross(CrossCodec::new(k, params.use_zigzag)))
        }
        Mode::Aligned => {
            let k = validate_k(params.k, params.use_zigzag)?;
            Ok(Codec::Aligned(AlignedCodec::new(k, params.use_zigzag)))
        }
        Mode::Overflow => {
            let small_k = validate_small_k(params.small_k, params.use_zigzag)?;
            Ok(Codec::Overflow(OverflowCodec::new(
                small_k,
                params.use_zigzag,
            )))
        }
    }
}

/// Construct a codec from a free-form mode tag, for callers that parse
/// the mode out of an external format before dispatching here.
pub fn create_by_tag(tag: &str, params: Params) -> Result<Codec> {
    let mode = match tag {
        "cross" => Mode::Cross,
        "aligned" => Mode::Aligned,
        "overflow" => Mode::Overflow,
        other => return Err(ConfigError::UnknownMode(other.to_string()).into()),
    };
    create(mode, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BitpackError;

    #[test]
    fn test_unknown_mode_tag_is_rejected() {
        let err = create_by_tag("rle", Params::default()).unwrap_err();
        assert!(matches!(
            err,
            BitpackError::Config(ConfigError::UnknownMode(_))
        ));
    }

    #[test]
    fn test_missing_k_is_rejected_for_cross_and_aligned() {
        for mode in [Mode::Cross, Mode::Aligned] {
            let err = create(mode, Params::default()).unwrap_err();
            assert!(matches!(err, BitpackError::Config(ConfigError::MissingK)));
        }
    }

    #[test]
    fn test_missing_small_k_is_rejected_for_overflow() {
        let err = create(Mode::Overflow, Params::default()).unwrap_err();
        assert!(matches!(
            err,
            BitpackError::Config(ConfigError::MissingSmallK)
        ));
    }

    #[test]
    fn test_k_out_of_range_is_rejected() {
        let params = Params {
            k: Some(33),
            ..Default::default()
        };
        let err = create(Mode::Cross, params).unwrap_err();
        assert!(matches!(
            err,
            BitpackError::Config(ConfigError::KOutOfRange(33))
        ));
    }

    #[test]
    fn test_small_k_out_of_range_is_rejected() {
        let params = Params {
            small_k: Some(32),
            ..Default::default()
        };
        let err = create(Mode::Overflow, params).unwrap_err();
        assert!(matches!(
            err,
            BitpackError::Config(ConfigError::SmallKOutOfRange(32))
        ));
    }

    #[test]
    fn test_zigzag_with_zero_k_is_rejected_before_range_check() {
        let params = Params {
            k: Some(0),
            use_zigzag: true,
            ..Default::default()
        };
        let err = create(Mode::Cross, params).unwrap_err();
        assert!(matches!(
            err,
            BitpackError::Config(ConfigError::ZigzagWithZeroK)
        ));
    }

    #[test]
    fn test_created_codec_round_trips_through_the_contract() {
        let codec = create(
            Mode::Cross,
            Params {
                k: Some(5),
                ..Default::default()
            },
        )
        .unwrap();
        let words = codec.compress(&[1, 2, 3, 4, 5, 6, 7]).unwrap();
        let mut out = Vec::new();
        codec.decompress(&words, &mut out).unwrap();
        assert_eq!(out, vec![1, 2, 3, 4, 5, 6, 7]);
    }
}
