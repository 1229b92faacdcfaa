// Per-value token encoding shared by the cross and aligned codecs:
// optional ZigZag, then a check that the result actually fits in the
// configured bit width (masking away high bits is a silent precision
// loss this crate never does, see spec "Value-range error").

use crate::error::{BitpackError, PackError, Result};
use crate::zigzag;

pub fn encode_value(index: usize, value: i64, width: u32, use_zigzag: bool) -> Result<u32> {
    let token = if use_zigzag {
        let signed = i32::try_from(value).map_err(|_| {
            BitpackError::from(PackError::ValueOutOfRange {
                index,
                value,
                bits: width,
            })
        })?;
        zigzag::encode(signed)
    } else {
        u32::try_from(value).map_err(|_| {
            BitpackError::from(PackError::ValueOutOfRange {
                index,
                value,
                bits: width,
            })
        })?
    };
    let mask = crate::bits::mask(width) as u32;
    if token & !mask != 0 {
        return Err(PackError::ValueOutOfRange {
            index,
            value,
            bits: width,
        }
        .into());
    }
    Ok(token & mask)
}

pub fn decode_value(token: u32, use_zigzag: bool) -> i64 {
    if use_zigzag {
        zigzag::decode(token) as i64
    } else {
        token as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_wider_than_k_bits_is_rejected() {
        let err = encode_value(0, 8, 3, false).unwrap_err();
        assert!(matches!(
            err,
            BitpackError::Pack(PackError::ValueOutOfRange { .. })
        ));
    }

    #[test]
    fn test_negative_value_without_zigzag_is_rejected() {
        let err = encode_value(0, -1, 8, false).unwrap_err();
        assert!(matches!(
            err,
            BitpackError::Pack(PackError::ValueOutOfRange { .. })
        ));
    }

    #[test]
    fn test_zigzag_roundtrips_through_encode_decode_value() {
        for v in [-5i64, -1, 0, 1, 5] {
            let token = encode_value(0, v, 8, true).unwrap();
            assert_eq!(decode_value(token, true), v);
        }
    }
}
