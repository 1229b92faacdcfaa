// Error-surfacing tests for bitpack-core's public API.

use bitpack_core::{create, BitpackError, ConfigError, Mode, PackError, PackedCodec, Params};

#[test]
fn test_unknown_mode_is_a_configuration_error() {
    let err = bitpack_core::factory::create_by_tag("rle", Params::default()).unwrap_err();
    assert!(matches!(
        err,
        BitpackError::Config(ConfigError::UnknownMode(_))
    ));
}

#[test]
fn test_value_too_wide_for_k_is_a_pack_error_at_compress_time() {
    let codec = create(
        Mode::Cross,
        Params {
            k: Some(3),
            ..Default::default()
        },
    )
    .unwrap();
    let err = codec.compress(&[8]).unwrap_err();
    assert!(matches!(
        err,
        BitpackError::Pack(PackError::ValueOutOfRange { .. })
    ));
}

#[test]
fn test_array_length_over_65535_is_a_pack_error() {
    let codec = create(
        Mode::Cross,
        Params {
            k: Some(4),
            ..Default::default()
        },
    )
    .unwrap();
    let values = vec![0i64; 70_000];
    let err = codec.compress(&values).unwrap_err();
    assert!(matches!(
        err,
        BitpackError::Pack(PackError::LengthOutOfRange { .. })
    ));
}

#[test]
fn test_overflow_count_over_255_is_a_pack_error() {
    let codec = create(
        Mode::Overflow,
        Params {
            small_k: Some(2),
            ..Default::default()
        },
    )
    .unwrap();
    // small_k=2 => max_inline = 1; every value of 2 escapes.
    let values = vec![2i64; 300];
    let err = codec.compress(&values).unwrap_err();
    assert!(matches!(
        err,
        BitpackError::Pack(PackError::TooManyOverflows { .. })
    ));
}

#[test]
fn test_get_out_of_range_index_is_a_pack_error() {
    let codec = create(
        Mode::Aligned,
        Params {
            k: Some(4),
            ..Default::default()
        },
    )
    .unwrap();
    let words = codec.compress(&[1, 2, 3]).unwrap();
    let err = codec.get(&words, 3).unwrap_err();
    assert!(matches!(
        err,
        BitpackError::Pack(PackError::IndexOutOfBounds { .. })
    ));
}

#[test]
fn test_truncated_stream_is_rejected_rather_than_silently_short() {
    let codec = create(
        Mode::Cross,
        Params {
            k: Some(8),
            ..Default::default()
        },
    )
    .unwrap();
    let words = codec.compress(&[1, 2, 3, 4, 5]).unwrap();
    let truncated = &words[..words.len() - 1];
    let mut out = Vec::new();
    let err = codec.decompress(truncated, &mut out).unwrap_err();
    assert!(matches!(
        err,
        BitpackError::Pack(PackError::MalformedStream { .. })
    ));
}

#[test]
fn test_zigzag_with_zero_k_is_a_configuration_error() {
    let err = create(
        Mode::Cross,
        Params {
            k: Some(0),
            use_zigzag: true,
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(
        err,
        BitpackError::Config(ConfigError::ZigzagWithZeroK)
    ));
}

#[test]
fn test_missing_k_is_a_configuration_error() {
    let err = create(Mode::Aligned, Params::default()).unwrap_err();
    assert!(matches!(err, BitpackError::Config(ConfigError::MissingK)));
}
