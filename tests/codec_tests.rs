use lsb_steg::bits::text_to_bits;
use lsb_steg::capacity::{capacity_bits, max_message_chars};
use lsb_steg::{
    BufferError, DecodeError, EncodeError, PixelBuffer, crypto, decode, encode, has_signature,
};
use rand::{Rng, RngCore};

fn random_buffer(width: u32, height: u32) -> PixelBuffer {
    let mut data = vec![0u8; (width * height * 4) as usize];
    rand::rng().fill_bytes(&mut data);
    PixelBuffer::new(width, height, data).expect("valid dimensions")
}

fn random_latin1(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| char::from(rng.random_range(1u8..=255)))
        .collect()
}

#[test]
fn ten_by_ten_hi_round_trip() {
    let buffer = PixelBuffer::filled(10, 10, 0).unwrap();
    let encoded = encode(&buffer, "HI").unwrap();
    assert_eq!(decode(&encoded).unwrap(), "HI");
}

#[test]
fn thirteen_characters_exceed_ten_by_ten() {
    let buffer = PixelBuffer::filled(10, 10, 0).unwrap();
    assert_eq!(
        encode(&buffer, "abcdefghijklm"),
        Err(EncodeError::CapacityExceeded {
            required: 112,
            available: 100
        })
    );
}

#[test]
fn fresh_black_buffer_has_no_signature() {
    let buffer = PixelBuffer::filled(10, 10, 0).unwrap();
    assert_eq!(decode(&buffer), Err(DecodeError::NoSignatureFound));
}

#[test]
fn random_messages_round_trip() {
    for _ in 0..50 {
        let width = rand::rng().random_range(8..40);
        let height = rand::rng().random_range(1..40);
        let buffer = random_buffer(width, height);
        let len = rand::rng().random_range(0..=max_message_chars(&buffer).expect("at least 8 pixels"));
        let message = random_latin1(len);

        let encoded = encode(&buffer, &message).unwrap();
        assert!(has_signature(&encoded).unwrap());
        assert_eq!(decode(&encoded).unwrap(), message);
    }
}

#[test]
fn empty_message_round_trips() {
    let buffer = random_buffer(8, 8);
    let encoded = encode(&buffer, "").unwrap();
    assert_eq!(decode(&encoded).unwrap(), "");
}

#[test]
fn exact_capacity_succeeds_and_one_more_bit_fails() {
    // 8x11 = 88 位，恰好容纳 10 个字符加结束符
    let buffer = random_buffer(8, 11);
    assert_eq!(capacity_bits(&buffer), 88);

    let fits = "0123456789";
    let encoded = encode(&buffer, fits).unwrap();
    let snapshot = encoded.clone();

    // 11 个字符需要 96 位
    let too_long = "0123456789X";
    assert!(matches!(
        encode(&encoded, too_long),
        Err(EncodeError::CapacityExceeded { required: 96, available: 88 })
    ));
    assert_eq!(encoded, snapshot, "a failing call must not touch its input");
    assert_eq!(decode(&encoded).unwrap(), fits);
}

#[test]
fn one_bit_over_capacity_fails() {
    // 23 像素 = 23 位；两个字符加结束符需要 24 位
    let buffer = random_buffer(23, 1);
    assert!(matches!(
        encode(&buffer, "ab"),
        Err(EncodeError::CapacityExceeded { required: 24, available: 23 })
    ));
    let buffer = random_buffer(24, 1);
    assert_eq!(decode(&encode(&buffer, "ab").unwrap()).unwrap(), "ab");
}

#[test]
fn encode_leaves_the_caller_buffer_untouched() {
    let buffer = random_buffer(16, 16);
    let before = buffer.clone();
    let _ = encode(&buffer, "hello").unwrap();
    assert_eq!(buffer, before);
}

#[test]
fn only_used_blue_lsbs_and_signature_nibbles_change() {
    let buffer = random_buffer(12, 12);
    let message = "lsb";
    let bit_count = text_to_bits(message).unwrap().len();
    let encoded = encode(&buffer, message).unwrap();

    for (pixel, (old, new)) in buffer
        .as_raw()
        .chunks_exact(4)
        .zip(encoded.as_raw().chunks_exact(4))
        .enumerate()
    {
        assert_eq!(old[0], new[0], "red changed at pixel {pixel}");
        assert_eq!(old[1], new[1], "green changed at pixel {pixel}");
        if pixel < bit_count {
            assert_eq!(old[2] & 0xFE, new[2] & 0xFE, "blue high bits changed at {pixel}");
        } else {
            assert_eq!(old[2], new[2], "unused blue changed at pixel {pixel}");
        }
        if pixel < 4 {
            assert_eq!(old[3] & 0xF0, new[3] & 0xF0, "alpha high nibble changed at {pixel}");
        } else {
            assert_eq!(old[3], new[3], "alpha changed at pixel {pixel}");
        }
    }
}

#[test]
fn detection_is_idempotent_and_read_only() {
    let buffer = random_buffer(6, 6);
    let before = buffer.clone();
    let first = has_signature(&buffer).unwrap();
    let second = has_signature(&buffer).unwrap();
    assert_eq!(first, second);
    assert_eq!(buffer, before);
}

#[test]
fn random_buffers_rarely_carry_the_signature() {
    // 误判概率为 2^-16，2000 次里出现多于 2 次几乎不可能
    let false_positives = (0..2000)
        .filter(|_| has_signature(&random_buffer(4, 1)).unwrap())
        .count();
    assert!(false_positives <= 2, "{false_positives} false positives");
}

#[test]
fn never_encoded_buffers_report_no_signature() {
    for _ in 0..20 {
        let buffer = random_buffer(10, 10);
        if has_signature(&buffer).unwrap() {
            continue;
        }
        assert_eq!(decode(&buffer), Err(DecodeError::NoSignatureFound));
    }
}

#[test]
fn signed_buffer_without_terminator_is_corrupted() {
    let buffer = PixelBuffer::filled(10, 10, 0xFF).unwrap();
    // 借用 encode 写入签名，再把所有蓝色最低位恢复为 1
    let mut raw = encode(&buffer, "").unwrap().into_raw();
    raw.chunks_exact_mut(4).for_each(|pixel| pixel[2] |= 1);
    let damaged = PixelBuffer::new(10, 10, raw).unwrap();

    assert!(has_signature(&damaged).unwrap());
    assert_eq!(decode(&damaged), Err(DecodeError::CorruptedOrAbsentMessage));
}

#[test]
fn tiny_buffers_are_invalid_on_both_paths() {
    let buffer = PixelBuffer::filled(1, 3, 0).unwrap();
    let too_small = BufferError::TooSmall {
        pixels: 3,
        required: 4,
    };
    assert_eq!(encode(&buffer, ""), Err(EncodeError::InvalidPixelBuffer(too_small)));
    assert_eq!(decode(&buffer), Err(DecodeError::InvalidPixelBuffer(too_small)));
}

#[test]
fn unsupported_characters_fail_before_capacity() {
    let buffer = PixelBuffer::filled(2, 2, 0).unwrap();
    assert_eq!(
        encode(&buffer, "€"),
        Err(EncodeError::UnsupportedCharacter {
            character: '€',
            index: 0
        })
    );
}

#[test]
fn encrypted_payload_survives_the_codec() {
    let buffer = random_buffer(64, 64);
    let envelope = crypto::encrypt("密文 also works", "pw").unwrap();
    let encoded = encode(&buffer, &envelope).unwrap();
    let extracted = decode(&encoded).unwrap();
    assert_eq!(crypto::decrypt(&extracted, "pw").unwrap(), "密文 also works");
}
