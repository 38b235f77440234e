//! # 可选加密模块
//!
//! 与 LSB 机制完全解耦的预处理/后处理步骤：调用方在 `encode` 之前加密明文，
//! 在 `decode` 之后解密。
//!
//! - 密钥：Argon2id (默认参数) 由密码和 16 字节随机盐派生 256 位密钥。
//! - 加密：AES-256-GCM-SIV，12 字节随机 nonce。
//! - 封装：`salt || nonce || ciphertext+tag` 经标准 base64 编码。
//!
//! base64 文本只含 ASCII 且没有 NUL，因此总能通过 8 位字符编解码；
//! 明文本身按 UTF-8 处理，不受 Latin-1 范围限制。

use crate::error::CryptoError;
use aes_gcm_siv::aead::Aead;
use aes_gcm_siv::{Aes256GcmSiv, KeyInit, Nonce};
use argon2::Argon2;
use base64::{Engine as _, engine::general_purpose};
use rand::RngCore;
use zeroize::Zeroizing;

/// Argon2 盐长度 (字节)。
pub const SALT_LEN: usize = 16;
/// AES-GCM-SIV nonce 长度 (字节)。
pub const NONCE_LEN: usize = 12;
/// 认证标签长度 (字节)。
pub const TAG_LEN: usize = 16;

fn derive_key(password: &str, salt: &[u8]) -> Result<Zeroizing<[u8; 32]>, CryptoError> {
    let mut key = Zeroizing::new([0u8; 32]);
    Argon2::default()
        .hash_password_into(password.as_bytes(), salt, &mut *key)
        .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;
    Ok(key)
}

fn cipher_for(password: &str, salt: &[u8]) -> Result<Aes256GcmSiv, CryptoError> {
    let key = derive_key(password, salt)?;
    Aes256GcmSiv::new_from_slice(&*key).map_err(|e| CryptoError::KeyDerivation(e.to_string()))
}

/// 加密明文，返回可直接交给 `encode` 的封装文本。
pub fn encrypt(plaintext: &str, password: &str) -> Result<String, CryptoError> {
    let mut rng = rand::rng();

    let mut salt = [0u8; SALT_LEN];
    rng.fill_bytes(&mut salt);
    let mut nonce = [0u8; NONCE_LEN];
    rng.fill_bytes(&mut nonce);

    let ciphertext = cipher_for(password, &salt)?
        .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
        .map_err(|_| CryptoError::EncryptionFailed)?;

    let mut envelope = Vec::with_capacity(SALT_LEN + NONCE_LEN + ciphertext.len());
    envelope.extend_from_slice(&salt);
    envelope.extend_from_slice(&nonce);
    envelope.extend_from_slice(&ciphertext);

    Ok(general_purpose::STANDARD.encode(envelope))
}

/// 解密 `decode` 得到的封装文本。
///
/// # Errors
///
/// * [`CryptoError::MalformedEnvelope`] - 不是 base64 或长度不足。
/// * [`CryptoError::DecryptionFailed`] - 密码错误或数据被篡改。
/// * [`CryptoError::InvalidUtf8`] - 解密结果不是 UTF-8。
pub fn decrypt(envelope: &str, password: &str) -> Result<String, CryptoError> {
    let bytes = general_purpose::STANDARD
        .decode(envelope.trim())
        .map_err(|_| CryptoError::MalformedEnvelope)?;

    if bytes.len() < SALT_LEN + NONCE_LEN + TAG_LEN {
        return Err(CryptoError::MalformedEnvelope);
    }

    let (salt, rest) = bytes.split_at(SALT_LEN);
    let (nonce, ciphertext) = rest.split_at(NONCE_LEN);

    let plaintext = cipher_for(password, salt)?
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| CryptoError::DecryptionFailed)?;

    String::from_utf8(plaintext).map_err(|_| CryptoError::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let envelope = encrypt("meet at the usual place 🌙", "hunter2").unwrap();
        assert_eq!(
            decrypt(&envelope, "hunter2").unwrap(),
            "meet at the usual place 🌙"
        );
    }

    #[test]
    fn envelope_fits_the_eight_bit_codec() {
        let envelope = encrypt("é€", "pw").unwrap();
        assert!(envelope.chars().all(|c| c.is_ascii() && c != '\0'));
    }

    #[test]
    fn wrong_password_fails() {
        let envelope = encrypt("secret", "right").unwrap();
        assert_eq!(
            decrypt(&envelope, "wrong"),
            Err(CryptoError::DecryptionFailed)
        );
    }

    #[test]
    fn plain_text_is_not_an_envelope() {
        assert_eq!(
            decrypt("hello world", "pw"),
            Err(CryptoError::MalformedEnvelope)
        );
        assert_eq!(decrypt("aGVsbG8=", "pw"), Err(CryptoError::MalformedEnvelope));
    }
}
