pub mod password;

use base64::Engine;
use rand::RngExt;

/// 生成 URL 安全的随机令牌，`len` 为随机字节数
pub fn generate_secure_token(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    rand::rng().fill(&mut bytes[..]);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_secure_token_length_and_uniqueness() {
        let a = generate_secure_token(32);
        let b = generate_secure_token(32);
        // 32 bytes -> 43 chars of unpadded base64
        assert_eq!(a.len(), 43);
        assert_ne!(a, b);
    }
}
