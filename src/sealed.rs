// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Mines Outcome Analyzer - Sealed Sample Container

//! Passphrase-sealed container for sample datasets shipped alongside the tool.
//!
//! Layout: `MNSL` | version | Argon2 m/t/p costs (u32 LE each) | 16-byte salt |
//! 12-byte nonce | ChaCha20-Poly1305 ciphertext with 16-byte tag.
//!
//! The key is stretched from the passphrase with Argon2id. The whole header is
//! passed as associated data, so altered costs, salt or nonce fail the tag check
//! just like altered ciphertext.

use argon2::{Algorithm, Argon2, Params, Version};
use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};

const MAGIC: &[u8; 4] = b"MNSL";
const VERSION: u8 = 1;
pub const SALT_LEN: usize = 16;
pub const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;
const TAG_LEN: usize = 16;
const COSTS_LEN: usize = 12;
const HEADER_LEN: usize = MAGIC.len() + 1 + COSTS_LEN + SALT_LEN + NONCE_LEN;
/// 1 GiB; containers asking for more memory are refused before deriving.
const MAX_M_COST: u32 = 1 << 20;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SealError {
    #[error("container is truncated ({0} bytes)")]
    Truncated(usize),
    #[error("not a sealed sample container")]
    BadMagic,
    #[error("unsupported container version {0}")]
    UnsupportedVersion(u8),
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),
    #[error("payload could not be encrypted")]
    Encrypt,
    #[error("authentication failed (wrong passphrase or altered data)")]
    Tampered,
}

/// Argon2id cost parameters recorded in each container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfCosts {
    /// Memory in KiB.
    pub m_cost: u32,
    pub t_cost: u32,
    pub p_cost: u32,
}

impl Default for KdfCosts {
    fn default() -> Self {
        Self {
            m_cost: Params::DEFAULT_M_COST,
            t_cost: Params::DEFAULT_T_COST,
            p_cost: Params::DEFAULT_P_COST,
        }
    }
}

/// Seal `payload` under `passphrase` with default Argon2 costs.
/// Salt and nonce must be fresh per container.
pub fn seal(
    payload: &[u8],
    passphrase: &[u8],
    salt: [u8; SALT_LEN],
    nonce: [u8; NONCE_LEN],
) -> Result<Vec<u8>, SealError> {
    seal_with_costs(payload, passphrase, KdfCosts::default(), salt, nonce)
}

pub fn seal_with_costs(
    payload: &[u8],
    passphrase: &[u8],
    costs: KdfCosts,
    salt: [u8; SALT_LEN],
    nonce: [u8; NONCE_LEN],
) -> Result<Vec<u8>, SealError> {
    let key = derive_key(passphrase, &salt, costs)?;

    let mut out = Vec::with_capacity(HEADER_LEN + payload.len() + TAG_LEN);
    out.extend_from_slice(MAGIC);
    out.push(VERSION);
    out.extend_from_slice(&costs.m_cost.to_le_bytes());
    out.extend_from_slice(&costs.t_cost.to_le_bytes());
    out.extend_from_slice(&costs.p_cost.to_le_bytes());
    out.extend_from_slice(&salt);
    out.extend_from_slice(&nonce);

    let cipher = ChaCha20Poly1305::new(Key::from_slice(&key));
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), Payload { msg: payload, aad: &out })
        .map_err(|_| SealError::Encrypt)?;
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Verify and decrypt a sealed container.
pub fn open(sealed: &[u8], passphrase: &[u8]) -> Result<Vec<u8>, SealError> {
    if sealed.len() < HEADER_LEN + TAG_LEN {
        return Err(SealError::Truncated(sealed.len()));
    }
    if &sealed[..MAGIC.len()] != MAGIC {
        return Err(SealError::BadMagic);
    }
    let version = sealed[MAGIC.len()];
    if version != VERSION {
        return Err(SealError::UnsupportedVersion(version));
    }

    let (header, ciphertext) = sealed.split_at(HEADER_LEN);
    let costs_at = MAGIC.len() + 1;
    let costs = KdfCosts {
        m_cost: read_u32(header, costs_at),
        t_cost: read_u32(header, costs_at + 4),
        p_cost: read_u32(header, costs_at + 8),
    };
    if costs.m_cost > MAX_M_COST {
        return Err(SealError::Tampered);
    }
    let salt = &header[costs_at + COSTS_LEN..costs_at + COSTS_LEN + SALT_LEN];
    let nonce = &header[HEADER_LEN - NONCE_LEN..];

    // Costs come from the file; a header that Argon2 refuses is treated as altered.
    let key = derive_key(passphrase, salt, costs).map_err(|_| SealError::Tampered)?;
    let cipher = ChaCha20Poly1305::new(Key::from_slice(&key));
    cipher
        .decrypt(Nonce::from_slice(nonce), Payload { msg: ciphertext, aad: header })
        .map_err(|_| SealError::Tampered)
}

/// Whether `bytes` start like a sealed container.
pub fn looks_sealed(bytes: &[u8]) -> bool {
    bytes.starts_with(MAGIC)
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&bytes[at..at + 4]);
    u32::from_le_bytes(raw)
}

fn derive_key(passphrase: &[u8], salt: &[u8], costs: KdfCosts) -> Result<[u8; KEY_LEN], SealError> {
    let params = Params::new(costs.m_cost, costs.t_cost, costs.p_cost, Some(KEY_LEN))
        .map_err(|e| SealError::KeyDerivation(e.to_string()))?;
    let mut key = [0u8; KEY_LEN];
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password_into(passphrase, salt, &mut key)
        .map_err(|e| SealError::KeyDerivation(e.to_string()))?;
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SALT: [u8; SALT_LEN] = [7u8; SALT_LEN];
    const NONCE: [u8; NONCE_LEN] = [5u8; NONCE_LEN];
    // Cheap costs keep the unit tests fast; the format is the same.
    const LIGHT: KdfCosts = KdfCosts { m_cost: 64, t_cost: 1, p_cost: 1 };

    fn seal_light(payload: &[u8], passphrase: &[u8]) -> Vec<u8> {
        seal_with_costs(payload, passphrase, LIGHT, SALT, NONCE).expect("test: seal")
    }

    #[test]
    fn sealed_payload_is_not_plaintext() {
        let payload = br#"{"samples":[]}"#;
        let sealed = seal_light(payload, b"secret");
        assert!(looks_sealed(&sealed));
        assert_eq!(sealed.len(), HEADER_LEN + payload.len() + TAG_LEN);
        assert_ne!(&sealed[HEADER_LEN..HEADER_LEN + payload.len()], &payload[..]);
        assert_eq!(open(&sealed, b"secret").expect("test: open sealed"), payload.to_vec());
    }

    #[test]
    fn default_costs_are_argon2_defaults() {
        let costs = KdfCosts::default();
        assert_eq!(costs.m_cost, 19 * 1024);
        assert_eq!(costs.t_cost, 2);
        assert_eq!(costs.p_cost, 1);
    }

    #[test]
    fn default_seal_stretches_the_passphrase() {
        let sealed = seal(b"data", b"pw", SALT, NONCE).expect("test: seal with default costs");
        assert_eq!(read_u32(&sealed, 5), Params::DEFAULT_M_COST);
        assert_eq!(read_u32(&sealed, 9), Params::DEFAULT_T_COST);
        assert_eq!(open(&sealed, b"pw").expect("test: open"), b"data".to_vec());
    }

    #[test]
    fn costs_are_recorded_in_the_header() {
        let sealed = seal_light(b"data", b"pw");
        assert_eq!(read_u32(&sealed, 5), 64);
        assert_eq!(read_u32(&sealed, 9), 1);
        assert_eq!(read_u32(&sealed, 13), 1);
    }

    #[test]
    fn wrong_passphrase_is_rejected() {
        let sealed = seal_light(b"data", b"right");
        assert_eq!(open(&sealed, b"wrong"), Err(SealError::Tampered));
    }

    #[test]
    fn flipped_ciphertext_bit_is_rejected() {
        let mut sealed = seal_light(b"some sample data", b"pw");
        sealed[HEADER_LEN + 3] ^= 0x01;
        assert_eq!(open(&sealed, b"pw"), Err(SealError::Tampered));
    }

    #[test]
    fn altered_header_is_rejected() {
        // Changed time cost
        let mut sealed = seal_light(b"some sample data", b"pw");
        sealed[9] = 2;
        assert_eq!(open(&sealed, b"pw"), Err(SealError::Tampered));

        // Nonce byte
        let mut sealed = seal_light(b"some sample data", b"pw");
        sealed[HEADER_LEN - 1] ^= 0x80;
        assert_eq!(open(&sealed, b"pw"), Err(SealError::Tampered));

        // Memory cost past the cap
        let mut sealed = seal_light(b"some sample data", b"pw");
        sealed[5..9].copy_from_slice(&u32::MAX.to_le_bytes());
        assert_eq!(open(&sealed, b"pw"), Err(SealError::Tampered));

        // Zero memory cost is refused by Argon2
        let mut sealed = seal_light(b"some sample data", b"pw");
        sealed[5..9].copy_from_slice(&0u32.to_le_bytes());
        assert_eq!(open(&sealed, b"pw"), Err(SealError::Tampered));
    }

    #[test]
    fn salt_changes_ciphertext() {
        let a = seal_with_costs(b"same", b"pw", LIGHT, [1u8; SALT_LEN], NONCE).expect("test: seal a");
        let b = seal_with_costs(b"same", b"pw", LIGHT, [2u8; SALT_LEN], NONCE).expect("test: seal b");
        assert_ne!(a[HEADER_LEN..], b[HEADER_LEN..]);
    }

    #[test]
    fn invalid_costs_fail_to_seal() {
        let costs = KdfCosts { m_cost: 0, t_cost: 0, p_cost: 0 };
        let err = seal_with_costs(b"x", b"pw", costs, SALT, NONCE).expect_err("test: zero costs");
        assert!(matches!(err, SealError::KeyDerivation(_)));
    }

    #[test]
    fn framing_errors_are_specific() {
        assert_eq!(open(b"MNSL", b"pw"), Err(SealError::Truncated(4)));

        let mut sealed = seal_light(b"x", b"pw");
        sealed[0] = b'X';
        assert_eq!(open(&sealed, b"pw"), Err(SealError::BadMagic));

        let mut sealed = seal_light(b"x", b"pw");
        sealed[4] = 9;
        assert_eq!(open(&sealed, b"pw"), Err(SealError::UnsupportedVersion(9)));
    }
}
