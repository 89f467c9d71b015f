//! Symmetric encryption of vote content.
//!
//! Each election holds one random 32-byte tally key. The AES-256-GCM key is derived from it
//! with HKDF-SHA256, and every ciphertext carries its own random nonce:
//! `hex(nonce || ciphertext || tag)`.

use crate::*;
use aes_gcm::aead::{generic_array::GenericArray, Aead, KeyInit};
use aes_gcm::Aes256Gcm;
use hkdf::Hkdf;
use rand::{thread_rng, Rng, RngCore};
use sha2::Sha256;

const AES_IV_LENGTH: usize = 12;
const TALLY_KEY_LENGTH: usize = 32;
const HKDF_INFO: &[u8] = b"ballotchain tally key";

type AesKey = [u8; 32];

/// The key that encrypts votes on the ledger and decrypts them at tally time
#[derive(Clone, PartialEq, Eq)]
pub struct TallyKey([u8; TALLY_KEY_LENGTH]);

impl TallyKey {
    /// Generate a fresh random tally key
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng {};
        let mut key = [0u8; TALLY_KEY_LENGTH];
        csprng.fill_bytes(&mut key);
        TallyKey(key)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != TALLY_KEY_LENGTH {
            return Err(Error::InvalidKeyLength(bytes.len()));
        }
        let mut key = [0u8; TALLY_KEY_LENGTH];
        key.copy_from_slice(bytes);
        Ok(TallyKey(key))
    }

    pub fn from_hex(s: &str) -> Result<Self, Error> {
        let bytes = hex::decode(s)?;
        TallyKey::from_bytes(&bytes)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; TALLY_KEY_LENGTH] {
        &self.0
    }

    /// Encrypt a candidate name, producing the hex string stored in a vote transaction
    pub fn encrypt_vote(&self, candidate: &str) -> Result<String, Error> {
        let encrypted = aes_encrypt(&self.aes_key(), candidate.as_bytes())?;
        Ok(hex::encode(encrypted))
    }

    /// Decrypt a vote produced by [`TallyKey::encrypt_vote`]
    pub fn decrypt_vote(&self, encrypted_vote: &str) -> Result<String, Error> {
        let ciphertext = hex::decode(encrypted_vote).map_err(|_| Error::DecryptionFailure)?;
        let decrypted = aes_decrypt(&self.aes_key(), &ciphertext)?;
        String::from_utf8(decrypted).map_err(|_| Error::DecryptionFailure)
    }

    fn aes_key(&self) -> AesKey {
        hkdf_sha256(&self.0)
    }
}

impl std::fmt::Debug for TallyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "TallyKey(..)")
    }
}

fn hkdf_sha256(master: &[u8]) -> AesKey {
    let h = Hkdf::<Sha256>::new(None, master);
    let mut out = [0u8; 32];
    h.expand(HKDF_INFO, &mut out)
        .expect("ballotchain: 32 bytes is a valid HKDF-SHA256 output length");
    out
}

fn aes_encrypt(key: &AesKey, msg: &[u8]) -> Result<Vec<u8>, Error> {
    let aead = Aes256Gcm::new(GenericArray::from_slice(key));

    let mut nonce = [0u8; AES_IV_LENGTH];
    thread_rng().fill(&mut nonce[..]);
    let nonce = GenericArray::from_slice(&nonce);

    let ciphertext = aead
        .encrypt(nonce, msg)
        .map_err(|_| Error::EncryptionFailure)?;

    let mut output = Vec::with_capacity(AES_IV_LENGTH + ciphertext.len());
    output.extend_from_slice(nonce);
    output.extend(ciphertext);

    Ok(output)
}

fn aes_decrypt(key: &AesKey, ciphertext: &[u8]) -> Result<Vec<u8>, Error> {
    if ciphertext.len() < AES_IV_LENGTH {
        return Err(Error::DecryptionFailure);
    }
    let aead = Aes256Gcm::new(GenericArray::from_slice(key));

    let nonce = GenericArray::from_slice(&ciphertext[..AES_IV_LENGTH]);
    let encrypted = &ciphertext[AES_IV_LENGTH..];

    aead.decrypt(nonce, encrypted)
        .map_err(|_| Error::DecryptionFailure)
}
