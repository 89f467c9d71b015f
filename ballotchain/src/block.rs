use crate::*;
use sha2::{Digest, Sha256};

/// `previous_hash` of the genesis block
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// A mined block of transactions
///
/// `hash` is the SHA-256 digest of the canonical JSON encoding of the other five fields.
/// A block whose stored hash no longer matches that digest has been tampered with.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Block {
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub timestamp: f64,
    pub previous_hash: String,
    pub nonce: u64,
    pub hash: String,
}

/// The hashed portion of a block
#[derive(Serialize)]
struct BlockContents<'a> {
    index: u64,
    transactions: &'a [Transaction],
    timestamp: f64,
    previous_hash: &'a str,
    nonce: u64,
}

impl Block {
    /// Create an unmined block with `nonce = 0` and its hash filled in
    pub fn new(index: u64, transactions: Vec<Transaction>, previous_hash: &str) -> Self {
        let mut block = Block {
            index,
            transactions,
            timestamp: now_timestamp(),
            previous_hash: previous_hash.to_owned(),
            nonce: 0,
            hash: String::new(),
        };
        block.hash = block.compute_hash();
        block
    }

    /// Create the genesis block. It is hashed but never mined.
    pub fn genesis() -> Self {
        Block::new(0, vec![], GENESIS_PREVIOUS_HASH)
    }

    /// Compute the lowercase hex SHA-256 digest of this block's contents.
    ///
    /// The stored `hash` field is not part of the digest.
    pub fn compute_hash(&self) -> String {
        let contents = BlockContents {
            index: self.index,
            transactions: &self.transactions,
            timestamp: self.timestamp,
            previous_hash: &self.previous_hash,
            nonce: self.nonce,
        };
        let serialized = canonical_json(&contents)
            .expect("ballotchain: Unexpected error serializing block contents");

        hex::encode(Sha256::digest(&serialized))
    }

    /// Proof-of-work: search nonces from zero until the digest starts with
    /// `difficulty` zero hex digits, then store that digest as the block hash.
    ///
    /// There is no iteration limit. Expected work is about `16^difficulty` hashes.
    pub fn mine(&mut self, difficulty: usize) -> &str {
        self.nonce = 0;
        let mut hash = self.compute_hash();

        while !meets_difficulty(&hash, difficulty) {
            self.nonce += 1;
            hash = self.compute_hash();
        }

        self.hash = hash;
        &self.hash
    }

    /// True if the stored hash matches the recomputed digest
    pub fn verify_hash(&self) -> bool {
        self.hash == self.compute_hash()
    }

    /// True if this block is intact and correctly chained onto `previous`
    pub fn verify_link(&self, previous: &Block) -> bool {
        self.verify_hash() && self.previous_hash == previous.hash
    }
}

/// True if `hash` begins with at least `difficulty` `'0'` characters
pub fn meets_difficulty(hash: &str, difficulty: usize) -> bool {
    hash.len() >= difficulty && hash.bytes().take(difficulty).all(|b| b == b'0')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_block() -> Block {
        let tx = RegistrationTransaction::new("v1", "D1", "pub_key_v1");
        Block::new(1, vec![tx.into()], "abc123")
    }

    #[test]
    fn test_compute_hash_deterministic() {
        let block = sample_block();
        assert_eq!(block.hash.len(), 64);
        assert_eq!(block.hash, block.compute_hash());

        // Re-serializing and parsing must reproduce the same digest
        let json = serde_json::to_string(&block).unwrap();
        let parsed: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.compute_hash(), block.hash);
        assert!(parsed.verify_hash());
    }

    #[test]
    fn test_hash_stable_across_float_parsing() {
        let mut block = sample_block();
        block.timestamp = 1792328515.7069685;
        block.hash = block.compute_hash();

        let parsed: Block = serde_json::from_str(&serde_json::to_string(&block).unwrap()).unwrap();
        assert_eq!(parsed.timestamp.to_bits(), block.timestamp.to_bits());
        assert!(parsed.verify_hash());
    }

    #[test]
    fn test_mine() {
        for difficulty in 0..=3 {
            let mut block = sample_block();
            let hash = block.mine(difficulty).to_owned();

            assert!(hash.starts_with(&"0".repeat(difficulty)));
            assert_eq!(hash, block.hash);
            assert!(block.verify_hash());
        }
    }

    #[test]
    fn test_mine_zero_difficulty() {
        let mut block = sample_block();
        let unmined = block.hash.clone();

        block.mine(0);
        assert_eq!(block.nonce, 0);
        assert_eq!(block.hash, unmined);
    }

    #[test]
    fn test_meets_difficulty() {
        assert!(meets_difficulty("00ab", 0));
        assert!(meets_difficulty("00ab", 2));
        assert!(!meets_difficulty("00ab", 3));
        assert!(!meets_difficulty("0", 2));
    }

    #[test]
    fn test_genesis() {
        let genesis = Block::genesis();
        assert_eq!(genesis.index, 0);
        assert!(genesis.transactions.is_empty());
        assert_eq!(genesis.previous_hash, GENESIS_PREVIOUS_HASH);
        assert!(genesis.verify_hash());
    }

    #[test]
    fn test_verify_link() {
        let genesis = Block::genesis();
        let tx = RegistrationTransaction::new("v1", "D1", "pub_key_v1");
        let mut block = Block::new(1, vec![tx.into()], &genesis.hash);
        block.mine(1);
        assert!(block.verify_link(&genesis));

        // Wrong predecessor
        let mut orphan = block.clone();
        orphan.previous_hash = "ffff".to_owned();
        orphan.hash = orphan.compute_hash();
        assert!(orphan.verify_hash());
        assert!(!orphan.verify_link(&genesis));

        // Tampered nonce
        let mut tampered = block.clone();
        tampered.nonce += 1;
        assert!(!tampered.verify_link(&genesis));
    }
}
