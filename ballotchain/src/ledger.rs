use crate::*;

/// Difficulty used for new elections unless configured otherwise
pub const DEFAULT_DIFFICULTY: usize = 2;

/// An append-only, hash-linked chain of blocks plus a buffer of transactions waiting to be mined
pub struct Ledger {
    chain: Vec<Block>,
    difficulty: usize,
    pending: Vec<Transaction>,
    genesis_created: bool,
    verifier: Box<dyn Verifier>,
}

impl Ledger {
    /// Create an empty ledger that accepts every transaction.
    ///
    /// No genesis block exists until [`Ledger::create_genesis`] is called.
    pub fn new(difficulty: usize) -> Self {
        Ledger::with_verifier(difficulty, Box::new(AcceptAll))
    }

    /// Create an empty ledger that consults `verifier` before accepting transactions
    pub fn with_verifier(difficulty: usize, verifier: Box<dyn Verifier>) -> Self {
        Ledger {
            chain: vec![],
            difficulty,
            pending: vec![],
            genesis_created: false,
            verifier,
        }
    }

    /// Rebuild a ledger from persisted blocks.
    ///
    /// Stored hashes are kept as-is. Nothing is re-mined or re-verified.
    pub fn restore(chain: Vec<Block>, difficulty: usize, genesis_created: bool) -> Self {
        Ledger {
            chain,
            difficulty,
            pending: vec![],
            genesis_created,
            verifier: Box::new(AcceptAll),
        }
    }

    pub fn set_verifier(&mut self, verifier: Box<dyn Verifier>) {
        self.verifier = verifier;
    }

    /// Append the genesis block. Does nothing if a genesis block was already created.
    pub fn create_genesis(&mut self) {
        if self.genesis_created {
            return;
        }

        // Genesis is exempt from proof-of-work
        self.chain.push(Block::genesis());
        self.genesis_created = true;
    }

    /// Offer a transaction to the pending set
    pub fn submit(&mut self, tx: Transaction) -> Result<(), ValidationError> {
        self.verifier.verify(&tx)?;

        debug!("Accepted {} transaction into pending set", tx.transaction_type());
        self.pending.push(tx);
        Ok(())
    }

    /// Mine every pending transaction into a single new block and append it.
    pub fn commit(&mut self) -> Result<&Block, Error> {
        if self.pending.is_empty() {
            return Err(Error::EmptyPendingSet);
        }

        let previous_hash = match self.chain.last() {
            Some(last) => last.hash.clone(),
            None => GENESIS_PREVIOUS_HASH.to_owned(),
        };
        let transactions = std::mem::take(&mut self.pending);
        let mut block = Block::new(self.chain.len() as u64, transactions, &previous_hash);

        info!(
            "Mining block {} at difficulty {}... This may take a moment.",
            block.index, self.difficulty
        );
        block.mine(self.difficulty);
        info!("Block {} mined with hash: {}...", block.index, &block.hash[..10]);

        self.chain.push(block);
        Ok(&self.chain[self.chain.len() - 1])
    }

    /// True if every block after genesis is intact and linked to its predecessor
    pub fn verify(&self) -> bool {
        match self.verify_detailed() {
            Ok(()) => true,
            Err(violation) => {
                warn!("{}", violation);
                false
            }
        }
    }

    /// Like [`Ledger::verify`], but reports the first block that fails
    pub fn verify_detailed(&self) -> Result<(), IntegrityViolation> {
        for (index, pair) in self.chain.windows(2).enumerate() {
            let (previous, current) = (&pair[0], &pair[1]);
            let index = index + 1;

            if !current.verify_hash() {
                return Err(IntegrityViolation {
                    index,
                    fault: IntegrityFault::HashMismatch,
                });
            }
            if current.previous_hash != previous.hash {
                return Err(IntegrityViolation {
                    index,
                    fault: IntegrityFault::BrokenLink,
                });
            }
        }

        Ok(())
    }

    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    /// Mutable access to the stored blocks, bypassing every ledger invariant.
    ///
    /// Only meant for simulating tampering in tests.
    #[doc(hidden)]
    pub fn blocks_mut(&mut self) -> &mut [Block] {
        &mut self.chain
    }

    pub fn last_block(&self) -> Option<&Block> {
        self.chain.last()
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    pub fn genesis_created(&self) -> bool {
        self.genesis_created
    }

    /// Every mined transaction, in chain order
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.chain.iter().flat_map(|block| block.transactions.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(voter_id: &str) -> Transaction {
        RegistrationTransaction::new(voter_id, "D1", "pub_key").into()
    }

    fn ledger_with_blocks(count: usize) -> Ledger {
        let mut ledger = Ledger::new(1);
        ledger.create_genesis();
        for i in 0..count {
            ledger.submit(registration(&format!("v{}", i))).unwrap();
            ledger.commit().unwrap();
        }
        ledger
    }

    #[test]
    fn test_genesis_created_once() {
        let mut ledger = Ledger::new(2);
        assert!(ledger.is_empty());
        assert!(!ledger.genesis_created());

        ledger.create_genesis();
        ledger.create_genesis();
        ledger.create_genesis();

        assert_eq!(ledger.len(), 1);
        assert!(ledger.genesis_created());
        assert_eq!(ledger.blocks()[0].previous_hash, GENESIS_PREVIOUS_HASH);
        assert!(ledger.verify());
    }

    #[test]
    fn test_commit_empty_pending() {
        let mut ledger = Ledger::new(0);
        ledger.create_genesis();

        match ledger.commit() {
            Err(Error::EmptyPendingSet) => {}
            _ => panic!("expected EmptyPendingSet"),
        }
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_commit_absorbs_whole_pending_set() {
        let mut ledger = Ledger::new(1);
        ledger.create_genesis();
        ledger.submit(registration("v1")).unwrap();
        ledger.submit(registration("v2")).unwrap();
        assert_eq!(ledger.pending().len(), 2);

        let block = ledger.commit().unwrap();
        assert_eq!(block.index, 1);
        assert_eq!(block.transactions.len(), 2);
        assert!(block.hash.starts_with('0'));

        assert!(ledger.pending().is_empty());
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.blocks()[1].previous_hash, ledger.blocks()[0].hash);
        assert_eq!(ledger.transactions().count(), 2);
    }

    #[test]
    fn test_verifier_rejects() {
        let reject_votes = |tx: &Transaction| match tx {
            Transaction::Vote(_) => Err(ValidationError::Rejected("no votes".to_owned())),
            _ => Ok(()),
        };
        let mut ledger = Ledger::with_verifier(0, Box::new(reject_votes));
        ledger.create_genesis();

        let vote = VoteTransaction::new("BALLOT", "D1", "00".to_owned());
        assert!(ledger.submit(vote.into()).is_err());
        assert!(ledger.pending().is_empty());

        assert!(ledger.submit(registration("v1")).is_ok());
        assert_eq!(ledger.pending().len(), 1);
    }

    #[test]
    fn test_verify_untouched_chain() {
        assert!(Ledger::new(0).verify());
        assert!(ledger_with_blocks(0).verify());
        assert!(ledger_with_blocks(4).verify());
    }

    #[test]
    fn test_verify_detects_tampered_transactions() {
        let mut ledger = ledger_with_blocks(3);
        if let Transaction::Registration(tx) = &mut ledger.blocks_mut()[2].transactions[0] {
            tx.district = "D2".to_owned();
        }

        assert!(!ledger.verify());
        assert_eq!(
            ledger.verify_detailed(),
            Err(IntegrityViolation {
                index: 2,
                fault: IntegrityFault::HashMismatch
            })
        );
    }

    #[test]
    fn test_verify_detects_tampered_nonce() {
        let mut ledger = ledger_with_blocks(3);
        ledger.blocks_mut()[1].nonce += 1;
        assert!(!ledger.verify());
    }

    #[test]
    fn test_verify_detects_tampered_previous_hash() {
        let mut ledger = ledger_with_blocks(3);
        ledger.blocks_mut()[3].previous_hash = "0".repeat(64);
        assert!(!ledger.verify());

        // Even a re-hashed block is caught by the broken link
        let mut ledger = ledger_with_blocks(3);
        let block = &mut ledger.blocks_mut()[3];
        block.previous_hash = "0".repeat(64);
        block.hash = block.compute_hash();
        assert_eq!(
            ledger.verify_detailed(),
            Err(IntegrityViolation {
                index: 3,
                fault: IntegrityFault::BrokenLink
            })
        );
    }

    #[test]
    fn test_restore_keeps_stored_hashes() {
        let ledger = ledger_with_blocks(2);
        let blocks = ledger.blocks().to_vec();

        let restored = Ledger::restore(blocks.clone(), ledger.difficulty(), true);
        assert_eq!(restored.blocks(), &blocks[..]);
        assert!(restored.genesis_created());
        assert!(restored.verify());

        // Genesis is not recreated on a restored ledger
        let mut restored = restored;
        restored.create_genesis();
        assert_eq!(restored.len(), 3);
    }
}
