use crate::*;
use indexmap::{IndexMap, IndexSet};

/// An election: its fixed configuration, the electoral roll, the tally key and the ledger.
///
/// Every state change goes through a ledger transaction that is mined into its own block
/// before the in-memory roll is updated.
pub struct Election {
    pub(crate) name: String,
    pub(crate) candidates: Vec<String>,
    pub(crate) districts: Vec<String>,
    pub(crate) voter_registry: IndexMap<String, Voter>,
    pub(crate) ballot_registry: IndexMap<String, Vec<String>>,
    pub(crate) tally_key: TallyKey,
    pub(crate) ledger: Ledger,
}

/// One line of a chain overview
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BlockSummary {
    pub index: u64,
    pub num_transactions: usize,
    pub hash: String,
}

impl Election {
    /// Create a new election with a fresh tally key and a genesis block.
    ///
    /// Duplicate candidate or district names are dropped, keeping first occurrences.
    pub fn new(
        name: &str,
        candidates: Vec<String>,
        districts: Vec<String>,
        difficulty: usize,
    ) -> Self {
        let mut ledger = Ledger::new(difficulty);
        ledger.create_genesis();

        Election {
            name: name.to_owned(),
            candidates: dedup(candidates),
            districts: dedup(districts),
            voter_registry: IndexMap::new(),
            ballot_registry: IndexMap::new(),
            tally_key: TallyKey::generate(),
            ledger,
        }
    }

    /// Replace the transaction verifier used by the ledger
    pub fn set_verifier(&mut self, verifier: Box<dyn Verifier>) {
        self.ledger.set_verifier(verifier);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn districts(&self) -> &[String] {
        &self.districts
    }

    pub fn voters(&self) -> &IndexMap<String, Voter> {
        &self.voter_registry
    }

    pub fn voter(&self, voter_id: &str) -> Option<&Voter> {
        self.voter_registry.get(voter_id)
    }

    pub fn ballot_registry(&self) -> &IndexMap<String, Vec<String>> {
        &self.ballot_registry
    }

    pub fn tally_key(&self) -> &TallyKey {
        &self.tally_key
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    #[doc(hidden)]
    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    fn has_district(&self, district: &str) -> bool {
        self.districts.iter().any(|d| d == district)
    }

    /// Restrict the ballot of `district` to a subset of the election's candidates
    pub fn set_district_ballot(
        &mut self,
        district: &str,
        candidates: Vec<String>,
    ) -> Result<(), ElectionError> {
        if !self.has_district(district) {
            return Err(ElectionError::InvalidDistrict(district.to_owned()));
        }
        for candidate in candidates.iter() {
            if !self.candidates.contains(candidate) {
                return Err(ElectionError::InvalidCandidate(candidate.clone()));
            }
        }

        self.ballot_registry
            .insert(district.to_owned(), dedup(candidates));
        Ok(())
    }

    /// The candidates on the ballot for `district`.
    ///
    /// Districts without a district-specific ballot get every candidate.
    pub fn district_candidates(&self, district: &str) -> &[String] {
        match self.ballot_registry.get(district) {
            Some(candidates) => candidates,
            None => &self.candidates,
        }
    }

    /// Register a voter.
    ///
    /// The voter only enters the roll once their registration transaction has been mined.
    pub fn register_voter(
        &mut self,
        voter_id: &str,
        district: &str,
        public_key: &str,
    ) -> Result<&Voter, ElectionError> {
        if self.voter_registry.contains_key(voter_id) {
            return Err(ElectionError::DuplicateVoter(voter_id.to_owned()));
        }
        if !self.has_district(district) {
            return Err(ElectionError::InvalidDistrict(district.to_owned()));
        }

        let mut voter = Voter::new(voter_id, public_key, district);

        let tx = RegistrationTransaction::new(voter_id, district, public_key);
        self.ledger.submit(tx.into())?;
        self.ledger.commit()?;

        voter.registered = true;
        self.voter_registry.insert(voter_id.to_owned(), voter);

        info!("Voter {} registered in {}", voter_id, district);
        Ok(&self.voter_registry[voter_id])
    }

    /// Look up a voter that is allowed to vote
    fn eligible_voter(&self, voter_id: &str) -> Result<&Voter, ElectionError> {
        let voter = match self.voter_registry.get(voter_id) {
            Some(voter) if voter.registered => voter,
            _ => return Err(ElectionError::NotRegistered(voter_id.to_owned())),
        };
        if voter.has_voted {
            return Err(ElectionError::AlreadyVoted(voter_id.to_owned()));
        }
        Ok(voter)
    }

    /// Issue an advisory ballot listing the candidates for the voter's district
    pub fn prepare_ballot(&self, voter_id: &str) -> Result<Ballot, ElectionError> {
        let voter = self.eligible_voter(voter_id)?;
        let candidates = self.district_candidates(&voter.district).to_vec();

        Ok(Ballot::new(&voter.district, candidates))
    }

    /// Cast a vote.
    ///
    /// The choice is encrypted under the tally key and mined into its own block.
    /// `ballot_id` is recorded but never checked. `signature` is accepted but not verified.
    pub fn cast_vote(
        &mut self,
        voter_id: &str,
        ballot_id: &str,
        selected_candidate: &str,
        signature: &str,
    ) -> Result<(), ElectionError> {
        let district = self.eligible_voter(voter_id)?.district.clone();

        if !self
            .district_candidates(&district)
            .iter()
            .any(|c| c == selected_candidate)
        {
            return Err(ElectionError::InvalidCandidate(
                selected_candidate.to_owned(),
            ));
        }

        debug!(
            "Vote from {} carries a {} byte signature (not verified)",
            voter_id,
            signature.len()
        );

        let encrypted_vote = self.tally_key.encrypt_vote(selected_candidate)?;
        let tx = VoteTransaction::new(ballot_id, &district, encrypted_vote);
        self.ledger.submit(tx.into())?;
        self.ledger.commit()?;

        if let Some(voter) = self.voter_registry.get_mut(voter_id) {
            voter.has_voted = true;
        }

        info!("Vote cast in {}", district);
        Ok(())
    }

    /// True if the ledger passes integrity verification
    pub fn verify_chain(&self) -> bool {
        self.ledger.verify()
    }

    pub fn chain_summary(&self) -> Vec<BlockSummary> {
        self.ledger
            .blocks()
            .iter()
            .map(|block| BlockSummary {
                index: block.index,
                num_transactions: block.transactions.len(),
                hash: block.hash.clone(),
            })
            .collect()
    }
}

fn dedup(items: Vec<String>) -> Vec<String> {
    items.into_iter().collect::<IndexSet<_>>().into_iter().collect()
}
