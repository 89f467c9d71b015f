use crate::*;
use indexmap::IndexMap;
use std::path::Path;

/// The on-disk form of an election
///
/// Field names are part of the state file format.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ElectionRecord {
    pub name: String,
    pub candidates: Vec<String>,
    pub districts: Vec<String>,
    pub voter_registry: IndexMap<String, Voter>,
    pub ballot_registry: IndexMap<String, Vec<String>>,
    pub blockchain: Vec<Block>,

    /// Hex encoded tally key
    pub election_key: String,
    pub difficulty: usize,

    #[serde(default)]
    pub genesis_created: bool,
}

impl Election {
    /// Snapshot this election into its persisted form
    pub fn to_record(&self) -> ElectionRecord {
        ElectionRecord {
            name: self.name.clone(),
            candidates: self.candidates.clone(),
            districts: self.districts.clone(),
            voter_registry: self.voter_registry.clone(),
            ballot_registry: self.ballot_registry.clone(),
            blockchain: self.ledger.blocks().to_vec(),
            election_key: self.tally_key.to_hex(),
            difficulty: self.ledger.difficulty(),
            genesis_created: self.ledger.genesis_created(),
        }
    }

    /// Rebuild an election from its persisted form.
    ///
    /// Blocks keep their stored hashes and voters keep their stored flags. Nothing is re-mined
    /// or re-validated; run [`Ledger::verify`] to check the restored chain.
    pub fn from_record(record: ElectionRecord) -> Result<Self, Error> {
        let tally_key = TallyKey::from_hex(&record.election_key)?;
        let ledger = Ledger::restore(record.blockchain, record.difficulty, record.genesis_created);

        Ok(Election {
            name: record.name,
            candidates: record.candidates,
            districts: record.districts,
            voter_registry: record.voter_registry,
            ballot_registry: record.ballot_registry,
            tally_key,
            ledger,
        })
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(&self.to_record())?)
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        let record: ElectionRecord = serde_json::from_str(json)?;
        Election::from_record(record)
    }

    /// Write the election state to `path`, replacing any existing file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read election state from `path`, or `None` if there is no such file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Option<Self>, Error> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }

        let json = std::fs::read_to_string(path)?;
        Ok(Some(Election::from_json(&json)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated_election() -> Election {
        let mut election = Election::new(
            "Persisted",
            vec!["A".to_owned(), "B".to_owned()],
            vec!["D1".to_owned(), "D2".to_owned()],
            1,
        );
        election
            .set_district_ballot("D2", vec!["B".to_owned()])
            .unwrap();
        election.register_voter("v1", "D1", "pk1").unwrap();
        election.register_voter("v2", "D2", "pk2").unwrap();
        election.cast_vote("v1", "X", "A", "sig").unwrap();
        election
    }

    #[test]
    fn test_record_layout() {
        let election = populated_election();
        let value = serde_json::to_value(&election.to_record()).unwrap();

        for key in &[
            "name",
            "candidates",
            "districts",
            "voter_registry",
            "ballot_registry",
            "blockchain",
            "election_key",
            "difficulty",
            "genesis_created",
        ] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }

        assert_eq!(value["voter_registry"]["v1"]["has_voted"], true);
        assert_eq!(value["voter_registry"]["v2"]["registered"], true);
        assert_eq!(value["ballot_registry"]["D2"][0], "B");
        assert_eq!(value["blockchain"][1]["transactions"][0]["type"], "registration");
        assert_eq!(value["blockchain"][0]["previous_hash"], "0");
        assert_eq!(value["difficulty"], 1);
    }

    #[test]
    fn test_json_round_trip() {
        let election = populated_election();
        let restored = Election::from_json(&election.to_json().unwrap()).unwrap();

        assert_eq!(restored.name(), election.name());
        assert_eq!(restored.voters(), election.voters());
        assert_eq!(restored.ledger().blocks(), election.ledger().blocks());
        assert_eq!(restored.tally_key(), election.tally_key());
        assert!(restored.verify_chain());
        assert_eq!(restored.tally(), election.tally());
    }

    #[test]
    fn test_timestamps_survive_reload() {
        let mut election = populated_election();

        // Parsed one ULP low by serde_json's default float parser
        let timestamp = 1792328515.7069685_f64;
        {
            let ledger = election.ledger_mut();
            let last = ledger.blocks_mut().last_mut().unwrap();
            last.timestamp = timestamp;
            last.hash = last.compute_hash();
        }
        assert!(election.verify_chain());

        let restored = Election::from_json(&election.to_json().unwrap()).unwrap();
        let last = restored.ledger().last_block().unwrap();
        assert_eq!(last.timestamp.to_bits(), timestamp.to_bits());
        assert!(restored.verify_chain());
    }

    #[test]
    fn test_restore_keeps_stored_values() {
        let election = populated_election();
        let mut record = election.to_record();

        // Stored values are trusted verbatim, even when they are inconsistent
        record.blockchain[1].hash = "bogus".to_owned();
        record.voter_registry.get_mut("v2").unwrap().has_voted = true;

        let restored = Election::from_record(record).unwrap();
        assert_eq!(restored.ledger().blocks()[1].hash, "bogus");
        assert!(restored.voter("v2").unwrap().has_voted);
        assert!(!restored.verify_chain());
    }

    #[test]
    fn test_missing_genesis_flag_defaults_false() {
        let election = populated_election();
        let mut value = serde_json::to_value(&election.to_record()).unwrap();
        value.as_object_mut().unwrap().remove("genesis_created");

        let record: ElectionRecord = serde_json::from_value(value).unwrap();
        assert!(!record.genesis_created);
    }

    #[test]
    fn test_bad_key_rejected() {
        let mut record = populated_election().to_record();
        record.election_key = "1234".to_owned();
        assert!(Election::from_record(record).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!(
            "ballotchain_store_test_{}.json",
            generate_ballot_id(&mut rand::thread_rng())
        ));
        assert!(Election::load(&path).unwrap().is_none());

        let election = populated_election();
        election.save(&path).unwrap();

        let loaded = Election::load(&path).unwrap().unwrap();
        assert_eq!(loaded.ledger().len(), 4);
        assert_eq!(loaded.voters(), election.voters());
        assert_eq!(loaded.tally().totals["A"], 1);

        std::fs::remove_file(&path).unwrap();
    }
}
