use crate::*;

/// A ledger transaction record
///
/// Serialized with a `type` tag so that a block's transaction list reads as
/// `[{"type": "registration", ...}, {"type": "vote", ...}]`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
pub enum Transaction {
    Registration(RegistrationTransaction),
    Vote(VoteTransaction),
}

impl Transaction {
    /// Get the transaction type
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Transaction::Registration(_) => TransactionType::Registration,
            Transaction::Vote(_) => TransactionType::Vote,
        }
    }

    /// The district this transaction was recorded in
    pub fn district(&self) -> &str {
        match self {
            Transaction::Registration(tx) => &tx.district,
            Transaction::Vote(tx) => &tx.district,
        }
    }

    pub fn timestamp(&self) -> f64 {
        match self {
            Transaction::Registration(tx) => tx.timestamp,
            Transaction::Vote(tx) => tx.timestamp,
        }
    }
}

/// Records that a voter has been admitted to the electoral roll
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RegistrationTransaction {
    pub voter_id: String,
    pub district: String,

    /// Opaque identity material. Never parsed or checked by the ledger.
    pub public_key: String,
    pub timestamp: f64,
}

impl RegistrationTransaction {
    pub fn new(voter_id: &str, district: &str, public_key: &str) -> Self {
        RegistrationTransaction {
            voter_id: voter_id.to_owned(),
            district: district.to_owned(),
            public_key: public_key.to_owned(),
            timestamp: now_timestamp(),
        }
    }
}

/// Records a single cast vote.
///
/// The voter's choice is only present as ciphertext under the election's tally key,
/// and nothing in the record links it back to the voter.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VoteTransaction {
    /// Advisory ballot identifier, never checked against issued ballots
    pub ballot_id: String,
    pub district: String,

    /// Hex encoded `nonce || AES-256-GCM ciphertext`, see [`TallyKey::encrypt_vote`]
    pub encrypted_vote: String,
    pub timestamp: f64,
}

impl VoteTransaction {
    pub fn new(ballot_id: &str, district: &str, encrypted_vote: String) -> Self {
        VoteTransaction {
            ballot_id: ballot_id.to_owned(),
            district: district.to_owned(),
            encrypted_vote,
            timestamp: now_timestamp(),
        }
    }
}

impl From<RegistrationTransaction> for Transaction {
    fn from(tx: RegistrationTransaction) -> Self {
        Transaction::Registration(tx)
    }
}

impl From<VoteTransaction> for Transaction {
    fn from(tx: VoteTransaction) -> Self {
        Transaction::Vote(tx)
    }
}

/// A transaction type
#[derive(Serialize, Deserialize, Copy, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Registration,
    Vote,
}

impl TransactionType {
    pub fn name(&self) -> &'static str {
        match self {
            TransactionType::Registration => "registration",
            TransactionType::Vote => "vote",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_transaction_tagging() {
        let tx: Transaction = RegistrationTransaction::new("v1", "D1", "pub_key_v1").into();
        assert_eq!(tx.transaction_type(), TransactionType::Registration);
        assert_eq!(tx.district(), "D1");

        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "registration");
        assert_eq!(json["voter_id"], "v1");
        assert_eq!(json["public_key"], "pub_key_v1");

        let vote: Transaction = VoteTransaction::new("ABC", "D1", "00ff".to_owned()).into();
        let json = serde_json::to_value(&vote).unwrap();
        assert_eq!(json["type"], "vote");
        assert_eq!(json["encrypted_vote"], "00ff");
        assert_eq!(format!("{}", vote.transaction_type()), "vote");

        let parsed: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, vote);
    }
}
