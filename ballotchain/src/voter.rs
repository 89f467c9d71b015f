/// A voter on the electoral roll
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Voter {
    pub voter_id: String,

    /// Opaque identity material supplied at registration
    pub public_key: String,
    pub district: String,
    pub registered: bool,
    pub has_voted: bool,
}

impl Voter {
    /// A voter that has not yet been registered on the ledger
    pub fn new(voter_id: &str, public_key: &str, district: &str) -> Self {
        Voter {
            voter_id: voter_id.to_owned(),
            public_key: public_key.to_owned(),
            district: district.to_owned(),
            registered: false,
            has_voted: false,
        }
    }

    pub fn status(&self) -> VoterStatus {
        match (self.registered, self.has_voted) {
            (false, _) => VoterStatus::Unregistered,
            (true, false) => VoterStatus::Registered,
            (true, true) => VoterStatus::Voted,
        }
    }
}

/// Where a voter is in `Unregistered -> Registered -> Voted`
#[derive(Serialize, Deserialize, Copy, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum VoterStatus {
    Unregistered,
    Registered,
    Voted,
}

impl std::fmt::Display for VoterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            VoterStatus::Unregistered => "unregistered",
            VoterStatus::Registered => "registered",
            VoterStatus::Voted => "voted",
        };
        write!(f, "{}", name)
    }
}
