use crate::*;
use rand::Rng;

const BALLOT_ID_LENGTH: usize = 16;
const BALLOT_ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// The candidate options presented to one voter at one point in time.
///
/// Ballots are advisory. Nothing is persisted when one is issued, and the `ballot_id`
/// carried by a vote is never checked against issued ballots.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Ballot {
    pub ballot_id: String,
    pub district: String,
    pub candidates: Vec<String>,
    pub timestamp: f64,
}

impl Ballot {
    pub fn new(district: &str, candidates: Vec<String>) -> Self {
        Ballot {
            ballot_id: generate_ballot_id(&mut rand::thread_rng()),
            district: district.to_owned(),
            candidates,
            timestamp: now_timestamp(),
        }
    }

    pub fn contains(&self, candidate: &str) -> bool {
        self.candidates.iter().any(|c| c == candidate)
    }
}

/// A random 16 character identifier of uppercase letters and digits
pub fn generate_ballot_id<R: Rng>(rng: &mut R) -> String {
    (0..BALLOT_ID_LENGTH)
        .map(|_| BALLOT_ID_CHARSET[rng.gen_range(0..BALLOT_ID_CHARSET.len())] as char)
        .collect()
}
