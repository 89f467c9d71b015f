use crate::*;
use indexmap::IndexMap;

/// Vote counts recovered by replaying the ledger
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TallyResult {
    /// Votes per candidate, in candidate order
    pub totals: IndexMap<String, u64>,

    /// Votes per candidate within each district
    pub districts: IndexMap<String, IndexMap<String, u64>>,

    /// Number of vote transactions counted
    pub num_votes: usize,

    /// Number of vote transactions that could not be counted
    pub skipped: usize,
}

impl TallyResult {
    fn empty(candidates: &[String], districts: &[String]) -> Self {
        let zeroes: IndexMap<String, u64> = candidates.iter().map(|c| (c.clone(), 0)).collect();
        TallyResult {
            totals: zeroes.clone(),
            districts: districts
                .iter()
                .map(|d| (d.clone(), zeroes.clone()))
                .collect(),
            num_votes: 0,
            skipped: 0,
        }
    }

    /// The candidates with the most votes. Empty if no votes were counted.
    pub fn winners(&self) -> Vec<&str> {
        let max = match self.totals.values().max() {
            Some(max) if *max > 0 => *max,
            _ => return vec![],
        };
        self.totals
            .iter()
            .filter(|(_, count)| **count == max)
            .map(|(candidate, _)| candidate.as_str())
            .collect()
    }
}

/// Registration and turnout for one group of voters
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Participation {
    pub registered: usize,
    pub voted: usize,
}

impl Participation {
    /// Percentage of registered voters that have voted, 0 if nobody is registered
    pub fn rate(&self) -> f64 {
        if self.registered == 0 {
            0.0
        } else {
            self.voted as f64 / self.registered as f64 * 100.0
        }
    }
}

/// Turnout overall and per district
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ParticipationStats {
    pub overall: Participation,
    pub districts: IndexMap<String, Participation>,
}

impl Election {
    /// Count every vote on the ledger.
    ///
    /// Votes that fail to decrypt or name an unknown candidate are logged and skipped.
    pub fn tally(&self) -> TallyResult {
        let mut result = TallyResult::empty(&self.candidates, &self.districts);

        for block in self.ledger.blocks() {
            for tx in block.transactions.iter() {
                let vote = match tx {
                    Transaction::Vote(vote) => vote,
                    _ => continue,
                };

                let candidate = match self.tally_key.decrypt_vote(&vote.encrypted_vote) {
                    Ok(candidate) => candidate,
                    Err(e) => {
                        warn!("Error counting vote in block {}: {}", block.index, e);
                        result.skipped += 1;
                        continue;
                    }
                };

                match result.totals.get_mut(&candidate) {
                    Some(count) => *count += 1,
                    None => {
                        warn!(
                            "Vote in block {} is for unknown candidate {:?}",
                            block.index, candidate
                        );
                        result.skipped += 1;
                        continue;
                    }
                }
                result.num_votes += 1;

                match result.districts.get_mut(&vote.district) {
                    Some(counts) => {
                        if let Some(count) = counts.get_mut(&candidate) {
                            *count += 1;
                        }
                    }
                    None => warn!(
                        "Vote in block {} is from unknown district {:?}",
                        block.index, vote.district
                    ),
                }
            }
        }

        result
    }

    /// Turnout statistics from the electoral roll
    pub fn participation(&self) -> ParticipationStats {
        let mut districts: IndexMap<String, Participation> = self
            .districts
            .iter()
            .map(|d| (d.clone(), Participation::default()))
            .collect();
        let mut overall = Participation::default();

        for voter in self.voter_registry.values() {
            let district = districts.entry(voter.district.clone()).or_default();

            overall.registered += 1;
            district.registered += 1;
            if voter.has_voted {
                overall.voted += 1;
                district.voted += 1;
            }
        }

        ParticipationStats { overall, districts }
    }
}
