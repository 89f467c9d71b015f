use ballotchain::Election;

pub fn command_vote(matches: &clap::ArgMatches, election: &mut Election) -> bool {
    let voter_id = matches.value_of("VOTER-ID").unwrap_or_default();
    let candidate = matches.value_of("CANDIDATE").unwrap_or_default();

    let ballot = match election.prepare_ballot(voter_id) {
        Ok(ballot) => ballot,
        Err(e) => {
            println!("{}", e);
            return false;
        }
    };

    // TODO: sign the ballot with the voter's secret-key once signatures are verified
    let signature = "unsigned";

    println!("\nCasting vote for {}...", candidate);
    match election.cast_vote(voter_id, &ballot.ballot_id, candidate, signature) {
        Ok(()) => {
            println!("Vote cast successfully");
            true
        }
        Err(e) => {
            println!("{}", e);
            false
        }
    }
}
