use ballotchain::Election;

pub fn command_results(election: &Election) -> bool {
    println!("\n--- ELECTION RESULTS ---");

    let result = election.tally();

    println!("\nOverall Results:");
    for (candidate, votes) in result.totals.iter() {
        println!("{}: {} votes", candidate, votes);
    }

    println!("\nResults by District:");
    for (district, counts) in result.districts.iter() {
        println!("\n{}:", district);
        for (candidate, votes) in counts.iter() {
            println!("  {}: {} votes", candidate, votes);
        }
    }

    if result.skipped > 0 {
        println!("\n{} vote(s) could not be counted", result.skipped);
    }

    true
}
