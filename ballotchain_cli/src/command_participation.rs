use ballotchain::Election;

pub fn command_participation(election: &Election) -> bool {
    println!("\n--- VOTER PARTICIPATION ---");

    let stats = election.participation();

    println!("Total Registered Voters: {}", stats.overall.registered);
    println!("Total Votes Cast: {}", stats.overall.voted);
    println!("Participation Rate: {:.2}%", stats.overall.rate());

    println!("\nParticipation by District:");
    for (district, data) in stats.districts.iter() {
        println!(
            "{}: {}/{} voters ({:.2}%)",
            district,
            data.voted,
            data.registered,
            data.rate()
        );
    }

    true
}
