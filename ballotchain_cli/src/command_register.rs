use ballotchain::Election;

pub fn command_register(matches: &clap::ArgMatches, election: &mut Election) -> bool {
    // Both are required by clap
    let voter_id = matches.value_of("VOTER-ID").unwrap_or_default();
    let district = matches.value_of("DISTRICT").unwrap_or_default();

    // The voter's secret key is handed to the voter and never stored
    let (secret, public) = ballotchain::generate_keypair();
    let public_key = hex::encode(public.to_bytes());

    println!("\nRegistering voter...");
    match election.register_voter(voter_id, district, &public_key) {
        Ok(_) => {
            println!("Voter registered successfully");
            println!("secret-key: {}", hex::encode(secret.to_bytes()));
            println!("public-key: {}", public_key);
            true
        }
        Err(e) => {
            println!("{}", e);
            false
        }
    }
}
