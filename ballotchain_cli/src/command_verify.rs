use ballotchain::Election;

pub fn command_verify(election: &Election) -> bool {
    println!("\n--- BLOCKCHAIN VERIFICATION ---");

    let result = election.ledger().verify_detailed();
    match &result {
        Ok(()) => println!("Blockchain integrity verified!"),
        Err(violation) => {
            println!("Blockchain integrity compromised!");
            println!("{}", violation);
        }
    }

    println!("Number of blocks: {}", election.ledger().len());

    println!("\nBlockchain Summary:");
    for block in election.chain_summary() {
        let short_hash: String = block.hash.chars().take(10).collect();
        println!(
            "Block {}: {} transactions, Hash: {}...",
            block.index, block.num_transactions, short_hash
        );
    }

    result.is_ok()
}
