use ballotchain::Election;
use clap::{App, AppSettings, Arg, SubCommand};

mod command_participation;
mod command_register;
mod command_results;
mod command_verify;
mod command_vote;
mod config;

use command_participation::command_participation;
use command_register::command_register;
use command_results::command_results;
use command_verify::command_verify;
use command_vote::command_vote;
use config::Config;

fn main() {
    let matches = App::new("Ballotchain CLI")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Registers voters, casts votes and tallies results on a proof-of-work ledger")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("state")
                .long("state")
                .takes_value(true)
                .value_name("FILE")
                .help("Election state file - can also be set with BALLOTCHAIN_STATE_PATH"),
        )
        .arg(
            Arg::with_name("v")
                .short("v")
                .multiple(true)
                .help("Sets the level of verbosity"),
        )
        .subcommand(
            SubCommand::with_name("register")
                .about("Register a voter in a district")
                .arg(Arg::with_name("VOTER-ID").index(1).required(true))
                .arg(Arg::with_name("DISTRICT").index(2).required(true)),
        )
        .subcommand(
            SubCommand::with_name("vote")
                .about("Cast a vote for a candidate")
                .arg(Arg::with_name("VOTER-ID").index(1).required(true))
                .arg(Arg::with_name("CANDIDATE").index(2).required(true)),
        )
        .subcommand(SubCommand::with_name("results").about("Tally the votes on the ledger"))
        .subcommand(SubCommand::with_name("participation").about("Show voter turnout"))
        .subcommand(SubCommand::with_name("verify").about("Verify the integrity of the ledger"))
        .get_matches();

    let level = match matches.occurrences_of("v") {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut config = Config::from_env().unwrap_or_else(|e| {
        eprintln!("ballotchain: {}", e);
        std::process::exit(1);
    });
    if let Some(state) = matches.value_of("state") {
        config.state_path = state.into();
    }

    let mut election = match Election::load(&config.state_path) {
        Ok(Some(election)) => election,
        Ok(None) => {
            log::info!(
                "No state at {}, starting {}",
                config.state_path.display(),
                config.election_name
            );
            config.new_election()
        }
        Err(e) => {
            eprintln!(
                "ballotchain: unable to read {}: {}",
                config.state_path.display(),
                e
            );
            std::process::exit(1);
        }
    };

    // Subcommands
    let success = match matches.subcommand() {
        ("register", Some(matches)) => command_register(matches, &mut election),
        ("vote", Some(matches)) => command_vote(matches, &mut election),
        ("results", Some(_)) => command_results(&election),
        ("participation", Some(_)) => command_participation(&election),
        ("verify", Some(_)) => command_verify(&election),
        _ => unreachable!("clap requires a subcommand"),
    };

    // State is saved whether or not the action succeeded
    if let Err(e) = election.save(&config.state_path) {
        eprintln!(
            "ballotchain: unable to write {}: {}",
            config.state_path.display(),
            e
        );
        std::process::exit(1);
    }

    if !success {
        std::process::exit(1);
    }
}
