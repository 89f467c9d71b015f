use ballotchain::{Election, DEFAULT_DIFFICULTY};
use std::env::var;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BALLOTCHAIN_DIFFICULTY must be a non-negative integer, found {0:?}")]
    InvalidDifficulty(String),

    #[error("{0} must list at least one entry")]
    EmptyList(&'static str),
}

/// Runtime configuration, read from the environment.
///
/// Everything except `state_path` only matters when no state file exists yet and a new
/// election has to be created.
pub struct Config {
    pub state_path: PathBuf,
    pub difficulty: usize,
    pub election_name: String,
    pub candidates: Vec<String>,
    pub districts: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let state_path: PathBuf = match var("BALLOTCHAIN_STATE_PATH") {
            Ok(val) => val.into(),
            Err(_e) => "election_state.json".into(),
        };

        let difficulty = match var("BALLOTCHAIN_DIFFICULTY") {
            Ok(val) => val
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidDifficulty(val))?,
            Err(_e) => DEFAULT_DIFFICULTY,
        };

        let election_name = match var("BALLOTCHAIN_ELECTION_NAME") {
            Ok(val) => val,
            Err(_e) => "General Election 2025".to_owned(),
        };

        let candidates = list_from_env(
            "BALLOTCHAIN_CANDIDATES",
            &["Candidate A", "Candidate B", "Candidate C"],
        )?;
        let districts = list_from_env(
            "BALLOTCHAIN_DISTRICTS",
            &["District 1", "District 2", "District 3"],
        )?;

        Ok(Config {
            state_path,
            difficulty,
            election_name,
            candidates,
            districts,
        })
    }

    /// Start a new election from this configuration
    pub fn new_election(&self) -> Election {
        Election::new(
            &self.election_name,
            self.candidates.clone(),
            self.districts.clone(),
            self.difficulty,
        )
    }
}

fn list_from_env(name: &'static str, default: &[&str]) -> Result<Vec<String>, ConfigError> {
    let list = match var(name) {
        Ok(val) => parse_list(&val),
        Err(_e) => default.iter().map(|s| s.to_string()).collect(),
    };

    if list.is_empty() {
        return Err(ConfigError::EmptyList(name));
    }
    Ok(list)
}

/// Split a comma separated list, dropping blank entries
fn parse_list(val: &str) -> Vec<String> {
    val.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_owned())
        .collect()
}
