#[macro_use]
extern crate serde;

#[macro_use]
extern crate log;

mod ballot;
mod block;
mod election;
mod error;
mod ledger;
mod store;
mod tally;
mod tally_key;
mod transaction;
mod util;
mod verifier;
mod voter;

pub use ballot::*;
pub use block::*;
pub use election::*;
pub use error::*;
pub use ledger::*;
pub use store::*;
pub use tally::*;
pub use tally_key::*;
pub use transaction::*;
pub use util::*;
pub use verifier::*;
pub use voter::*;
