use crate::*;

/// Decides whether a transaction may enter the ledger's pending set.
///
/// This is where signature and identity checks belong. The ledger and election
/// logic only ever see accept/reject.
pub trait Verifier {
    fn verify(&self, tx: &Transaction) -> Result<(), ValidationError>;
}

/// Accepts every transaction
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl Verifier for AcceptAll {
    fn verify(&self, _tx: &Transaction) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl<F> Verifier for F
where
    F: Fn(&Transaction) -> Result<(), ValidationError>,
{
    fn verify(&self, tx: &Transaction) -> Result<(), ValidationError> {
        self(tx)
    }
}
