//! The canonicalization seam shared by every validation unit.

use crate::error::Rejection;

/// A client-submitted request body that can be brought into canonical
/// stored form and judged for acceptability.
///
/// `normalized` must be pure and idempotent: applying it twice yields the
/// same record as applying it once. `validate` judges an already-normalized
/// record. Callers that only need a single predicate can still reach the
/// unit's free functions directly; `evaluate` is the explicit accept/reject
/// decision.
pub trait CanonicalRequest: Sized {
    /// Entity kind tag used in log lines ("category", "movement", ...).
    const KIND: &'static str;

    /// Canonical stored form: trimmed, case-folded, defaulted.
    fn normalized(self) -> Self;

    /// Judge an already-normalized record.
    fn validate(&self) -> Result<(), Rejection>;

    /// Normalize, then validate: one Proposed -> Accepted/Rejected step.
    fn evaluate(self) -> Result<Self, Rejection> {
        let canonical = self.normalized();
        match canonical.validate() {
            Ok(()) => Ok(canonical),
            Err(rejection) => {
                tracing::debug!(kind = Self::KIND, %rejection, "request rejected");
                Err(rejection)
            }
        }
    }
}
