use serde::{Deserialize, Serialize};

use stockgate_core::text;
use stockgate_core::{
    CanonicalRequest, LogSummary, ProductRef, Rejection, SUMMARY_TEXT_LIMIT, UserRef, truncate,
};

/// Direction of a stock movement. Closed set: every direction-dependent
/// rule below branches exhaustively over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    Entry,
    Exit,
}

impl core::fmt::Display for MovementType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MovementType::Entry => write!(f, "ENTRY"),
            MovementType::Exit => write!(f, "EXIT"),
        }
    }
}

/// How hard a movement hits stock levels, by quantity alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl core::fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ImpactLevel::Low => write!(f, "Low"),
            ImpactLevel::Medium => write!(f, "Medium"),
            ImpactLevel::High => write!(f, "High"),
            ImpactLevel::VeryHigh => write!(f, "Very High"),
        }
    }
}

/// Words that signal stock coming in. Clients write reasons in Spanish or
/// English, so both vocabularies are matched.
const ENTRY_KEYWORDS: &[&str] = &[
    "entrada",
    "compra",
    "recepción",
    "recepcion",
    "reposición",
    "reposicion",
    "devolución",
    "devolucion",
    "ajuste positivo",
    "entry",
    "purchase",
    "receipt",
    "replenishment",
    "restock",
    "return",
    "positive adjustment",
];

/// Words that signal stock going out.
const EXIT_KEYWORDS: &[&str] = &[
    "salida",
    "venta",
    "despacho",
    "consumo",
    "merma",
    "pérdida",
    "perdida",
    "dañado",
    "danado",
    "ajuste negativo",
    "exit",
    "sale",
    "dispatch",
    "shipment",
    "consumption",
    "shrinkage",
    "loss",
    "damaged",
    "negative adjustment",
];

/// Canned reason suggestions surfaced for client-side autocomplete.
/// These carry no validation weight.
const ENTRY_SUGGESTIONS: &[&str] = &[
    "Purchase from supplier",
    "Customer return",
    "Replenishment",
    "Positive adjustment after count",
];

const EXIT_SUGGESTIONS: &[&str] = &[
    "Sale to customer",
    "Internal consumption",
    "Damaged goods write-off",
    "Negative adjustment after count",
];

/// Entries above this quantity look like data-entry errors.
const MAX_REASONABLE_ENTRY: i64 = 10_000;

/// Exits above this quantity are refused at the request level; the tighter
/// check against live stock happens in the mutation engine.
const MAX_REASONABLE_EXIT: i64 = 1_000;

const BULK_THRESHOLD: i64 = 100;
const AUTHORIZATION_THRESHOLD: i64 = 500;

/// A proposed stock movement. One evaluation step maps it to Accepted or
/// Rejected; applying it against current stock is the mutation engine's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementRequest {
    pub product_id: ProductRef,
    pub user_id: UserRef,
    pub movement_type: MovementType,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CanonicalRequest for MovementRequest {
    const KIND: &'static str = "movement";

    fn normalized(self) -> Self {
        let Self {
            product_id,
            user_id,
            movement_type,
            quantity,
            reason,
        } = self;
        let reason = match text::trim_to_option(reason) {
            Some(reason) => text::capitalize_first(&reason),
            None => default_reason(movement_type).to_string(),
        };
        Self {
            product_id,
            user_id,
            movement_type,
            quantity,
            reason: Some(reason),
        }
    }

    fn validate(&self) -> Result<(), Rejection> {
        if !self.product_id.is_valid() {
            return Err(Rejection::format("product_id", "must be a positive reference"));
        }
        if !self.user_id.is_valid() {
            return Err(Rejection::format("user_id", "must be a positive reference"));
        }
        if !(1..=100_000).contains(&self.quantity) {
            return Err(Rejection::format("quantity", "must be between 1 and 100000"));
        }
        if let Some(reason) = &self.reason {
            if reason.chars().count() > 255 {
                return Err(Rejection::format("reason", "must be at most 255 characters"));
            }
        }

        if !is_reasonable_quantity(self.movement_type, self.quantity) {
            return Err(Rejection::semantic(match self.movement_type {
                MovementType::Entry => "entry quantity is implausibly large",
                MovementType::Exit => "exit quantity is implausibly large",
            }));
        }
        let reason = self.reason.as_deref().unwrap_or("");
        if !is_reason_coherent(self.movement_type, reason) {
            return Err(Rejection::semantic("reason contradicts the movement direction"));
        }
        Ok(())
    }
}

impl MovementRequest {
    /// Whether the movement would be accepted as-is: positive references,
    /// sane magnitude for its direction, and a reason that does not
    /// contradict it.
    pub fn is_consistent(&self) -> bool {
        self.product_id.is_valid()
            && self.user_id.is_valid()
            && is_reasonable_quantity(self.movement_type, self.quantity)
            && is_reason_coherent(self.movement_type, self.reason.as_deref().unwrap_or(""))
    }

    pub fn impact_level(&self) -> ImpactLevel {
        impact_level(self.quantity)
    }

    pub fn is_bulk_movement(&self) -> bool {
        is_bulk_movement(self.quantity)
    }

    pub fn requires_authorization(&self) -> bool {
        requires_authorization(self.movement_type, self.quantity)
    }
}

impl LogSummary for MovementRequest {
    fn log_summary(&self) -> String {
        let reason = self
            .reason
            .as_deref()
            .map(|r| truncate(r, SUMMARY_TEXT_LIMIT))
            .unwrap_or_else(|| "-".to_string());
        format!(
            "movement type={} product={} user={} quantity={} impact={} reason={:?}",
            self.movement_type,
            self.product_id,
            self.user_id,
            self.quantity,
            self.impact_level(),
            reason
        )
    }
}

/// Reason recorded when the client supplies none.
pub fn default_reason(movement_type: MovementType) -> &'static str {
    match movement_type {
        MovementType::Entry => "Entry of inventory",
        MovementType::Exit => "Exit of inventory",
    }
}

/// Magnitude sanity by direction. Non-positive quantities always fail.
pub fn is_reasonable_quantity(movement_type: MovementType, quantity: i64) -> bool {
    if quantity <= 0 {
        return false;
    }
    match movement_type {
        MovementType::Entry => quantity <= MAX_REASONABLE_ENTRY,
        MovementType::Exit => quantity <= MAX_REASONABLE_EXIT,
    }
}

/// Permissive coherence heuristic: a reason is coherent with its direction
/// if it names a keyword of that direction, or at least names no keyword of
/// the opposite one. Absence of contradicting signal counts as coherent.
pub fn is_reason_coherent(movement_type: MovementType, reason: &str) -> bool {
    let lower = reason.to_lowercase();
    let mentions_entry = ENTRY_KEYWORDS.iter().any(|k| lower.contains(k));
    let mentions_exit = EXIT_KEYWORDS.iter().any(|k| lower.contains(k));
    match movement_type {
        MovementType::Entry => mentions_entry || !mentions_exit,
        MovementType::Exit => mentions_exit || !mentions_entry,
    }
}

/// Classify quantity into its stock-impact band.
pub fn impact_level(quantity: i64) -> ImpactLevel {
    if quantity <= 5 {
        ImpactLevel::Low
    } else if quantity <= 50 {
        ImpactLevel::Medium
    } else if quantity <= 500 {
        ImpactLevel::High
    } else {
        ImpactLevel::VeryHigh
    }
}

/// Movements above the bulk threshold get flagged for reporting.
pub fn is_bulk_movement(quantity: i64) -> bool {
    quantity > BULK_THRESHOLD
}

/// Whether a supervisor must sign off. Surfaced to the caller as a signal;
/// enforcement happens at the boundary, not here.
pub fn requires_authorization(movement_type: MovementType, quantity: i64) -> bool {
    quantity > AUTHORIZATION_THRESHOLD
        || (movement_type == MovementType::Exit && quantity > BULK_THRESHOLD)
}

/// Direction-specific canned reasons for client-side autocomplete.
pub fn suggested_reasons(movement_type: MovementType) -> &'static [&'static str] {
    match movement_type {
        MovementType::Entry => ENTRY_SUGGESTIONS,
        MovementType::Exit => EXIT_SUGGESTIONS,
    }
}
