//! Stock-movement coherence evaluation.
//!
//! This crate judges a proposed movement against business heuristics before
//! it ever reaches the stock-mutation engine: magnitude sanity, reason /
//! direction coherence, impact classification and authorization flags. It
//! never consults actual stored stock; the engine applies accepted
//! movements (and rejects insufficient-stock exits) downstream.

pub mod movement;

pub use movement::{
    ImpactLevel, MovementRequest, MovementType, default_reason, impact_level, is_bulk_movement,
    is_reason_coherent, is_reasonable_quantity, requires_authorization, suggested_reasons,
};
