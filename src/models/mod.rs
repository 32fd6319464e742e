//! Domain models for the olive mill backend.
//!
//! # Core Concepts
//!
//! - [`Client`]: an olive grower who brings deliveries to the mill.
//! - [`Batch`]: a weigh ticket for one delivery (weight in/out, box count).
//!   This is the entity the QR scanner edits in the field.
//! - [`ProcessingDecision`]: whether a batch is milled for the client or
//!   bought outright, with the price applied.
//! - [`PressingRoom`] / [`PressingSession`]: rooms are occupied by
//!   time-bounded sessions; a room with an open session is "active".
//! - [`OilBatch`]: oil produced by a session, quality-tested ([`QualityTest`])
//!   and stored in [`Container`]s via an append-only content ledger.
//! - [`Invoice`] / [`Payment`]: billing; an invoice flips to `paid` once its
//!   payments cover the amount.
//! - [`User`]: login accounts with a closed role set and Arabic aliases.

mod batch;
mod billing;
mod client;
mod container;
mod dashboard;
mod employee;
mod oil;
mod pressing;
mod user;

pub use batch::*;
pub use billing::*;
pub use client::*;
pub use container::*;
pub use dashboard::*;
pub use employee::*;
pub use oil::*;
pub use pressing::*;
pub use user::*;
