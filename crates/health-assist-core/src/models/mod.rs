//! Domain models for the triage engine.

mod symptom;
mod vitals;

pub use symptom::*;
pub use vitals::*;
