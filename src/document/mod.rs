/// Persisted `{ source, transform }` records.
pub mod placement;
