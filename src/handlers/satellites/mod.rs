// Per-kind pass-through endpoints for the records hanging off a driver.
// Reads return full history newest first; writes upsert or append.

pub mod background_check;
pub mod banking;
pub mod insurance;
pub mod vehicle;
