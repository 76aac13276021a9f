//! Transport-level suites.

pub mod round_trip;
pub mod untrusted_payloads;
