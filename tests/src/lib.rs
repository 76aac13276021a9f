//! # Envelope Codec Test Suite
//!
//! Unified test crate exercising the codec the way a transport does: through
//! `EnvelopeSerializer` only.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs          # Application messages and registries
//! └── integration/
//!     ├── round_trip.rs        # decode(encode(e)) == e, escaping correctness
//!     ├── untrusted_payloads.rs# Empty, unknown-class, malformed, hostile bodies
//!     └── concurrency.rs       # Guarded decodes racing on many threads
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p codec-tests
//!
//! # By suite
//! cargo test -p codec-tests integration::round_trip::
//! cargo test -p codec-tests integration::untrusted_payloads::
//! cargo test -p codec-tests integration::concurrency::
//! ```

pub mod fixtures;
pub mod integration;
