//! Randomness plumbing.
//!
//! The generator never touches global random state. Callers inject a source:
//! a seeded one for reproducible tests and replays, an entropy-seeded one in
//! production.

pub mod rng;
