//! Port trait definitions
//!
//! These traits define the collaborators the core consumes. Adapters live in
//! `suelo-store` and the CLI.

pub mod environment;

pub use environment::{Clock, Geolocator, IdentityProvider, SystemClock, UserId};
