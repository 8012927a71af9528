//! blog_access_core: plan gating and catalog domain for the blog API.
//!
//! Pure domain types, port traits and gate logic. No HTTP framework types;
//! the server crate adapts `gate::Decision` into responses.

pub mod bootstrap;
pub mod catalog;
pub mod credentials;
pub mod error;
pub mod gate;
pub mod memory;
pub mod ports;
pub mod principal;
pub mod sitemap;
pub mod tier;

pub use gate::{AccessPolicy, Decision, Denial, DenialKind};
pub use principal::Principal;
pub use tier::{Plan, SubscriptionStatus, Tier};
