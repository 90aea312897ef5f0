//! # lfnds-core
//!
//! Core types and traits for the elefunds donation SDK.
//!
//! This crate provides:
//! - `derive_hashed_key` for authenticating API calls
//! - `Donation` / `Receiver` models and their default implementations
//! - `ModelFactory` for swapping in host specific model types
//! - `Transport` and `View` traits for the pluggable collaborators
//! - `ElefundsError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use lfnds_core::{derive_hashed_key, ModelFactory};
//!
//! let hashed_key = derive_hashed_key(1001, "ay3456789gg234561234");
//!
//! let mut models = ModelFactory::new().with_donation_type::<ShopDonation>("ShopDonation");
//! models.set_donation_implementation("ShopDonation")?;
//! let donation = models.create_donation();
//! ```

pub mod credential;
pub mod donation;
pub mod error;
pub mod factory;
pub mod receiver;
pub mod transport;
pub mod view;

// Re-exports for convenience
pub use credential::derive_hashed_key;
pub use donation::{BaseDonation, Donation, DonationRecord, Donator};
pub use error::{codes, ElefundsError, ElefundsResult, ErrorKind};
pub use factory::{ModelFactory, DEFAULT_DONATION_IMPLEMENTATION, DEFAULT_RECEIVER_IMPLEMENTATION};
pub use receiver::{BaseReceiver, Receiver, ReceiverImages, ReceiverRecord};
pub use transport::{BoxedTransport, HttpMethod, Transport};
pub use view::{BoxedView, View};
