//! # Model Factory
//!
//! Selects which concrete types the SDK instantiates for donations and
//! receivers.
//!
//! A factory holds a catalogue of named implementations and one selected
//! slot per model. Hosts register their own types once at startup and clone
//! the factory into each configuration, so a selection made for one request
//! never leaks into another.
//!
//! ```text
//! ┌───────────────────────────── ModelFactory ─────────────────────────────┐
//! │ catalogue:  "Donation" -> BaseDonation, "ShopDonation" -> ShopDonation │
//! │ selected:   donation = "ShopDonation", receiver = "Receiver"           │
//! └────────────────────────────────────────────────────────────────────────┘
//!            create_donation() -> Box<dyn Donation> (a ShopDonation)
//! ```

use crate::donation::{BaseDonation, Donation};
use crate::error::{codes, ElefundsError, ElefundsResult};
use crate::receiver::{BaseReceiver, Receiver};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Catalogue name of [`BaseDonation`]
pub const DEFAULT_DONATION_IMPLEMENTATION: &str = "Donation";

/// Catalogue name of [`BaseReceiver`]
pub const DEFAULT_RECEIVER_IMPLEMENTATION: &str = "Receiver";

type DonationConstructor = Arc<dyn Fn() -> Box<dyn Donation> + Send + Sync>;
type ReceiverConstructor = Arc<dyn Fn() -> Box<dyn Receiver> + Send + Sync>;

/// Registry of donation and receiver implementations.
///
/// The selected slots hold the constructor itself, so a selection always
/// resolves.
#[derive(Clone)]
pub struct ModelFactory {
    donation_types: HashMap<String, DonationConstructor>,
    receiver_types: HashMap<String, ReceiverConstructor>,
    donation_implementation: (String, DonationConstructor),
    receiver_implementation: (String, ReceiverConstructor),
}

fn donation_constructor<T: Donation + Default>() -> DonationConstructor {
    Arc::new(|| Box::new(T::default()) as Box<dyn Donation>)
}

fn receiver_constructor<T: Receiver + Default>() -> ReceiverConstructor {
    Arc::new(|| Box::new(T::default()) as Box<dyn Receiver>)
}

impl ModelFactory {
    /// Create a factory with the default implementations selected
    pub fn new() -> Self {
        let donation = donation_constructor::<BaseDonation>();
        let receiver = receiver_constructor::<BaseReceiver>();
        Self {
            donation_types: HashMap::from([(
                DEFAULT_DONATION_IMPLEMENTATION.to_string(),
                donation.clone(),
            )]),
            receiver_types: HashMap::from([(
                DEFAULT_RECEIVER_IMPLEMENTATION.to_string(),
                receiver.clone(),
            )]),
            donation_implementation: (DEFAULT_DONATION_IMPLEMENTATION.to_string(), donation),
            receiver_implementation: (DEFAULT_RECEIVER_IMPLEMENTATION.to_string(), receiver),
        }
    }

    /// Make a donation type resolvable under `name`.
    ///
    /// Re-registering the selected name replaces the selected type too.
    pub fn register_donation_type<T>(&mut self, name: impl Into<String>)
    where
        T: Donation + Default,
    {
        let name = name.into();
        let constructor = donation_constructor::<T>();
        if self.donation_implementation.0 == name {
            self.donation_implementation.1 = constructor.clone();
        }
        self.donation_types.insert(name, constructor);
    }

    /// Make a receiver type resolvable under `name`
    pub fn register_receiver_type<T>(&mut self, name: impl Into<String>)
    where
        T: Receiver + Default,
    {
        let name = name.into();
        let constructor = receiver_constructor::<T>();
        if self.receiver_implementation.0 == name {
            self.receiver_implementation.1 = constructor.clone();
        }
        self.receiver_types.insert(name, constructor);
    }

    /// Builder: register a donation type
    pub fn with_donation_type<T>(mut self, name: impl Into<String>) -> Self
    where
        T: Donation + Default,
    {
        self.register_donation_type::<T>(name);
        self
    }

    /// Builder: register a receiver type
    pub fn with_receiver_type<T>(mut self, name: impl Into<String>) -> Self
    where
        T: Receiver + Default,
    {
        self.register_receiver_type::<T>(name);
        self
    }

    /// Select a registered donation implementation by name.
    ///
    /// Fails when `name` was never registered; the previous selection stays.
    pub fn set_donation_implementation(&mut self, name: &str) -> ElefundsResult<()> {
        let constructor = self.donation_types.get(name).ok_or_else(|| {
            ElefundsError::configuration(
                codes::UNKNOWN_DONATION_IMPLEMENTATION,
                format!(
                    "Donation implementation {} does not exist. Did you register it with the model factory?",
                    name
                ),
            )
        })?;
        debug!("Donation implementation set to {}", name);
        self.donation_implementation = (name.to_string(), constructor.clone());
        Ok(())
    }

    /// Select a registered receiver implementation by name
    pub fn set_receiver_implementation(&mut self, name: &str) -> ElefundsResult<()> {
        let constructor = self.receiver_types.get(name).ok_or_else(|| {
            ElefundsError::configuration(
                codes::UNKNOWN_RECEIVER_IMPLEMENTATION,
                format!(
                    "Receiver implementation {} does not exist. Did you register it with the model factory?",
                    name
                ),
            )
        })?;
        debug!("Receiver implementation set to {}", name);
        self.receiver_implementation = (name.to_string(), constructor.clone());
        Ok(())
    }

    /// Register and select `T` in one step, keyed by its type name
    pub fn use_donation<T>(&mut self)
    where
        T: Donation + Default,
    {
        let name = std::any::type_name::<T>();
        let constructor = donation_constructor::<T>();
        self.donation_types.insert(name.to_string(), constructor.clone());
        self.donation_implementation = (name.to_string(), constructor);
    }

    /// Register and select `T` in one step, keyed by its type name
    pub fn use_receiver<T>(&mut self)
    where
        T: Receiver + Default,
    {
        let name = std::any::type_name::<T>();
        let constructor = receiver_constructor::<T>();
        self.receiver_types.insert(name.to_string(), constructor.clone());
        self.receiver_implementation = (name.to_string(), constructor);
    }

    /// Name of the selected donation implementation
    pub fn donation_implementation(&self) -> &str {
        &self.donation_implementation.0
    }

    /// Name of the selected receiver implementation
    pub fn receiver_implementation(&self) -> &str {
        &self.receiver_implementation.0
    }

    /// Check if a donation implementation is registered
    pub fn has_donation_type(&self, name: &str) -> bool {
        self.donation_types.contains_key(name)
    }

    /// Check if a receiver implementation is registered
    pub fn has_receiver_type(&self, name: &str) -> bool {
        self.receiver_types.contains_key(name)
    }

    /// Instantiate the selected donation implementation
    pub fn create_donation(&self) -> Box<dyn Donation> {
        (self.donation_implementation.1)()
    }

    /// Instantiate the selected receiver implementation
    pub fn create_receiver(&self) -> Box<dyn Receiver> {
        (self.receiver_implementation.1)()
    }
}

impl Default for ModelFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ModelFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut donation_types: Vec<&str> = self.donation_types.keys().map(|k| k.as_str()).collect();
        let mut receiver_types: Vec<&str> = self.receiver_types.keys().map(|k| k.as_str()).collect();
        donation_types.sort_unstable();
        receiver_types.sort_unstable();

        f.debug_struct("ModelFactory")
            .field("donation_types", &donation_types)
            .field("receiver_types", &receiver_types)
            .field("donation_implementation", &self.donation_implementation.0)
            .field("receiver_implementation", &self.receiver_implementation.0)
            .finish()
    }
}
