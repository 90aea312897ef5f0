//! # lfnds
//!
//! Donation SDK for online shops: offer a round-up donation at checkout,
//! list the charitable receivers and report the shopper's choice to the
//! elefunds API.
//!
//! This crate provides:
//! - [`BaseConfiguration`] holding credentials, API location and the
//!   pluggable transport, view and model factory
//! - [`Facade`] sequencing rendering and API calls for one configuration
//! - Ready-made [`templates`] for the checkout and success pages
//! - [`Settings`] loading from the environment or TOML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lfnds::{Configuration, Facade, templates::ShopConfiguration};
//!
//! let mut configuration = ShopConfiguration::new(my_view)?;
//! configuration.base_mut().set_client_id(1001).set_api_key("ay3456789gg234561234");
//!
//! let mut facade = Facade::with_configuration(configuration)?;
//! facade.configuration_as_mut::<ShopConfiguration>()?.set_sum_excluding_donation(960)?;
//! facade.load_receivers_into_view().await?;
//!
//! let html = facade.render_template(None)?;
//! ```

pub mod configuration;
pub mod facade;
pub mod settings;
pub mod templates;

pub use configuration::{
    BaseConfiguration, Configuration, ConfigurationState, FacadeHandle, DEFAULT_API_URL,
    DEFAULT_COUNTRYCODE, DEFAULT_TEMPLATE,
};
pub use facade::Facade;
pub use settings::Settings;

// Core types, so hosts only need this crate
pub use lfnds_core::{
    codes, BaseDonation, BaseReceiver, Donation, DonationRecord, Donator, ElefundsError,
    ElefundsResult, ErrorKind, HttpMethod, ModelFactory, Receiver, ReceiverRecord, Transport,
    View,
};
pub use lfnds_rest::{HttpTransport, RestConfig};
