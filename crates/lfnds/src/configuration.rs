//! # Configuration
//!
//! Per-integration bundle of credentials, API location, model factory and
//! the pluggable transport and view.
//!
//! A configuration moves through these states purely through setter calls:
//!
//! ```text
//! Uninitialized ──set_client_id / set_api_key──▶ PartiallyConfigured
//!       ──both credentials set──▶ Credentialed ──view + facade attached──▶ Bound
//! ```
//!
//! The hashed key is derived as soon as both credentials are present and is
//! re-derived whenever either of them changes.

use lfnds_core::{
    codes, derive_hashed_key, BoxedTransport, BoxedView, ElefundsError, ElefundsResult,
    ModelFactory, Transport, View,
};
use lfnds_rest::user_agent;
use std::any::Any;
use std::fmt;
use tracing::debug;
use uuid::Uuid;

/// Production endpoint of the donation API
pub const DEFAULT_API_URL: &str = "https://connect.elefunds.de";

/// Countrycode used until the host sets one
pub const DEFAULT_COUNTRYCODE: &str = "en";

/// Template rendered when the host does not name one
pub const DEFAULT_TEMPLATE: &str = "Shop";

/// Non-owning reference from a configuration to the facade it is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FacadeHandle {
    facade_id: Uuid,
}

impl FacadeHandle {
    pub(crate) fn new(facade_id: Uuid) -> Self {
        Self { facade_id }
    }

    /// Id of the facade, also recorded on its log spans
    pub fn facade_id(&self) -> Uuid {
        self.facade_id
    }
}

/// Lifecycle stage of a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationState {
    /// Neither client id nor API key set
    Uninitialized,
    /// Exactly one of client id and API key set
    PartiallyConfigured,
    /// Both credentials set, hashed key available
    Credentialed,
    /// Credentialed, with a view attached and bound to a facade
    Bound,
}

/// The configuration a facade works with.
///
/// Integrations wrap a [`BaseConfiguration`] and override [`init`](Self::init)
/// or [`default_template`](Self::default_template) where they need to.
pub trait Configuration: Any + Send + Sync {
    fn base(&self) -> &BaseConfiguration;

    fn base_mut(&mut self) -> &mut BaseConfiguration;

    /// Downcast support for [`Facade::configuration_as`](crate::Facade::configuration_as)
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Called exactly once by the facade, right after binding.
    ///
    /// The facade handle is already set at this point.
    fn init(&mut self) -> ElefundsResult<()> {
        Ok(())
    }

    /// Template rendered when the host does not name one
    fn default_template(&self) -> &str {
        DEFAULT_TEMPLATE
    }
}

/// Default configuration holding all SDK settings
pub struct BaseConfiguration {
    client_id: Option<u32>,
    api_key: Option<String>,
    hashed_key: Option<String>,
    api_url: String,
    countrycode: String,
    models: ModelFactory,
    transport: Option<BoxedTransport>,
    view: Option<BoxedView>,
    facade: Option<FacadeHandle>,
}

impl BaseConfiguration {
    /// Create an empty configuration pointing at the production API
    pub fn new() -> Self {
        Self {
            client_id: None,
            api_key: None,
            hashed_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            countrycode: DEFAULT_COUNTRYCODE.to_string(),
            models: ModelFactory::new(),
            transport: None,
            view: None,
            facade: None,
        }
    }

    // =========================================================================
    // Credentials
    // =========================================================================

    pub fn set_client_id(&mut self, client_id: u32) -> &mut Self {
        self.client_id = Some(client_id);
        self.refresh_hashed_key();
        self
    }

    pub fn client_id(&self) -> Option<u32> {
        self.client_id
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) -> &mut Self {
        self.api_key = Some(api_key.into());
        self.refresh_hashed_key();
        self
    }

    /// Hashed key used to authenticate API calls.
    ///
    /// Fails until both client id and API key are set.
    pub fn hashed_key(&self) -> ElefundsResult<&str> {
        self.hashed_key.as_deref().ok_or_else(|| {
            ElefundsError::configuration(
                codes::CREDENTIALS_MISSING,
                "Hashed key could not be calculated. Make sure that both clientId and apiKey are set.",
            )
        })
    }

    fn refresh_hashed_key(&mut self) {
        self.hashed_key = match (self.client_id, self.api_key.as_deref()) {
            (Some(client_id), Some(api_key)) => {
                debug!("Derived hashed key for client {}", client_id);
                Some(derive_hashed_key(client_id, api_key))
            }
            _ => None,
        };
    }

    // =========================================================================
    // API location
    // =========================================================================

    /// Set the API URL; trailing slashes are stripped.
    ///
    /// The URL is not validated here. A malformed URL surfaces as a transport
    /// error on first use.
    pub fn set_api_url(&mut self, url: impl Into<String>) -> &mut Self {
        let url: String = url.into();
        self.api_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Set the two character countrycode used to select receivers
    pub fn set_countrycode(&mut self, countrycode: &str) -> ElefundsResult<&mut Self> {
        if countrycode.chars().count() != 2 {
            return Err(ElefundsError::validation(
                codes::INVALID_COUNTRYCODE,
                format!(
                    "Given countrycode must be a two digit string, got {:?}",
                    countrycode
                ),
            ));
        }
        self.countrycode = countrycode.to_string();
        Ok(self)
    }

    pub fn countrycode(&self) -> &str {
        &self.countrycode
    }

    // =========================================================================
    // Models
    // =========================================================================

    /// Select a donation implementation registered with the model factory
    pub fn set_donation_class_name(&mut self, name: &str) -> ElefundsResult<&mut Self> {
        self.models.set_donation_implementation(name)?;
        Ok(self)
    }

    pub fn donation_class_name(&self) -> &str {
        self.models.donation_implementation()
    }

    /// Select a receiver implementation registered with the model factory
    pub fn set_receiver_class_name(&mut self, name: &str) -> ElefundsResult<&mut Self> {
        self.models.set_receiver_implementation(name)?;
        Ok(self)
    }

    pub fn receiver_class_name(&self) -> &str {
        self.models.receiver_implementation()
    }

    /// Replace the model factory, e.g. with one prepared at startup
    pub fn set_models(&mut self, models: ModelFactory) -> &mut Self {
        self.models = models;
        self
    }

    pub fn models(&self) -> &ModelFactory {
        &self.models
    }

    pub fn models_mut(&mut self) -> &mut ModelFactory {
        &mut self.models
    }

    // =========================================================================
    // Collaborators
    // =========================================================================

    /// Set the transport used to reach the API
    pub fn set_transport<T>(&mut self, transport: T) -> &mut Self
    where
        T: Transport + 'static,
    {
        self.set_boxed_transport(Box::new(transport))
    }

    pub fn set_boxed_transport(&mut self, transport: BoxedTransport) -> &mut Self {
        self.transport = Some(transport);
        self
    }

    pub fn transport(&self) -> ElefundsResult<&dyn Transport> {
        match self.transport.as_deref() {
            Some(transport) => Ok(transport),
            None => Err(transport_missing()),
        }
    }

    pub fn transport_mut(&mut self) -> ElefundsResult<&mut (dyn Transport + 'static)> {
        match self.transport.as_deref_mut() {
            Some(transport) => Ok(transport),
            None => Err(transport_missing()),
        }
    }

    /// Set the view used for rendering
    pub fn set_view<V>(&mut self, view: V) -> &mut Self
    where
        V: View + 'static,
    {
        self.set_boxed_view(Box::new(view))
    }

    pub fn set_boxed_view(&mut self, view: BoxedView) -> &mut Self {
        self.view = Some(view);
        self
    }

    pub fn view(&self) -> ElefundsResult<&dyn View> {
        match self.view.as_deref() {
            Some(view) => Ok(view),
            None => Err(view_missing()),
        }
    }

    pub fn view_mut(&mut self) -> ElefundsResult<&mut (dyn View + 'static)> {
        match self.view.as_deref_mut() {
            Some(view) => Ok(view),
            None => Err(view_missing()),
        }
    }

    /// Identify the integration to the API.
    ///
    /// Sends `"<module> v<version>"` as User-Agent; needs a transport.
    pub fn set_version_and_module_identifier(
        &mut self,
        version: &str,
        module: &str,
    ) -> ElefundsResult<&mut Self> {
        let agent = user_agent(module, version);
        self.transport_mut()?.set_user_agent(agent);
        Ok(self)
    }

    // =========================================================================
    // Facade binding
    // =========================================================================

    pub(crate) fn bind_facade(&mut self, facade: FacadeHandle) {
        self.facade = Some(facade);
    }

    /// Facade this configuration is bound to, once bound
    pub fn facade(&self) -> Option<FacadeHandle> {
        self.facade
    }

    pub fn state(&self) -> ConfigurationState {
        match (self.client_id.is_some(), self.api_key.is_some()) {
            (true, true) if self.facade.is_some() && self.view.is_some() => {
                ConfigurationState::Bound
            }
            (true, true) => ConfigurationState::Credentialed,
            (false, false) => ConfigurationState::Uninitialized,
            _ => ConfigurationState::PartiallyConfigured,
        }
    }
}

fn transport_missing() -> ElefundsError {
    ElefundsError::configuration(
        codes::TRANSPORT_MISSING,
        "No transport set. Call set_transport() first.",
    )
}

fn view_missing() -> ElefundsError {
    ElefundsError::configuration(codes::VIEW_MISSING, "No view set. Call set_view() first.")
}

impl Configuration for BaseConfiguration {
    fn base(&self) -> &BaseConfiguration {
        self
    }

    fn base_mut(&mut self) -> &mut BaseConfiguration {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Default for BaseConfiguration {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BaseConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseConfiguration")
            .field("client_id", &self.client_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("hashed_key", &self.hashed_key.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("countrycode", &self.countrycode)
            .field("models", &self.models)
            .field(
                "transport",
                &self.transport.as_ref().map(|t| t.user_agent().to_string()),
            )
            .field("view", &self.view.is_some())
            .field("facade", &self.facade)
            .finish()
    }
}
