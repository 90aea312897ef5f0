//! # Facade
//!
//! Single entry point for the host page. A facade is bound to one
//! configuration at a time and delegates everything else: rendering goes to
//! the configuration's view, API calls go through its transport, models come
//! from its factory.

use crate::configuration::{BaseConfiguration, Configuration, FacadeHandle};
use chrono::{DateTime, Utc};
use lfnds_core::{
    codes, Donation, ElefundsError, ElefundsResult, HttpMethod, Receiver, ReceiverRecord,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

/// Orchestrates rendering and API calls for one configuration
pub struct Facade {
    id: Uuid,
    configuration: Option<Box<dyn Configuration>>,
}

impl Facade {
    /// Create an unbound facade
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            configuration: None,
        }
    }

    /// Create a facade and bind `configuration` right away
    pub fn with_configuration<C>(configuration: C) -> ElefundsResult<Self>
    where
        C: Configuration + 'static,
    {
        let mut facade = Self::new();
        facade.set_configuration(configuration)?;
        Ok(facade)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn handle(&self) -> FacadeHandle {
        FacadeHandle::new(self.id)
    }

    // =========================================================================
    // Binding
    // =========================================================================

    /// Bind a configuration and run its `init()` hook once.
    ///
    /// If `init()` fails the configuration is dropped and the facade keeps
    /// its previous binding.
    pub fn set_configuration<C>(&mut self, configuration: C) -> ElefundsResult<()>
    where
        C: Configuration + 'static,
    {
        self.set_boxed_configuration(Box::new(configuration))
    }

    #[instrument(skip(self, configuration), fields(facade_id = %self.id))]
    pub fn set_boxed_configuration(
        &mut self,
        mut configuration: Box<dyn Configuration>,
    ) -> ElefundsResult<()> {
        configuration.base_mut().bind_facade(self.handle());

        if let Err(e) = configuration.init() {
            error!("Configuration init failed: {}", e);
            return Err(e);
        }

        info!(
            "Configuration bound: client_id={:?}, countrycode={}, template={}",
            configuration.base().client_id(),
            configuration.base().countrycode(),
            configuration.default_template()
        );
        self.configuration = Some(configuration);
        Ok(())
    }

    /// Bound configuration; fails before `set_configuration()`
    pub fn configuration(&self) -> ElefundsResult<&dyn Configuration> {
        match self.configuration.as_deref() {
            Some(configuration) => Ok(configuration),
            None => Err(not_bound()),
        }
    }

    pub fn configuration_mut(&mut self) -> ElefundsResult<&mut (dyn Configuration + 'static)> {
        match self.configuration.as_deref_mut() {
            Some(configuration) => Ok(configuration),
            None => Err(not_bound()),
        }
    }

    /// Bound configuration as its concrete type
    pub fn configuration_as<C: Configuration>(&self) -> ElefundsResult<&C> {
        self.configuration()?
            .as_any()
            .downcast_ref::<C>()
            .ok_or_else(wrong_type::<C>)
    }

    pub fn configuration_as_mut<C: Configuration>(&mut self) -> ElefundsResult<&mut C> {
        self.configuration_mut()?
            .as_any_mut()
            .downcast_mut::<C>()
            .ok_or_else(wrong_type::<C>)
    }

    fn base(&self) -> ElefundsResult<&BaseConfiguration> {
        Ok(self.configuration()?.base())
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Render a template through the bound view.
    ///
    /// `None` renders the configuration's default template.
    pub fn render_template(&self, name: Option<&str>) -> ElefundsResult<String> {
        let configuration = self.configuration()?;
        let template = match name {
            Some(name) => name,
            None => configuration.default_template(),
        };
        debug!("Rendering template {}", template);
        configuration.base().view()?.render_template(template)
    }

    /// CSS tags of the bound view, one per line, in inclusion order
    pub fn printable_css_tag_strings(&self) -> ElefundsResult<String> {
        Ok(self.base()?.view()?.css_tag_strings().join("\n"))
    }

    /// JavaScript tags of the bound view, one per line, in inclusion order
    pub fn printable_javascript_tag_strings(&self) -> ElefundsResult<String> {
        Ok(self.base()?.view()?.javascript_tag_strings().join("\n"))
    }

    // =========================================================================
    // Models
    // =========================================================================

    /// New instance of the configured donation implementation
    pub fn create_donation(&self) -> ElefundsResult<Box<dyn Donation>> {
        Ok(self.base()?.models().create_donation())
    }

    /// New instance of the configured receiver implementation
    pub fn create_receiver(&self) -> ElefundsResult<Box<dyn Receiver>> {
        Ok(self.base()?.models().create_receiver())
    }

    // =========================================================================
    // Donation API
    // =========================================================================

    /// Fetch the receivers offered for the configured countrycode
    #[instrument(skip(self), fields(facade_id = %self.id))]
    pub async fn get_receivers(&self) -> ElefundsResult<Vec<Box<dyn Receiver>>> {
        let base = self.base()?;
        let client_id = client_id(base)?;
        let hashed_key = base.hashed_key()?;
        let countrycode = base.countrycode();

        let url = format!("{}/receivers/for/{}", base.api_url(), client_id);
        let response = base
            .transport()?
            .perform_call(HttpMethod::Get, &url, hashed_key, None)
            .await?;

        let mut parsed: ReceiversResponse = serde_json::from_value(response).map_err(|e| {
            ElefundsError::protocol("Unexpected receivers response", Some(e.to_string()))
        })?;

        let records = parsed.receivers.remove(countrycode).ok_or_else(|| {
            ElefundsError::protocol(
                format!("No receivers available for countrycode {}", countrycode),
                None,
            )
        })?;

        let models = base.models();
        let receivers: Vec<Box<dyn Receiver>> = records
            .into_iter()
            .map(|mut record| {
                record.countrycode = countrycode.to_string();
                if record.valid_time.is_none() {
                    record.valid_time = parsed.meta.valid_time;
                }
                let mut receiver = models.create_receiver();
                *receiver.record_mut() = record;
                receiver
            })
            .collect();

        info!(
            "Fetched {} receivers for countrycode {}",
            receivers.len(),
            countrycode
        );
        Ok(receivers)
    }

    /// Report donations to the API.
    ///
    /// Every donation is validated before anything is sent.
    #[instrument(skip(self, donations), fields(facade_id = %self.id, count = donations.len()))]
    pub async fn add_donations(&self, donations: &[Box<dyn Donation>]) -> ElefundsResult<String> {
        if donations.is_empty() {
            debug!("No donations to add");
            return Ok(String::new());
        }

        for donation in donations {
            donation.record().validate()?;
        }

        let base = self.base()?;
        let client_id = client_id(base)?;
        let payload = donations
            .iter()
            .map(|d| serde_json::to_value(d.record()))
            .collect::<Result<Vec<Value>, _>>()
            .map_err(|e| {
                ElefundsError::protocol("Failed to encode donations", Some(e.to_string()))
            })?;

        let url = format!("{}/donations?clientId={}", base.api_url(), client_id);
        let response = base
            .transport()?
            .perform_call(
                HttpMethod::Post,
                &url,
                base.hashed_key()?,
                Some(&Value::Array(payload)),
            )
            .await?;

        info!("Added {} donations", donations.len());
        Ok(api_message(&response))
    }

    /// Cancel previously added donations by foreign id
    #[instrument(skip(self), fields(facade_id = %self.id))]
    pub async fn cancel_donations(&self, foreign_ids: &[String]) -> ElefundsResult<String> {
        self.update_donations(HttpMethod::Delete, foreign_ids).await
    }

    /// Mark previously added donations as completed by foreign id
    #[instrument(skip(self), fields(facade_id = %self.id))]
    pub async fn complete_donations(&self, foreign_ids: &[String]) -> ElefundsResult<String> {
        self.update_donations(HttpMethod::Put, foreign_ids).await
    }

    async fn update_donations(
        &self,
        method: HttpMethod,
        foreign_ids: &[String],
    ) -> ElefundsResult<String> {
        if foreign_ids.is_empty() {
            debug!("No donations to update");
            return Ok(String::new());
        }

        let base = self.base()?;
        let client_id = client_id(base)?;
        let url = format!(
            "{}/donations/{}?clientId={}",
            base.api_url(),
            foreign_ids.join(","),
            client_id
        );

        let response = base
            .transport()?
            .perform_call(method, &url, base.hashed_key()?, None)
            .await?;

        info!("{} on {} donations succeeded", method, foreign_ids.len());
        Ok(api_message(&response))
    }

    /// Fetch receivers and hand them to the view as `receivers` and
    /// `receiverIds`. Returns the number of receivers assigned.
    pub async fn load_receivers_into_view(&mut self) -> ElefundsResult<usize> {
        let receivers = self.get_receivers().await?;
        let records: Vec<&ReceiverRecord> = receivers.iter().map(|r| r.record()).collect();
        let ids: Vec<u32> = records.iter().map(|r| r.id).collect();
        let value = serde_json::to_value(&records).map_err(|e| {
            ElefundsError::protocol("Failed to encode receivers", Some(e.to_string()))
        })?;

        let view = self.configuration_mut()?.base_mut().view_mut()?;
        view.assign("receivers", value);
        view.assign("receiverIds", json!(ids));

        Ok(receivers.len())
    }
}

impl Default for Facade {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Facade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Facade")
            .field("id", &self.id)
            .field(
                "configuration",
                &self.configuration.as_ref().map(|c| c.base()),
            )
            .finish()
    }
}

fn not_bound() -> ElefundsError {
    ElefundsError::state(
        codes::CONFIGURATION_NOT_BOUND,
        "No configuration bound. Call set_configuration() first.",
    )
}

fn wrong_type<C>() -> ElefundsError {
    ElefundsError::state(
        codes::CONFIGURATION_TYPE_MISMATCH,
        format!(
            "Bound configuration is not a {}",
            std::any::type_name::<C>()
        ),
    )
}

fn client_id(base: &BaseConfiguration) -> ElefundsResult<u32> {
    base.client_id().ok_or_else(|| {
        ElefundsError::configuration(codes::CREDENTIALS_MISSING, "clientId is not set")
    })
}

fn api_message(response: &Value) -> String {
    response
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

// =============================================================================
// API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct ReceiversResponse {
    #[serde(default)]
    meta: ReceiversMeta,
    receivers: HashMap<String, Vec<ReceiverRecord>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReceiversMeta {
    #[serde(default)]
    valid_time: Option<DateTime<Utc>>,
}
