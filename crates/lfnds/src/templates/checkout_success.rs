//! Order success page configuration.

use crate::configuration::{BaseConfiguration, Configuration};
use lfnds_core::{ElefundsResult, View};
use lfnds_rest::{HttpTransport, SDK_MODULE, SDK_VERSION};
use serde_json::json;
use std::any::Any;

pub const CHECKOUT_SUCCESS_TEMPLATE: &str = "CheckoutSuccess";

/// Configuration for the page shown after the order went through
#[derive(Debug)]
pub struct CheckoutSuccessConfiguration {
    base: BaseConfiguration,
}

impl CheckoutSuccessConfiguration {
    pub fn new<V>(view: V) -> ElefundsResult<Self>
    where
        V: View + 'static,
    {
        let mut base = BaseConfiguration::new();
        base.set_transport(HttpTransport::new()?).set_view(view);
        base.set_version_and_module_identifier(SDK_VERSION, SDK_MODULE)?;
        Ok(Self::from_base(base))
    }

    pub fn from_base(base: BaseConfiguration) -> Self {
        Self { base }
    }

    /// Assign the shop's order id the donation belongs to
    pub fn set_foreign_id(&mut self, foreign_id: impl Into<String>) -> ElefundsResult<()> {
        self.base
            .view_mut()?
            .assign("foreignId", json!(foreign_id.into()));
        Ok(())
    }
}

impl Configuration for CheckoutSuccessConfiguration {
    fn base(&self) -> &BaseConfiguration {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseConfiguration {
        &mut self.base
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn default_template(&self) -> &str {
        CHECKOUT_SUCCESS_TEMPLATE
    }
}
