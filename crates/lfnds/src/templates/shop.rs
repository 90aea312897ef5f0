//! Checkout page configuration.

use super::{format_amount, suggested_round_up};
use crate::configuration::{BaseConfiguration, Configuration};
use lfnds_core::{ElefundsResult, View};
use lfnds_rest::{HttpTransport, SDK_MODULE, SDK_VERSION};
use serde::Serialize;
use serde_json::{json, Value};
use std::any::Any;
use tracing::debug;

pub const SHOP_TEMPLATE: &str = "Shop";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Look of the donation module: a theme plus a named or hex color
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skin {
    pub theme: Theme,
    pub color: String,
}

impl Skin {
    pub fn new(theme: Theme, color: impl Into<String>) -> Self {
        Self {
            theme,
            color: color.into(),
        }
    }
}

impl Default for Skin {
    fn default() -> Self {
        Self::new(Theme::Light, "orange")
    }
}

/// Configuration for the checkout page offering the donation
#[derive(Debug)]
pub struct ShopConfiguration {
    base: BaseConfiguration,
    skin: Skin,
}

impl ShopConfiguration {
    /// Configuration talking to the API over HTTPS and rendering through `view`
    pub fn new<V>(view: V) -> ElefundsResult<Self>
    where
        V: View + 'static,
    {
        let mut base = BaseConfiguration::new();
        base.set_transport(HttpTransport::new()?).set_view(view);
        base.set_version_and_module_identifier(SDK_VERSION, SDK_MODULE)?;
        Ok(Self::from_base(base))
    }

    /// Wrap an already assembled configuration
    pub fn from_base(base: BaseConfiguration) -> Self {
        Self {
            base,
            skin: Skin::default(),
        }
    }

    pub fn skin(&self) -> &Skin {
        &self.skin
    }

    pub fn set_skin(&mut self, skin: Skin) -> ElefundsResult<()> {
        let value = skin_value(&skin);
        self.skin = skin;
        self.base.view_mut()?.assign("skin", value);
        Ok(())
    }

    /// Hand the order total, without donation, to the view along with the
    /// suggested round-up.
    pub fn set_sum_excluding_donation(&mut self, cents: i64) -> ElefundsResult<()> {
        let round_up = suggested_round_up(cents);
        debug!("Sum excluding donation {}, suggesting {}", cents, round_up);

        self.base.view_mut()?.assign_all(vec![
            ("sumExcludingDonation".to_string(), json!(cents)),
            (
                "sumExcludingDonationFormatted".to_string(),
                json!(format_amount(cents)),
            ),
            ("suggestedRoundUp".to_string(), json!(round_up)),
            (
                "suggestedRoundUpFormatted".to_string(),
                json!(format_amount(round_up)),
            ),
        ]);
        Ok(())
    }
}

fn skin_value(skin: &Skin) -> Value {
    json!({ "theme": skin.theme, "color": skin.color })
}

impl Configuration for ShopConfiguration {
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

    fn init(&mut self) -> ElefundsResult<()> {
        let skin = skin_value(&self.skin);
        let countrycode = json!(self.base.countrycode());
        let client_id = json!(self.base.client_id());

        self.base.view_mut()?.assign_all(vec![
            ("skin".to_string(), skin),
            ("countrycode".to_string(), countrycode),
            ("clientId".to_string(), client_id),
        ]);
        Ok(())
    }

    fn default_template(&self) -> &str {
        SHOP_TEMPLATE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lfnds_core::{codes, ElefundsError};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    type Assigned = Arc<Mutex<HashMap<String, Value>>>;

    #[derive(Default)]
    struct RecordingView {
        assigned: Assigned,
    }

    impl View for RecordingView {
        fn assign(&mut self, name: &str, value: Value) {
            self.assigned.lock().unwrap().insert(name.to_string(), value);
        }

        fn render_template(&self, name: &str) -> ElefundsResult<String> {
            Err(ElefundsError::view(codes::TEMPLATE_NOT_FOUND, name))
        }

        fn css_tag_strings(&self) -> Vec<String> {
            Vec::new()
        }

        fn javascript_tag_strings(&self) -> Vec<String> {
            Vec::new()
        }
    }

    fn shop() -> (ShopConfiguration, Assigned) {
        let view = RecordingView::default();
        let assigned = view.assigned.clone();
        let mut base = BaseConfiguration::new();
        base.set_client_id(1001).set_api_key("secret").set_view(view);
        (ShopConfiguration::from_base(base), assigned)
    }

    #[test]
    fn test_new_installs_http_transport_with_sdk_agent() {
        let config = ShopConfiguration::new(RecordingView::default()).unwrap();
        let agent = config.base().transport().unwrap().user_agent().to_string();
        assert_eq!(agent, format!("elefunds-sdk v{}", SDK_VERSION));
        assert_eq!(config.default_template(), "Shop");
    }

    #[test]
    fn test_init_assigns_defaults() {
        let (mut config, assigned) = shop();
        config.base_mut().set_countrycode("de").unwrap();
        config.init().unwrap();

        let assigned = assigned.lock().unwrap();
        assert_eq!(assigned["skin"], json!({"theme": "light", "color": "orange"}));
        assert_eq!(assigned["countrycode"], "de");
        assert_eq!(assigned["clientId"], 1001);
    }

    #[test]
    fn test_init_without_view_fails() {
        let mut config = ShopConfiguration::from_base(BaseConfiguration::new());
        let err = config.init().unwrap_err();
        assert_eq!(err.code(), codes::VIEW_MISSING);
    }

    #[test]
    fn test_sum_excluding_donation() {
        let (mut config, assigned) = shop();
        config.set_sum_excluding_donation(960).unwrap();

        let assigned = assigned.lock().unwrap();
        assert_eq!(assigned["sumExcludingDonation"], 960);
        assert_eq!(assigned["sumExcludingDonationFormatted"], "9.60");
        assert_eq!(assigned["suggestedRoundUp"], 40);
        assert_eq!(assigned["suggestedRoundUpFormatted"], "0.40");
    }

    #[test]
    fn test_set_skin() {
        let (mut config, assigned) = shop();
        config.set_skin(Skin::new(Theme::Dark, "#00efa2")).unwrap();

        assert_eq!(config.skin().theme, Theme::Dark);
        assert_eq!(
            assigned.lock().unwrap()["skin"],
            json!({"theme": "dark", "color": "#00efa2"})
        );
    }
}
