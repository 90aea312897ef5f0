//! End-to-end flow of the checkout and success pages against test doubles.

mod common;

use common::{MockTransport, TemplateView};
use lfnds::templates::{CheckoutSuccessConfiguration, ShopConfiguration, Skin, Theme};
use lfnds::{
    codes, BaseConfiguration, BaseDonation, Configuration, ConfigurationState, Donation,
    DonationRecord, ElefundsResult, ErrorKind, Facade, HttpMethod,
};
use serde_json::json;
use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const SHOP: &str = "Total {{sumExcludingDonationFormatted}} ({{countrycode}}, client {{clientId}}), round up by {{suggestedRoundUpFormatted}}";

fn shop_view() -> TemplateView {
    TemplateView::new()
        .with_template("Shop", SHOP)
        .with_template("CheckoutSuccess", "Thanks for order {{foreignId}}")
        .with_css("<link rel=\"stylesheet\" href=\"elefunds.css\">")
        .with_css("<link rel=\"stylesheet\" href=\"skin.css\">")
        .with_javascript("<script src=\"elefunds.js\"></script>")
}

fn credentialed(transport: MockTransport) -> BaseConfiguration {
    let mut base = BaseConfiguration::new();
    base.set_client_id(42)
        .set_api_key("secret")
        .set_transport(transport)
        .set_view(shop_view());
    base
}

#[test]
fn test_checkout_page_renders_total() {
    let mut base = credentialed(MockTransport::new());
    base.set_countrycode("en").unwrap();
    let mut facade = Facade::with_configuration(ShopConfiguration::from_base(base)).unwrap();

    facade
        .configuration_as_mut::<ShopConfiguration>()
        .unwrap()
        .set_sum_excluding_donation(960)
        .unwrap();

    assert_eq!(
        facade.render_template(Some("Shop")).unwrap(),
        "Total 9.60 (en, client 42), round up by 0.40"
    );
    assert_eq!(facade.render_template(None).unwrap(), facade.render_template(Some("Shop")).unwrap());
    assert_eq!(
        facade.configuration().unwrap().base().state(),
        ConfigurationState::Bound
    );
}

#[test]
fn test_missing_variable_is_view_error() {
    let facade = Facade::with_configuration(ShopConfiguration::from_base(credentialed(
        MockTransport::new(),
    )))
    .unwrap();

    // sumExcludingDonation was never set
    let err = facade.render_template(None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::View);
    assert_eq!(err.code(), codes::TEMPLATE_VARIABLE_MISSING);

    let err = facade.render_template(Some("Cart")).unwrap_err();
    assert_eq!(err.code(), codes::TEMPLATE_NOT_FOUND);
}

#[test]
fn test_printable_tags() {
    let facade = Facade::with_configuration(credentialed(MockTransport::new())).unwrap();

    assert_eq!(
        facade.printable_css_tag_strings().unwrap(),
        "<link rel=\"stylesheet\" href=\"elefunds.css\">\n<link rel=\"stylesheet\" href=\"skin.css\">"
    );
    assert_eq!(
        facade.printable_javascript_tag_strings().unwrap(),
        "<script src=\"elefunds.js\"></script>"
    );
}

#[test]
fn test_success_page() {
    let mut facade =
        Facade::with_configuration(CheckoutSuccessConfiguration::from_base(credentialed(
            MockTransport::new(),
        )))
        .unwrap();

    facade
        .configuration_as_mut::<CheckoutSuccessConfiguration>()
        .unwrap()
        .set_foreign_id("1234")
        .unwrap();

    assert_eq!(facade.render_template(None).unwrap(), "Thanks for order 1234");
}

#[test]
fn test_skin_is_assigned_on_init() {
    let view = TemplateView::new().with_template("Shop", "{{skin}}");
    let mut base = BaseConfiguration::new();
    base.set_view(view);
    let mut facade = Facade::with_configuration(ShopConfiguration::from_base(base)).unwrap();

    assert_eq!(
        facade.render_template(None).unwrap(),
        json!({"theme": "light", "color": "orange"}).to_string()
    );

    facade
        .configuration_as_mut::<ShopConfiguration>()
        .unwrap()
        .set_skin(Skin::new(Theme::Dark, "#00efa2"))
        .unwrap();
    assert!(facade.render_template(None).unwrap().contains("dark"));
}

#[test]
fn test_facade_before_binding() {
    let facade = Facade::new();

    for err in [
        facade.render_template(None).unwrap_err(),
        facade.printable_css_tag_strings().unwrap_err(),
        facade.create_donation().unwrap_err(),
    ] {
        assert_eq!(err.kind(), ErrorKind::State);
        assert_eq!(err.code(), codes::CONFIGURATION_NOT_BOUND);
    }
}

struct CountingShop {
    inner: ShopConfiguration,
    init_calls: Arc<AtomicUsize>,
}

impl Configuration for CountingShop {
    fn base(&self) -> &BaseConfiguration {
        self.inner.base()
    }

    fn base_mut(&mut self) -> &mut BaseConfiguration {
        self.inner.base_mut()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn init(&mut self) -> ElefundsResult<()> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.init()
    }

    fn default_template(&self) -> &str {
        self.inner.default_template()
    }
}

#[test]
fn test_init_runs_once_per_binding() {
    let init_calls = Arc::new(AtomicUsize::new(0));
    let mut facade = Facade::new();
    facade
        .set_configuration(CountingShop {
            inner: ShopConfiguration::from_base(credentialed(MockTransport::new())),
            init_calls: init_calls.clone(),
        })
        .unwrap();

    facade.printable_css_tag_strings().unwrap();
    facade.configuration().unwrap();
    assert_eq!(init_calls.load(Ordering::SeqCst), 1);

    let handle = facade.configuration().unwrap().base().facade().unwrap();
    assert_eq!(handle.facade_id(), facade.id());
}

#[test]
fn test_init_failure_leaves_facade_unbound() {
    // no view: the shop's init cannot assign its defaults
    let mut base = BaseConfiguration::new();
    base.set_client_id(42).set_api_key("secret");

    let mut facade = Facade::new();
    let err = facade
        .set_configuration(ShopConfiguration::from_base(base))
        .unwrap_err();

    assert_eq!(err.code(), codes::VIEW_MISSING);
    assert_eq!(facade.configuration().err().unwrap().kind(), ErrorKind::State);
}

#[tokio::test]
async fn test_receivers_then_donation() {
    let transport = MockTransport::new()
        .respond(json!({
            "meta": { "validTime": "2030-01-01T00:00:00Z" },
            "receivers": {
                "en": [
                    { "id": 1, "name": "WWF", "description": "Wildlife" },
                    { "id": 2, "name": "Oxfam", "description": "Poverty" }
                ]
            }
        }))
        .respond(json!({ "message": "Donations added" }));
    let calls = transport.calls();
    let mut facade = Facade::with_configuration(credentialed(transport)).unwrap();
    let hashed_key = facade
        .configuration()
        .unwrap()
        .base()
        .hashed_key()
        .unwrap()
        .to_string();

    let receivers = facade.get_receivers().await.unwrap();
    assert_eq!(receivers.len(), 2);

    let mut donation = facade.create_donation().unwrap();
    *donation.record_mut() = DonationRecord::new("1234", 40, vec![receivers[0].record().id])
        .with_grand_total(1000)
        .with_available_receivers(receivers.iter().map(|r| r.record().id).collect());
    let message = facade.add_donations(&[donation]).await.unwrap();
    assert_eq!(message, "Donations added");

    facade
        .configuration_mut()
        .unwrap()
        .base_mut()
        .set_api_key("rotated");

    facade.complete_donations(&["1234".to_string()]).await.unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].method, HttpMethod::Get);
    assert_eq!(calls[0].url, "https://connect.elefunds.de/receivers/for/42");
    assert_eq!(calls[0].hashed_key, hashed_key);
    assert_eq!(calls[1].method, HttpMethod::Post);
    assert_eq!(calls[1].payload.as_ref().unwrap()[0]["receiversAvailable"], json!([1, 2]));
    // key rotation is picked up on the next call
    assert_ne!(calls[2].hashed_key, hashed_key);
}

#[tokio::test]
async fn test_remote_failure_is_surfaced() {
    let transport = MockTransport::new().fail(lfnds::ElefundsError::RemoteRejected {
        status: 401,
        body: "bad key".into(),
    });
    let facade = Facade::with_configuration(credentialed(transport)).unwrap();

    let donations: Vec<Box<dyn Donation>> = vec![Box::new(BaseDonation::new(
        DonationRecord::new("1234", 40, vec![1]),
    ))];
    let err = facade.add_donations(&donations).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RemoteRejected);
    assert_eq!(err.additional_information().as_deref(), Some("HTTP 401: bad key"));
    assert!(!err.is_retryable());
}
