//! # Donation Types
//!
//! A donation is the extra amount a shopper adds on top of an order, split
//! across one or more receivers. Amounts are always in minor units (cents).

use crate::error::{codes, ElefundsError, ElefundsResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt::Debug;

/// Contact details of the shopper, sent along when a donation receipt is wanted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donator {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub street_address: String,
    pub zip: String,
    pub city: String,
    /// Two letter countrycode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countrycode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

/// Wire shape of a donation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DonationRecord {
    /// Shop side order id
    pub foreign_id: String,

    /// When the shopper donated
    #[serde(rename = "donationTimestamp", skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,

    /// Donated amount in minor units
    #[serde(rename = "donationAmount")]
    pub amount: i64,

    /// Amount the widget suggested
    #[serde(
        rename = "donationAmountSuggested",
        skip_serializing_if = "Option::is_none"
    )]
    pub suggested_amount: Option<i64>,

    /// Order total without the donation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grand_total: Option<i64>,

    /// Receivers the shopper selected
    #[serde(rename = "receivers")]
    pub receiver_ids: Vec<u32>,

    /// Receivers that were on offer
    #[serde(rename = "receiversAvailable")]
    pub available_receiver_ids: Vec<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub donator: Option<Donator>,
}

impl DonationRecord {
    /// Create a donation for an order
    pub fn new(foreign_id: impl Into<String>, amount: i64, receiver_ids: Vec<u32>) -> Self {
        Self {
            foreign_id: foreign_id.into(),
            time: Some(Utc::now()),
            amount,
            available_receiver_ids: receiver_ids.clone(),
            receiver_ids,
            ..Self::default()
        }
    }

    /// Builder: set the suggested amount
    pub fn with_suggested_amount(mut self, amount: i64) -> Self {
        self.suggested_amount = Some(amount);
        self
    }

    /// Builder: set the order total
    pub fn with_grand_total(mut self, total: i64) -> Self {
        self.grand_total = Some(total);
        self
    }

    /// Builder: set the receivers that were on offer
    pub fn with_available_receivers(mut self, ids: Vec<u32>) -> Self {
        self.available_receiver_ids = ids;
        self
    }

    /// Builder: attach donator details
    pub fn with_donator(mut self, donator: Donator) -> Self {
        self.donator = Some(donator);
        self
    }

    /// Check the record can be submitted to the API
    pub fn validate(&self) -> ElefundsResult<()> {
        if self.foreign_id.trim().is_empty() {
            return Err(ElefundsError::validation(
                codes::INVALID_DONATION,
                "Donation needs a foreign id",
            ));
        }
        if self.amount <= 0 {
            return Err(ElefundsError::validation(
                codes::INVALID_DONATION,
                format!(
                    "Donation {} must have a positive amount, got {}",
                    self.foreign_id, self.amount
                ),
            ));
        }
        if self.receiver_ids.is_empty() {
            return Err(ElefundsError::validation(
                codes::INVALID_DONATION,
                format!("Donation {} has no receivers", self.foreign_id),
            ));
        }
        Ok(())
    }
}

/// A donation as seen by the SDK.
///
/// Hosts that need shop specific fields implement this on their own type and
/// register it with the [`ModelFactory`](crate::factory::ModelFactory).
pub trait Donation: Any + Debug + Send + Sync {
    fn record(&self) -> &DonationRecord;

    fn record_mut(&mut self) -> &mut DonationRecord;

    /// Access to the concrete type, for downcasting
    fn as_any(&self) -> &dyn Any;
}

/// Default donation implementation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseDonation {
    record: DonationRecord,
}

impl BaseDonation {
    pub fn new(record: DonationRecord) -> Self {
        Self { record }
    }
}

impl Donation for BaseDonation {
    fn record(&self) -> &DonationRecord {
        &self.record
    }

    fn record_mut(&mut self) -> &mut DonationRecord {
        &mut self.record
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
