//! # Receiver Types
//!
//! Receivers are the charities a shopper can pick in the checkout widget.
//! The API hands them out per countrycode together with a validity window.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::HashMap;
use std::fmt::Debug;

/// Image URLs keyed by orientation ("horizontal", "vertical") then size
/// ("small", "medium", "large")
pub type ReceiverImages = HashMap<String, HashMap<String, String>>;

/// Wire shape of a receiver
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReceiverRecord {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub images: ReceiverImages,

    /// Countrycode the receiver was delivered for
    pub countrycode: String,

    /// Receivers must be refetched after this point
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_time: Option<DateTime<Utc>>,
}

impl ReceiverRecord {
    pub fn new(id: u32, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Builder: add an image URL
    pub fn with_image(
        mut self,
        orientation: impl Into<String>,
        size: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        self.images
            .entry(orientation.into())
            .or_default()
            .insert(size.into(), url.into());
        self
    }

    /// Look up an image URL
    pub fn image(&self, orientation: &str, size: &str) -> Option<&str> {
        self.images
            .get(orientation)
            .and_then(|sizes| sizes.get(size))
            .map(|s| s.as_str())
    }

    /// Check if the receiver data is still valid
    pub fn is_valid(&self) -> bool {
        self.valid_time.map(|t| t > Utc::now()).unwrap_or(true)
    }
}

/// A receiver as seen by the SDK.
///
/// Same extension story as [`Donation`](crate::donation::Donation).
pub trait Receiver: Any + Debug + Send + Sync {
    fn record(&self) -> &ReceiverRecord;

    fn record_mut(&mut self) -> &mut ReceiverRecord;

    /// Access to the concrete type, for downcasting
    fn as_any(&self) -> &dyn Any;
}

/// Default receiver implementation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseReceiver {
    record: ReceiverRecord,
}

impl BaseReceiver {
    pub fn new(record: ReceiverRecord) -> Self {
        Self { record }
    }
}

impl Receiver for BaseReceiver {
    fn record(&self) -> &ReceiverRecord {
        &self.record
    }

    fn record_mut(&mut self) -> &mut ReceiverRecord {
        &mut self.record
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
