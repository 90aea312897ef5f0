//! # View Trait
//!
//! Abstraction over template rendering. The SDK only decides *which*
//! template to render and which variables to hand over; locating templates,
//! substituting variables and listing asset tags is the view's job.
//!
//! Variables are plain JSON values. Assigning the same name twice keeps the
//! last value.

use crate::error::ElefundsResult;
use serde_json::Value;

/// Rendering capability used by the facade.
pub trait View: Send + Sync {
    /// Store a variable for later substitution
    fn assign(&mut self, name: &str, value: Value);

    /// Render a template by logical name (e.g. "Shop", "CheckoutSuccess").
    ///
    /// Implementations fail with [`ElefundsError::View`](crate::ElefundsError::View)
    /// when the template is unknown or a required variable was never assigned.
    fn render_template(&self, name: &str) -> ElefundsResult<String>;

    /// `<link>` / `<style>` tags, in inclusion order
    fn css_tag_strings(&self) -> Vec<String>;

    /// `<script>` tags, in inclusion order
    fn javascript_tag_strings(&self) -> Vec<String>;

    /// Assign several variables at once
    fn assign_all(&mut self, values: Vec<(String, Value)>) {
        for (name, value) in values {
            self.assign(&name, value);
        }
    }
}

/// Type alias for a boxed view (dynamic dispatch)
pub type BoxedView = Box<dyn View>;
