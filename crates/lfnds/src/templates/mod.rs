//! # Templates
//!
//! Ready-made configurations for the two pages a shop integrates:
//! the checkout page offering the donation, and the order success page
//! confirming it.

mod checkout_success;
mod shop;

pub use checkout_success::{CheckoutSuccessConfiguration, CHECKOUT_SUCCESS_TEMPLATE};
pub use shop::{ShopConfiguration, Skin, Theme, SHOP_TEMPLATE};

/// Render minor units as `units.cents`, e.g. `960` → `"9.60"`
pub fn format_amount(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, cents / 100, cents % 100)
}

/// Cents needed to round `cents` up to the next full unit.
///
/// A total that is already whole gets a full unit.
pub fn suggested_round_up(cents: i64) -> i64 {
    100 - cents.rem_euclid(100)
}
