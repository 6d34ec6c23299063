//! Checkout flow state machine.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    /// Cart review.
    #[default]
    Review = 1,
    /// Billing and payment details.
    Payment = 2,
    /// Order confirmation.
    Confirm = 3,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Review => "review",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Confirm => "confirm",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::Review => "Your Cart",
            CheckoutStep::Payment => "Payment Information",
            CheckoutStep::Confirm => "Review Your Order",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        *self as u8
    }

    /// Step for a number, if in range.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(CheckoutStep::Review),
            2 => Some(CheckoutStep::Payment),
            3 => Some(CheckoutStep::Confirm),
            _ => None,
        }
    }

    /// The following step, clamped at Confirm.
    pub fn next(&self) -> Self {
        Self::from_number(self.number() + 1).unwrap_or(CheckoutStep::Confirm)
    }

    /// The preceding step, clamped at Review.
    pub fn previous(&self) -> Self {
        Self::from_number(self.number().saturating_sub(1)).unwrap_or(CheckoutStep::Review)
    }

    /// Label of the primary button on this step.
    pub fn proceed_label(&self) -> &'static str {
        match self {
            CheckoutStep::Review => "Proceed to Payment",
            CheckoutStep::Payment => "Review Order",
            CheckoutStep::Confirm => "Complete Purchase",
        }
    }

    /// Label of the back link, if the step has one.
    pub fn back_label(&self) -> Option<&'static str> {
        match self {
            CheckoutStep::Review => None,
            CheckoutStep::Payment => Some("Back to Cart"),
            CheckoutStep::Confirm => Some("Back to Payment"),
        }
    }
}

/// Checkout flow state.
///
/// Progress is one step at a time through [`advance`](Self::advance); going
/// back can be one step or a jump to any earlier step.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutFlow {
    /// Current step.
    step: CheckoutStep,
}

impl CheckoutFlow {
    /// Create a new checkout flow at Review.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step.
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Move to the next step. No-op when the cart is empty or already at Confirm.
    pub fn advance(&mut self, cart_is_empty: bool) -> CheckoutStep {
        if cart_is_empty {
            debug!(step = self.step.as_str(), "cart is empty, not advancing");
            return self.step;
        }
        self.transition(self.step.next())
    }

    /// Move to the previous step, clamped at Review.
    pub fn retreat(&mut self) -> CheckoutStep {
        self.transition(self.step.previous())
    }

    /// Jump back to an earlier step. Forward jumps are ignored.
    pub fn go_to(&mut self, step: CheckoutStep) -> CheckoutStep {
        if step > self.step {
            debug!(from = self.step.as_str(), to = step.as_str(), "ignoring forward jump");
            return self.step;
        }
        self.transition(step)
    }

    /// Check if the flow reached confirmation.
    pub fn is_confirming(&self) -> bool {
        self.step == CheckoutStep::Confirm
    }

    /// Get progress percentage.
    pub fn progress_percent(&self) -> u8 {
        ((self.step.number() as f64 / 3.0) * 100.0).round() as u8
    }

    fn transition(&mut self, to: CheckoutStep) -> CheckoutStep {
        if to != self.step {
            info!(from = self.step.as_str(), to = to.as_str(), "checkout step changed");
            self.step = to;
        }
        self.step
    }
}
