//! Cart session.
//!
//! A session owns one cart and one checkout flow for a single shopper. It is
//! also where time enters the picture: an invalid promotion code is cleared by
//! a delayed task, and the session keeps the handle so a newer submission, or
//! dropping the session, cancels it.
//!
//! Scheduling needs a Tokio runtime. Without one the invalid promotion simply
//! stays until the next submission.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cart::{
    Cart, CartPricing, LicenseTier, LineItem, Promotion, PromotionConfig, PromotionExpiry,
    PromotionOutcome,
};
use crate::catalog::CatalogLookup;
use crate::checkout::{CheckoutFlow, CheckoutStep, OrderRequest};
use crate::error::CommerceError;
use crate::forms::BillingDetails;
use crate::ids::{ProductId, SessionId};
use crate::money::{Currency, Money};

#[derive(Debug)]
struct SessionState {
    cart: Cart,
    checkout: CheckoutFlow,
    /// At most one pending promotion expiry.
    expiry: Option<JoinHandle<()>>,
}

impl SessionState {
    fn cancel_expiry(&mut self) {
        if let Some(handle) = self.expiry.take() {
            handle.abort();
            debug!("cancelled pending promotion expiry");
        }
    }
}

/// One shopper's cart and checkout progress.
#[derive(Debug)]
pub struct CartSession {
    id: SessionId,
    state: Arc<Mutex<SessionState>>,
}

impl CartSession {
    /// Create a USD session with the given promotions.
    pub fn new(promotions: PromotionConfig) -> Self {
        Self::with_currency(Currency::USD, promotions)
    }

    /// Create a session priced in `currency`.
    pub fn with_currency(currency: Currency, promotions: PromotionConfig) -> Self {
        let id = SessionId::generate();
        debug!(session = %id, currency = %currency, "cart session started");
        Self {
            id,
            state: Arc::new(Mutex::new(SessionState {
                cart: Cart::with_promotions(currency, promotions),
                checkout: CheckoutFlow::new(),
                expiry: None,
            })),
        }
    }

    /// Session identifier.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Snapshot of the cart.
    pub fn cart(&self) -> Cart {
        self.state.lock().cart.clone()
    }

    pub fn add_item(&self, item: LineItem) -> Result<(), CommerceError> {
        self.state.lock().cart.add_item(item)
    }

    pub fn add_product<C>(
        &self,
        catalog: &C,
        product_id: &ProductId,
        license: LicenseTier,
    ) -> Result<(), CommerceError>
    where
        C: CatalogLookup + ?Sized,
    {
        self.state
            .lock()
            .cart
            .add_product(catalog, product_id, license)
    }

    pub fn remove_item(&self, id: &ProductId) -> bool {
        self.state.lock().cart.remove_item(id)
    }

    pub fn update_quantity(&self, id: &ProductId, delta: i64) -> Option<i64> {
        self.state.lock().cart.update_quantity(id, delta)
    }

    pub fn set_license_tier(&self, id: &ProductId, license: LicenseTier) -> bool {
        self.state.lock().cart.set_license_tier(id, license)
    }

    /// Submit a promotion code.
    ///
    /// Any accepted submission cancels the pending expiry; an invalid code
    /// schedules a fresh one.
    pub fn apply_promotion(&self, code_text: &str) -> PromotionOutcome {
        let mut state = self.state.lock();
        let outcome = state.cart.apply_promotion(code_text);

        match &outcome {
            PromotionOutcome::Applied(_) => state.cancel_expiry(),
            PromotionOutcome::Invalid { expiry, .. } => {
                state.cancel_expiry();
                self.schedule_expiry(&mut state, *expiry);
            }
            PromotionOutcome::AlreadyActive | PromotionOutcome::EmptyCode => {}
        }

        outcome
    }

    fn schedule_expiry(&self, state: &mut SessionState, expiry: PromotionExpiry) {
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                warn!(session = %self.id, "no async runtime, invalid promotion will not expire");
                return;
            }
        };

        let weak: Weak<Mutex<SessionState>> = Arc::downgrade(&self.state);
        let session = self.id.clone();
        state.expiry = Some(runtime.spawn(async move {
            tokio::time::sleep(expiry.delay).await;

            let Some(state) = weak.upgrade() else {
                return;
            };
            let mut state = state.lock();
            if state.cart.expire_promotion(expiry.generation) {
                state.expiry = None;
                info!(session = %session, "invalid promotion cleared");
            }
        }));
        debug!(
            session = %self.id,
            generation = expiry.generation,
            delay_ms = expiry.delay.as_millis() as u64,
            "scheduled promotion expiry"
        );
    }

    /// Whether an expiry task is waiting to fire.
    pub fn has_pending_expiry(&self) -> bool {
        self.state
            .lock()
            .expiry
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// The active promotion, if any.
    pub fn promotion(&self) -> Option<Promotion> {
        self.state.lock().cart.promotion().cloned()
    }

    /// Pricing snapshot.
    pub fn pricing(&self) -> CartPricing {
        self.state.lock().cart.pricing()
    }

    pub fn subtotal(&self) -> Money {
        self.state.lock().cart.subtotal()
    }

    pub fn discount(&self) -> Money {
        self.state.lock().cart.discount()
    }

    pub fn total(&self) -> Money {
        self.state.lock().cart.total()
    }

    /// Current checkout step.
    pub fn step(&self) -> CheckoutStep {
        self.state.lock().checkout.step()
    }

    /// Proceed to the next step. No-op while the cart is empty.
    pub fn advance(&self) -> CheckoutStep {
        let mut state = self.state.lock();
        let empty = state.cart.is_empty();
        state.checkout.advance(empty)
    }

    /// Go back one step.
    pub fn retreat(&self) -> CheckoutStep {
        self.state.lock().checkout.retreat()
    }

    /// Jump back to an earlier step.
    pub fn go_to(&self, step: CheckoutStep) -> CheckoutStep {
        self.state.lock().checkout.go_to(step)
    }

    /// Build the order request for the processor. Only available at Confirm.
    pub fn order_request(&self, billing: BillingDetails) -> Result<OrderRequest, CommerceError> {
        let state = self.state.lock();
        if !state.checkout.is_confirming() {
            return Err(CommerceError::CheckoutIncomplete(format!(
                "confirmation (at {} step)",
                state.checkout.step().as_str()
            )));
        }

        let order = OrderRequest::from_cart(self.id.clone(), &state.cart, billing)?;
        info!(
            session = %self.id,
            order = %order.id,
            total = %order.amount_due(),
            "order request ready"
        );
        Ok(order)
    }
}

impl Drop for CartSession {
    fn drop(&mut self) {
        self.state.lock().cancel_expiry();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use std::time::Duration;

    fn session_with_items() -> CartSession {
        let catalog = StaticCatalog::storefront();
        let session = CartSession::new(PromotionConfig::default());
        session
            .add_product(&catalog, &ProductId::new("modern-ui-kit-pro"), LicenseTier::Standard)
            .unwrap();
        session
            .add_product(
                &catalog,
                &ProductId::new("photography-master-presets"),
                LicenseTier::Extended,
            )
            .unwrap();
        session
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_code_expires() {
        let session = session_with_items();
        let outcome = session.apply_promotion("BADCODE");
        assert!(matches!(outcome, PromotionOutcome::Invalid { .. }));
        assert!(session.has_pending_expiry());

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert!(session.promotion().is_some());

        tokio::time::sleep(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        assert!(session.promotion().is_none());
        assert!(!session.has_pending_expiry());
        assert_eq!(session.discount().amount_cents, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_submission_restarts_expiry() {
        let session = session_with_items();
        session.apply_promotion("BAD1");

        tokio::time::sleep(Duration::from_millis(2000)).await;
        session.apply_promotion("BAD2");

        // The first timer would have fired here.
        tokio::time::sleep(Duration::from_millis(1500)).await;
        tokio::task::yield_now().await;
        assert_eq!(session.promotion().unwrap().code, "BAD2");

        tokio::time::sleep(Duration::from_millis(1600)).await;
        tokio::task::yield_now().await;
        assert!(session.promotion().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_valid_code_cancels_expiry() {
        let session = session_with_items();
        session.apply_promotion("BADCODE");
        assert!(session.apply_promotion("welcome20").is_applied());
        assert!(!session.has_pending_expiry());

        tokio::time::sleep(Duration::from_millis(5000)).await;
        tokio::task::yield_now().await;
        assert!(session.promotion().unwrap().is_valid);
        assert_eq!(session.total().amount_cents, 16120);
    }

    #[test]
    fn test_without_runtime_promotion_stays() {
        let session = session_with_items();
        session.apply_promotion("BADCODE");
        assert!(!session.has_pending_expiry());
        assert!(!session.promotion().unwrap().is_valid);
    }

    #[test]
    fn test_checkout_steps() {
        let session = CartSession::new(PromotionConfig::default());
        assert_eq!(session.advance(), CheckoutStep::Review);

        let session = session_with_items();
        assert_eq!(session.advance(), CheckoutStep::Payment);
        assert_eq!(session.advance(), CheckoutStep::Confirm);
        assert_eq!(session.go_to(CheckoutStep::Review), CheckoutStep::Review);
        assert_eq!(session.retreat(), CheckoutStep::Review);
    }

    #[test]
    fn test_order_request_requires_confirm() {
        let session = session_with_items();
        let result = session.order_request(BillingDetails::default());
        assert!(matches!(result, Err(CommerceError::CheckoutIncomplete(_))));
    }
}
