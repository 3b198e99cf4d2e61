use std::sync::Arc;

use crate::billing::BillingService;
use crate::cart::CartService;
use crate::core::Config;
use crate::orders::ServiceOrderManager;
use crate::scheduling::SlotAllocator;

/// Server state - shared handles to every service
///
/// Cloning is shallow (Arc), so handlers receive cheap copies.
///
/// | Field | Role |
/// |-------|------|
/// | config | Immutable configuration |
/// | orders | Submitted requests and their approval lifecycle |
/// | slots | Atomic appointment booking |
/// | cart | Pre-submission entries |
/// | billing | Derived payment records and the change feed |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub orders: Arc<ServiceOrderManager>,
    pub slots: Arc<SlotAllocator>,
    pub cart: Arc<CartService>,
    pub billing: Arc<BillingService>,
}

impl ServerState {
    /// Build the service graph for a configuration
    pub fn initialize(config: &Config) -> Self {
        Self {
            config: config.clone(),
            orders: Arc::new(ServiceOrderManager::new()),
            slots: Arc::new(SlotAllocator::new()),
            cart: Arc::new(CartService::new()),
            billing: Arc::new(BillingService::new()),
        }
    }
}
