//! Service order management
//!
//! - **lifecycle**: the pure approval state machine over the shared status
//!   table
//! - **manager**: the transactional in-memory store of submitted requests
//! - **money**: decimal-precision monetary helpers
//!
//! # Mutation Flow
//!
//! ```text
//! user action (accept / price edit / decline)
//!     ├─ 1. Take the write lock (one atomic transaction)
//!     ├─ 2. Validate (existence, service type, transition legality)
//!     ├─ 3. Reconcile pricing where a price is involved
//!     ├─ 4. Apply and release
//!     └─ 5. Notify collaborators (billing auto-advance, slot release)
//! ```

pub mod lifecycle;
pub mod manager;
pub mod money;

pub use lifecycle::{is_legal_transition, next_status, next_status_raw};
pub use manager::{OrderError, ServiceOrderManager};
