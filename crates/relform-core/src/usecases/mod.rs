//! Use cases (interactors)
//!
//! This module contains the application use cases that orchestrate
//! domain entities and port interfaces. Use cases are thin coordinators
//! that delegate business rules to domain methods and I/O to ports.
//!
//! ## Use Cases
//!
//! - [`SessionRetryGuard`] - Expired-session detection, refresh and single retry
//! - [`SequentialInitializer`] - Ordered async setup with readiness tracking
//! - [`RelatedUserForm`] - Create/edit form controller for related users
//! - [`ErrorMessages`] - Raw API message to user-visible text mapping

pub mod initializer;
pub mod messages;
pub mod related_user_form;
pub mod session_retry;

#[cfg(test)]
pub(crate) mod test_support;

pub use initializer::{init_step, InitError, InitStep, LoadState, SequentialInitializer};
pub use messages::ErrorMessages;
pub use related_user_form::{FormError, FormMode, FormSettings, RelatedUserForm};
pub use session_retry::{GuardError, SessionRetryGuard};
