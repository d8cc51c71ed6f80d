//! Port definitions (hexagonal architecture interfaces)
//!
//! This module defines the port traits that form the boundaries of the
//! hexagonal architecture. Ports are interfaces that the domain core
//! depends on, but whose implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`IRelatedUserApi`] - Remote CRUD operations for related users
//! - [`ISessionStore`] - Persisted credential pair
//! - [`ISessionRefresher`] - Token refresh call
//! - [`IMessenger`] - Transient user-visible notifications
//! - [`INavigator`] - Application navigation

pub mod notification;
pub mod related_user_api;
pub mod session;

pub use notification::{IMessenger, INavigator, Message, DEFAULT_MESSAGE_DURATION};
pub use related_user_api::IRelatedUserApi;
pub use session::{ISessionRefresher, ISessionStore};
