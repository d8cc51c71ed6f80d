//! Relform Core - Domain logic for the related-user form controller
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain types** - `Credentials`, `RelatedUser`, `PermissionGroupSelection`, `RemoteError`
//! - **Use cases** - `SessionRetryGuard`, `SequentialInitializer`, `RelatedUserForm`
//! - **Port definitions** - Traits for adapters: `IRelatedUserApi`, `ISessionStore`,
//!   `ISessionRefresher`, `IMessenger`, `INavigator`
//! - **Configuration** - YAML-backed `Config` with validation
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure types with no I/O. Ports define trait
//! interfaces that adapter crates implement. Use cases orchestrate domain
//! types through port interfaces.

pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;
