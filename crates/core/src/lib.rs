#![warn(clippy::all, missing_docs)]

//! Core domain logic for the car rental service.
//!
//! This crate hosts the fleet and account models, catalog loading,
//! account persistence, and the rental service consumed by whatever
//! frontend drives it.

pub mod accounts;
pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod inventory;
pub mod models;
pub mod service;

pub use accounts::{AccountRegistry, AccountStore, JsonAccountStore, User};
pub use api::{ApiResponse, RentalApi};
pub use config::AppConfig;
pub use error::{InventoryError, RentalError};
pub use inventory::CarInventory;
pub use models::{Car, CarSummary, Rental, RentalSummary};
pub use service::RentalService;
