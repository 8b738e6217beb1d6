//! Error types surfaced by the rental domain.
//!
//! None of these are faults: each variant is an expected outcome that the
//! presentation layer reports back to the user. The `Display` text is the
//! message shown to them.

use thiserror::Error;

use crate::models::CarId;

/// Failures when populating the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// A car with the same id has already been added.
    #[error("car {0} is already in the inventory")]
    DuplicateCar(CarId),
}

/// Outcomes of account and rental operations that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RentalError {
    /// Registration with an email that already has an account.
    #[error("User already exists. Please login.")]
    AlreadyExists,
    /// Login with an email that has no account.
    #[error("User not found. Please register.")]
    NotFound,
    /// Rent request for an email that has no account.
    #[error("User not found.")]
    UserNotFound,
    /// Password did not match the stored credential.
    #[error("Incorrect password.")]
    InvalidCredentials,
    /// Car id or duration was not a usable integer.
    #[error("Invalid input.")]
    InvalidInput,
    /// The car is unknown or already rented.
    #[error("Car not available.")]
    CarUnavailable,
    /// Every account number has been handed out.
    #[error("No more accounts can be registered.")]
    RegistryFull,
}
