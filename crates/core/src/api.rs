//! Call surface consumed by a presentation layer.
//!
//! Every call takes plain string inputs and answers with JSON-friendly
//! values, so a UI bridge can forward them without knowing the domain types.

use serde::{Deserialize, Serialize};

use crate::{
    error::RentalError,
    models::{CarSummary, RentalSummary},
    service::RentalService,
};

/// Structured reply to a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Whether the command succeeded.
    pub success: bool,
    /// Human-readable outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Display name of the account, on successful login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ApiResponse {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            name: None,
        }
    }

    fn failed(err: &RentalError) -> Self {
        Self {
            success: false,
            message: Some(err.to_string()),
            name: None,
        }
    }
}

/// Thin adapter turning [`RentalService`] results into [`ApiResponse`]s.
pub struct RentalApi {
    service: RentalService,
}

impl RentalApi {
    /// Wrap a service.
    pub fn new(service: RentalService) -> Self {
        Self { service }
    }

    /// Borrow the underlying service.
    pub fn service(&self) -> &RentalService {
        &self.service
    }

    /// Register a new account.
    pub fn register(&self, name: &str, password: &str, email: &str) -> ApiResponse {
        match self.service.register(name, password, email) {
            Ok(()) => ApiResponse::ok(format!("User {name} registered successfully.")),
            Err(err) => ApiResponse::failed(&err),
        }
    }

    /// Log in, returning the display name on success.
    pub fn login(&self, email: &str, password: &str) -> ApiResponse {
        match self.service.login(email, password) {
            Ok(name) => ApiResponse {
                success: true,
                message: None,
                name: Some(name),
            },
            Err(err) => ApiResponse::failed(&err),
        }
    }

    /// Cars that can be rented right now.
    pub fn get_available_cars(&self) -> Vec<CarSummary> {
        self.service.available_cars()
    }

    /// Rent a car for a number of days starting today.
    pub fn rent_car(&self, car_id: &str, email: &str, duration_days: &str) -> ApiResponse {
        match self.service.rent_car(car_id, email, duration_days) {
            Ok(message) => ApiResponse::ok(message),
            Err(err) => ApiResponse::failed(&err),
        }
    }

    /// Rental history for an account.
    pub fn get_rentals(&self, email: &str) -> Vec<RentalSummary> {
        self.service.rentals_for(email)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use serde_json::json;
    use tempfile::tempdir;

    use super::*;
    use crate::{accounts::JsonAccountStore, catalog, inventory::CarInventory};

    fn api(dir: &tempfile::TempDir) -> RentalApi {
        let mut inventory = CarInventory::new();
        catalog::parse_catalog("7,Toyota,Corolla,2020,Sedan,true\n", &mut inventory);
        RentalApi::new(RentalService::new(
            inventory,
            JsonAccountStore::new(dir.path().join("users.json")),
        ))
    }

    #[test]
    fn responses_carry_user_facing_messages() -> Result<()> {
        let dir = tempdir()?;
        let api = api(&dir);

        let registered = api.register("Ann", "pw", "a@b.com");
        assert_eq!(
            serde_json::to_value(&registered)?,
            json!({"success": true, "message": "User Ann registered successfully."})
        );
        assert_eq!(
            api.register("Ann", "pw", "A@B.COM").message.as_deref(),
            Some("User already exists. Please login.")
        );

        assert_eq!(
            serde_json::to_value(api.login("a@b.com", "pw"))?,
            json!({"success": true, "name": "Ann"})
        );
        assert_eq!(
            api.login("a@b.com", "bad").message.as_deref(),
            Some("Incorrect password.")
        );
        assert_eq!(
            api.login("x@b.com", "pw").message.as_deref(),
            Some("User not found. Please register.")
        );

        assert_eq!(
            api.rent_car("7", "x@b.com", "3").message.as_deref(),
            Some("User not found.")
        );
        assert_eq!(
            api.rent_car("7", "a@b.com", "three").message.as_deref(),
            Some("Invalid input.")
        );
        let rented = api.rent_car("7", "a@b.com", "3");
        assert!(rented.success);
        assert_eq!(
            rented.message.as_deref(),
            Some("You successfully rented Toyota Corolla for 3 days.")
        );
        let again = api.rent_car("7", "a@b.com", "3");
        assert!(!again.success);
        assert_eq!(again.message.as_deref(), Some("Car not available."));
        Ok(())
    }

    #[test]
    fn queries_serialize_to_display_shapes() -> Result<()> {
        let dir = tempdir()?;
        let api = api(&dir);

        assert_eq!(
            serde_json::to_value(api.get_available_cars())?,
            json!([{"id": 7, "make": "Toyota", "model": "Corolla", "year": 2020, "type": "Sedan"}])
        );
        assert!(api.get_rentals("nobody@b.com").is_empty());

        api.register("Ann", "pw", "a@b.com");
        api.rent_car("7", "a@b.com", "1");
        let rentals = serde_json::to_value(api.get_rentals("a@b.com"))?;
        assert_eq!(rentals[0]["car"], json!("Toyota Corolla"));
        assert_eq!(rentals[0]["duration"], json!(1));
        assert!(api.get_available_cars().is_empty());
        assert_eq!(api.service().rented_count(), 1);
        Ok(())
    }
}
