//! Registered customer accounts.

use std::fmt;

use tracing::info;

use crate::models::Rental;

/// Sequential account number handed out at registration.
pub type UserId = u32;

/// A registered customer and the rentals made during this session.
#[derive(Debug, Clone)]
pub struct User {
    user_id: UserId,
    name: String,
    email: String,
    password: String,
    rentals: Vec<Rental>,
}

impl User {
    /// Create an account with no rentals. `email` is stored as given.
    pub fn new(
        user_id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            name: name.into(),
            email: email.into(),
            password: password.into(),
            rentals: Vec::new(),
        }
    }

    /// Account number.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalised email address; the registry key.
    pub fn email(&self) -> &str {
        &self.email
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    /// Plain equality against the stored password.
    pub fn verify_password(&self, candidate: &str) -> bool {
        self.password == candidate
    }

    /// Append a rental to the history.
    pub fn add_rental(&mut self, rental: Rental) {
        info!("rental of car {} added for {}", rental.car_id(), self.email);
        self.rentals.push(rental);
    }

    /// Rentals in the order they were made.
    pub fn rentals(&self) -> &[Rental] {
        &self.rentals
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User: {} (Email: {})", self.name, self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn rentals_are_appended_in_order() {
        let mut user = User::new(1, "Ada", "ada@example.com", "secret");
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).expect("date");
        user.add_rental(Rental::new(4, 2, start).expect("rental"));
        user.add_rental(Rental::new(9, 1, start).expect("rental"));

        let ids: Vec<_> = user.rentals().iter().map(Rental::car_id).collect();
        assert_eq!(ids, vec![4, 9]);
        assert!(user.verify_password("secret"));
        assert!(!user.verify_password("Secret"));
        assert_eq!(user.to_string(), "User: Ada (Email: ada@example.com)");
    }
}
