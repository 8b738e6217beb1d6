//! Shared domain models.

use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Identifier assigned to a car by the catalog. Any integer is accepted.
pub type CarId = i64;

/// A single vehicle in the rental fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    id: CarId,
    /// Manufacturer (e.g. `Toyota`).
    pub make: String,
    /// Model name (e.g. `Corolla`).
    pub model: String,
    /// Model year.
    pub year: i32,
    /// Category such as `Sedan` or `SUV`.
    pub car_type: String,
    is_available: bool,
}

impl Car {
    /// Build a car with the given catalog attributes.
    pub fn new(
        id: CarId,
        make: impl Into<String>,
        model: impl Into<String>,
        year: i32,
        car_type: impl Into<String>,
        is_available: bool,
    ) -> Self {
        Self {
            id,
            make: make.into(),
            model: model.into(),
            year,
            car_type: car_type.into(),
            is_available,
        }
    }

    /// Catalog identifier; fixed for the lifetime of the car.
    pub fn id(&self) -> CarId {
        self.id
    }

    /// Whether the car can currently be claimed.
    pub fn is_available(&self) -> bool {
        self.is_available
    }

    /// Returns `"{make} {model}"`.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.make, self.model)
    }

    pub(crate) fn mark_rented(&mut self) {
        self.is_available = false;
    }
}

impl fmt::Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({}) #{}",
            self.year, self.make, self.model, self.car_type, self.id
        )
    }
}

/// Projection of an available car handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarSummary {
    /// Catalog identifier.
    pub id: CarId,
    /// Manufacturer.
    pub make: String,
    /// Model name.
    pub model: String,
    /// Model year.
    pub year: i32,
    /// Category.
    #[serde(rename = "type")]
    pub car_type: String,
}

impl From<&Car> for CarSummary {
    fn from(car: &Car) -> Self {
        Self {
            id: car.id,
            make: car.make.clone(),
            model: car.model.clone(),
            year: car.year,
            car_type: car.car_type.clone(),
        }
    }
}

/// A car assigned to a user for a fixed number of days.
///
/// The rental refers to its car by id only; the inventory stays the owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rental {
    car_id: CarId,
    duration_days: u32,
    start_date: NaiveDate,
    return_date: NaiveDate,
}

impl Rental {
    /// Create a rental starting on `start_date`.
    ///
    /// Returns `None` when the return date would fall outside the calendar
    /// range supported by `chrono`.
    pub fn new(car_id: CarId, duration_days: u32, start_date: NaiveDate) -> Option<Self> {
        let return_date = start_date.checked_add_days(Days::new(u64::from(duration_days)))?;
        Some(Self {
            car_id,
            duration_days,
            start_date,
            return_date,
        })
    }

    /// Identifier of the rented car.
    pub fn car_id(&self) -> CarId {
        self.car_id
    }

    /// Rental length in whole days.
    pub fn duration_days(&self) -> u32 {
        self.duration_days
    }

    /// First day of the rental.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Day the car is due back.
    pub fn return_date(&self) -> NaiveDate {
        self.return_date
    }
}

impl fmt::Display for Rental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "car #{} for {} days ({} to {})",
            self.car_id, self.duration_days, self.start_date, self.return_date
        )
    }
}

/// Projection of a rental handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalSummary {
    /// `"{make} {model}"` of the rented car.
    pub car: String,
    /// Rental length in days.
    pub duration: u32,
    /// Start date as `YYYY-MM-DD`.
    pub from: String,
    /// Return date as `YYYY-MM-DD`.
    pub to: String,
}

impl RentalSummary {
    /// Project `rental` using the resolved car label.
    pub fn new(rental: &Rental, car: String) -> Self {
        Self {
            car,
            duration: rental.duration_days,
            from: rental.start_date.format("%Y-%m-%d").to_string(),
            to: rental.return_date.format("%Y-%m-%d").to_string(),
        }
    }
}
