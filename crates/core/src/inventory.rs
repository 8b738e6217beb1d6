//! In-memory car inventory.

use std::collections::HashMap;

use crate::{
    error::InventoryError,
    models::{Car, CarId},
};

/// Owns every car in the fleet, keyed by id and kept in catalog order.
#[derive(Debug, Default)]
pub struct CarInventory {
    cars: Vec<Car>,
    index: HashMap<CarId, usize>,
}

impl CarInventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a car, rejecting ids that are already present.
    pub fn add(&mut self, car: Car) -> Result<(), InventoryError> {
        let id = car.id();
        if self.index.contains_key(&id) {
            return Err(InventoryError::DuplicateCar(id));
        }
        self.index.insert(id, self.cars.len());
        self.cars.push(car);
        Ok(())
    }

    /// Mark the car as rented and return it.
    ///
    /// Returns `None` when the id is unknown or the car is already taken.
    pub fn claim(&mut self, car_id: CarId) -> Option<Car> {
        let slot = *self.index.get(&car_id)?;
        let car = self.cars.get_mut(slot)?;
        if !car.is_available() {
            return None;
        }
        car.mark_rented();
        Some(car.clone())
    }

    /// Look up a car without changing it.
    pub fn get(&self, car_id: CarId) -> Option<&Car> {
        self.index.get(&car_id).and_then(|slot| self.cars.get(*slot))
    }

    /// Snapshot of the cars that can still be claimed, in catalog order.
    pub fn list_available(&self) -> Vec<Car> {
        self.cars
            .iter()
            .filter(|car| car.is_available())
            .cloned()
            .collect()
    }

    /// Total number of cars, rented or not.
    pub fn len(&self) -> usize {
        self.cars.len()
    }

    /// Whether the inventory holds no cars.
    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }

    /// Number of cars that have been claimed.
    pub fn claimed_count(&self) -> usize {
        self.cars.iter().filter(|car| !car.is_available()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inventory() -> CarInventory {
        let mut inventory = CarInventory::new();
        inventory
            .add(Car::new(3, "Honda", "Civic", 2019, "Sedan", true))
            .expect("add");
        inventory
            .add(Car::new(1, "Ford", "Ranger", 2021, "Truck", false))
            .expect("add");
        inventory
            .add(Car::new(2, "Kia", "Soul", 2018, "Hatchback", true))
            .expect("add");
        inventory
    }

    #[test]
    fn claim_is_one_shot() {
        let mut inventory = inventory();
        let car = inventory.claim(3).expect("first claim");
        assert_eq!(car.id(), 3);
        assert!(!car.is_available());
        assert!(!inventory.get(3).expect("car").is_available());
        assert!(inventory.claim(3).is_none());
        assert_eq!(inventory.claimed_count(), 2);
    }

    #[test]
    fn claim_rejects_unknown_and_unavailable() {
        let mut inventory = inventory();
        assert!(inventory.claim(99).is_none());
        assert!(inventory.claim(1).is_none());
        assert_eq!(inventory.claimed_count(), 1);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut inventory = inventory();
        let err = inventory
            .add(Car::new(2, "Other", "Car", 2000, "Van", true))
            .unwrap_err();
        assert_eq!(err, InventoryError::DuplicateCar(2));
        assert_eq!(inventory.len(), 3);
        assert_eq!(inventory.get(2).expect("car").make, "Kia");
    }

    #[test]
    fn available_cars_keep_catalog_order() {
        let mut inventory = inventory();
        let ids: Vec<_> = inventory.list_available().iter().map(Car::id).collect();
        assert_eq!(ids, vec![3, 2]);

        inventory.claim(3);
        let ids: Vec<_> = inventory.list_available().iter().map(Car::id).collect();
        assert_eq!(ids, vec![2]);
    }
}
