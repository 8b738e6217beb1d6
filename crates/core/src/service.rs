//! Rental orchestration over the inventory and account registry.

use chrono::{Local, NaiveDate};
use parking_lot::RwLock;
use tracing::{error, info, warn};

use crate::{
    accounts::{self, AccountRegistry, AccountStore, JsonAccountStore, RegistryReport},
    catalog,
    config::AppConfig,
    error::RentalError,
    inventory::CarInventory,
    models::{CarId, CarSummary, Rental, RentalSummary},
};

struct State {
    inventory: CarInventory,
    accounts: AccountRegistry,
}

/// Owns the fleet and the account registry for the lifetime of the process.
///
/// All operations take `&self`; state sits behind a single lock so each
/// request runs as one uninterrupted step.
pub struct RentalService {
    state: RwLock<State>,
    store: Box<dyn AccountStore + Send + Sync>,
}

impl RentalService {
    /// Build a service over `inventory`, restoring accounts from `store`.
    ///
    /// An unreadable store is logged and treated as empty.
    pub fn new(inventory: CarInventory, store: impl AccountStore + Send + Sync + 'static) -> Self {
        let accounts = match store.load() {
            Ok(snapshot) => {
                let (accounts, report) = AccountRegistry::restore(snapshot);
                log_registry_report(report);
                accounts
            }
            Err(err) => {
                warn!("starting with no accounts: {err:#}");
                AccountRegistry::new()
            }
        };

        Self {
            state: RwLock::new(State {
                inventory,
                accounts,
            }),
            store: Box::new(store),
        }
    }

    /// Build a service from configuration, loading the catalog and account store.
    ///
    /// A missing catalog is logged and yields an empty fleet.
    pub fn from_config(config: &AppConfig) -> Self {
        let mut inventory = CarInventory::new();
        if let Err(err) = catalog::load_catalog(&config.catalog_path, &mut inventory) {
            warn!("starting with an empty fleet: {err:#}");
        }
        Self::new(inventory, JsonAccountStore::new(config.accounts_path()))
    }

    /// Create an account and flush the registry to the store.
    ///
    /// A failed flush is logged; the account still exists for this session.
    pub fn register(&self, name: &str, password: &str, email: &str) -> Result<(), RentalError> {
        let mut state = self.state.write();
        let user_id = state.accounts.register(name, password, email)?.user_id();
        info!("registered account {user_id} for {}", accounts::normalize_email(email));

        if let Err(err) = self.store.save(&state.accounts.snapshot()) {
            error!("failed to persist accounts: {err:#}");
        }
        Ok(())
    }

    /// Verify credentials and return the account's display name.
    pub fn login(&self, email: &str, password: &str) -> Result<String, RentalError> {
        let state = self.state.read();
        let user = state.accounts.login(email, password)?;
        Ok(user.name().to_string())
    }

    /// Cars that can currently be rented, in catalog order.
    pub fn available_cars(&self) -> Vec<CarSummary> {
        self.state
            .read()
            .inventory
            .list_available()
            .iter()
            .map(CarSummary::from)
            .collect()
    }

    /// Rent a car starting today and return a confirmation message.
    pub fn rent_car(
        &self,
        car_id: &str,
        email: &str,
        duration_days: &str,
    ) -> Result<String, RentalError> {
        self.rent_car_on(car_id, email, duration_days, Local::now().date_naive())
    }

    /// Rent a car starting on `start_date`.
    ///
    /// Checks run in order: account, then input, then availability. Claiming
    /// the car is the last step that can fail, so a rejected request never
    /// leaves a car marked as rented.
    pub fn rent_car_on(
        &self,
        car_id: &str,
        email: &str,
        duration_days: &str,
        start_date: NaiveDate,
    ) -> Result<String, RentalError> {
        let mut state = self.state.write();
        let State {
            inventory,
            accounts,
        } = &mut *state;

        let user = accounts.get_mut(email).ok_or(RentalError::UserNotFound)?;
        let car_id = parse_car_id(car_id)?;
        let duration: u32 = duration_days
            .trim()
            .parse()
            .map_err(|_| RentalError::InvalidInput)?;
        if duration == 0 {
            return Err(RentalError::InvalidInput);
        }
        // An integer too large for any catalog id names a car that cannot exist.
        let car_id = car_id.ok_or(RentalError::CarUnavailable)?;
        let rental =
            Rental::new(car_id, duration, start_date).ok_or(RentalError::InvalidInput)?;

        let car = inventory.claim(car_id).ok_or(RentalError::CarUnavailable)?;
        user.add_rental(rental);
        Ok(format!(
            "You successfully rented {} {} for {duration} days.",
            car.make, car.model
        ))
    }

    /// Rentals made by `email` this session; empty for unknown accounts.
    pub fn rentals_for(&self, email: &str) -> Vec<RentalSummary> {
        let state = self.state.read();
        let Some(user) = state.accounts.get(email) else {
            return Vec::new();
        };
        user.rentals()
            .iter()
            .map(|rental| {
                let car = state
                    .inventory
                    .get(rental.car_id())
                    .map(|car| car.display_name())
                    .unwrap_or_else(|| format!("Car #{}", rental.car_id()));
                RentalSummary::new(rental, car)
            })
            .collect()
    }

    /// Number of registered accounts.
    pub fn account_count(&self) -> usize {
        self.state.read().accounts.len()
    }

    /// Number of cars that have been rented out.
    pub fn rented_count(&self) -> usize {
        self.state.read().inventory.claimed_count()
    }
}

/// Parse a requested car id. Any integer is valid input; `None` means it is
/// outside the range a catalog id can take.
fn parse_car_id(raw: &str) -> Result<Option<CarId>, RentalError> {
    let raw = raw.trim();
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(RentalError::InvalidInput);
    }
    Ok(raw.parse().ok())
}

fn log_registry_report(report: RegistryReport) {
    if report.skipped > 0 {
        warn!(
            "restored {} accounts, skipped {} stored rows",
            report.loaded, report.skipped
        );
    } else {
        info!("restored {} accounts", report.loaded);
    }
}
