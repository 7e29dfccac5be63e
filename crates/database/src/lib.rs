//! Persistence layer: SeaORM entities for the hotel catalog, the booking
//! ledger and the user store, plus the services that operate on them.

pub mod db;
pub mod entities;
pub mod errors;
pub mod services;

#[cfg(test)]
pub mod test_utils;
