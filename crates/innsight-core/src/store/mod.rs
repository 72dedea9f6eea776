// ── Fixture-backed storage ──
//
// Order-preserving record collections seeded from JSON fixtures.

mod collection;
mod data_store;
pub mod fixtures;

pub use collection::Record;
pub use data_store::FixtureStore;
pub use fixtures::FixtureSet;
