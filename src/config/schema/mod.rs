mod airtable;
mod base;
mod categories;
mod defaults;
mod store;

pub use airtable::{AirtableConfig, RecordFilterConfig};
pub use base::Config;
pub use categories::CategoriesConfig;
pub use defaults::DefaultsConfig;
pub use store::{OutputConfig, ReliabilityConfig, StoreConfig};
