pub mod schema;

pub use schema::{
    AirtableConfig, CategoriesConfig, Config, DefaultsConfig, OutputConfig, RecordFilterConfig,
    ReliabilityConfig, StoreConfig,
};
