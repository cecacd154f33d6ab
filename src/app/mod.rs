pub mod dispatch;
pub mod listing;
pub mod status;

pub use dispatch::dispatch;
