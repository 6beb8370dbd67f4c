pub mod calculations;
pub mod models;
pub mod schedules;

pub use calculations::InvalidInput;
pub use models::*;
