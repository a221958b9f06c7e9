//! Scenario catalogue vocabulary: roles, category codes, scenarios and steps

pub mod category;
mod role;
mod scenario;

pub use category::{category_code, Category};
pub use role::Role;
pub use scenario::{steps_from_json, Scenario, Step};
