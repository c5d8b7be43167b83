pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;

pub use entities::{Budget, BudgetStatus};
pub use errors::BudgetError;
pub use ports::BudgetRepository;
pub use services::BudgetService;
