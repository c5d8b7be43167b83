pub mod budget_repository;
pub mod expense_repository;
pub mod user_repository;

pub use budget_repository::PostgresBudgetRepository;
pub use expense_repository::PostgresExpenseRepository;
pub use user_repository::PostgresUserRepository;
