pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{CategoryTotal, DateOrder, Expense, ExpenseFilter, ExpenseSummary};
pub use errors::ExpenseError;
pub use ports::{ExpenseExporter, ExpenseRepository};
pub use services::{ExpenseData, ExpenseService};
pub use value_objects::{Amount, Category, DateRange, Description, Month, ValueObjectError};
