pub mod get_budget;
pub mod get_budget_status;
pub mod list_budgets;
pub mod set_budget;

pub use get_budget::{GetBudgetCommand, GetBudgetUseCase};
pub use get_budget_status::{BudgetStatusResponse, GetBudgetStatusCommand, GetBudgetStatusUseCase};
pub use list_budgets::ListBudgetsUseCase;
pub use set_budget::{BudgetDto, SetBudgetCommand, SetBudgetUseCase};
