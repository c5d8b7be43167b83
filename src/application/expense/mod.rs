pub mod create_expense;
pub mod delete_expense;
pub mod export_expenses;
pub mod get_expense;
pub mod list_expenses;
pub mod report_by_category;
pub mod summarize_expenses;
pub mod update_expense;

pub use create_expense::{CreateExpenseCommand, CreateExpenseUseCase};
pub use delete_expense::{DeleteExpenseCommand, DeleteExpenseUseCase};
pub use export_expenses::{ExportExpensesCommand, ExportExpensesResponse, ExportExpensesUseCase};
pub use get_expense::GetExpenseUseCase;
pub use list_expenses::{ExpenseDto, ListExpensesCommand, ListExpensesUseCase};
pub use report_by_category::{CategoryTotalDto, ReportByCategoryCommand, ReportByCategoryUseCase};
pub use summarize_expenses::{
  ExpenseSummaryResponse, SummarizeExpensesCommand, SummarizeExpensesUseCase,
};
pub use update_expense::{UpdateExpenseCommand, UpdateExpenseUseCase};
