use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::{Amount, Category, DateRange, Description, Month};

// Expense - a single spending record owned by one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
  pub id: Uuid,
  pub user_id: Uuid,
  pub amount: Amount,
  pub category: Category,
  pub date: NaiveDate,
  pub description: Option<Description>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Expense {
  pub fn new(
    user_id: Uuid,
    amount: Amount,
    category: Category,
    date: NaiveDate,
    description: Option<Description>,
  ) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      user_id,
      amount,
      category,
      date,
      description,
      created_at: now,
      updated_at: now,
    }
  }

  pub fn update(
    &mut self,
    amount: Amount,
    category: Category,
    date: NaiveDate,
    description: Option<Description>,
  ) {
    self.amount = amount;
    self.category = category;
    self.date = date;
    self.description = description;
    self.updated_at = Utc::now();
  }

  pub fn is_owned_by(&self, user_id: Uuid) -> bool {
    self.user_id == user_id
  }
}

/// Ordering of expense listings by date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateOrder {
  #[default]
  NewestFirst,
  OldestFirst,
}

/// Criteria shared by listing, summary and report queries.
///
/// Every bound is optional; an empty filter matches all of a user's expenses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseFilter {
  pub from: Option<NaiveDate>,
  pub to: Option<NaiveDate>,
  pub category: Option<Category>,
  pub order: DateOrder,
}

impl ExpenseFilter {
  pub fn all() -> Self {
    Self::default()
  }

  pub fn for_month(month: Month) -> Self {
    Self {
      from: Some(month.first_day()),
      to: Some(month.last_day()),
      ..Self::default()
    }
  }

  pub fn for_range(range: DateRange) -> Self {
    Self {
      from: Some(range.from()),
      to: Some(range.to()),
      ..Self::default()
    }
  }

  pub fn with_category(mut self, category: Option<Category>) -> Self {
    self.category = category;
    self
  }

  pub fn ordered(mut self, order: DateOrder) -> Self {
    self.order = order;
    self
  }

  pub fn matches(&self, expense: &Expense) -> bool {
    self.from.is_none_or(|from| expense.date >= from)
      && self.to.is_none_or(|to| expense.date <= to)
      && self
        .category
        .as_ref()
        .is_none_or(|category| &expense.category == category)
  }
}

/// Aggregate over a set of expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExpenseSummary {
  pub total: Decimal,
  pub count: i64,
}

/// Per-category aggregate used by the category report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
  pub category: String,
  pub total: Decimal,
  pub count: i64,
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn expense_on(date: NaiveDate, category: &str) -> Expense {
    Expense::new(
      Uuid::new_v4(),
      Amount::new(dec!(10.00)).unwrap(),
      Category::new(category.to_string()).unwrap(),
      date,
      None,
    )
  }

  #[test]
  fn test_expense_update_replaces_fields() {
    let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let mut expense = expense_on(date, "Food");
    let created_at = expense.created_at;

    let new_date = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
    expense.update(
      Amount::new(dec!(42.10)).unwrap(),
      Category::new("Travel".to_string()).unwrap(),
      new_date,
      Description::parse(Some("train".to_string())).unwrap(),
    );

    assert_eq!(expense.amount.value(), dec!(42.10));
    assert_eq!(expense.category.value(), "Travel");
    assert_eq!(expense.date, new_date);
    assert_eq!(expense.description.as_ref().unwrap().value(), "train");
    assert_eq!(expense.created_at, created_at);
    assert!(expense.updated_at >= created_at);
  }

  #[test]
  fn test_expense_ownership() {
    let expense = expense_on(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(), "Food");
    assert!(expense.is_owned_by(expense.user_id));
    assert!(!expense.is_owned_by(Uuid::new_v4()));
  }

  #[test]
  fn test_filter_for_month_matches_only_that_month() {
    let filter = ExpenseFilter::for_month("2025-04".parse().unwrap());

    assert!(filter.matches(&expense_on(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(), "A")));
    assert!(filter.matches(&expense_on(NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(), "A")));
    assert!(!filter.matches(&expense_on(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(), "A")));
    assert!(!filter.matches(&expense_on(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(), "A")));
  }

  #[test]
  fn test_filter_category() {
    let filter =
      ExpenseFilter::all().with_category(Some(Category::new("Rent".to_string()).unwrap()));
    let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();

    assert!(filter.matches(&expense_on(date, "Rent")));
    assert!(!filter.matches(&expense_on(date, "Food")));
  }
}
