use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::expense::{
  Amount, Category, CategoryTotal, DateOrder, Description, Expense, ExpenseFilter, ExpenseSummary,
  errors::ExpenseError, ports::ExpenseRepository,
};

const EXPENSE_COLUMNS: &str =
  "id, user_id, amount, category, date, description, created_at, updated_at";

// Optional bounds: $2 from, $3 to, $4 category
const FILTER_CLAUSE: &str = r#"
            user_id = $1
              AND ($2::date IS NULL OR date >= $2)
              AND ($3::date IS NULL OR date <= $3)
              AND ($4::text IS NULL OR category = $4)
"#;

#[derive(Debug, FromRow)]
struct ExpenseRow {
  id: Uuid,
  user_id: Uuid,
  amount: Decimal,
  category: String,
  date: NaiveDate,
  description: Option<String>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<ExpenseRow> for Expense {
  type Error = ExpenseError;

  fn try_from(row: ExpenseRow) -> Result<Self, Self::Error> {
    Ok(Expense {
      id: row.id,
      user_id: row.user_id,
      amount: Amount::new(row.amount)?,
      category: Category::new(row.category)?,
      date: row.date,
      description: Description::parse(row.description)?,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

#[derive(Debug, FromRow)]
struct SummaryRow {
  total: Decimal,
  count: i64,
}

#[derive(Debug, FromRow)]
struct CategoryTotalRow {
  category: String,
  total: Decimal,
  count: i64,
}

pub struct PostgresExpenseRepository {
  pool: PgPool,
}

impl PostgresExpenseRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

fn order_clause(order: DateOrder) -> &'static str {
  match order {
    DateOrder::NewestFirst => "ORDER BY date DESC, created_at DESC",
    DateOrder::OldestFirst => "ORDER BY date ASC, created_at ASC",
  }
}

#[async_trait]
impl ExpenseRepository for PostgresExpenseRepository {
  async fn create(&self, expense: Expense) -> Result<Expense, ExpenseError> {
    let row = sqlx::query_as::<_, ExpenseRow>(&format!(
      r#"
            INSERT INTO expenses (
                id, user_id, amount, category, date, description, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
      EXPENSE_COLUMNS
    ))
    .bind(expense.id)
    .bind(expense.user_id)
    .bind(expense.amount.value())
    .bind(expense.category.value())
    .bind(expense.date)
    .bind(expense.description.as_ref().map(|d| d.value()))
    .bind(expense.created_at)
    .bind(expense.updated_at)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn update(&self, expense: Expense) -> Result<Expense, ExpenseError> {
    let row = sqlx::query_as::<_, ExpenseRow>(&format!(
      r#"
            UPDATE expenses
            SET amount = $3, category = $4, date = $5, description = $6, updated_at = $7
            WHERE id = $1 AND user_id = $2
            RETURNING {}
            "#,
      EXPENSE_COLUMNS
    ))
    .bind(expense.id)
    .bind(expense.user_id)
    .bind(expense.amount.value())
    .bind(expense.category.value())
    .bind(expense.date)
    .bind(expense.description.as_ref().map(|d| d.value()))
    .bind(expense.updated_at)
    .fetch_optional(&self.pool)
    .await?;

    match row {
      Some(row) => row.try_into(),
      None => Err(ExpenseError::NotFound(expense.id)),
    }
  }

  async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<Expense>, ExpenseError> {
    let row = sqlx::query_as::<_, ExpenseRow>(&format!(
      "SELECT {} FROM expenses WHERE id = $1 AND user_id = $2",
      EXPENSE_COLUMNS
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(Expense::try_from).transpose()
  }

  async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, ExpenseError> {
    let result = sqlx::query("DELETE FROM expenses WHERE id = $1 AND user_id = $2")
      .bind(id)
      .bind(user_id)
      .execute(&self.pool)
      .await?;

    Ok(result.rows_affected() > 0)
  }

  async fn find_by_user(
    &self,
    user_id: Uuid,
    filter: &ExpenseFilter,
  ) -> Result<Vec<Expense>, ExpenseError> {
    let rows = sqlx::query_as::<_, ExpenseRow>(&format!(
      "SELECT {} FROM expenses WHERE {} {}",
      EXPENSE_COLUMNS,
      FILTER_CLAUSE,
      order_clause(filter.order)
    ))
    .bind(user_id)
    .bind(filter.from)
    .bind(filter.to)
    .bind(filter.category.as_ref().map(|c| c.value()))
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(Expense::try_from).collect()
  }

  async fn summarize(
    &self,
    user_id: Uuid,
    filter: &ExpenseFilter,
  ) -> Result<ExpenseSummary, ExpenseError> {
    let row = sqlx::query_as::<_, SummaryRow>(&format!(
      "SELECT COALESCE(SUM(amount), 0) AS total, COUNT(*) AS count FROM expenses WHERE {}",
      FILTER_CLAUSE
    ))
    .bind(user_id)
    .bind(filter.from)
    .bind(filter.to)
    .bind(filter.category.as_ref().map(|c| c.value()))
    .fetch_one(&self.pool)
    .await?;

    Ok(ExpenseSummary {
      total: row.total,
      count: row.count,
    })
  }

  async fn totals_by_category(
    &self,
    user_id: Uuid,
    filter: &ExpenseFilter,
  ) -> Result<Vec<CategoryTotal>, ExpenseError> {
    let rows = sqlx::query_as::<_, CategoryTotalRow>(&format!(
      r#"
            SELECT category, SUM(amount) AS total, COUNT(*) AS count
            FROM expenses
            WHERE {}
            GROUP BY category
            ORDER BY total DESC, category ASC
            "#,
      FILTER_CLAUSE
    ))
    .bind(user_id)
    .bind(filter.from)
    .bind(filter.to)
    .bind(filter.category.as_ref().map(|c| c.value()))
    .fetch_all(&self.pool)
    .await?;

    Ok(
      rows
        .into_iter()
        .map(|row| CategoryTotal {
          category: row.category,
          total: row.total,
          count: row.count,
        })
        .collect(),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::UserRepository;
  use crate::domain::expense::{DateRange, Month};
  use crate::infrastructure::persistence::postgres::PostgresUserRepository;
  use crate::infrastructure::persistence::postgres::user_repository::tests::{
    identity, setup_test_db,
  };
  use rust_decimal_macros::dec;

  fn expense(user_id: Uuid, amount: Decimal, category: &str, date: &str) -> Expense {
    Expense::new(
      user_id,
      Amount::new(amount).unwrap(),
      Category::new(category.to_string()).unwrap(),
      NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
      None,
    )
  }

  async fn create_user(pool: &PgPool, external_id: &str) -> Uuid {
    PostgresUserRepository::new(pool.clone())
      .upsert_identity(&identity(external_id, &format!("{}@example.com", external_id)))
      .await
      .unwrap()
      .id
  }

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_create_and_find_scoped_by_user() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresExpenseRepository::new(pool.clone());
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;

    let mut lunch = expense(alice, dec!(12.50), "Food", "2025-06-03");
    lunch.description = Description::parse(Some("Lunch".to_string())).unwrap();
    let created = repo.create(lunch).await.unwrap();

    assert_eq!(created.amount.value(), dec!(12.50));
    assert_eq!(created.description.as_ref().unwrap().value(), "Lunch");
    assert!(repo.find_by_id(alice, created.id).await.unwrap().is_some());
    assert!(repo.find_by_id(bob, created.id).await.unwrap().is_none());
    assert!(!repo.delete(bob, created.id).await.unwrap());
    assert!(repo.delete(alice, created.id).await.unwrap());
  }

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_filters_and_aggregates() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresExpenseRepository::new(pool.clone());
    let user = create_user(&pool, "carol").await;

    for (amount, category, date) in [
      (dec!(10.00), "Food", "2025-05-31"),
      (dec!(20.00), "Food", "2025-06-01"),
      (dec!(5.25), "Transport", "2025-06-15"),
      (dec!(30.00), "Rent", "2025-06-30"),
      (dec!(99.00), "Food", "2025-07-01"),
    ] {
      repo.create(expense(user, amount, category, date)).await.unwrap();
    }

    let june = ExpenseFilter::for_month("2025-06".parse::<Month>().unwrap());

    let listed = repo.find_by_user(user, &june).await.unwrap();
    let dates: Vec<String> = listed.iter().map(|e| e.date.to_string()).collect();
    assert_eq!(dates, vec!["2025-06-30", "2025-06-15", "2025-06-01"]);

    let summary = repo.summarize(user, &june).await.unwrap();
    assert_eq!(summary.total, dec!(55.25));
    assert_eq!(summary.count, 3);

    let food = june.clone().with_category(Some(Category::new("Food".to_string()).unwrap()));
    let summary = repo.summarize(user, &food).await.unwrap();
    assert_eq!(summary.total, dec!(20.00));

    let totals = repo.totals_by_category(user, &june).await.unwrap();
    let categories: Vec<&str> = totals.iter().map(|t| t.category.as_str()).collect();
    assert_eq!(categories, vec!["Rent", "Food", "Transport"]);

    let range = DateRange::new(
      NaiveDate::from_ymd_opt(2025, 5, 31).unwrap(),
      NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
    )
    .unwrap();
    let oldest_first = ExpenseFilter::for_range(range).ordered(DateOrder::OldestFirst);
    let ranged = repo.find_by_user(user, &oldest_first).await.unwrap();
    assert_eq!(ranged.len(), 2);
    assert_eq!(ranged[0].date.to_string(), "2025-05-31");
  }

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_empty_summary_is_zero() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresExpenseRepository::new(pool.clone());
    let user = create_user(&pool, "dave").await;

    let summary = repo.summarize(user, &ExpenseFilter::all()).await.unwrap();
    assert_eq!(summary, ExpenseSummary::default());
  }

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_update_other_users_expense_is_not_found() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresExpenseRepository::new(pool.clone());
    let owner = create_user(&pool, "erin").await;
    let intruder = create_user(&pool, "mallory").await;

    let created = repo
      .create(expense(owner, dec!(8), "Food", "2025-06-02"))
      .await
      .unwrap();
    let mut hijacked = created.clone();
    hijacked.user_id = intruder;

    let result = repo.update(hijacked).await;
    assert!(matches!(result, Err(ExpenseError::NotFound(id)) if id == created.id));
  }
}
