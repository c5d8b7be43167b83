use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::budget::{Budget, errors::BudgetError, ports::BudgetRepository};
use crate::domain::expense::{Amount, Category, Month};

#[derive(Debug, FromRow)]
struct BudgetRow {
  id: Uuid,
  user_id: Uuid,
  month: String,
  category: Option<String>,
  limit_amount: Decimal,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<BudgetRow> for Budget {
  type Error = BudgetError;

  fn try_from(row: BudgetRow) -> Result<Self, Self::Error> {
    Ok(Budget {
      id: row.id,
      user_id: row.user_id,
      month: row.month.parse::<Month>()?,
      category: row.category.map(Category::new).transpose()?,
      limit_amount: Amount::new(row.limit_amount)?,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

pub struct PostgresBudgetRepository {
  pool: PgPool,
}

impl PostgresBudgetRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl BudgetRepository for PostgresBudgetRepository {
  async fn upsert(&self, budget: Budget) -> Result<Budget, BudgetError> {
    let row = sqlx::query_as::<_, BudgetRow>(
      r#"
            INSERT INTO budgets (
                id, user_id, month, category, limit_amount, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT ON CONSTRAINT budgets_user_month_category_key DO UPDATE
            SET limit_amount = EXCLUDED.limit_amount, updated_at = EXCLUDED.updated_at
            RETURNING id, user_id, month, category, limit_amount, created_at, updated_at
            "#,
    )
    .bind(budget.id)
    .bind(budget.user_id)
    .bind(budget.month.to_string())
    .bind(budget.category.as_ref().map(|c| c.value()))
    .bind(budget.limit_amount.value())
    .bind(budget.created_at)
    .bind(budget.updated_at)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn find(
    &self,
    user_id: Uuid,
    month: Month,
    category: Option<&Category>,
  ) -> Result<Option<Budget>, BudgetError> {
    let row = sqlx::query_as::<_, BudgetRow>(
      r#"
            SELECT id, user_id, month, category, limit_amount, created_at, updated_at
            FROM budgets
            WHERE user_id = $1 AND month = $2 AND category IS NOT DISTINCT FROM $3
            "#,
    )
    .bind(user_id)
    .bind(month.to_string())
    .bind(category.map(|c| c.value()))
    .fetch_optional(&self.pool)
    .await?;

    row.map(Budget::try_from).transpose()
  }

  async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Budget>, BudgetError> {
    let rows = sqlx::query_as::<_, BudgetRow>(
      r#"
            SELECT id, user_id, month, category, limit_amount, created_at, updated_at
            FROM budgets
            WHERE user_id = $1
            ORDER BY month DESC, category ASC NULLS FIRST
            "#,
    )
    .bind(user_id)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(Budget::try_from).collect()
  }
}
