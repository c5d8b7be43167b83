mod common;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal_macros::dec;
use uuid::Uuid;

use common::TestContext;
use expense_tracker::domain::auth::{AuthError, ReminderPreferences};
use expense_tracker::domain::budget::BudgetError;
use expense_tracker::domain::expense::{
  Amount, Category, DateRange, Description, ExpenseData, ExpenseError, ExpenseFilter, Month,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn data(amount: rust_decimal::Decimal, category: &str, date: NaiveDate) -> ExpenseData {
  ExpenseData {
    amount: Amount::new(amount).unwrap(),
    category: Category::new(category.to_string()).unwrap(),
    date,
    description: Description::parse(None).unwrap(),
  }
}

#[tokio::test]
async fn expense_lookups_are_scoped_to_the_owner() {
  let ctx = TestContext::new();
  let service = &ctx.expense_service;
  let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());

  let expense = service
    .create_expense(alice, data(dec!(10), "Food", date(2025, 6, 1)))
    .await
    .unwrap();

  assert_eq!(service.get_expense(alice, expense.id).await.unwrap(), expense);
  assert!(matches!(
    service.get_expense(bob, expense.id).await,
    Err(ExpenseError::NotFound(id)) if id == expense.id
  ));
  assert!(matches!(
    service
      .update_expense(bob, expense.id, data(dec!(1), "Food", date(2025, 6, 1)))
      .await,
    Err(ExpenseError::NotFound(_))
  ));
  assert!(matches!(
    service.delete_expense(bob, expense.id).await,
    Err(ExpenseError::NotFound(_))
  ));

  service.delete_expense(alice, expense.id).await.unwrap();
  assert!(matches!(
    service.delete_expense(alice, expense.id).await,
    Err(ExpenseError::NotFound(_))
  ));
}

#[tokio::test]
async fn range_is_inclusive_and_oldest_first() {
  let ctx = TestContext::new();
  let service = &ctx.expense_service;
  let user = Uuid::new_v4();

  for (day, month) in [(15, 6), (1, 6), (30, 6), (31, 5), (1, 7)] {
    service
      .create_expense(user, data(dec!(1), "Food", date(2025, month, day)))
      .await
      .unwrap();
  }

  let range = DateRange::new(date(2025, 6, 1), date(2025, 6, 30)).unwrap();
  let dates: Vec<NaiveDate> = service
    .expenses_in_range(user, range)
    .await
    .unwrap()
    .into_iter()
    .map(|e| e.date)
    .collect();

  assert_eq!(
    dates,
    vec![date(2025, 6, 1), date(2025, 6, 15), date(2025, 6, 30)]
  );
}

#[tokio::test]
async fn category_totals_sorted_by_total_then_name() {
  let ctx = TestContext::new();
  let service = &ctx.expense_service;
  let user = Uuid::new_v4();

  for (amount, category) in [
    (dec!(5), "Transport"),
    (dec!(10), "Rent"),
    (dec!(4), "Food"),
    (dec!(6), "Food"),
  ] {
    service
      .create_expense(user, data(amount, category, date(2025, 6, 2)))
      .await
      .unwrap();
  }

  let totals = service
    .totals_by_category(user, ExpenseFilter::all())
    .await
    .unwrap();
  let flattened: Vec<(&str, rust_decimal::Decimal, i64)> = totals
    .iter()
    .map(|t| (t.category.as_str(), t.total, t.count))
    .collect();

  assert_eq!(
    flattened,
    vec![
      ("Food", dec!(10), 2),
      ("Rent", dec!(10), 1),
      ("Transport", dec!(5), 1),
    ]
  );
}

#[tokio::test]
async fn setting_a_budget_twice_keeps_one_record() {
  let ctx = TestContext::new();
  let service = &ctx.budget_service;
  let user = Uuid::new_v4();
  let june: Month = "2025-06".parse().unwrap();

  let first = service
    .set_budget(user, june, None, Amount::new(dec!(100)).unwrap())
    .await
    .unwrap();
  let second = service
    .set_budget(user, june, None, Amount::new(dec!(250)).unwrap())
    .await
    .unwrap();

  assert_eq!(first.id, second.id);
  assert_eq!(second.limit_amount.value(), dec!(250));
  assert_eq!(service.list_budgets(user).await.unwrap().len(), 1);

  let food = Category::new("Food".to_string()).unwrap();
  assert!(matches!(
    service.get_budget(user, june, Some(food)).await,
    Err(BudgetError::NotFound { category: Some(ref c), .. }) if c == "Food"
  ));
}

#[tokio::test]
async fn budget_status_counts_only_the_budget_month_and_category() {
  let ctx = TestContext::new();
  let user = Uuid::new_v4();
  let june: Month = "2025-06".parse().unwrap();
  let food = Category::new("Food".to_string()).unwrap();

  for (amount, category, day) in [
    (dec!(30), "Food", date(2025, 6, 3)),
    (dec!(25), "Food", date(2025, 6, 30)),
    (dec!(99), "Food", date(2025, 7, 1)),
    (dec!(40), "Rent", date(2025, 6, 3)),
  ] {
    ctx
      .expense_service
      .create_expense(user, data(amount, category, day))
      .await
      .unwrap();
  }

  ctx
    .budget_service
    .set_budget(user, june, Some(food.clone()), Amount::new(dec!(50)).unwrap())
    .await
    .unwrap();

  let status = ctx
    .budget_service
    .budget_status(user, june, Some(food))
    .await
    .unwrap();

  assert_eq!(status.spent, dec!(55));
  assert_eq!(status.remaining, dec!(-5));
  assert!(status.exceeded);
}

#[tokio::test]
async fn authentication_links_one_user_per_subject() {
  let ctx = TestContext::new();
  let service = &ctx.auth_service;

  let first = service.authenticate("token-alice").await.unwrap();
  let again = service.authenticate("token-alice").await.unwrap();
  let other = service.authenticate("token-bob").await.unwrap();

  assert_eq!(first.id, again.id);
  assert_ne!(first.id, other.id);
  assert_eq!(first.external_id, "user_alice");
  assert_eq!(ctx.users.count(), 2);

  assert!(matches!(
    service.authenticate("   ").await,
    Err(AuthError::MissingToken)
  ));
  assert!(matches!(
    service.authenticate("token-expired").await,
    Err(AuthError::TokenExpired)
  ));
}

#[tokio::test]
async fn preferences_update_is_partial() {
  let ctx = TestContext::new();
  let service = &ctx.auth_service;
  let user = service.authenticate("token-alice").await.unwrap();
  let seven_thirty = NaiveTime::from_hms_opt(7, 30, 0).unwrap();

  let updated = service
    .update_preferences(
      user.id,
      ReminderPreferences {
        enabled: None,
        time: Some(seven_thirty),
      },
    )
    .await
    .unwrap();
  assert!(!updated.reminder_enabled);
  assert_eq!(updated.reminder_time, seven_thirty);

  let unchanged = service
    .update_preferences(user.id, ReminderPreferences::default())
    .await
    .unwrap();
  assert_eq!(unchanged, updated);

  assert!(matches!(
    service
      .update_preferences(Uuid::new_v4(), ReminderPreferences::default())
      .await,
    Err(AuthError::UserNotFound)
  ));
}
