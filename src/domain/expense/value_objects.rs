use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid amount: {0}")]
  InvalidAmount(String),
  #[error("Invalid category: {0}")]
  InvalidCategory(String),
  #[error("Invalid description: {0}")]
  InvalidDescription(String),
  #[error("Invalid month: {0}")]
  InvalidMonth(String),
  #[error("Invalid date range: {from} is after {to}")]
  InvalidDateRange { from: NaiveDate, to: NaiveDate },
}

// Amount - strictly positive money value with cent precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
  pub const MAX_FRACTION_DIGITS: u32 = 2;

  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value <= Decimal::ZERO {
      return Err(ValueObjectError::InvalidAmount(
        "Amount must be greater than zero".to_string(),
      ));
    }
    let normalized = value.normalize();
    if normalized.scale() > Self::MAX_FRACTION_DIGITS {
      return Err(ValueObjectError::InvalidAmount(format!(
        "Amount cannot have more than {} decimal places",
        Self::MAX_FRACTION_DIGITS
      )));
    }
    if normalized >= Decimal::from(1_000_000_000_000_i64) {
      return Err(ValueObjectError::InvalidAmount(
        "Amount is too large".to_string(),
      ));
    }
    Ok(Self(value))
  }

  pub fn value(&self) -> Decimal {
    self.0
  }
}

impl TryFrom<Decimal> for Amount {
  type Error = ValueObjectError;

  fn try_from(value: Decimal) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<Amount> for Decimal {
  fn from(amount: Amount) -> Self {
    amount.0
  }
}

impl fmt::Display for Amount {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Category - free-form label chosen by the user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category(String);

impl Category {
  pub const MAX_LENGTH: usize = 50;

  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidCategory(
        "Category cannot be empty".to_string(),
      ));
    }
    if trimmed.chars().count() > Self::MAX_LENGTH {
      return Err(ValueObjectError::InvalidCategory(format!(
        "Category cannot exceed {} characters",
        Self::MAX_LENGTH
      )));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Description - optional note attached to an expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description(String);

impl Description {
  pub const MAX_LENGTH: usize = 500;

  /// Blank input is treated as "no description".
  pub fn parse(value: Option<String>) -> Result<Option<Self>, ValueObjectError> {
    let Some(value) = value else {
      return Ok(None);
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Ok(None);
    }
    if trimmed.chars().count() > Self::MAX_LENGTH {
      return Err(ValueObjectError::InvalidDescription(format!(
        "Description cannot exceed {} characters",
        Self::MAX_LENGTH
      )));
    }
    Ok(Some(Self(trimmed.to_string())))
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for Description {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Calendar month in `YYYY-MM` form.
///
/// Stored as the first day of the month so that ordering and date arithmetic
/// come for free from `NaiveDate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month(NaiveDate);

impl Month {
  pub fn new(year: i32, month: u32) -> Result<Self, ValueObjectError> {
    if !(1..=9999).contains(&year) {
      return Err(ValueObjectError::InvalidMonth(format!(
        "Year {} is out of range",
        year
      )));
    }
    NaiveDate::from_ymd_opt(year, month, 1)
      .map(Self)
      .ok_or_else(|| ValueObjectError::InvalidMonth(format!("Month {} is out of range", month)))
  }

  /// Month that contains the given date
  pub fn containing(date: NaiveDate) -> Self {
    Self(date - Days::new(u64::from(date.day0())))
  }

  pub fn year(&self) -> i32 {
    self.0.year()
  }

  pub fn month(&self) -> u32 {
    self.0.month()
  }

  pub fn first_day(&self) -> NaiveDate {
    self.0
  }

  pub fn last_day(&self) -> NaiveDate {
    (self.0 + Months::new(1)) - Days::new(1)
  }

  pub fn date_range(&self) -> DateRange {
    DateRange {
      from: self.first_day(),
      to: self.last_day(),
    }
  }

  pub fn contains(&self, date: NaiveDate) -> bool {
    Self::containing(date) == *self
  }
}

impl FromStr for Month {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let invalid = || ValueObjectError::InvalidMonth(format!("Expected YYYY-MM, got '{}'", s));

    let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
    if year.len() != 4 || month.len() != 2 {
      return Err(invalid());
    }
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;

    Self::new(year, month)
  }
}

impl TryFrom<String> for Month {
  type Error = ValueObjectError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<Month> for String {
  fn from(month: Month) -> Self {
    month.to_string()
  }
}

impl fmt::Display for Month {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:04}-{:02}", self.year(), self.month())
  }
}

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
  from: NaiveDate,
  to: NaiveDate,
}

impl DateRange {
  pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, ValueObjectError> {
    if from > to {
      return Err(ValueObjectError::InvalidDateRange { from, to });
    }
    Ok(Self { from, to })
  }

  pub fn from(&self) -> NaiveDate {
    self.from
  }

  pub fn to(&self) -> NaiveDate {
    self.to
  }

  pub fn contains(&self, date: NaiveDate) -> bool {
    self.from <= date && date <= self.to
  }
}
