use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub id: Option<i64>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub roles: Vec<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|role| role == config::ROLE_ADMIN)
    }

    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .or(self.email.as_deref())
            .or(self.username.as_deref())
            .unwrap_or("-")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: Option<User>,
    pub roles: Vec<String>,
}

impl LoginResponse {
    pub fn roles(&self) -> &[String] {
        match &self.user {
            Some(user) if !user.roles.is_empty() => &user.roles,
            _ => &self.roles,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.roles().iter().any(|role| role == config::ROLE_ADMIN)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OwnershipShare {
    pub id: Option<i64>,
    pub user: Option<User>,
    /// Fraction in `0..=1`.
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Group {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub created_by: Option<User>,
    pub ownership_shares: Vec<OwnershipShare>,
}

impl Group {
    pub fn member_count(&self) -> usize {
        self.ownership_shares.len()
    }

    pub fn owner_name(&self) -> &str {
        self.created_by.as_ref().map_or("-", User::display_name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Option<i64>,
    pub vin: Option<String>,
    pub plate: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Booking {
    pub id: Option<i64>,
    pub vehicle: Option<Vehicle>,
    pub user: Option<User>,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Expense {
    pub id: Option<i64>,
    pub group: Option<Group>,
    pub vehicle: Option<Vehicle>,
    pub created_by: Option<User>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub split_method: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExpenseShare {
    pub id: Option<i64>,
    pub expense: Option<Expense>,
    pub user: Option<User>,
    pub amount: Option<f64>,
    pub status: Option<String>,
    pub paid_amount: Option<f64>,
}

impl ExpenseShare {
    pub fn outstanding(&self) -> f64 {
        (self.amount.unwrap_or(0.0) - self.paid_amount.unwrap_or(0.0)).max(0.0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommonFund {
    pub id: Option<i64>,
    pub group: Option<Group>,
    pub fund_type: Option<String>,
    pub balance: Option<f64>,
    pub created_at: Option<NaiveDate>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FundTransaction {
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub amount: Option<f64>,
    pub transaction_date: Option<NaiveDateTime>,
    pub created_by: Option<User>,
    pub description: Option<String>,
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EContract {
    pub id: Option<i64>,
    pub group: Option<Group>,
    pub contract_no: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub terms: Option<String>,
    pub document_url: Option<String>,
    pub created_by: Option<User>,
    pub created_at: Option<NaiveDate>,
    pub signed_at: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Vote {
    pub id: Option<i64>,
    pub group: Option<Group>,
    pub topic: Option<String>,
    pub description: Option<String>,
    pub created_by: Option<User>,
    pub created_at: Option<NaiveDateTime>,
    pub deadline: Option<NaiveDateTime>,
    pub status: Option<String>,
    pub voting_method: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VoteOption {
    pub id: Option<i64>,
    pub option: Option<String>,
    pub count: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserVote {
    pub id: Option<i64>,
    pub choice: Option<String>,
    pub voted_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Payment {
    pub id: Option<i64>,
    pub expense_share: Option<ExpenseShare>,
    pub user: Option<User>,
    pub amount: Option<f64>,
    pub method: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub completed_at: Option<NaiveDateTime>,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UsageHistory {
    pub id: Option<i64>,
    pub vehicle: Option<Vehicle>,
    pub user: Option<User>,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub start_odometer: Option<i64>,
    pub end_odometer: Option<i64>,
    pub distance: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Dispute {
    pub id: Option<i64>,
    pub group: Option<Group>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub resolved_at: Option<NaiveDateTime>,
    pub resolution: Option<String>,
}

/// Reports are aggregated server-side and rendered as-is.
pub type Report = Value;
