use chrono::{NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::{error::ClientError, result::ApiResult};

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    static ref PASSWORD_REGEX: Regex = Regex::new("^.{6,512}$").unwrap();
}

#[derive(Debug, Serialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

impl LoginBody {
    pub fn new(email: &str, password: &str) -> ApiResult<Self> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ClientError::Validation(
                "Please enter both email and password".to_string(),
            ));
        }
        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl RegisterBody {
    pub fn new(full_name: &str, email: &str, password: &str, confirm: &str) -> ApiResult<Self> {
        let email = email.trim();
        if !EMAIL_REGEX.is_match(email) {
            return Err(ClientError::Validation(format!("'{email}' is not a valid email")));
        }
        if !PASSWORD_REGEX.is_match(password) {
            return Err(ClientError::Validation(
                "Password must be at least 6 characters".to_string(),
            ));
        }
        if password != confirm {
            return Err(ClientError::Validation(
                "Password confirmation does not match".to_string(),
            ));
        }
        Ok(Self {
            full_name: full_name.trim().to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CreateGroupBody {
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberBody {
    pub user_id: i64,
    /// Fraction in `0..=1`.
    pub percentage: f64,
}

impl AddMemberBody {
    pub fn new(user_id: i64, percentage: f64) -> ApiResult<Self> {
        if !(0.0..=1.0).contains(&percentage) || percentage == 0.0 {
            return Err(ClientError::Validation(
                "Ownership percentage must be in (0, 1]".to_string(),
            ));
        }
        Ok(Self {
            user_id,
            percentage,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferOwnershipBody {
    pub new_owner_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleBody {
    pub vin: String,
    pub plate: String,
    pub model: String,
    pub group_id: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingBody {
    pub vehicle_id: i64,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

impl CreateBookingBody {
    pub fn new(vehicle_id: i64, start_time: NaiveDateTime, end_time: NaiveDateTime) -> ApiResult<Self> {
        if end_time <= start_time {
            return Err(ClientError::Validation(
                "Booking must end after it starts".to_string(),
            ));
        }
        Ok(Self {
            vehicle_id,
            start_time,
            end_time,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct BookingStatusBody {
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseBody {
    pub group_id: i64,
    pub vehicle_id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub split_method: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFundBody {
    pub group_id: i64,
    pub fund_type: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContractBody {
    pub group_id: i64,
    pub contract_no: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub terms: Option<String>,
    pub document_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVoteBody {
    pub group_id: i64,
    pub topic: String,
    pub description: String,
    pub voting_method: String,
    pub deadline: NaiveDateTime,
}

#[derive(Debug, Serialize)]
pub struct CastVoteBody {
    pub choice: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentBody {
    pub expense_share_id: i64,
    pub amount: f64,
    pub method: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDisputeBody {
    pub group_id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
}
