use chrono::NaiveDate;

use crate::{
    client::{ApiClient, RequestOptions},
    error::ClientError,
    model::Report,
    result::ApiResult,
};

#[derive(Clone, Copy)]
pub struct Reports<'a>(pub(crate) &'a ApiClient);

impl Reports<'_> {
    pub async fn for_group(self, group_id: i64, start: NaiveDate, end: NaiveDate) -> ApiResult<Report> {
        self.0
            .request(&format!("/reports/group/{group_id}"), period(start, end)?)
            .await?
            .into_json()
    }

    pub async fn for_user(self, user_id: i64, start: NaiveDate, end: NaiveDate) -> ApiResult<Report> {
        self.0
            .request(&format!("/reports/user/{user_id}"), period(start, end)?)
            .await?
            .into_json()
    }

    pub async fn usage_vs_ownership(self, group_id: i64) -> ApiResult<Report> {
        self.0
            .get(&format!("/reports/usage-vs-ownership/{group_id}"))
            .await?
            .into_json()
    }
}

fn period(start: NaiveDate, end: NaiveDate) -> ApiResult<RequestOptions> {
    if end < start {
        return Err(ClientError::Validation(
            "Report end date is before its start date".to_string(),
        ));
    }
    Ok(RequestOptions::get()
        .query("startDate", start.format("%Y-%m-%d"))
        .query("endDate", end.format("%Y-%m-%d")))
}
