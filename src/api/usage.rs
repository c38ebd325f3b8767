use crate::{
    client::{ApiClient, RequestOptions},
    model::UsageHistory,
    result::ApiResult,
    utility::non_empty,
};

#[derive(Clone, Copy)]
pub struct Usage<'a>(pub(crate) &'a ApiClient);

impl Usage<'_> {
    pub async fn mine(self) -> ApiResult<Vec<UsageHistory>> {
        self.0.get("/usage-history/my-history").await?.into_list()
    }

    pub async fn for_user(self, user_id: i64) -> ApiResult<Vec<UsageHistory>> {
        self.0
            .get(&format!("/usage-history/user/{user_id}"))
            .await?
            .into_list()
    }

    pub async fn for_vehicle(self, vehicle_id: i64) -> ApiResult<Vec<UsageHistory>> {
        self.0
            .get(&format!("/usage-history/vehicle/{vehicle_id}"))
            .await?
            .into_list()
    }

    pub async fn show(self, usage_id: i64) -> ApiResult<UsageHistory> {
        self.0
            .get(&format!("/usage-history/{usage_id}"))
            .await?
            .into_json()
    }

    pub async fn check_in(self, booking_id: i64, odometer: i64) -> ApiResult<UsageHistory> {
        let options = RequestOptions::post()
            .query("bookingId", booking_id)
            .query("odometer", odometer);
        self.0
            .request("/usage-history/check-in", options)
            .await?
            .into_json()
    }

    pub async fn check_out(self, usage_id: i64, odometer: i64, notes: Option<&str>) -> ApiResult<UsageHistory> {
        let options = RequestOptions::post()
            .query("odometer", odometer)
            .query_opt("notes", non_empty(notes));
        self.0
            .request(&format!("/usage-history/{usage_id}/check-out"), options)
            .await?
            .into_json()
    }
}
