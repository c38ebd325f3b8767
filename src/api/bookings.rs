use serde_json::Value;

use crate::{
    client::{ApiClient, RequestOptions},
    model::Booking,
    requests::{BookingStatusBody, CreateBookingBody},
    result::ApiResult,
};

#[derive(Clone, Copy)]
pub struct Bookings<'a>(pub(crate) &'a ApiClient);

impl Bookings<'_> {
    pub async fn list(self, vehicle_id: Option<i64>, status: Option<&str>) -> ApiResult<Vec<Booking>> {
        let options = RequestOptions::get()
            .query_opt("vehicleId", vehicle_id)
            .query_opt("status", status);
        self.0.request("/bookings", options).await?.into_list()
    }

    pub async fn show(self, booking_id: i64) -> ApiResult<Booking> {
        self.0
            .get(&format!("/bookings/{booking_id}"))
            .await?
            .into_json()
    }

    pub async fn create(self, body: &CreateBookingBody) -> ApiResult<Booking> {
        self.0
            .request("/bookings", RequestOptions::post().json(body)?)
            .await?
            .into_json()
    }

    pub async fn cancel(self, booking_id: i64) -> ApiResult<()> {
        self.0
            .request(&format!("/bookings/{booking_id}/cancel"), RequestOptions::put())
            .await?
            .into_unit()
    }

    pub async fn set_status(self, booking_id: i64, status: &str) -> ApiResult<Booking> {
        let body = BookingStatusBody {
            status: status.to_string(),
        };
        self.0
            .request(
                &format!("/bookings/{booking_id}/status"),
                RequestOptions::put().json(&body)?,
            )
            .await?
            .into_json()
    }

    /// Booking priority figures for a group, passed through untouched.
    pub async fn priority(self, group_id: i64) -> ApiResult<Value> {
        self.0
            .request(
                "/bookings/priority",
                RequestOptions::get().query("groupId", group_id),
            )
            .await?
            .into_json()
    }
}
