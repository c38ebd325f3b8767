use crate::{
    client::{ApiClient, RequestOptions},
    model::Vehicle,
    requests::CreateVehicleBody,
    result::ApiResult,
};

#[derive(Clone, Copy)]
pub struct Vehicles<'a>(pub(crate) &'a ApiClient);

impl Vehicles<'_> {
    pub async fn list(self, group_id: Option<i64>) -> ApiResult<Vec<Vehicle>> {
        self.0
            .request("/vehicles", RequestOptions::get().query_opt("groupId", group_id))
            .await?
            .into_list()
    }

    pub async fn show(self, vehicle_id: i64) -> ApiResult<Vehicle> {
        self.0
            .get(&format!("/vehicles/{vehicle_id}"))
            .await?
            .into_json()
    }

    pub async fn create(self, body: &CreateVehicleBody) -> ApiResult<Vehicle> {
        self.0
            .request("/vehicles", RequestOptions::post().json(body)?)
            .await?
            .into_json()
    }

    pub async fn delete(self, vehicle_id: i64) -> ApiResult<()> {
        self.0
            .request(&format!("/vehicles/{vehicle_id}"), RequestOptions::delete())
            .await?
            .into_unit()
    }
}
