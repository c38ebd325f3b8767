use crate::{
    client::{ApiClient, RequestOptions},
    model::Dispute,
    requests::CreateDisputeBody,
    result::ApiResult,
};

#[derive(Clone, Copy)]
pub struct Disputes<'a>(pub(crate) &'a ApiClient);

impl Disputes<'_> {
    pub async fn create(self, body: &CreateDisputeBody) -> ApiResult<Dispute> {
        self.0
            .request("/disputes", RequestOptions::post().json(body)?)
            .await?
            .into_json()
    }

    pub async fn resolve(self, dispute_id: i64, resolution: &str) -> ApiResult<Dispute> {
        self.0
            .request(
                &format!("/disputes/{dispute_id}/resolve"),
                RequestOptions::put().query("resolution", resolution),
            )
            .await?
            .into_json()
    }

    pub async fn list(self) -> ApiResult<Vec<Dispute>> {
        self.0.get("/disputes").await?.into_list()
    }

    pub async fn for_group(self, group_id: i64) -> ApiResult<Vec<Dispute>> {
        self.0
            .get(&format!("/disputes/group/{group_id}"))
            .await?
            .into_list()
    }

    pub async fn open(self) -> ApiResult<Vec<Dispute>> {
        self.0.get("/disputes/open").await?.into_list()
    }

    pub async fn show(self, dispute_id: i64) -> ApiResult<Dispute> {
        self.0
            .get(&format!("/disputes/{dispute_id}"))
            .await?
            .into_json()
    }
}
