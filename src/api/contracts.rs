use crate::{
    client::{ApiClient, RequestOptions},
    error::ClientError,
    model::EContract,
    requests::CreateContractBody,
    result::ApiResult,
};

#[derive(Clone, Copy)]
pub struct Contracts<'a>(pub(crate) &'a ApiClient);

impl Contracts<'_> {
    pub async fn create(self, body: &CreateContractBody) -> ApiResult<EContract> {
        if body.end_date < body.start_date {
            return Err(ClientError::Validation(
                "Contract end date is before its start date".to_string(),
            ));
        }
        self.0
            .request("/contracts", RequestOptions::post().json(body)?)
            .await?
            .into_json()
    }

    pub async fn sign(self, contract_id: i64) -> ApiResult<()> {
        self.0
            .request(&format!("/contracts/{contract_id}/sign"), RequestOptions::put())
            .await?
            .into_unit()
    }

    pub async fn for_group(self, group_id: i64) -> ApiResult<Vec<EContract>> {
        self.0
            .get(&format!("/contracts/group/{group_id}"))
            .await?
            .into_list()
    }

    pub async fn show(self, contract_id: i64) -> ApiResult<EContract> {
        self.0
            .get(&format!("/contracts/{contract_id}"))
            .await?
            .into_json()
    }
}
