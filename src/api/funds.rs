use crate::{
    client::{ApiClient, RequestOptions},
    error::ClientError,
    model::{CommonFund, FundTransaction},
    requests::CreateFundBody,
    result::ApiResult,
    utility::non_empty,
};

#[derive(Clone, Copy)]
pub struct Funds<'a>(pub(crate) &'a ApiClient);

impl Funds<'_> {
    pub async fn create(self, group_id: i64, fund_type: &str, description: Option<&str>) -> ApiResult<CommonFund> {
        let body = CreateFundBody {
            group_id,
            fund_type: fund_type.to_string(),
            description: non_empty(description).unwrap_or_default(),
        };
        self.0
            .request("/funds", RequestOptions::post().json(&body)?)
            .await?
            .into_json()
    }

    pub async fn for_group(self, group_id: i64) -> ApiResult<Vec<CommonFund>> {
        self.0
            .get(&format!("/funds/group/{group_id}"))
            .await?
            .into_list()
    }

    pub async fn transactions(self, fund_id: i64) -> ApiResult<Vec<FundTransaction>> {
        self.0
            .get(&format!("/funds/{fund_id}/transactions"))
            .await?
            .into_list()
    }

    pub async fn deposit(self, fund_id: i64, amount: f64, description: Option<&str>) -> ApiResult<()> {
        let options = RequestOptions::post()
            .query("amount", positive(amount)?)
            .query_opt("description", non_empty(description));
        self.0
            .request(&format!("/funds/{fund_id}/deposit"), options)
            .await?
            .into_unit()
    }

    pub async fn withdraw(
        self,
        fund_id: i64,
        amount: f64,
        description: Option<&str>,
        reference: Option<&str>,
    ) -> ApiResult<()> {
        let options = RequestOptions::post()
            .query("amount", positive(amount)?)
            .query_opt("description", non_empty(description))
            .query_opt("reference", non_empty(reference));
        self.0
            .request(&format!("/funds/{fund_id}/withdraw"), options)
            .await?
            .into_unit()
    }
}

fn positive(amount: f64) -> ApiResult<f64> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(ClientError::Validation("Amount must be greater than zero".to_string()))
    }
}
