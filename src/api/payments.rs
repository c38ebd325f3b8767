use crate::{
    client::{ApiClient, RequestOptions},
    model::Payment,
    requests::CreatePaymentBody,
    result::ApiResult,
};

#[derive(Clone, Copy)]
pub struct Payments<'a>(pub(crate) &'a ApiClient);

impl Payments<'_> {
    pub async fn create(self, body: &CreatePaymentBody) -> ApiResult<Payment> {
        self.0
            .request("/payments", RequestOptions::post().json(body)?)
            .await?
            .into_json()
    }

    pub async fn mine(self) -> ApiResult<Vec<Payment>> {
        self.0.get("/payments/my-payments").await?.into_list()
    }

    pub async fn for_expense_share(self, expense_share_id: i64) -> ApiResult<Vec<Payment>> {
        self.0
            .get(&format!("/payments/expense-share/{expense_share_id}"))
            .await?
            .into_list()
    }

    pub async fn set_status(
        self,
        payment_id: i64,
        status: &str,
        transaction_id: Option<&str>,
    ) -> ApiResult<Payment> {
        let options = RequestOptions::put()
            .query("status", status)
            .query_opt("transactionId", transaction_id);
        self.0
            .request(&format!("/payments/{payment_id}/status"), options)
            .await?
            .into_json()
    }
}
