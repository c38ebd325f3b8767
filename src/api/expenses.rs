use crate::{
    client::{ApiClient, RequestOptions},
    model::{Expense, ExpenseShare},
    requests::CreateExpenseBody,
    result::ApiResult,
};

#[derive(Clone, Copy)]
pub struct Expenses<'a>(pub(crate) &'a ApiClient);

impl Expenses<'_> {
    pub async fn create(self, body: &CreateExpenseBody) -> ApiResult<Expense> {
        self.0
            .request("/expenses", RequestOptions::post().json(body)?)
            .await?
            .into_json()
    }

    pub async fn for_group(self, group_id: i64) -> ApiResult<Vec<Expense>> {
        self.0
            .get(&format!("/expenses/group/{group_id}"))
            .await?
            .into_list()
    }

    pub async fn my_shares(self) -> ApiResult<Vec<ExpenseShare>> {
        self.0.get("/expenses/my-shares").await?.into_list()
    }

    pub async fn show(self, expense_id: i64) -> ApiResult<Expense> {
        self.0
            .get(&format!("/expenses/{expense_id}"))
            .await?
            .into_json()
    }

    pub async fn approve(self, expense_id: i64) -> ApiResult<()> {
        self.0
            .request(&format!("/expenses/{expense_id}/approve"), RequestOptions::put())
            .await?
            .into_unit()
    }

    pub async fn reject(self, expense_id: i64) -> ApiResult<()> {
        self.0
            .request(&format!("/expenses/{expense_id}/reject"), RequestOptions::put())
            .await?
            .into_unit()
    }

    pub async fn delete(self, expense_id: i64) -> ApiResult<()> {
        self.0
            .request(&format!("/expenses/{expense_id}"), RequestOptions::delete())
            .await?
            .into_unit()
    }
}
