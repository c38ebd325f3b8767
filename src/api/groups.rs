use crate::{
    client::{ApiClient, RequestOptions},
    model::{Group, OwnershipShare},
    requests::{AddMemberBody, CreateGroupBody, TransferOwnershipBody},
    result::ApiResult,
};

#[derive(Clone, Copy)]
pub struct Groups<'a>(pub(crate) &'a ApiClient);

impl Groups<'_> {
    pub async fn list(self) -> ApiResult<Vec<Group>> {
        self.0.get("/groups").await?.into_list()
    }

    pub async fn show(self, group_id: i64) -> ApiResult<Group> {
        self.0.get(&format!("/groups/{group_id}")).await?.into_json()
    }

    pub async fn create(self, name: &str) -> ApiResult<Group> {
        let body = CreateGroupBody {
            name: name.trim().to_string(),
        };
        self.0
            .request("/groups", RequestOptions::post().json(&body)?)
            .await?
            .into_json()
    }

    pub async fn delete(self, group_id: i64) -> ApiResult<()> {
        self.0
            .request(&format!("/groups/{group_id}"), RequestOptions::delete())
            .await?
            .into_unit()
    }

    pub async fn members(self, group_id: i64) -> ApiResult<Vec<OwnershipShare>> {
        self.0
            .get(&format!("/groups/{group_id}/members"))
            .await?
            .into_list()
    }

    pub async fn add_member(self, group_id: i64, user_id: i64, percentage: f64) -> ApiResult<()> {
        let body = AddMemberBody::new(user_id, percentage)?;
        self.0
            .request(
                &format!("/groups/{group_id}/members"),
                RequestOptions::post().json(&body)?,
            )
            .await?
            .into_unit()
    }

    pub async fn remove_member(self, group_id: i64, user_id: i64) -> ApiResult<()> {
        self.0
            .request(
                &format!("/groups/{group_id}/members/{user_id}"),
                RequestOptions::delete(),
            )
            .await?
            .into_unit()
    }

    pub async fn transfer_ownership(self, group_id: i64, new_owner_id: i64) -> ApiResult<()> {
        let body = TransferOwnershipBody { new_owner_id };
        self.0
            .request(
                &format!("/groups/{group_id}/transfer-ownership"),
                RequestOptions::put().json(&body)?,
            )
            .await?
            .into_unit()
    }
}
