use crate::{
    client::{ApiClient, RequestOptions},
    model::{UserVote, Vote, VoteOption},
    requests::{CastVoteBody, CreateVoteBody},
    result::ApiResult,
};

#[derive(Clone, Copy)]
pub struct Votes<'a>(pub(crate) &'a ApiClient);

impl Votes<'_> {
    pub async fn create(self, body: &CreateVoteBody) -> ApiResult<Vote> {
        self.0
            .request("/votes", RequestOptions::post().json(body)?)
            .await?
            .into_json()
    }

    pub async fn cast(self, vote_id: i64, choice: &str) -> ApiResult<()> {
        let body = CastVoteBody {
            choice: choice.to_string(),
        };
        self.0
            .request(
                &format!("/votes/{vote_id}/cast"),
                RequestOptions::post().json(&body)?,
            )
            .await?
            .into_unit()
    }

    pub async fn for_group(self, group_id: i64) -> ApiResult<Vec<Vote>> {
        self.0
            .get(&format!("/votes/group/{group_id}"))
            .await?
            .into_list()
    }

    pub async fn show(self, vote_id: i64) -> ApiResult<Vote> {
        self.0.get(&format!("/votes/{vote_id}")).await?.into_json()
    }

    pub async fn options(self, vote_id: i64) -> ApiResult<Vec<VoteOption>> {
        self.0
            .get(&format!("/votes/{vote_id}/options"))
            .await?
            .into_list()
    }

    /// The caller's ballot, if one was cast.
    pub async fn my_vote(self, vote_id: i64) -> ApiResult<Option<UserVote>> {
        let response = self.0.get(&format!("/votes/{vote_id}/my-vote")).await?;
        if response.status == reqwest::StatusCode::NOT_FOUND || response.payload.is_none() {
            return Ok(None);
        }
        response.into_json().map(Some)
    }

    pub async fn close(self, vote_id: i64) -> ApiResult<()> {
        self.0
            .request(&format!("/votes/{vote_id}/close"), RequestOptions::put())
            .await?
            .into_unit()
    }

    pub async fn delete(self, vote_id: i64) -> ApiResult<()> {
        self.0
            .request(&format!("/votes/{vote_id}"), RequestOptions::delete())
            .await?
            .into_unit()
    }
}
