use crate::{
    client::{ApiClient, RequestOptions},
    config,
    error::ClientError,
    extract,
    model::User,
    navigation::View,
    requests::RegisterBody,
    result::ApiResult,
};

#[derive(Clone, Copy)]
pub struct Users<'a>(pub(crate) &'a ApiClient);

impl Users<'_> {
    pub async fn list(self) -> ApiResult<Vec<User>> {
        self.0.get("/users").await?.into_list()
    }

    /// Creates an account and sends the user to the login view.
    pub async fn register(
        self,
        full_name: &str,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> ApiResult<User> {
        let body = RegisterBody::new(full_name, email, password, confirm)?;
        let response = self
            .0
            .request("/users/register", RequestOptions::post().json(&body)?)
            .await?;

        if !response.is_ok() {
            let fallback = response
                .status
                .canonical_reason()
                .unwrap_or(config::REGISTRATION_FAILED_MESSAGE);
            let message = extract::error_message(response.payload(), fallback);
            return Err(ClientError::api(response.status, message));
        }

        let user = response.into_json().unwrap_or_else(|err| {
            tracing::warn!("registration succeeded without a readable body: {}", err);
            User {
                email: Some(body.email.clone()),
                full_name: Some(body.full_name.clone()),
                ..User::default()
            }
        });
        self.0.session().navigator().redirect(View::Login);
        Ok(user)
    }
}
