use crate::{
    client::{ApiClient, RequestOptions},
    config,
    error::ClientError,
    extract,
    model::LoginResponse,
    navigation::View,
    requests::LoginBody,
    result::ApiResult,
};

#[derive(Clone, Copy)]
pub struct Auth<'a>(pub(crate) &'a ApiClient);

impl Auth<'_> {
    /// Signs in, stores the issued token and moves to the dashboard that
    /// matches the returned roles.
    pub async fn login(self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        let body = LoginBody::new(email, password)?;
        let response = self
            .0
            .request("/auth/login", RequestOptions::post().json(&body)?)
            .await?;

        if !response.is_ok() {
            let message =
                extract::error_message(response.payload(), config::INVALID_CREDENTIALS_MESSAGE);
            return Err(ClientError::api(response.status, message));
        }

        let login: LoginResponse = response.into_json()?;
        if login.token.is_empty() {
            return Err(ClientError::EmptyBody("/auth/login token".to_string()));
        }

        let session = self.0.session();
        session.begin(&login.token, &body.email)?;
        tracing::info!("signed in as {}", body.email);
        session
            .navigator()
            .redirect(View::dashboard_for(login.is_admin()));

        Ok(login)
    }

    /// Skips the login view when a stored token still resolves to an
    /// identity. Returns the dashboard moved to, if any.
    pub async fn resume(self) -> ApiResult<Option<View>> {
        if self.0.session().token().is_none() {
            return Ok(None);
        }

        match self.0.me().show().await {
            Ok(user) => {
                let view = View::dashboard_for(user.is_admin());
                self.0.session().navigator().redirect(view);
                Ok(Some(view))
            }
            Err(err) if err.is_transport() => Err(err),
            Err(err) => {
                tracing::warn!("stored session could not be resumed: {}", err);
                Ok(None)
            }
        }
    }

    pub fn logout(self) -> ApiResult<()> {
        self.0.session().end_session()
    }
}
