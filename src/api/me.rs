use crate::{client::ApiClient, model::User, navigation::View, result::ApiResult};

#[derive(Clone, Copy)]
pub struct Me<'a>(pub(crate) &'a ApiClient);

impl Me<'_> {
    pub async fn show(self) -> ApiResult<User> {
        self.0.get("/auth/me").await?.into_json()
    }

    /// Dashboard for the current identity. Falls back to the user dashboard
    /// when the identity cannot be loaded.
    pub async fn dashboard_view(self) -> View {
        if self.0.session().token().is_none() {
            return View::Login;
        }
        match self.show().await {
            Ok(user) => View::dashboard_for(user.is_admin()),
            Err(err) => {
                tracing::error!("error getting dashboard view: {}", err);
                View::UserDashboard
            }
        }
    }
}
