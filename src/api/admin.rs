use crate::{
    client::ApiClient,
    model::{Booking, Expense, Group, Payment, User, Vehicle},
    result::ApiResult,
};

#[derive(Clone, Copy)]
pub struct Admin<'a>(pub(crate) &'a ApiClient);

impl Admin<'_> {
    pub async fn users(self) -> ApiResult<Vec<User>> {
        self.0.get("/admin/users").await?.into_list()
    }

    pub async fn groups(self) -> ApiResult<Vec<Group>> {
        self.0.get("/admin/groups").await?.into_list()
    }

    pub async fn vehicles(self) -> ApiResult<Vec<Vehicle>> {
        self.0.get("/admin/vehicles").await?.into_list()
    }

    pub async fn bookings(self) -> ApiResult<Vec<Booking>> {
        self.0.get("/admin/bookings").await?.into_list()
    }

    pub async fn expenses(self) -> ApiResult<Vec<Expense>> {
        self.0.get("/admin/expenses").await?.into_list()
    }

    pub async fn payments(self) -> ApiResult<Vec<Payment>> {
        self.0.get("/admin/payments").await?.into_list()
    }
}
