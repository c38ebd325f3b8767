//! Typed wrappers over the REST resources. Every call goes through
//! [`ApiClient::request`](crate::client::ApiClient::request).

use crate::client::ApiClient;

mod admin;
mod auth;
mod bookings;
mod contracts;
mod disputes;
mod expenses;
mod funds;
mod groups;
mod me;
mod payments;
mod reports;
mod usage;
mod users;
mod vehicles;
mod votes;

pub use self::{
    admin::Admin, auth::Auth, bookings::Bookings, contracts::Contracts, disputes::Disputes,
    expenses::Expenses, funds::Funds, groups::Groups, me::Me, payments::Payments,
    reports::Reports, usage::Usage, users::Users, vehicles::Vehicles, votes::Votes,
};

impl ApiClient {
    pub fn admin(&self) -> Admin<'_> {
        Admin(self)
    }

    pub fn auth(&self) -> Auth<'_> {
        Auth(self)
    }

    pub fn bookings(&self) -> Bookings<'_> {
        Bookings(self)
    }

    pub fn contracts(&self) -> Contracts<'_> {
        Contracts(self)
    }

    pub fn disputes(&self) -> Disputes<'_> {
        Disputes(self)
    }

    pub fn expenses(&self) -> Expenses<'_> {
        Expenses(self)
    }

    pub fn funds(&self) -> Funds<'_> {
        Funds(self)
    }

    pub fn groups(&self) -> Groups<'_> {
        Groups(self)
    }

    pub fn me(&self) -> Me<'_> {
        Me(self)
    }

    pub fn payments(&self) -> Payments<'_> {
        Payments(self)
    }

    pub fn reports(&self) -> Reports<'_> {
        Reports(self)
    }

    pub fn usage(&self) -> Usage<'_> {
        Usage(self)
    }

    pub fn users(&self) -> Users<'_> {
        Users(self)
    }

    pub fn vehicles(&self) -> Vehicles<'_> {
        Vehicles(self)
    }

    pub fn votes(&self) -> Votes<'_> {
        Votes(self)
    }
}
