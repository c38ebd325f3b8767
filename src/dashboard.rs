//! Dashboard view models. Each load builds a fresh model that owns what it
//! fetched; nothing is shared between loads.

use std::fmt;

use crate::{
    client::ApiClient,
    config,
    error::ClientError,
    model::{Booking, Expense, ExpenseShare, Group, Payment, UsageHistory, User, Vehicle},
    navigation::View,
    result::ApiResult,
    view::{Notice, Table, Tabular},
};

/// One independently loaded collection.
#[derive(Debug)]
pub struct Section<T> {
    pub title: &'static str,
    pub items: Vec<T>,
    pub error: Option<String>,
}

impl<T> Section<T> {
    fn settle(title: &'static str, result: ApiResult<Vec<T>>) -> Self {
        match result {
            Ok(items) => Self {
                title,
                items,
                error: None,
            },
            Err(err) => {
                tracing::warn!("failed to load {}: {}", title, err);
                Self {
                    title,
                    items: Vec::new(),
                    error: Some(err.to_string()),
                }
            }
        }
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

impl<T: Tabular> Section<T> {
    fn render(&self, f: &mut fmt::Formatter<'_>, limit: usize, empty_label: &str) -> fmt::Result {
        writeln!(f, "\n{}", self.title)?;
        if let Some(error) = &self.error {
            writeln!(f, "{}", Notice::error(format!("Could not load {}: {}", self.title, error)))?;
        }
        let shown = &self.items[..self.items.len().min(limit)];
        write!(f, "{}", Table::of(shown, empty_label))
    }
}

#[derive(Debug)]
pub struct UserDashboard {
    pub user: Option<User>,
    pub groups: Section<Group>,
    pub bookings: Section<Booking>,
    pub shares: Section<ExpenseShare>,
    pub payments: Section<Payment>,
    pub usage: Section<UsageHistory>,
}

impl UserDashboard {
    pub async fn load(client: &ApiClient, user: Option<User>) -> Self {
        let (groups, bookings, shares, payments, usage) = tokio::join!(
            client.groups().list(),
            client.bookings().list(None, None),
            client.expenses().my_shares(),
            client.payments().mine(),
            client.usage().mine(),
        );

        Self {
            user,
            groups: Section::settle("groups", groups),
            bookings: Section::settle("bookings", bookings),
            shares: Section::settle("expense shares", shares),
            payments: Section::settle("payments", payments),
            usage: Section::settle("usage history", usage),
        }
    }

    /// Total still owed across the user's expense shares.
    pub fn outstanding(&self) -> f64 {
        self.shares.items.iter().map(ExpenseShare::outstanding).sum()
    }
}

impl fmt::Display for UserDashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.user {
            Some(user) => writeln!(
                f,
                "{} (ID: {})",
                crate::view::sanitize(user.display_name()),
                user.id.map_or_else(|| "-".to_string(), |id| id.to_string())
            )?,
            None => writeln!(f, "{}", Notice::error("Could not load user information"))?,
        }
        writeln!(
            f,
            "Groups: {}  Bookings: {}  Expenses: {}  Payments: {}  Outstanding: {}",
            self.groups.count(),
            self.bookings.count(),
            self.shares.count(),
            self.payments.count(),
            crate::format::format_currency(Some(self.outstanding())),
        )?;

        self.groups
            .render(f, usize::MAX, "You have not joined any group")?;
        self.bookings
            .render(f, config::DASHBOARD_RECENT_BOOKINGS, "No bookings yet")?;
        self.usage
            .render(f, config::DASHBOARD_RECENT_USAGE, "No usage history yet")
    }
}

#[derive(Debug)]
pub struct AdminDashboard {
    pub user: Option<User>,
    pub users: Section<User>,
    pub groups: Section<Group>,
    pub vehicles: Section<Vehicle>,
    pub bookings: Section<Booking>,
    pub expenses: Section<Expense>,
}

impl AdminDashboard {
    pub async fn load(client: &ApiClient, user: Option<User>) -> Self {
        let admin = client.admin();
        let (users, groups, vehicles, bookings, expenses) = tokio::join!(
            admin.users(),
            admin.groups(),
            admin.vehicles(),
            admin.bookings(),
            admin.expenses(),
        );

        Self {
            user,
            users: Section::settle("users", users),
            groups: Section::settle("groups", groups),
            vehicles: Section::settle("vehicles", vehicles),
            bookings: Section::settle("bookings", bookings),
            expenses: Section::settle("expenses", expenses),
        }
    }

    pub fn failures(&self) -> usize {
        [
            self.users.failed(),
            self.groups.failed(),
            self.vehicles.failed(),
            self.bookings.failed(),
            self.expenses.failed(),
        ]
        .into_iter()
        .filter(|failed| *failed)
        .count()
    }
}

impl fmt::Display for AdminDashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(user) = &self.user {
            writeln!(f, "{} [admin]", crate::view::sanitize(user.display_name()))?;
        }
        if self.failures() > 0 {
            writeln!(
                f,
                "{}",
                Notice::error(format!("{} admin collections failed to load", self.failures()))
            )?;
        }
        writeln!(
            f,
            "Users: {}  Groups: {}  Vehicles: {}  Bookings: {}",
            self.users.count(),
            self.groups.count(),
            self.vehicles.count(),
            self.bookings.count(),
        )?;

        self.users.render(f, usize::MAX, "No users")?;
        self.groups.render(f, usize::MAX, "No groups")?;
        self.vehicles.render(f, usize::MAX, "No vehicles")?;
        self.bookings.render(f, usize::MAX, "No bookings")?;
        self.expenses.render(f, usize::MAX, "No expenses")
    }
}

/// The dashboard matching the signed-in identity.
#[derive(Debug)]
pub enum Dashboard {
    User(UserDashboard),
    Admin(AdminDashboard),
}

impl Dashboard {
    /// Guards the session, resolves the identity and loads the matching
    /// dashboard. Admins are redirected to the admin dashboard.
    pub async fn load(client: &ApiClient) -> ApiResult<Self> {
        let session = client.session();
        if !session.guard()? {
            return Err(ClientError::NotAuthenticated);
        }

        let user = match client.me().show().await {
            Ok(user) => Some(user),
            Err(err) => {
                tracing::error!("error loading user info: {}", err);
                if !session.is_authenticated() {
                    return Err(ClientError::NotAuthenticated);
                }
                None
            }
        };

        if user.as_ref().map_or(false, User::is_admin) {
            if session.navigator().current() != View::AdminDashboard {
                session.navigator().redirect(View::AdminDashboard);
            }
            return Ok(Self::Admin(AdminDashboard::load(client, user).await));
        }

        Ok(Self::User(UserDashboard::load(client, user).await))
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dashboard::User(dashboard) => write!(f, "{dashboard}"),
            Dashboard::Admin(dashboard) => write!(f, "{dashboard}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    #[test]
    fn failed_sections_keep_their_error_and_no_items() {
        let section: Section<Group> =
            Section::settle("groups", Err(ClientError::api(StatusCode::FORBIDDEN, "nope")));
        assert!(section.failed());
        assert_eq!(section.count(), 0);
        assert!(section.error.unwrap().contains("nope"));
    }
}
