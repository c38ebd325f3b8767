use std::fmt;

use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Login,
    Register,
    AdminDashboard,
    UserDashboard,
    Profile,
    Groups,
    Vehicles,
    Bookings,
    Expenses,
    Funds,
    Contracts,
    Votes,
    Payments,
    UsageHistory,
    Reports,
    Disputes,
}

impl View {
    pub fn path(&self) -> &'static str {
        match self {
            View::Login => "login.html",
            View::Register => "register.html",
            View::AdminDashboard => "admin-dashboard.html",
            View::UserDashboard => "user-dashboard.html",
            View::Profile => "profile.html",
            View::Groups => "groups.html",
            View::Vehicles => "vehicles.html",
            View::Bookings => "bookings.html",
            View::Expenses => "expenses.html",
            View::Funds => "funds.html",
            View::Contracts => "contracts.html",
            View::Votes => "votes.html",
            View::Payments => "payments.html",
            View::UsageHistory => "usage-history.html",
            View::Reports => "reports.html",
            View::Disputes => "disputes.html",
        }
    }

    /// Views reachable without a session.
    pub fn is_public(&self) -> bool {
        matches!(self, View::Login | View::Register)
    }

    pub fn dashboard_for(is_admin: bool) -> Self {
        if is_admin {
            View::AdminDashboard
        } else {
            View::UserDashboard
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Performs view changes on behalf of the session observer.
pub trait Navigator: Send + Sync {
    fn current(&self) -> View;
    fn redirect(&self, to: View);
}

/// Navigator that tracks the current view and remembers every redirect.
#[derive(Debug)]
pub struct History {
    current: Mutex<View>,
    redirects: Mutex<Vec<View>>,
}

impl History {
    pub fn starting_at(view: View) -> Self {
        Self {
            current: Mutex::new(view),
            redirects: Mutex::new(Vec::new()),
        }
    }

    pub fn redirects(&self) -> Vec<View> {
        self.redirects.lock().clone()
    }

    pub fn last_redirect(&self) -> Option<View> {
        self.redirects.lock().last().copied()
    }
}

impl Navigator for History {
    fn current(&self) -> View {
        *self.current.lock()
    }

    fn redirect(&self, to: View) {
        tracing::debug!("navigating to {}", to);
        *self.current.lock() = to;
        self.redirects.lock().push(to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_tracks_current_view() {
        let history = History::starting_at(View::Groups);
        assert_eq!(history.current(), View::Groups);

        history.redirect(View::Login);
        assert_eq!(history.current(), View::Login);
        assert_eq!(history.redirects(), vec![View::Login]);
    }

    #[test]
    fn dashboards_are_chosen_by_role() {
        assert_eq!(View::dashboard_for(true).path(), "admin-dashboard.html");
        assert_eq!(View::dashboard_for(false).path(), "user-dashboard.html");
        assert!(View::Login.is_public());
        assert!(!View::Funds.is_public());
    }
}
