//! Route guarding.
//!
//! Which views a visitor may reach is a pure function of the session's role
//! and the route's requirement. Nothing is remembered between navigations;
//! the decision is recomputed every time.
use std::fmt;

use session::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Login,
    Register,
    AdminLogin,
    AdminHome,
    PatientHome,
    Analytics,
    InsurancePlans,
}

/// What a route asks of the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Anyone, signed in or not.
    Open,
    /// Only visitors without a session (login, register, landing page).
    GuestOnly,
    /// Any signed-in role.
    SignedIn,
    /// Exactly this role.
    Role(Role),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Render,
    RedirectTo(View),
}

/// Outcome of navigating to a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(View),
    Redirect(View),
    NotFound,
}

const ROUTES: &[(&str, View)] = &[
    ("/", View::Home),
    ("/login", View::Login),
    ("/register", View::Register),
    ("/admin/login", View::AdminLogin),
    ("/admin", View::AdminHome),
    ("/dashboard", View::PatientHome),
    ("/analytics", View::Analytics),
    ("/insurance-plans", View::InsurancePlans),
];

impl View {
    pub fn path(self) -> &'static str {
        match self {
            View::Home => "/",
            View::Login => "/login",
            View::Register => "/register",
            View::AdminLogin => "/admin/login",
            View::AdminHome => "/admin",
            View::PatientHome => "/dashboard",
            View::Analytics => "/analytics",
            View::InsurancePlans => "/insurance-plans",
        }
    }

    pub fn requirement(self) -> Requirement {
        match self {
            View::Home | View::Login | View::Register | View::AdminLogin => Requirement::GuestOnly,
            View::AdminHome => Requirement::Role(Role::Admin),
            View::PatientHome => Requirement::Role(Role::Patient),
            View::Analytics | View::InsurancePlans => Requirement::SignedIn,
        }
    }

    /// Looks up the view for a path. Query strings, fragments and a trailing
    /// slash are ignored.
    pub fn resolve(path: &str) -> Option<View> {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let trimmed = path.trim_end_matches('/');
        let path = if trimmed.is_empty() { "/" } else { trimmed };

        ROUTES
            .iter()
            .find(|(p, _)| *p == path)
            .map(|(_, view)| *view)
    }

    pub fn all() -> impl Iterator<Item = View> {
        ROUTES.iter().map(|(_, v)| *v)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Landing view for a role.
pub fn home_view(role: Role) -> View {
    match role {
        Role::Admin => View::AdminHome,
        Role::Patient => View::PatientHome,
    }
}

/// Login view for a route restricted to `required`.
pub fn login_view_for(required: Role) -> View {
    match required {
        Role::Admin => View::AdminLogin,
        Role::Patient => View::Login,
    }
}

/// Target of the navigation bar's logo link.
pub fn home_link(role: Option<Role>) -> View {
    role.map(home_view).unwrap_or(View::Home)
}

pub fn guard(role: Option<Role>, requirement: Requirement) -> Action {
    match (requirement, role) {
        (Requirement::Open, _) => Action::Render,

        (Requirement::GuestOnly, None) => Action::Render,
        (Requirement::GuestOnly, Some(current)) => Action::RedirectTo(home_view(current)),

        (Requirement::SignedIn, None) => Action::RedirectTo(View::Login),
        (Requirement::SignedIn, Some(_)) => Action::Render,

        (Requirement::Role(required), None) => Action::RedirectTo(login_view_for(required)),
        (Requirement::Role(required), Some(current)) if current != required => {
            Action::RedirectTo(home_view(current))
        }
        (Requirement::Role(_), Some(_)) => Action::Render,
    }
}

/// Resolves `path` and applies [`guard`].
pub fn navigate(role: Option<Role>, path: &str) -> Navigation {
    let Some(view) = View::resolve(path) else {
        return Navigation::NotFound;
    };

    match guard(role, view.requirement()) {
        Action::Render => Navigation::Render(view),
        Action::RedirectTo(target) => Navigation::Redirect(target),
    }
}
