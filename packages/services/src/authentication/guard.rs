use std::fmt;

use super::authenticator::AuthSession;

/// Navigation targets produced by the session and the route guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Welcome,
    Login,
    Signup,
    ForgotPassword,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Welcome => "/?welcome=true",
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::ForgotPassword => "/forgot-password",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Redirect for pages that need a logged-in user.
pub fn require_auth(session: &AuthSession) -> Option<Route> {
    (!session.is_logged_in()).then_some(Route::Login)
}

/// Redirect for pages only anonymous users should see (login, signup).
pub fn require_guest(session: &AuthSession) -> Option<Route> {
    session.is_logged_in().then_some(Route::Home)
}
