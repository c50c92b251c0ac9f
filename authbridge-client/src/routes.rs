/// Route guarding
///
/// The shell's three routes and the rule resolving where a request lands:
/// Profile requires a stored token and falls back to Login without one;
/// public routes pass through; no route at all lands on Login.

/// Routes the shell can land on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Registration form
    Register,
    /// Login form
    Login,
    /// Authenticated profile view
    Profile,
}

/// Resolves the requested route against token presence
pub fn resolve(requested: Option<Route>, has_token: bool) -> Route {
    match requested {
        Some(Route::Profile) if !has_token => Route::Login,
        Some(route) => route,
        None => Route::Login,
    }
}
