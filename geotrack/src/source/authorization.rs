//! Location permission state as reported by the host platform.

use std::fmt;

/// Authorization for location access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorizationStatus {
    /// The user has not been asked yet.
    #[default]
    NotDetermined,
    /// Access is blocked by policy (parental controls, MDM).
    Restricted,
    /// The user refused access.
    Denied,
    /// Access granted, including in the background.
    AuthorizedAlways,
    /// Access granted while the app is in use.
    AuthorizedWhenInUse,
}

impl AuthorizationStatus {
    /// Whether location access is granted.
    ///
    /// Returns `None` while undetermined.
    pub fn is_authorized(&self) -> Option<bool> {
        match self {
            Self::NotDetermined => None,
            Self::Restricted | Self::Denied => Some(false),
            Self::AuthorizedAlways | Self::AuthorizedWhenInUse => Some(true),
        }
    }
}

impl fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotDetermined => write!(f, "NotDetermined"),
            Self::Restricted => write!(f, "Restricted"),
            Self::Denied => write!(f, "Denied"),
            Self::AuthorizedAlways => write!(f, "AuthorizedAlways"),
            Self::AuthorizedWhenInUse => write!(f, "AuthorizedWhenInUse"),
        }
    }
}
