/// An error that can occur while answering an authorization question.
///
/// Forge "not found" responses are deliberately *not* a variant here:
/// they are translated to a deny verdict by [`crate::ForgeOutcome`] before
/// they ever reach this type.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The forge could not be reached, or returned a transport-level
    /// error. Surfaced to the caller; never silently mapped to deny.
    Backend(String),
    /// The `AclSpec` handed to the adapter configures the same pattern
    /// twice for the same principal, which would make rule precedence
    /// ambiguous.
    MisconfiguredAcl(String),
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Error::Backend(ref msg) => {
                write!(f, "forge backend unavailable: {}", msg)
            }
            Error::MisconfiguredAcl(ref msg) => {
                write!(f, "misconfigured ACL: {}", msg)
            }
        }
    }
}
