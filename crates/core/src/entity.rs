//! Entity marker: a persistent domain kind with stable identity.

/// Marker for a persistent entity kind.
///
/// `KIND` is the stable, unique name of the kind within one persisted
/// universe. It keys numbering scopes and identifier diagnostics; it never
/// changes once data for the kind exists.
pub trait Entity: Sized + core::fmt::Debug {
    /// Stable kind name (e.g. `"project"`, `"task"`).
    const KIND: &'static str;
}
