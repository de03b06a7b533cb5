//! Closed choice domains for discriminators and lifecycle states.

/// A closed, named domain of enumerated values.
///
/// Implemented by application enums used as `Typed` discriminators or
/// `Lifecycle` states. The domain is closed: every valid value appears in
/// `all()`, and codes are unique within one domain.
pub trait ChoiceDomain: Copy + Eq + core::fmt::Debug + 'static {
    /// Name of the field choice definition this domain belongs to.
    const DOMAIN: &'static str;

    /// Stable code of this value within the domain.
    fn code(&self) -> &'static str;

    /// Every valid value of the domain.
    fn all() -> &'static [Self];

    /// Resolve a code back to a value, if it belongs to the domain.
    fn from_code(code: &str) -> Option<Self> {
        Self::all().iter().copied().find(|c| c.code() == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    enum Flavor {
        Plain,
        Salted,
    }

    impl ChoiceDomain for Flavor {
        const DOMAIN: &'static str = "flavor";

        fn code(&self) -> &'static str {
            match self {
                Flavor::Plain => "plain",
                Flavor::Salted => "salted",
            }
        }

        fn all() -> &'static [Self] {
            &[Flavor::Plain, Flavor::Salted]
        }
    }

    #[test]
    fn from_code_resolves_known_values() {
        assert_eq!(Flavor::from_code("salted"), Some(Flavor::Salted));
        assert_eq!(Flavor::from_code("umami"), None);
    }
}
