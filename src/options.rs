//! Configuration options for flattening.
//!
//! ## Examples
//!
//! ```rust
//! use serde_dotted::{FlattenOptions, NamingPolicy};
//!
//! // Snake-case every declared field name
//! let options = FlattenOptions::new().with_policy(NamingPolicy::Snake);
//!
//! // Render absent map keys as a fixed token instead of an empty segment
//! let options = FlattenOptions::new().with_nil_key("[emptyKey]");
//! assert_eq!(options.nil_key, "[emptyKey]");
//! ```

use crate::case::NamingPolicy;

/// Configuration options for flattening.
///
/// # Examples
///
/// ```rust
/// use serde_dotted::{FlattenOptions, NamingPolicy};
///
/// let options = FlattenOptions::new()
///     .with_policies([NamingPolicy::Lower, NamingPolicy::UpperCamel]);
/// assert_eq!(options.policy, Some(NamingPolicy::UpperCamel));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlattenOptions {
    /// Casing applied to declared field names. When set, tag renames are ignored.
    pub policy: Option<NamingPolicy>,
    /// Key segment used for a map entry whose key is absent.
    pub nil_key: String,
}

impl FlattenOptions {
    /// Creates default options: no naming policy, absent map keys render as `""`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the naming policy.
    #[must_use]
    pub fn with_policy(mut self, policy: NamingPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Applies a list of policies in order; the last one wins.
    ///
    /// An empty list leaves the current policy untouched.
    #[must_use]
    pub fn with_policies<I>(mut self, policies: I) -> Self
    where
        I: IntoIterator<Item = NamingPolicy>,
    {
        if let Some(last) = policies.into_iter().last() {
            self.policy = Some(last);
        }
        self
    }

    /// Sets the key segment used for absent map keys.
    #[must_use]
    pub fn with_nil_key(mut self, nil_key: impl Into<String>) -> Self {
        self.nil_key = nil_key.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = FlattenOptions::new();
        assert_eq!(options.policy, None);
        assert!(options.nil_key.is_empty());
    }

    #[test]
    fn test_last_policy_wins() {
        let options = FlattenOptions::new()
            .with_policy(NamingPolicy::Snake)
            .with_policies([NamingPolicy::Upper, NamingPolicy::Identity]);
        assert_eq!(options.policy, Some(NamingPolicy::Identity));
    }

    #[test]
    fn test_empty_policy_list_keeps_policy() {
        let options = FlattenOptions::new()
            .with_policy(NamingPolicy::Lower)
            .with_policies(std::iter::empty::<NamingPolicy>());
        assert_eq!(options.policy, Some(NamingPolicy::Lower));
    }
}
