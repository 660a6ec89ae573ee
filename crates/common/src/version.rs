use serde::{Deserialize, Serialize};

/// Write version of a stored record, used for optimistic concurrency control.
///
/// A record that was never written is at version 0. The first write moves it
/// to version 1 and every later write increments by one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    /// Creates a version from a raw value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// The version of a record that does not exist yet.
    pub fn initial() -> Self {
        Self(0)
    }

    /// The version assigned by the first write.
    pub fn first() -> Self {
        Self(1)
    }

    /// Returns the version following this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Version {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_ordering_and_next() {
        let v1 = Version::new(1);
        let v2 = Version::new(2);
        assert!(v1 < v2);
        assert_eq!(v1.next(), v2);
    }

    #[test]
    fn initial_precedes_first() {
        assert_eq!(Version::initial().as_u64(), 0);
        assert_eq!(Version::initial().next(), Version::first());
        assert_eq!(Version::default(), Version::initial());
    }
}
