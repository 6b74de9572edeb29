/// Target-of-opportunity type of a program or observation.
///
/// Ordered so that a program of a given type may only contain observations of
/// the same or a lower type: `Standard < Rapid < Interrupt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TooType {
    Standard,
    Rapid,
    Interrupt,
}

impl TooType {
    /// Returns true if an observation of type `other` may appear under `self`.
    pub fn admits(self, other: TooType) -> bool {
        other <= self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rapid_admits_standard_not_interrupt() {
        assert!(TooType::Rapid.admits(TooType::Standard));
        assert!(TooType::Rapid.admits(TooType::Rapid));
        assert!(!TooType::Rapid.admits(TooType::Interrupt));
    }
}
