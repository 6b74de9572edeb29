/// QA state of an atom as recorded in the observing log.
///
/// Declaration order is precedence order; [`QAState::select`] picks the
/// lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QAState {
    #[default]
    None,
    Undefined,
    Fail,
    Usable,
    Pass,
    Check,
}

impl QAState {
    /// The highest-precedence state among `states`, if any.
    pub fn select<I: IntoIterator<Item = QAState>>(states: I) -> Option<QAState> {
        states.into_iter().min()
    }
}
