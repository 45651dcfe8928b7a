use derive_more::Display;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Display)]
pub enum LoopState {
    /// No sample has been accumulated yet.
    Idle,
    Accumulating,
    /// The samples target has been reached.
    Converged,
    /// A step failed; the image keeps whatever was accumulated before.
    Halted,
}

impl LoopState {
    #[must_use]
    pub fn is_finished(self) -> bool {
        matches!(self, LoopState::Converged | LoopState::Halted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(LoopState::Idle, false)]
    #[case(LoopState::Accumulating, false)]
    #[case(LoopState::Converged, true)]
    #[case(LoopState::Halted, true)]
    fn test_is_finished(#[case] state: LoopState, #[case] expected: bool) {
        assert_eq!(state.is_finished(), expected);
    }
}
