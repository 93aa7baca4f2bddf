pub mod fasta;

/// What to do with a body character outside `ACGTUN`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OnInvalid {
    /// Log a warning and translate the base as `N`.
    #[default]
    Warn,
    /// Abort the run with [`crate::TranseqError::InvalidChar`].
    Raise,
}
