pub mod frames;
pub mod writer;

pub use frames::{staden_offsets, FrameTranslator};
pub use writer::{OutputWriter, LINE_WIDTH};

use crate::error::TranseqError;
use std::fmt;
use std::str::FromStr;

/// Which of the six reading frames to emit.
///
/// Frames 1..3 start at body offsets 0..2, frames 4..6 (`-1..-3`) are read
/// on the reverse complement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FrameSpec {
    #[default]
    One,
    Two,
    Three,
    Forward,
    MinusOne,
    MinusTwo,
    MinusThree,
    Reverse,
    Six,
}

impl FrameSpec {
    pub fn mask(self) -> [bool; 6] {
        match self {
            FrameSpec::One => [true, false, false, false, false, false],
            FrameSpec::Two => [false, true, false, false, false, false],
            FrameSpec::Three => [false, false, true, false, false, false],
            FrameSpec::Forward => [true, true, true, false, false, false],
            FrameSpec::MinusOne => [false, false, false, true, false, false],
            FrameSpec::MinusTwo => [false, false, false, false, true, false],
            FrameSpec::MinusThree => [false, false, false, false, false, true],
            FrameSpec::Reverse => [false, false, false, true, true, true],
            FrameSpec::Six => [true; 6],
        }
    }

    pub fn needs_reverse(self) -> bool {
        self.mask()[3..].contains(&true)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FrameSpec::One => "1",
            FrameSpec::Two => "2",
            FrameSpec::Three => "3",
            FrameSpec::Forward => "F",
            FrameSpec::MinusOne => "-1",
            FrameSpec::MinusTwo => "-2",
            FrameSpec::MinusThree => "-3",
            FrameSpec::Reverse => "R",
            FrameSpec::Six => "6",
        }
    }
}

impl FromStr for FrameSpec {
    type Err = TranseqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(FrameSpec::One),
            "2" => Ok(FrameSpec::Two),
            "3" => Ok(FrameSpec::Three),
            "F" => Ok(FrameSpec::Forward),
            "-1" => Ok(FrameSpec::MinusOne),
            "-2" => Ok(FrameSpec::MinusTwo),
            "-3" => Ok(FrameSpec::MinusThree),
            "R" => Ok(FrameSpec::Reverse),
            "6" => Ok(FrameSpec::Six),
            other => Err(TranseqError::InvalidFrame {
                frame: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for FrameSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
