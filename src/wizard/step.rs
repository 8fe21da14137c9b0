//! Wizard pages and their ordering

use std::fmt;

/// A page of the request wizard.
///
/// The discriminant is the 1-based page number shown in the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    /// Pick the ODF objects to read
    Objects = 1,
    /// TTL and interval
    Parameters = 2,
    /// Dispatch and show the response
    Send = 3,
}

impl Step {
    pub const FIRST: Step = Step::Objects;
    pub const LAST: Step = Step::Send;

    /// All steps in wizard order
    pub fn all() -> &'static [Step] {
        &[Step::Objects, Step::Parameters, Step::Send]
    }

    /// 1-based page number
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(number: u8) -> Option<Step> {
        match number {
            1 => Some(Step::Objects),
            2 => Some(Step::Parameters),
            3 => Some(Step::Send),
            _ => None,
        }
    }

    /// The step after this one, `None` on the last page
    pub fn next(self) -> Option<Step> {
        Step::from_number(self.number() + 1)
    }

    /// The step before this one, `None` on the first page
    pub fn prev(self) -> Option<Step> {
        self.number().checked_sub(1).and_then(Step::from_number)
    }

    /// Title shown in the progress bar
    pub fn title(self) -> &'static str {
        match self {
            Step::Objects => "Select objects",
            Step::Parameters => "Request parameters",
            Step::Send => "Send request",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}
