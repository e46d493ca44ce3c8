//! Value objects for the report domain

use std::fmt;

use serde::{Deserialize, Serialize};

/// Letter grade derived from the upstream 1-5 numeric rating.
///
/// The conversion is `char(64 + rating)`: 1 maps to A, 5 maps to E.
/// Ratings outside that range carry no meaning and are rejected before a
/// grade is ever constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
}

impl Grade {
    /// Convert an upstream rating into a grade. Returns `None` for any
    /// rating outside 1-5.
    pub fn from_rating(rating: u8) -> Option<Self> {
        match rating {
            1 => Some(Grade::A),
            2 => Some(Grade::B),
            3 => Some(Grade::C),
            4 => Some(Grade::D),
            5 => Some(Grade::E),
            _ => None,
        }
    }

    /// The numeric rating this grade was derived from.
    pub fn rating(self) -> u8 {
        match self {
            Grade::A => 1,
            Grade::B => 2,
            Grade::C => 3,
            Grade::D => 4,
            Grade::E => 5,
        }
    }

    /// The letter as produced by the `char(64 + rating)` formula.
    pub fn letter(self) -> char {
        (b'@' + self.rating()) as char
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Coarse project size label computed from the lines-of-code count.
pub fn size_rating(lines_of_code: u64) -> &'static str {
    match lines_of_code {
        0..1_000 => "XS",
        1_000..10_000 => "S",
        10_000..100_000 => "M",
        100_000..500_000 => "L",
        _ => "XL",
    }
}
