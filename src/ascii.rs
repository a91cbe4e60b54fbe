// SPDX-FileCopyrightText: 2025 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Conversions for the Aft Scaffolding Control and Information Interface, which exchanges text
//! with an Intcode program one ASCII code per integer

use std::error::Error;
use std::fmt::{self, Display};

/// Text that couldn't be converted to or from ASCII codes
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AsciiError {
    /// A character in the input text isn't ASCII
    InvalidChar(char),
    /// An integer output by the program isn't an ASCII code
    InvalidInt(i64),
}

impl Display for AsciiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInt(n) => write!(f, "{n} is not a valid ASCII character"),
            Self::InvalidChar(c) => write!(f, "{c:?} is not a valid ASCII character"),
        }
    }
}

impl Error for AsciiError {}

/// Convert `text` into the ASCII codes of its characters
///
/// ```
/// use intcode::ascii::{AsciiError, encode};
/// assert_eq!(encode("NOT A J\n"), Ok(vec![78, 79, 84, 32, 65, 32, 74, 10]));
/// assert_eq!(encode("é"), Err(AsciiError::InvalidChar('é')));
/// ```
pub fn encode(text: &str) -> Result<Vec<i64>, AsciiError> {
    match text.chars().find(|c| !c.is_ascii()) {
        None => Ok(text.bytes().map(i64::from).collect()),
        Some(bad_char) => Err(AsciiError::InvalidChar(bad_char)),
    }
}

/// Convert ASCII codes output by a program into text
pub fn decode(codes: &[i64]) -> Result<String, AsciiError> {
    codes
        .iter()
        .map(|&i| {
            u8::try_from(i)
                .ok()
                .filter(u8::is_ascii)
                .map(char::from)
                .ok_or(AsciiError::InvalidInt(i))
        })
        .collect()
}
