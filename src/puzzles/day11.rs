// SPDX-FileCopyrightText: 2024 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! [Day 11](https://adventofcode.com/2019/day/11): Space Police

use itertools::{Itertools, MinMaxResult};
use std::collections::HashMap;
use std::fmt::{self, Display};

use super::PuzzleError;
use crate::{Interpreter, State};

#[derive(Clone, Copy, Debug, PartialEq)]
enum PanelColor {
    Black { repainted: bool },
    White,
}

impl PanelColor {
    fn report(self) -> i64 {
        i64::from(self == Self::White)
    }

    fn paint(&mut self, color: i64) -> Result<(), PuzzleError> {
        *self = match color {
            0 => Self::Black { repainted: true },
            1 => Self::White,
            i => return Err(PuzzleError::InvalidRobotOutput(i)),
        };
        Ok(())
    }
}

impl Default for PanelColor {
    fn default() -> Self {
        Self::Black { repainted: false }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    fn rotate_left(&mut self) {
        *self = match self {
            Self::Up => Self::Left,
            Self::Left => Self::Down,
            Self::Down => Self::Right,
            Self::Right => Self::Up,
        }
    }
    fn rotate_right(&mut self) {
        *self = match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
struct Location {
    x: i32,
    y: i32,
}

impl std::ops::AddAssign<Direction> for Location {
    fn add_assign(&mut self, dir: Direction) {
        match dir {
            Direction::Up => self.y -= 1,
            Direction::Right => self.x += 1,
            Direction::Down => self.y += 1,
            Direction::Left => self.x -= 1,
        }
    }
}

/// Run the hull painting robot, starting on a panel of the given color
fn paint_hull(
    program: &[i64],
    start: PanelColor,
) -> Result<HashMap<Location, PanelColor>, PuzzleError> {
    let mut interpreter = Interpreter::new(program.iter().copied());
    let mut panels: HashMap<Location, PanelColor> = HashMap::new();
    let mut location = Location::default();
    let mut direction = Direction::Up;
    panels.insert(location, start);

    loop {
        let camera = panels.entry(location).or_default().report();
        let (outputs, state) = interpreter.run_through_inputs([camera])?;
        if outputs.len() % 2 != 0 {
            return Err(PuzzleError::UnexpectedOutput(outputs));
        }
        for (color, turn) in outputs.into_iter().tuples() {
            panels.entry(location).or_default().paint(color)?;
            match turn {
                0 => direction.rotate_left(),
                1 => direction.rotate_right(),
                i => return Err(PuzzleError::InvalidRobotOutput(i)),
            }
            location += direction;
        }
        if state == State::Halted {
            break Ok(panels);
        }
    }
}

/// Columns taken up by each letter, including the gap after it
const GLYPH_WIDTH: usize = 5;

/// Known letters, one 5-bit mask per row with the leftmost column as the highest bit
#[rustfmt::skip]
const GLYPHS: [(char, [u8; 6]); 19] = [
    ('A', [0b01100, 0b10010, 0b10010, 0b11110, 0b10010, 0b10010]),
    ('B', [0b11100, 0b10010, 0b11100, 0b10010, 0b10010, 0b11100]),
    ('C', [0b01100, 0b10010, 0b10000, 0b10000, 0b10010, 0b01100]),
    ('D', [0b11100, 0b10010, 0b10010, 0b10010, 0b10010, 0b11100]),
    ('E', [0b11110, 0b10000, 0b11100, 0b10000, 0b10000, 0b11110]),
    ('F', [0b11110, 0b10000, 0b11100, 0b10000, 0b10000, 0b10000]),
    ('G', [0b01100, 0b10010, 0b10000, 0b10110, 0b10010, 0b01110]),
    ('H', [0b10010, 0b10010, 0b11110, 0b10010, 0b10010, 0b10010]),
    ('I', [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110]),
    ('J', [0b00110, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100]),
    ('K', [0b10010, 0b10100, 0b11000, 0b10100, 0b10100, 0b10010]),
    ('L', [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11110]),
    ('O', [0b01100, 0b10010, 0b10010, 0b10010, 0b10010, 0b01100]),
    ('P', [0b11100, 0b10010, 0b10010, 0b11100, 0b10000, 0b10000]),
    ('R', [0b11100, 0b10010, 0b10010, 0b11100, 0b10100, 0b10010]),
    ('S', [0b01110, 0b10000, 0b10000, 0b01100, 0b00010, 0b11100]),
    ('U', [0b10010, 0b10010, 0b10010, 0b10010, 0b10010, 0b01100]),
    ('Y', [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100]),
    ('Z', [0b11110, 0b00010, 0b00100, 0b01000, 0b10000, 0b11110]),
];

/// The white panels of the hull, cropped to their bounding box, as rows of `#` for white panels
/// and spaces for black ones
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Registration(pub Vec<String>);

impl Registration {
    fn from_panels(panels: &HashMap<Location, PanelColor>) -> Self {
        let white = || {
            panels
                .iter()
                .filter(|&(_, &color)| color == PanelColor::White)
                .map(|(&loc, _)| loc)
        };
        let bounds = |coord: fn(Location) -> i32| match white().map(coord).minmax() {
            MinMaxResult::NoElements => 0..=-1,
            MinMaxResult::OneElement(n) => n..=n,
            MinMaxResult::MinMax(lo, hi) => lo..=hi,
        };
        let (xs, ys) = (bounds(|l| l.x), bounds(|l| l.y));

        Self(
            ys.map(|y| {
                xs.clone()
                    .map(|x| match panels.get(&Location { x, y }) {
                        Some(PanelColor::White) => '#',
                        _ => ' ',
                    })
                    .collect()
            })
            .collect(),
        )
    }

    /// Read the letters painted on the hull, with `?` standing in for anything unrecognized
    pub fn letters(&self) -> String {
        let width = self.0.iter().map(String::len).max().unwrap_or(0);
        (0..width.div_ceil(GLYPH_WIDTH))
            .map(|cell| {
                let mut rows = [0_u8; 6];
                for (mask, row) in rows.iter_mut().zip(&self.0) {
                    let cols = row.bytes().skip(cell * GLYPH_WIDTH).take(GLYPH_WIDTH);
                    for (col, b) in cols.enumerate() {
                        if b == b'#' {
                            *mask |= 1 << (GLYPH_WIDTH - 1 - col);
                        }
                    }
                }
                GLYPHS
                    .iter()
                    .find(|(_, glyph)| *glyph == rows)
                    .map_or('?', |&(c, _)| c)
            })
            .collect()
    }
}

impl Display for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join("\n"))
    }
}

/// The number of panels painted at least once
pub fn part1(program: &[i64]) -> Result<usize, PuzzleError> {
    Ok(paint_hull(program, PanelColor::default())?
        .into_values()
        .filter(|v| *v != PanelColor::default())
        .count())
}

/// The registration identifier painted when starting on a white panel
pub fn part2(program: &[i64]) -> Result<String, PuzzleError> {
    let registration = Registration::from_panels(&paint_hull(program, PanelColor::White)?);
    log::debug!("painted hull:\n{registration}");
    let letters = registration.letters();
    if letters.contains('?') {
        log::warn!("unrecognized letters in the registration:\n{registration}");
    }
    Ok(letters)
}

#[allow(missing_docs)]
pub fn solve(program: &[i64]) -> Result<(usize, String), PuzzleError> {
    Ok((part1(program)?, part2(program)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reads the camera four times, each time painting white and turning left
    const SQUARE: [i64; 15] = [3, 100, 104, 1, 104, 0, 1001, 14, -1, 14, 1005, 14, 0, 99, 4];

    #[test]
    fn counts_painted_panels() {
        assert_eq!(part1(&SQUARE), Ok(4));
    }

    #[test]
    fn unrecognized_registration() {
        assert_eq!(part2(&SQUARE), Ok(String::from("?")));
    }

    #[test]
    fn crops_to_white_panels() {
        let mut panels = HashMap::new();
        panels.insert(Location { x: -3, y: 7 }, PanelColor::Black { repainted: true });
        panels.insert(Location { x: 1, y: 2 }, PanelColor::White);
        panels.insert(Location { x: 2, y: 3 }, PanelColor::White);
        let registration = Registration::from_panels(&panels);
        assert_eq!(registration, Registration(vec!["# ".into(), " #".into()]));
        assert_eq!(registration.to_string(), "# \n #");
    }

    #[test]
    fn reads_letters() {
        let registration = Registration(
            [
                " ##  #  # #   #",
                "#  # #  # #   #",
                "#  # ####  # # ",
                "#### #  #   #  ",
                "#  # #  #   #  ",
                "#  # #  #   #  ",
            ]
            .map(String::from)
            .to_vec(),
        );
        assert_eq!(registration.letters(), "AHY");
        assert_eq!(Registration(Vec::new()).letters(), "");
    }

    #[test]
    fn repainting_black_still_counts() {
        // paints the starting panel black, turns right, then halts
        let code = [3, 0, 104, 0, 104, 1, 99];
        assert_eq!(part1(&code), Ok(1));
        assert_eq!(part2(&code), Ok(String::new()));
    }

    #[test]
    fn bad_robot_output() {
        assert_eq!(
            part1(&[3, 0, 104, 1, 104, 7, 99]),
            Err(PuzzleError::InvalidRobotOutput(7))
        );
        assert_eq!(
            part1(&[3, 0, 104, 2, 104, 0, 99]),
            Err(PuzzleError::InvalidRobotOutput(2))
        );
        assert_eq!(
            part1(&[3, 0, 104, 1, 99]),
            Err(PuzzleError::UnexpectedOutput(vec![1]))
        );
    }
}
