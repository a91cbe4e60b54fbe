// SPDX-FileCopyrightText: 2025 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

use itertools::Itertools;
use std::collections::BTreeMap;
use std::fmt;

use crate::NegativeMemAccess;

static ZERO: i64 = 0;

/// Intcode memory
///
/// Addresses below the length of the loaded program are backed by a contiguous [`Vec`]. Anything
/// written past the end of the program lands in an ordered overflow map, so a program may use
/// arbitrarily large addresses without allocating everything in between. Cells that were never
/// written read as `0`.
#[derive(Clone, Default)]
pub struct Memory {
    dense: Vec<i64>,
    sparse: BTreeMap<u64, i64>,
}

impl Memory {
    /// The number of cells in the densely-backed region, which is the length of the program that
    /// the memory was created from
    pub fn dense_len(&self) -> usize {
        self.dense.len()
    }

    /// Read the cell at `address`, failing if it's negative
    ///
    /// ```
    /// use intcode::Memory;
    /// let mem: Memory = [1, 2, 3].into_iter().collect();
    /// assert_eq!(mem.read(2), Ok(3));
    /// assert_eq!(mem.read(1 << 40), Ok(0));
    /// assert!(mem.read(-1).is_err());
    /// ```
    pub fn read(&self, address: i64) -> Result<i64, NegativeMemAccess> {
        let address = u64::try_from(address).map_err(|_| NegativeMemAccess(address))?;
        Ok(self[address])
    }

    /// Write `value` to the cell at `address`, failing if it's negative
    pub fn write(&mut self, address: i64, value: i64) -> Result<(), NegativeMemAccess> {
        let address = u64::try_from(address).map_err(|_| NegativeMemAccess(address))?;
        self[address] = value;
        Ok(())
    }

    fn dense_index(&self, address: u64) -> Option<usize> {
        usize::try_from(address)
            .ok()
            .filter(|&i| i < self.dense.len())
    }
}

impl PartialEq for Memory {
    fn eq(&self, other: &Self) -> bool {
        fn nonzero(m: &Memory) -> impl Iterator<Item = (&u64, &i64)> {
            m.sparse.iter().filter(|&(_, &v)| v != 0)
        }
        self.dense == other.dense && nonzero(self).eq(nonzero(other))
    }
}

impl FromIterator<i64> for Memory {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self {
            dense: iter.into_iter().collect(),
            sparse: BTreeMap::new(),
        }
    }
}

impl std::ops::Index<u64> for Memory {
    type Output = i64;
    fn index(&self, address: u64) -> &i64 {
        match self.dense_index(address) {
            Some(i) => &self.dense[i],
            None => self.sparse.get(&address).unwrap_or(&ZERO),
        }
    }
}

impl std::ops::IndexMut<u64> for Memory {
    fn index_mut(&mut self, address: u64) -> &mut i64 {
        match self.dense_index(address) {
            Some(i) => &mut self.dense[i],
            None => self.sparse.entry(address).or_insert(0),
        }
    }
}

impl fmt::Debug for Memory {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Memory")
            .field("dense", &self.dense)
            .field(
                "overflow",
                &format_args!(
                    "{{{}}}",
                    self.sparse
                        .iter()
                        .filter(|&(_, &v)| v != 0)
                        .map(|(k, v)| format!("{k:#x}: {v}"))
                        .join(", ")
                ),
            )
            .finish()
    }
}
