//! Key position identifiers and the position space they live in.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

/// Opaque identifier of one physical key slot.
///
/// The editor never interprets the contents; it only compares and orders
/// them. Grid-based spaces produce ids of the form `k-<row>-<col>` (1-based).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionId(String);

impl PositionId {
    /// Creates a position id from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates the id of a grid slot (1-based row and column).
    #[must_use]
    pub fn grid(row: u8, col: u8) -> Self {
        Self(format!("k-{row}-{col}"))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the row and column back out of a grid id.
    ///
    /// Returns `None` for ids that do not follow the `k-<row>-<col>` form.
    #[must_use]
    pub fn grid_coordinates(&self) -> Option<(u8, u8)> {
        let rest = self.0.strip_prefix("k-")?;
        let (row, col) = rest.split_once('-')?;
        Some((row.parse().ok()?, col.parse().ok()?))
    }
}

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PositionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PositionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for PositionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Ordered, finite enumeration of the valid key positions of a board.
///
/// The space is owned by the host. The editor and the code generator only
/// iterate it; row grouping decides where line breaks go in generated code.
pub trait PositionSpace {
    /// Positions grouped by row, in output order. Rows are never empty.
    fn rows(&self) -> Vec<Vec<PositionId>>;

    /// All positions in row-major order.
    fn positions(&self) -> Vec<PositionId> {
        self.rows().into_iter().flatten().collect()
    }

    /// Returns true if the position is part of this space.
    fn contains(&self, position: &PositionId) -> bool {
        self.positions().iter().any(|p| p == position)
    }
}

/// Inclusive column ranges per row of the Redox board (5 rows x 17 columns).
const REDOX_COLUMNS: [&[(u8, u8)]; 5] = [
    &[(1, 6), (12, 17)],
    &[(1, 7), (11, 17)],
    &[(1, 7), (11, 17)],
    &[(1, 8), (10, 17)],
    &[(1, 4), (6, 8), (10, 12), (14, 17)],
];

/// Rectangular grid of key slots with optional holes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyGrid {
    rows: u8,
    cols: u8,
    holes: BTreeSet<(u8, u8)>,
}

impl KeyGrid {
    /// Creates a full grid with `rows` x `cols` slots.
    #[must_use]
    pub fn new(rows: u8, cols: u8) -> Self {
        Self {
            rows,
            cols,
            holes: BTreeSet::new(),
        }
    }

    /// Removes the given (1-based) slots from the grid.
    #[must_use]
    pub fn with_holes(mut self, holes: impl IntoIterator<Item = (u8, u8)>) -> Self {
        self.holes.extend(holes);
        self
    }

    /// The 70-key Redox grid.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn redox() -> Self {
        let mut holes = Vec::new();
        for (row_idx, ranges) in REDOX_COLUMNS.iter().enumerate() {
            let row = row_idx as u8 + 1;
            for col in 1..=17 {
                if !ranges.iter().any(|&(from, to)| (from..=to).contains(&col)) {
                    holes.push((row, col));
                }
            }
        }
        Self::new(REDOX_COLUMNS.len() as u8, 17).with_holes(holes)
    }

    /// Number of key slots that are not holes.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.rows) * usize::from(self.cols) - self.holes_in_bounds()
    }

    /// Returns true if the grid has no key slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn holes_in_bounds(&self) -> usize {
        self.holes
            .iter()
            .filter(|&&(r, c)| (1..=self.rows).contains(&r) && (1..=self.cols).contains(&c))
            .count()
    }
}

impl Default for KeyGrid {
    fn default() -> Self {
        Self::redox()
    }
}

impl PositionSpace for KeyGrid {
    fn rows(&self) -> Vec<Vec<PositionId>> {
        (1..=self.rows)
            .map(|row| {
                (1..=self.cols)
                    .filter(|&col| !self.holes.contains(&(row, col)))
                    .map(|col| PositionId::grid(row, col))
                    .collect::<Vec<_>>()
            })
            .filter(|row| !row.is_empty())
            .collect()
    }

    fn contains(&self, position: &PositionId) -> bool {
        position.grid_coordinates().is_some_and(|(r, c)| {
            (1..=self.rows).contains(&r)
                && (1..=self.cols).contains(&c)
                && !self.holes.contains(&(r, c))
        })
    }
}
