//! Maps the selected slice to the one the on-screen pointer actually rests on.
//!
//! The wheel renderer stops with `prize_index` under its own zero mark, while
//! the pointer is drawn at the bottom of the wheel. The offset between the two
//! depends only on the slice count and has to be recalibrated if either the
//! pointer position or the renderer's zero convention changes.

use crate::catalog::Catalog;
use crate::error::{Result, SpinError};
use crate::types::Prize;
use serde::{Deserialize, Serialize};

/// Pointer geometry relative to the renderer's slice zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Calibration {
    /// Pointer opposite the renderer's zero mark.
    #[default]
    HalfTurn,
    /// Pointer on the zero mark; selection is shown as-is.
    None,
}

impl Calibration {
    pub fn offset(&self, slice_count: usize) -> usize {
        match self {
            Calibration::HalfTurn => half_turn_offset(slice_count),
            Calibration::None => 0,
        }
    }

    pub fn aligned_index(&self, slice_count: usize, selected: usize) -> Result<usize> {
        if selected >= slice_count {
            return Err(SpinError::IndexOutOfRange {
                index: selected,
                len: slice_count,
            });
        }

        Ok((selected + self.offset(slice_count) + slice_count) % slice_count)
    }

    pub fn align_result<'a>(&self, catalog: &'a Catalog, selected: usize) -> Result<&'a Prize> {
        let index = self.aligned_index(catalog.len(), selected)?;
        catalog.get(index).ok_or(SpinError::IndexOutOfRange {
            index,
            len: catalog.len(),
        })
    }
}

/// `floor(n/2)`, minus one for even slice counts.
pub fn half_turn_offset(slice_count: usize) -> usize {
    let half = slice_count / 2;
    if slice_count % 2 == 0 {
        half.saturating_sub(1)
    } else {
        half
    }
}

pub fn align_result(catalog: &Catalog, selected: usize) -> Result<&Prize> {
    Calibration::HalfTurn.align_result(catalog, selected)
}
