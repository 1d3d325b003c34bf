use alloc::vec::Vec;
use core::time::Duration;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Tuning for where icons land and how fast they are dealt.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DealLayout {
    pub icon_side: i32,
    pub min_scatter: i32,
    pub top_offset: i32,
    pub deal_delay: Duration,
}

impl DealLayout {
    pub const MAX_ROWS: usize = 3;

    pub const fn icon_size(&self) -> Size {
        Size::square(self.icon_side as f32)
    }

    /// `min((n - 1) / 2, 3)`, but never 0 while there is something to place.
    pub fn row_count(item_count: usize) -> usize {
        if item_count == 0 {
            return 0;
        }
        ((item_count - 1) / 2).clamp(1, Self::MAX_ROWS)
    }

    pub fn column_width(&self, container: Size, item_count: usize) -> i32 {
        match Self::row_count(item_count) {
            0 => 0,
            rows => container.width as i32 / rows as i32,
        }
    }

    /// Inclusive jitter bounds for a cell of `column_width`.
    ///
    /// Collapses to `min_scatter` when the cell is too small to hold an icon plus that margin.
    pub fn scatter_range(&self, column_width: i32) -> (i32, i32) {
        let low = self.min_scatter;
        let high = column_width - self.icon_side;
        if high < low {
            log::warn!(
                "Column width {} too small to scatter icons, placing them at minimum offset",
                column_width
            );
            (low, low)
        } else {
            (low, high)
        }
    }

    /// One jittered position per index, in index order.
    pub fn cell_positions<R: Rng>(
        &self,
        rng: &mut R,
        container: Size,
        item_count: usize,
    ) -> Vec<Point> {
        let rows = Self::row_count(item_count);
        if rows == 0 {
            return Vec::new();
        }

        let column_width = self.column_width(container, item_count);
        let (low, high) = self.scatter_range(column_width);
        let height = container.height as i32;

        (0..item_count)
            .map(|index| {
                let column = (index % rows) as i32;
                let row = (index / rows) as i32;
                let x = rng.random_range(low..=high) + column * column_width;
                let y_jitter = rng.random_range(low..=high);
                let y = height - row * column_width - y_jitter - self.top_offset;
                Point::new(x as f32, y as f32)
            })
            .collect()
    }

    /// Same as [`Self::cell_positions`] but shuffled, so dealing order says nothing about
    /// placement.
    pub fn scatter_positions<R: Rng>(
        &self,
        rng: &mut R,
        container: Size,
        item_count: usize,
    ) -> Vec<Point> {
        let mut positions = self.cell_positions(rng, container, item_count);
        positions.shuffle(rng);
        positions
    }

    pub fn reveal_delay(&self, index: usize) -> Duration {
        self.deal_delay * (index as u32 + 1)
    }
}

impl Default for DealLayout {
    fn default() -> Self {
        Self {
            icon_side: 80,
            min_scatter: 50,
            top_offset: 150,
            deal_delay: Duration::from_millis(800),
        }
    }
}
