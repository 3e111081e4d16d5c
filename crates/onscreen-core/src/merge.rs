//! Clustering of line-level OCR fragments into overlay blocks.
//!
//! Two forward sweeps: fragments on the same line are joined left to right,
//! then the resulting lines are stacked into paragraphs top to bottom. Each
//! sweep is a single pass, not a fixed point, so the result depends on the
//! sort order and the intermediate growth of each candidate.

use onscreen_types::{Rect, TextBlock, TextFragment};

use crate::geometry::{extend, intersects, union};

/// Separator inserted between lines joined by the vertical sweep
pub const LINE_SEPARATOR: &str = "\r\n";

enum Slot {
    Active(TextBlock),
    Absorbed,
}

#[derive(Clone, Copy)]
enum Direction {
    Horizontal,
    Vertical,
}

impl Direction {
    /// Search slot as (right, bottom) growth, sized from the candidate height
    fn extension(self, bounds: Rect) -> (i32, i32) {
        match self {
            Direction::Horizontal => (bounds.height * 2, 0),
            Direction::Vertical => (0, bounds.height),
        }
    }

    fn separator(self) -> &'static str {
        match self {
            Direction::Horizontal => "",
            Direction::Vertical => LINE_SEPARATOR,
        }
    }

    fn sort_key(self, bounds: &Rect) -> i32 {
        match self {
            Direction::Horizontal => bounds.x,
            Direction::Vertical => bounds.y,
        }
    }
}

/// Merge fragments that sit next to each other into blocks.
///
/// Callers drop fragments without usable text beforehand. The result is
/// ordered by ascending `y` of each block.
pub fn merge_blocks(fragments: Vec<TextFragment>) -> Vec<TextBlock> {
    let blocks = fragments.into_iter().map(TextBlock::from).collect();
    let lines = sweep(blocks, Direction::Horizontal);
    sweep(lines, Direction::Vertical)
}

fn sweep(mut blocks: Vec<TextBlock>, direction: Direction) -> Vec<TextBlock> {
    // Stable: equal keys keep input order
    blocks.sort_by_key(|block| direction.sort_key(&block.bounds));

    let mut slots: Vec<Slot> = blocks.into_iter().map(Slot::Active).collect();

    for i in 0..slots.len() {
        let Slot::Active(mut current) = std::mem::replace(&mut slots[i], Slot::Absorbed) else {
            continue;
        };

        // Fixed for the whole inner pass, measured before any growth
        let (right, bottom) = direction.extension(current.bounds);

        for slot in slots.iter_mut().skip(i + 1) {
            let Slot::Active(other) = slot else {
                continue;
            };
            if !intersects(extend(current.bounds, right, bottom), other.bounds) {
                continue;
            }

            current.bounds = union(current.bounds, other.bounds);
            current.text.push_str(direction.separator());
            current.text.push_str(&other.text);
            *slot = Slot::Absorbed;
        }

        slots[i] = Slot::Active(current);
    }

    slots
        .into_iter()
        .filter_map(|slot| match slot {
            Slot::Active(block) => Some(block),
            Slot::Absorbed => None,
        })
        .collect()
}
