//! Rectangle algebra used by the block merger and the capture region.

use onscreen_types::Rect;

/// Same origin, grown by `right` horizontally and `bottom` vertically
pub fn extend(rect: Rect, right: i32, bottom: i32) -> Rect {
    Rect::new(rect.x, rect.y, rect.width + right, rect.height + bottom)
}

/// Smallest rectangle covering both inputs
pub fn union(a: Rect, b: Rect) -> Rect {
    let x = a.x.min(b.x);
    let y = a.y.min(b.y);
    let width = a.right().max(b.right()) - x;
    let height = a.bottom().max(b.bottom()) - y;
    Rect::new(x, y, width, height)
}

/// Strict overlap: shared edges do not count
pub fn intersects(a: Rect, b: Rect) -> bool {
    b.x < a.right() && a.x < b.right() && b.y < a.bottom() && a.y < b.bottom()
}

/// Shrink by `padding` on every side, clamped at zero size
pub fn inset(rect: Rect, padding: i32) -> Rect {
    Rect::new(
        rect.x + padding,
        rect.y + padding,
        (rect.width - 2 * padding).max(0),
        (rect.height - 2 * padding).max(0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extend_keeps_origin() {
        let rect = extend(Rect::new(3, 4, 10, 20), 40, 5);
        assert_eq!(rect, Rect::new(3, 4, 50, 25));
    }

    #[test]
    fn negative_extension_shrinks() {
        let rect = extend(Rect::new(0, 0, 10, 10), -4, -10);
        assert_eq!(rect, Rect::new(0, 0, 6, 0));
    }

    #[test]
    fn union_covers_both() {
        let a = Rect::new(0, 0, 50, 20);
        let b = Rect::new(52, -5, 50, 20);
        assert_eq!(union(a, b), Rect::new(0, -5, 102, 25));
        assert_eq!(union(a, b), union(b, a));
    }

    #[test]
    fn union_is_idempotent() {
        let samples = [
            Rect::new(0, 0, 10, 10),
            Rect::new(5, 5, 0, 0),
            Rect::new(-20, 7, 3, 100),
            Rect::new(100, 100, 1, 1),
        ];
        for a in samples {
            for b in samples {
                let ab = union(a, b);
                assert_eq!(union(ab, b), ab);
                assert_eq!(union(ab, a), ab);
            }
        }
    }

    #[test]
    fn union_is_associative() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(30, 2, 5, 5);
        let c = Rect::new(-4, 40, 2, 2);
        assert_eq!(union(union(a, b), c), union(a, union(b, c)));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(!intersects(a, Rect::new(10, 0, 10, 10)));
        assert!(!intersects(a, Rect::new(0, 10, 10, 10)));
        assert!(intersects(a, Rect::new(9, 9, 10, 10)));
    }

    #[test]
    fn zero_size_rects() {
        let empty = Rect::new(5, 5, 0, 0);
        assert!(!intersects(empty, empty));
        assert!(!intersects(Rect::new(0, 0, 10, 0), Rect::new(0, 0, 10, 0)));
        // A degenerate rect strictly inside another still overlaps it
        assert!(intersects(Rect::new(0, 0, 10, 10), empty));
    }

    #[test]
    fn inset_clamps() {
        assert_eq!(inset(Rect::new(0, 32, 700, 468), 2), Rect::new(2, 34, 696, 464));
        assert_eq!(inset(Rect::new(0, 0, 3, 3), 2), Rect::new(2, 2, 0, 0));
    }
}
