use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};

pub trait Splittable {
    fn split_equal<const N: usize>(area: Rect, direction: Direction) -> [Rect; N];
}

impl Splittable for Layout {
    fn split_equal<const N: usize>(area: Rect, direction: Direction) -> [Rect; N] {
        let n = N as u32;
        match direction {
            Direction::Horizontal => {
                Self::horizontal(Constraint::from_ratios([(1, n); N])).areas(area)
            }
            Direction::Vertical => Self::vertical(Constraint::from_ratios([(1, n); N])).areas(area),
        }
    }
}

pub trait CenteredBox {
    /// A `width` x `height` box in the middle of `self`, clipped to it.
    fn centered_box(self, width: u16, height: u16) -> Rect;
}

impl CenteredBox for Rect {
    fn centered_box(self, width: u16, height: u16) -> Rect {
        let [row] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(self);
        let [cell] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(row);
        cell
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_box() {
        let area = Rect::new(0, 0, 100, 30);
        assert_eq!(area.centered_box(60, 10), Rect::new(20, 10, 60, 10));
        // larger than the area: clipped
        assert_eq!(area.centered_box(200, 10).width, 100);
    }

    #[test]
    fn test_split_equal() {
        let [left, right] = Layout::split_equal(Rect::new(0, 0, 10, 1), Direction::Horizontal);
        assert_eq!(left, Rect::new(0, 0, 5, 1));
        assert_eq!(right, Rect::new(5, 0, 5, 1));
    }
}
