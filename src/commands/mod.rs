//! Front-end commands. Each returns a serialisable view; the CLI prints it as
//! JSON or through its `Display` rendering.

pub mod history;
pub mod scan;
pub mod search;

/// Character used for text bar charts.
const BAR: char = '█';

/// Longest bar drawn by the insights chart.
const BAR_WIDTH: usize = 40;

/// Scale `count` against `max` into a bar of at most `BAR_WIDTH` cells.
/// Non-zero counts always get at least one cell.
pub(crate) fn bar(count: usize, max: usize) -> String {
    if count == 0 || max == 0 {
        return String::new();
    }
    let cells = (count * BAR_WIDTH).div_ceil(max).clamp(1, BAR_WIDTH);
    std::iter::repeat(BAR).take(cells).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_scales_to_width() {
        assert_eq!(bar(10, 10).chars().count(), BAR_WIDTH);
        assert_eq!(bar(5, 10).chars().count(), BAR_WIDTH / 2);
        assert_eq!(bar(1, 1000).chars().count(), 1);
        assert!(bar(0, 10).is_empty());
    }
}
