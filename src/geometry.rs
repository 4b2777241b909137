//! Fixed card geometry.

/// Card canvas size, in pixels.
pub const CARD_SIZE: (i32, i32) = (2800, 2000);

/// Title area of an unupgraded card.
pub const TITLE: Region = Region::new(500, 50, 2300, 250);

/// Title area of an upgraded card, wider to fit the longer names.
pub const TITLE_UPGRADED: Region = Region::new(200, 50, 2600, 250);

/// Area holding the `input -> output` cost line.
pub const COST: Region = Region::new(1000, 275, 1800, 425);

/// Area reserved for the conversion artwork.
pub const CONVERSION: Region = Region::new(375, 550, 2425, 1500);

/// An axis aligned rectangle given by its edges.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Region {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Region {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Title area for the given upgrade state.
    pub const fn title(upgraded: bool) -> Self {
        if upgraded {
            TITLE_UPGRADED
        } else {
            TITLE
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn center_x(&self) -> f64 {
        (self.left + self.right) as f64 / 2.0
    }

    pub fn overlaps(&self, other: &Region) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_fit_the_card_without_overlapping() {
        let (w, h) = CARD_SIZE;
        for region in [TITLE, TITLE_UPGRADED, COST, CONVERSION] {
            assert!(region.left >= 0 && region.right <= w);
            assert!(region.top >= 0 && region.bottom <= h);
        }
        for title in [TITLE, TITLE_UPGRADED] {
            assert!(!title.overlaps(&COST));
            assert!(!title.overlaps(&CONVERSION));
        }
        assert!(!COST.overlaps(&CONVERSION));
    }

    #[test]
    fn upgraded_title_is_wider() {
        assert!(Region::title(true).width() > Region::title(false).width());
        assert_eq!(Region::title(false).width(), 1800);
        assert_eq!(TITLE.center_x(), TITLE_UPGRADED.center_x());
    }
}
