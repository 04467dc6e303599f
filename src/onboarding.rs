//! The get-started carousel shown after login.

use crate::router::{Navigator, Route};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slide {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub description: &'static str,
}

pub const SLIDES: [Slide; 3] = [
    Slide {
        title: "Welcome to GAUHATT",
        subtitle: "Farm to Table",
        description: "Discover the freshest produce directly from local farmers in Nepal. \
                      Connect to a vibrant community making healthy eating easy and sustainable.",
    },
    Slide {
        title: "Support Local Farmers",
        subtitle: "Fair & Direct",
        description: "By cutting out the middlemen, we ensure farmers in the hills and terai \
                      get fair prices. Join us in creating a sustainable ecosystem.",
    },
    Slide {
        title: "Quality You Can Trust",
        subtitle: "Freshness Guaranteed",
        description: "Every item is quality checked before it reaches your kitchen. We guarantee \
                      freshness and purity, delivered right to your doorstep.",
    },
];

/// Carousel position.
#[derive(Debug, Clone, Default)]
pub struct IntroFlow {
    current: usize,
}

impl IntroFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn slide(&self) -> &'static Slide {
        &SLIDES[self.current]
    }

    pub fn is_last(&self) -> bool {
        self.current == SLIDES.len() - 1
    }

    /// Next slide, or leave for the landing page from the last one.
    pub fn next(&mut self, navigator: &dyn Navigator) {
        if self.is_last() {
            navigator.navigate(Route::Landing);
        } else {
            self.current += 1;
        }
    }

    /// Previous slide; no-op on the first.
    pub fn prev(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub fn skip(&mut self, navigator: &dyn Navigator) {
        navigator.navigate(Route::Landing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::History;

    #[test]
    fn test_walk_through() {
        let history = History::new(Route::GetStarted);
        let mut flow = IntroFlow::new();
        assert_eq!(flow.slide().title, "Welcome to GAUHATT");

        flow.next(&history);
        flow.next(&history);
        assert!(flow.is_last());
        assert_eq!(history.current(), Route::GetStarted);

        flow.next(&history);
        assert_eq!(history.current(), Route::Landing);
        assert_eq!(flow.index(), 2);
    }

    #[test]
    fn test_prev_stops_at_first() {
        let history = History::new(Route::GetStarted);
        let mut flow = IntroFlow::new();
        flow.prev();
        assert_eq!(flow.index(), 0);
        flow.next(&history);
        flow.prev();
        assert_eq!(flow.index(), 0);
    }

    #[test]
    fn test_skip() {
        let history = History::new(Route::GetStarted);
        IntroFlow::new().skip(&history);
        assert_eq!(history.entries(), vec![Route::GetStarted, Route::Landing]);
    }
}
