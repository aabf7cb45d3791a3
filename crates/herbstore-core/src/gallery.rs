use crate::catalog::Product;

/// Image carousel state for the product detail screen.
///
/// Holds an index into the product's image list; navigation wraps around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery<'a> {
    images: &'a [String],
    index: usize,
}

impl<'a> Gallery<'a> {
    #[must_use]
    pub fn new(product: &'a Product) -> Self {
        Self {
            images: &product.images,
            index: 0,
        }
    }

    /// The image currently shown, or `None` for a product without images.
    #[must_use]
    pub fn current(&self) -> Option<&'a str> {
        self.images.get(self.index).map(String::as_str)
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// One-based position and total, for the `n / m` badge.
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        (self.index + 1, self.images.len())
    }

    pub fn next_image(&mut self) {
        if !self.images.is_empty() {
            self.index = (self.index + 1) % self.images.len();
        }
    }

    pub fn prev_image(&mut self) {
        if !self.images.is_empty() {
            self.index = (self.index + self.images.len() - 1) % self.images.len();
        }
    }

    /// Jumps to a thumbnail. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.images.len() {
            self.index = index;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_catalog;

    #[test]
    fn starts_on_thumbnail() {
        let catalog = builtin_catalog();
        let product = catalog.get("p1").unwrap();
        let gallery = Gallery::new(product);
        assert_eq!(gallery.current(), product.thumbnail());
        assert_eq!(gallery.position(), (1, 4));
    }

    #[test]
    fn next_wraps_to_first() {
        let catalog = builtin_catalog();
        let product = catalog.get("p1").unwrap();
        let mut gallery = Gallery::new(product);
        for _ in 0..4 {
            gallery.next_image();
        }
        assert_eq!(gallery.index(), 0);
    }

    #[test]
    fn prev_wraps_to_last() {
        let catalog = builtin_catalog();
        let product = catalog.get("p2").unwrap();
        let mut gallery = Gallery::new(product);
        gallery.prev_image();
        assert_eq!(gallery.index(), 3);
        assert_eq!(gallery.current(), product.images.last().map(String::as_str));
    }

    #[test]
    fn select_ignores_out_of_range() {
        let catalog = builtin_catalog();
        let mut gallery = Gallery::new(catalog.get("p2").unwrap());
        gallery.select(2);
        assert_eq!(gallery.position(), (3, 4));
        gallery.select(10);
        assert_eq!(gallery.index(), 2);
    }

    #[test]
    fn empty_gallery_navigation_is_noop() {
        let mut product = builtin_catalog().get("p1").cloned().unwrap();
        product.images.clear();
        let mut gallery = Gallery::new(&product);
        gallery.next_image();
        gallery.prev_image();
        assert!(gallery.is_empty());
        assert!(gallery.current().is_none());
    }
}
