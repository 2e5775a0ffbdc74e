//! ui::listing
//!
//! Column-major listings, the layout used by `ls`: items fill the first
//! column top to bottom, then the next.

/// Spaces added after the longest item to form a column.
const GUTTER: usize = 4;

/// A set of short items laid out in columns.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    items: Vec<String>,
}

impl Listing {
    /// Create an empty listing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item.
    pub fn item(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the listing has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Render to lines for a terminal `width` columns wide.
    ///
    /// Each cell is padded to the longest item plus a four-space gutter.
    /// An empty listing renders to an empty string.
    pub fn render(&self, width: usize) -> String {
        if self.items.is_empty() {
            return String::new();
        }

        let longest = self
            .items
            .iter()
            .map(|i| i.chars().count())
            .max()
            .unwrap_or(0);
        let padding = longest + GUTTER;
        let cols = (width / padding).max(1);
        let rows = self.items.len().div_ceil(cols);

        let mut out = String::new();
        for r in 0..rows {
            let mut line = String::new();
            for c in 0..cols {
                if let Some(item) = self.items.get(r + c * rows) {
                    line.push_str(item);
                    line.push_str(&" ".repeat(padding - item.chars().count()));
                }
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(items: &[&str]) -> Listing {
        let mut l = Listing::new();
        for item in items {
            l.item(*item);
        }
        l
    }

    #[test]
    fn empty_renders_nothing() {
        assert_eq!(Listing::new().render(80), "");
        assert!(Listing::new().is_empty());
    }

    #[test]
    fn fills_columns_top_to_bottom() {
        // padding = 1 + 4 = 5, width 10 -> 2 columns, 5 items -> 3 rows
        let l = listing(&["a", "b", "c", "d", "e"]);
        assert_eq!(l.render(10), "a    d\nb    e\nc\n");
    }

    #[test]
    fn narrow_terminal_still_gets_one_column() {
        let l = listing(&["install", "status"]);
        assert_eq!(l.render(3), "install\nstatus\n");
        assert_eq!(l.len(), 2);
    }
}
