//! Turning entries into display fragments and putting them on a display surface.

use crate::model::{Amount, Entry};
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt::{Display, Formatter};

/// The default currency marker shown before prices and the total.
pub const DEFAULT_CURRENCY: &str = "$";

/// The displayed form of one entry: a name region and a price region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment {
    name: String,
    price: String,
}

impl Fragment {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> &str {
        &self.price
    }
}

impl Display for Fragment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}  {}", self.name, self.price)
    }
}

/// Something entries can be shown on.
pub trait Surface {
    /// Replaces the heading text.
    fn set_heading(&mut self, text: &str);

    /// Inserts `fragment` above every fragment already shown.
    fn prepend(&mut self, fragment: Fragment);

    /// Replaces the total text.
    fn set_total(&mut self, text: String);

    /// Replaces the shown list and total with those of `staged` in one step. The heading is
    /// left alone.
    fn commit(&mut self, staged: Page);
}

/// An in-memory display surface. Its `Display` impl draws it as a text table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Page {
    heading: String,
    /// Newest first.
    items: VecDeque<Fragment>,
    total: String,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    /// The shown fragments, newest first.
    pub fn items(&self) -> impl Iterator<Item = &Fragment> {
        self.items.iter()
    }

    pub fn total(&self) -> &str {
        &self.total
    }
}

impl Surface for Page {
    fn set_heading(&mut self, text: &str) {
        self.heading = text.to_string();
    }

    fn prepend(&mut self, fragment: Fragment) {
        self.items.push_front(fragment);
    }

    fn set_total(&mut self, text: String) {
        self.total = text;
    }

    fn commit(&mut self, staged: Page) {
        self.items = staged.items;
        self.total = staged.total;
    }
}

impl Display for Page {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name_width = self
            .items
            .iter()
            .map(|i| i.name.chars().count())
            .chain(std::iter::once("Total".len()))
            .max()
            .unwrap_or_default();
        let price_width = self
            .items
            .iter()
            .map(|i| i.price.chars().count())
            .chain(std::iter::once(self.total.chars().count()))
            .max()
            .unwrap_or_default();
        let rule = "-".repeat(name_width + 2 + price_width);

        if !self.heading.is_empty() {
            writeln!(f, "{}", self.heading)?;
            writeln!(f, "{rule}")?;
        }
        for item in &self.items {
            writeln!(
                f,
                "{:<name_width$}  {:>price_width$}",
                item.name, item.price
            )?;
        }
        writeln!(f, "{rule}")?;
        write!(f, "{:<name_width$}  {:>price_width$}", "Total", self.total)
    }
}

/// Draws entries and totals onto a `Surface`. Never reads anything back from it.
#[derive(Debug, Clone)]
pub struct Renderer<S> {
    surface: S,
    currency: String,
}

impl<S> Renderer<S>
where
    S: Surface,
{
    pub fn new(surface: S, currency: impl Into<String>) -> Self {
        Self {
            surface,
            currency: currency.into(),
        }
    }

    /// Maps an entry to its displayed form. Does not touch the surface.
    pub fn render_entry(&self, entry: &Entry) -> Fragment {
        Fragment {
            name: entry.name().to_string(),
            price: self.money(entry.price()),
        }
    }

    /// Shows `fragment` as the newest item.
    pub fn append_to_display(&mut self, fragment: Fragment) {
        self.surface.prepend(fragment);
    }

    /// Replaces the shown total with `amount`.
    pub fn show_total(&mut self, amount: Amount) {
        let text = self.money(amount);
        self.surface.set_total(text);
    }

    pub fn show_heading(&mut self, text: &str) {
        self.surface.set_heading(text);
    }

    /// Rebuilds the list from `entries`, given in stored order, and shows `total`.
    ///
    /// Everything is staged off-screen and committed at once, so the surface never shows a total
    /// that disagrees with its list.
    pub fn replay(&mut self, entries: &[Entry], total: Amount) {
        let mut staged = Page::new();
        for entry in entries {
            staged.prepend(self.render_entry(entry));
        }
        staged.set_total(self.money(total));
        self.surface.commit(staged);
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn money(&self, amount: Amount) -> String {
        format!("{} {}", self.currency, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> Renderer<Page> {
        Renderer::new(Page::new(), DEFAULT_CURRENCY)
    }

    fn names(page: &Page) -> Vec<&str> {
        page.items().map(Fragment::name).collect()
    }

    #[test]
    fn test_render_entry() {
        let renderer = renderer();
        let fragment = renderer.render_entry(&Entry::new("apple", Amount::from(3)));
        assert_eq!(fragment.name(), "Apple");
        assert_eq!(fragment.price(), "$ 3");
        assert!(renderer.surface().items().next().is_none());
    }

    #[test]
    fn test_newest_first() {
        let mut renderer = renderer();
        for entry in [
            Entry::new("apple", Amount::from(3)),
            Entry::new("bread", Amount::from(2)),
        ] {
            let fragment = renderer.render_entry(&entry);
            renderer.append_to_display(fragment);
        }
        renderer.show_total(Amount::from(5));
        let page = renderer.surface();
        assert_eq!(names(page), vec!["Bread", "Apple"]);
        assert_eq!(page.total(), "$ 5");
    }

    #[test]
    fn test_show_total_is_idempotent() {
        let mut renderer = renderer();
        renderer.show_total(Amount::from(5));
        let once = renderer.surface().clone();
        renderer.show_total(Amount::from(5));
        assert_eq!(renderer.surface(), &once);
    }

    #[test]
    fn test_replay_replaces_list_and_keeps_heading() {
        let mut renderer = renderer();
        renderer.show_heading("Groceries");
        renderer.append_to_display(renderer.render_entry(&Entry::new("stale", Amount::from(9))));
        let entries = vec![
            Entry::new("Apple", Amount::from(3)),
            Entry::new("Bread", Amount::from(2)),
        ];
        renderer.replay(&entries, Amount::from(5));
        let page = renderer.surface();
        assert_eq!(page.heading(), "Groceries");
        assert_eq!(names(page), vec!["Bread", "Apple"]);
        assert_eq!(page.total(), "$ 5");
    }

    #[test]
    fn test_custom_currency() {
        let renderer = Renderer::new(Page::new(), "EUR");
        let fragment = renderer.render_entry(&Entry::new("cheese", Amount::from(7)));
        assert_eq!(fragment.price(), "EUR 7");
    }

    #[test]
    fn test_page_display() {
        let mut renderer = renderer();
        renderer.show_heading("Groceries");
        renderer.replay(
            &[
                Entry::new("Apple", Amount::from(3)),
                Entry::new("Bread", Amount::from(12)),
            ],
            Amount::from(15),
        );
        let expected = "Groceries\n\
                        -----------\n\
                        Bread  $ 12\n\
                        Apple   $ 3\n\
                        -----------\n\
                        Total  $ 15";
        assert_eq!(renderer.surface().to_string(), expected);
    }
}
