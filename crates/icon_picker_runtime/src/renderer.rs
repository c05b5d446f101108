//! Batch-at-a-time grid rendering driven by scroll proximity.

use icon_picker_contract::{
    BatchPager, Catalog, FilteredView, Icon, ScrollMetrics, Selection, SCROLL_THRESHOLD_PX,
};

use crate::{model::GridItem, surface::PickerSurface};

/// Owns the backing sequence of the grid and how much of it has been rendered.
#[derive(Debug, Clone)]
pub struct IncrementalRenderer {
    view: FilteredView,
    pager: BatchPager,
}

impl Default for IncrementalRenderer {
    fn default() -> Self {
        Self {
            view: FilteredView::default(),
            pager: BatchPager::new(0),
        }
    }
}

impl IncrementalRenderer {
    /// Replaces the backing sequence, clears the grid, and renders the first batch.
    pub fn render(&mut self, view: FilteredView, catalog: &Catalog, surface: &dyn PickerSurface) {
        surface.clear_grid();
        self.pager = BatchPager::new(view.len());
        self.view = view;
        self.render_next_batch(catalog, surface);
    }

    /// Renders the next batch if any remain. Returns the number of items appended.
    pub fn render_next_batch(&mut self, catalog: &Catalog, surface: &dyn PickerSurface) -> usize {
        let Some(range) = self.pager.next_batch() else {
            return 0;
        };
        let items: Vec<GridItem> = self.view.icons[range.clone()]
            .iter()
            .zip(range)
            .map(|(icon, index)| GridItem {
                index,
                src: catalog.full_url(icon),
                title: icon.file.clone(),
            })
            .collect();
        surface.append_grid_items(&items);
        items.len()
    }

    /// Renders the next batch when `metrics` is within the scroll threshold of the bottom.
    pub fn on_scroll(
        &mut self,
        metrics: ScrollMetrics,
        catalog: &Catalog,
        surface: &dyn PickerSurface,
    ) -> usize {
        if metrics.near_bottom(SCROLL_THRESHOLD_PX) {
            self.render_next_batch(catalog, surface)
        } else {
            0
        }
    }

    /// Rendered icon at `index`, if that item is on screen.
    pub fn rendered_icon(&self, index: usize) -> Option<&Icon> {
        if index >= self.pager.loaded() {
            return None;
        }
        self.view.icons.get(index)
    }

    /// Selection for a click on the item at `index`.
    ///
    /// Category-scoped views use their own label; search results look the category up.
    pub fn selection_for(&self, index: usize, catalog: &Catalog) -> Option<Selection> {
        let icon = self.rendered_icon(index)?;
        let category = self
            .view
            .category
            .as_deref()
            .or_else(|| catalog.category_of(&icon.file));
        Some(Selection::for_icon(icon, category))
    }

    /// The current backing sequence.
    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    /// Items rendered so far for the current sequence.
    pub fn rendered_count(&self) -> usize {
        self.pager.loaded()
    }

    /// Forgets the backing sequence without touching the surface.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
