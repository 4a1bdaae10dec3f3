use super::{ListMode, PageState};
use crate::backend::ListItem;

/// Everything that can happen to a list's state
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent<T> {
    /// A load for `page` was issued
    Requested {
        page: u32,
        refreshing: bool,
        mode: ListMode,
    },
    /// The requested page was past the last of `total_pages`; the load
    /// continues with the last page
    Redirected { total_pages: u32 },
    /// The server answered a load for `page`
    Loaded {
        page: u32,
        items: Vec<T>,
        total_pages: u32,
        mode: ListMode,
    },
    LoadFailed { error: String },
    /// The server confirmed the deletion of `id`
    Removed { id: String },
}

/// Pure state transition function for list events
pub fn reduce_page_event<T: ListItem>(state: &mut PageState<T>, event: PageEvent<T>) {
    match event {
        PageEvent::Requested {
            page,
            refreshing,
            mode,
        } => {
            // Appended pages only count once they are shown
            if mode == ListMode::Replace {
                state.page = state.clamp_page(page);
            }
            if refreshing {
                state.refreshing = true;
            } else {
                state.loading = true;
            }
        }

        PageEvent::Redirected { total_pages } => {
            state.total_pages = total_pages;
            state.page = state.clamp_page(state.page);
        }

        PageEvent::Loaded {
            page,
            items,
            total_pages,
            mode,
        } => {
            match mode {
                ListMode::Append if page > 1 => merge_page(&mut state.items, items),
                _ => state.items = items,
            }
            state.total_pages = total_pages;
            if mode == ListMode::Append {
                state.page = page;
            }
            state.page = state.clamp_page(state.page);
            state.loading = false;
            state.refreshing = false;
            state.error = None;
        }

        PageEvent::LoadFailed { error } => {
            // Stale items stay visible
            state.loading = false;
            state.refreshing = false;
            state.error = Some(error);
        }

        PageEvent::Removed { id } => {
            let before = state.items.len();
            state.items.retain(|item| item.id() != id);
            if state.items.len() == before {
                tracing::debug!("Removed item {} was not in the current page", id);
            }
        }
    }
}

/// Append a later page, replacing items the list already holds so reloads
/// don't duplicate rows.
fn merge_page<T: ListItem>(items: &mut Vec<T>, page: Vec<T>) {
    for item in page {
        if let Some(existing) = items.iter_mut().find(|i| i.id() == item.id()) {
            *existing = item;
        } else {
            items.push(item);
        }
    }
}
