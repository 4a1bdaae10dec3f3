use crate::backend::{PageSource, TokenSupplier};
use crate::error::ClientError;
use crate::state::reducer::{reduce_page_event, PageEvent};
use crate::state::{ListConfig, ListMode, PageState};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Drives one server-paginated list: loads pages, tracks loading and error
/// state, and applies deletes locally.
///
/// State is published through a `watch` channel. Responses are applied in
/// the order they arrive, so when two loads overlap the later response wins
/// for `items` while `page` keeps the most recently requested page. In
/// append mode `page` only advances once a page is shown.
pub struct PaginatedController<S: PageSource> {
    source: Arc<S>,
    tokens: Arc<dyn TokenSupplier>,
    config: ListConfig,
    state: Arc<watch::Sender<PageState<S::Item>>>,
    mounted: Arc<AtomicBool>,
}

impl<S: PageSource> Clone for PaginatedController<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            tokens: self.tokens.clone(),
            config: self.config,
            state: self.state.clone(),
            mounted: self.mounted.clone(),
        }
    }
}

impl<S: PageSource> PaginatedController<S> {
    pub fn new(source: Arc<S>, tokens: Arc<dyn TokenSupplier>, config: ListConfig) -> Self {
        let (state, _) = watch::channel(PageState::new(config.page_size));
        Self {
            source,
            tokens,
            config,
            state: Arc::new(state),
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<PageState<S::Item>> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> PageState<S::Item> {
        self.state.borrow().clone()
    }

    pub fn config(&self) -> ListConfig {
        self.config
    }

    pub fn page_window(&self) -> Vec<u32> {
        self.state.borrow().window()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    /// Stop applying responses. Requests already in flight still complete,
    /// but their results are dropped.
    pub fn unmount(&self) {
        tracing::debug!("Unmounting {} list", self.source.name());
        self.mounted.store(false, Ordering::Release);
    }

    /// Load `page` (clamped to the known page range). A page past the end
    /// of a list that shrank loads the last page instead.
    pub async fn load(&self, page: u32) -> Result<(), ClientError> {
        self.fetch(page, false, self.config.mode).await
    }

    /// Reload the current page as a pull-to-refresh. Lists in append mode
    /// start over from the first page.
    pub async fn refresh(&self) -> Result<(), ClientError> {
        let page = match self.config.mode {
            ListMode::Replace => self.state.borrow().page,
            ListMode::Append => 1,
        };
        self.fetch(page, true, self.config.mode).await
    }

    /// User-initiated retry after a failed load.
    pub async fn retry(&self) -> Result<(), ClientError> {
        let page = self.state.borrow().page;
        tracing::info!("Retrying {} page {}", self.source.name(), page);
        self.fetch(page, false, self.config.mode).await
    }

    /// Load `page` if it exists.
    ///
    /// Returns `false` without touching the state for out-of-range pages.
    pub async fn go_to_page(&self, page: u32) -> Result<bool, ClientError> {
        let valid = self.state.borrow().contains_page(page);
        if !valid {
            tracing::debug!("Ignoring navigation to page {} of {}", page, self.source.name());
            return Ok(false);
        }
        self.load(page).await?;
        Ok(true)
    }

    pub async fn next_page(&self) -> Result<bool, ClientError> {
        let page = self.state.borrow().page;
        self.go_to_page(page.saturating_add(1)).await
    }

    pub async fn prev_page(&self) -> Result<bool, ClientError> {
        let page = self.state.borrow().page;
        self.go_to_page(page.saturating_sub(1)).await
    }

    /// Append the next page below the items already shown. Only lists in
    /// append mode load more; page-by-page lists return `false`.
    pub async fn load_more(&self) -> Result<bool, ClientError> {
        if self.config.mode != ListMode::Append {
            return Ok(false);
        }
        let (has_next, busy, page) = {
            let state = self.state.borrow();
            (state.has_next_page(), state.is_busy(), state.page)
        };
        if !has_next || busy {
            return Ok(false);
        }
        self.fetch(page + 1, false, ListMode::Append).await?;
        Ok(true)
    }

    /// Delete `id` on the server, then drop it from the list without a refetch.
    pub async fn remove(&self, id: &str) -> Result<(), ClientError> {
        let token = self.token()?;
        tracing::info!("Deleting {} item {}", self.source.name(), id);

        if let Err(e) = self.source.delete(&token, id).await {
            tracing::warn!("Failed to delete {} item {}: {}", self.source.name(), id, e);
            return Err(e);
        }

        if self.is_mounted() {
            self.apply(PageEvent::Removed { id: id.to_string() });
        }
        Ok(())
    }

    fn token(&self) -> Result<String, ClientError> {
        self.tokens.token().ok_or_else(|| {
            tracing::warn!("No session token for {}", self.source.name());
            ClientError::not_logged_in()
        })
    }

    fn apply(&self, event: PageEvent<S::Item>) {
        self.state.send_modify(|state| reduce_page_event(state, event));
    }

    async fn fetch(&self, page: u32, refreshing: bool, mode: ListMode) -> Result<(), ClientError> {
        if !self.is_mounted() {
            return Ok(());
        }

        let token = match self.token() {
            Ok(token) => token,
            Err(e) => {
                self.apply(PageEvent::LoadFailed {
                    error: e.message.clone(),
                });
                return Err(e);
            }
        };

        self.apply(PageEvent::Requested {
            page,
            refreshing,
            mode,
        });
        let mut page = self.state.borrow().clamp_page(page);

        let result = loop {
            tracing::info!(
                "Loading {} page {} (refreshing={})",
                self.source.name(),
                page,
                refreshing
            );
            let result = self
                .source
                .fetch_page(&token, page, self.config.page_size)
                .await;

            if !self.is_mounted() {
                tracing::debug!(
                    "Dropping {} page {} response after unmount",
                    self.source.name(),
                    page
                );
                return Ok(());
            }

            // The list shrank below the requested page
            let last_page = match &result {
                Ok(data) if data.total_pages > 0 && page > data.total_pages => {
                    Some(data.total_pages)
                }
                _ => None,
            };
            match last_page {
                Some(total_pages) => {
                    tracing::info!(
                        "{} page {} is past the last page {}",
                        self.source.name(),
                        page,
                        total_pages
                    );
                    page = total_pages;
                    self.apply(PageEvent::Redirected { total_pages });
                }
                None => break result,
            }
        };

        match result {
            Ok(data) => {
                tracing::info!(
                    "Loaded {} {} (page {}/{})",
                    data.items.len(),
                    self.source.name(),
                    page,
                    data.total_pages
                );
                self.apply(PageEvent::Loaded {
                    page,
                    items: data.items,
                    total_pages: data.total_pages,
                    mode,
                });
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to load {} page {}: {}", self.source.name(), page, e);
                self.apply(PageEvent::LoadFailed {
                    error: e.message.clone(),
                });
                Err(e)
            }
        }
    }
}
