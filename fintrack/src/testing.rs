use crate::backend::{AuthBackend, AuthGrant, ListItem, PageData, PageSource, TokenSupplier};
use crate::error::ClientError;
use async_trait::async_trait;
use fintrack_api::endpoints::user::{User, UserDetails};
use fintrack_auth::{AuthError, KeyValueStore, MemoryStore};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use tokio::sync::oneshot;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// Minimal list row for controller tests
#[derive(Debug, Clone, PartialEq)]
pub struct TestItem {
    pub id: String,
    pub name: String,
}

impl TestItem {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: format!("item {}", id),
        }
    }
}

impl ListItem for TestItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn summary(&self) -> String {
        self.name.clone()
    }
}

/// Ids `<page>-0 .. <page>-<count>` for a scripted page
pub fn items_for_page(page: u32, count: usize) -> Vec<TestItem> {
    (0..count)
        .map(|i| TestItem::new(&format!("{}-{}", page, i)))
        .collect()
}

/// Scripted list endpoint.
///
/// Pages are served from a map; unknown pages come back empty. A page can be
/// gated so its response is held until the test releases it, which lets tests
/// choose the order in which overlapping responses arrive.
pub struct MockPageSource<T = TestItem> {
    pages: Mutex<HashMap<u32, PageData<T>>>,
    gates: Mutex<HashMap<u32, oneshot::Receiver<()>>>,
    fetch_error: Mutex<Option<ClientError>>,
    delete_error: Mutex<Option<ClientError>>,
    fetches: Mutex<Vec<u32>>,
    deletes: Mutex<Vec<String>>,
    tokens: Mutex<Vec<String>>,
}

impl<T> Default for MockPageSource<T> {
    fn default() -> Self {
        Self {
            pages: Mutex::new(HashMap::new()),
            gates: Mutex::new(HashMap::new()),
            fetch_error: Mutex::new(None),
            delete_error: Mutex::new(None),
            fetches: Mutex::new(Vec::new()),
            deletes: Mutex::new(Vec::new()),
            tokens: Mutex::new(Vec::new()),
        }
    }
}

impl MockPageSource<TestItem> {
    /// `total_pages` pages of `per_page` generated items each
    pub fn with_pages(total_pages: u32, per_page: usize) -> Self {
        let source = Self::default();
        for page in 1..=total_pages {
            source.set_page(page, items_for_page(page, per_page), total_pages);
        }
        source
    }
}

impl<T> MockPageSource<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_page(&self, page: u32, items: Vec<T>, total_pages: u32) {
        lock(&self.pages).insert(page, PageData::new(items, total_pages));
    }

    /// Hold the response for `page` until the returned sender fires (or is
    /// dropped).
    pub fn gate(&self, page: u32) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        lock(&self.gates).insert(page, rx);
        tx
    }

    pub fn fail_fetches(&self, error: Option<ClientError>) {
        *lock(&self.fetch_error) = error;
    }

    pub fn fail_deletes(&self, error: Option<ClientError>) {
        *lock(&self.delete_error) = error;
    }

    /// Pages requested so far, in call order
    pub fn fetched_pages(&self) -> Vec<u32> {
        lock(&self.fetches).clone()
    }

    pub fn fetch_count(&self) -> usize {
        lock(&self.fetches).len()
    }

    pub fn deleted_ids(&self) -> Vec<String> {
        lock(&self.deletes).clone()
    }

    /// Bearer tokens seen by every call
    pub fn seen_tokens(&self) -> Vec<String> {
        lock(&self.tokens).clone()
    }
}

#[async_trait]
impl<T> PageSource for MockPageSource<T>
where
    T: ListItem + Clone + Send + Sync + 'static,
{
    type Item = T;

    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_page(
        &self,
        token: &str,
        page: u32,
        _limit: u32,
    ) -> Result<PageData<T>, ClientError> {
        lock(&self.fetches).push(page);
        lock(&self.tokens).push(token.to_string());

        let gate = lock(&self.gates).remove(&page);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        if let Some(error) = lock(&self.fetch_error).clone() {
            return Err(error);
        }
        Ok(lock(&self.pages)
            .get(&page)
            .cloned()
            .unwrap_or_else(PageData::empty))
    }

    async fn delete(&self, token: &str, id: &str) -> Result<(), ClientError> {
        lock(&self.tokens).push(token.to_string());
        if let Some(error) = lock(&self.delete_error).clone() {
            return Err(error);
        }
        lock(&self.deletes).push(id.to_string());
        Ok(())
    }
}

/// Scripted authentication endpoints that count every call.
pub struct MockAuthBackend {
    token: String,
    message: Option<String>,
    error: Mutex<Option<ClientError>>,
    calls: AtomicUsize,
    details: UserDetails,
}

impl MockAuthBackend {
    /// Every login and register succeeds with `token`.
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
            message: None,
            error: Mutex::new(None),
            calls: AtomicUsize::new(0),
            details: UserDetails {
                user: User {
                    name: "Test User".to_string(),
                    email: "test@example.com".to_string(),
                },
                total_expense: 0.0,
                job: None,
                current_goal: None,
                activities: Vec::new(),
            },
        }
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    /// Fail every following call with `error`, or succeed again with `None`.
    pub fn fail_with(&self, error: Option<ClientError>) {
        *lock(&self.error) = error;
    }

    /// Number of calls that reached the backend
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn call(&self) -> Result<(), ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match lock(&self.error).clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn grant(&self) -> AuthGrant {
        AuthGrant {
            token: self.token.clone(),
            message: self.message.clone(),
        }
    }
}

#[async_trait]
impl AuthBackend for MockAuthBackend {
    async fn login(&self, _email: &str, _password: &str) -> Result<AuthGrant, ClientError> {
        self.call()?;
        Ok(self.grant())
    }

    async fn register(
        &self,
        _name: &str,
        _email: &str,
        _password: &str,
    ) -> Result<AuthGrant, ClientError> {
        self.call()?;
        Ok(self.grant())
    }

    async fn change_password(
        &self,
        _token: &str,
        _old_password: &str,
        _new_password: &str,
    ) -> Result<Option<String>, ClientError> {
        self.call()?;
        Ok(self.message.clone())
    }

    async fn edit_name(&self, _token: &str, _name: &str) -> Result<Option<String>, ClientError> {
        self.call()?;
        Ok(self.message.clone())
    }

    async fn user_details(&self, _token: &str) -> Result<UserDetails, ClientError> {
        self.call()?;
        Ok(self.details.clone())
    }
}

/// Memory store whose writes can be made to fail.
#[derive(Clone, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_writes: std::sync::Arc<AtomicBool>,
}

impl FlakyStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            fail_writes: Default::default(),
        }
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), AuthError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AuthError::TokenStorage("disk unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        self.check()?;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), AuthError> {
        self.check()?;
        self.inner.remove(key).await
    }
}

/// Fixed bearer token
pub struct StaticToken(pub Option<String>);

impl StaticToken {
    pub fn new(token: &str) -> Self {
        Self(Some(token.to_string()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl TokenSupplier for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}
