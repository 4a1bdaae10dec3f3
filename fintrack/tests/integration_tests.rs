use fintrack::backend::TokenSupplier;
use fintrack::error::NETWORK_ERROR_MESSAGE;
use fintrack::state::ListConfig;
use fintrack::testing::{
    items_for_page, FlakyStore, MockAuthBackend, MockPageSource, StaticToken, TestItem,
};
use fintrack::{
    ClientError, ErrorKind, PaginatedController, RememberMe, SessionManager, SessionState,
};
use fintrack_auth::{KeyValueStore, MemoryStore, TOKEN_KEY};
use std::sync::Arc;

type Controller = PaginatedController<MockPageSource>;

fn controller(source: &Arc<MockPageSource>, page_size: u32) -> Controller {
    PaginatedController::new(
        source.clone(),
        Arc::new(StaticToken::new("tok")),
        ListConfig::new(page_size),
    )
}

fn ids(controller: &Controller) -> Vec<String> {
    controller
        .snapshot()
        .items
        .into_iter()
        .map(|item| item.id)
        .collect()
}

async fn wait_for_fetches(source: &MockPageSource, count: usize) {
    while source.fetch_count() < count {
        tokio::task::yield_now().await;
    }
}

// Paginated lists

#[tokio::test]
async fn test_load_fills_page_state() {
    let source = Arc::new(MockPageSource::with_pages(3, 2));
    let list = controller(&source, 2);

    list.load(1).await.unwrap();

    let state = list.snapshot();
    assert_eq!(state.page, 1);
    assert_eq!(state.total_pages, 3);
    assert!(!state.loading);
    assert_eq!(state.error, None);
    assert_eq!(ids(&list), vec!["1-0", "1-1"]);
    assert_eq!(source.seen_tokens(), vec!["tok"]);
}

#[tokio::test]
async fn test_go_to_page_within_range() {
    let source = Arc::new(MockPageSource::with_pages(4, 1));
    let list = controller(&source, 1);
    list.load(1).await.unwrap();

    assert!(list.go_to_page(3).await.unwrap());
    assert_eq!(list.snapshot().page, 3);
    assert_eq!(ids(&list), vec!["3-0"]);
}

#[tokio::test]
async fn test_go_to_page_out_of_range_is_noop() {
    let source = Arc::new(MockPageSource::with_pages(4, 1));
    let list = controller(&source, 1);
    list.load(2).await.unwrap();
    let before = list.snapshot();

    assert!(!list.go_to_page(0).await.unwrap());
    assert!(!list.go_to_page(5).await.unwrap());

    assert_eq!(list.snapshot(), before);
    assert_eq!(source.fetch_count(), 1);
}

#[tokio::test]
async fn test_next_and_prev_stop_at_bounds() {
    let source = Arc::new(MockPageSource::with_pages(2, 1));
    let list = controller(&source, 1);
    list.load(1).await.unwrap();

    assert!(!list.prev_page().await.unwrap());
    assert!(list.next_page().await.unwrap());
    assert_eq!(list.snapshot().page, 2);
    assert!(!list.next_page().await.unwrap());
    assert!(list.prev_page().await.unwrap());
    assert_eq!(list.snapshot().page, 1);
}

#[tokio::test]
async fn test_page_window_follows_current_page() {
    let source = Arc::new(MockPageSource::with_pages(10, 1));
    let list = controller(&source, 1);

    list.load(1).await.unwrap();
    assert_eq!(list.page_window(), vec![1, 2, 3, 4, 5]);

    list.go_to_page(7).await.unwrap();
    assert_eq!(list.page_window(), vec![5, 6, 7, 8, 9]);

    list.go_to_page(10).await.unwrap();
    assert_eq!(list.page_window(), vec![6, 7, 8, 9, 10]);
}

#[tokio::test]
async fn test_failed_load_keeps_items_and_records_error() {
    let source = Arc::new(MockPageSource::with_pages(2, 2));
    let list = controller(&source, 2);
    list.load(1).await.unwrap();

    source.fail_fetches(Some(ClientError::network()));
    let err = list.next_page().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Network);

    let state = list.snapshot();
    assert_eq!(state.error.as_deref(), Some(NETWORK_ERROR_MESSAGE));
    assert_eq!(ids(&list), vec!["1-0", "1-1"]);
    assert!(!state.loading);

    source.fail_fetches(None);
    list.retry().await.unwrap();
    assert_eq!(list.snapshot().error, None);
    assert_eq!(ids(&list), vec!["2-0", "2-1"]);
}

#[tokio::test]
async fn test_server_error_message_is_shown_verbatim() {
    let source = Arc::new(MockPageSource::with_pages(1, 1));
    source.fail_fetches(Some(ClientError::server(Some("Session expired"))));
    let list = controller(&source, 1);

    let err = list.load(1).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Server);
    assert_eq!(list.snapshot().error.as_deref(), Some("Session expired"));
}

#[tokio::test]
async fn test_missing_token_fails_without_request() {
    let source = Arc::new(MockPageSource::with_pages(1, 1));
    let list = PaginatedController::new(
        source.clone(),
        Arc::new(StaticToken::none()),
        ListConfig::new(1),
    );

    let err = list.load(1).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(source.fetch_count(), 0);
    assert!(list.snapshot().error.is_some());

    assert!(list.remove("1-0").await.is_err());
    assert!(source.deleted_ids().is_empty());
}

#[tokio::test]
async fn test_refresh_uses_refreshing_flag() {
    let source = Arc::new(MockPageSource::with_pages(2, 1));
    let list = controller(&source, 1);
    list.load(2).await.unwrap();

    let release = source.gate(2);
    let pending = tokio::spawn({
        let list = list.clone();
        async move { list.refresh().await }
    });
    wait_for_fetches(&source, 2).await;

    let state = list.snapshot();
    assert!(state.refreshing);
    assert!(!state.loading);
    assert_eq!(state.page, 2);

    release.send(()).unwrap();
    pending.await.unwrap().unwrap();
    assert!(!list.snapshot().refreshing);
    assert_eq!(source.fetched_pages(), vec![2, 2]);
}

#[tokio::test]
async fn test_remove_failure_keeps_item() {
    let source = Arc::new(MockPageSource::with_pages(1, 3));
    let list = controller(&source, 3);
    list.load(1).await.unwrap();

    source.fail_deletes(Some(ClientError::server(None)));
    let err = list.remove("1-1").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Server);
    assert_eq!(ids(&list), vec!["1-0", "1-1", "1-2"]);
}

#[tokio::test]
async fn test_remove_success_drops_item_without_refetch() {
    let source = Arc::new(MockPageSource::with_pages(1, 3));
    let list = controller(&source, 3);
    list.load(1).await.unwrap();

    list.remove("1-1").await.unwrap();

    assert_eq!(ids(&list), vec!["1-0", "1-2"]);
    assert_eq!(source.deleted_ids(), vec!["1-1"]);
    assert_eq!(source.fetch_count(), 1);
}

#[tokio::test]
async fn test_overlapping_loads_apply_in_arrival_order() {
    let source = Arc::new(MockPageSource::with_pages(3, 1));
    let list = controller(&source, 1);
    let release_first = source.gate(1);

    let (first, second) = tokio::join!(list.load(1), async {
        wait_for_fetches(&source, 1).await;
        let result = list.load(2).await;
        release_first.send(()).unwrap();
        result
    });
    first.unwrap();
    second.unwrap();

    // Page 1 answered last, so its items are shown while the page number
    // stays on the last request.
    let state = list.snapshot();
    assert_eq!(ids(&list), vec!["1-0"]);
    assert_eq!(state.page, 2);
    assert_eq!(source.fetched_pages(), vec![1, 2]);
}

#[tokio::test]
async fn test_response_after_unmount_is_ignored() {
    let source = Arc::new(MockPageSource::with_pages(1, 2));
    let list = controller(&source, 2);
    let release = source.gate(1);

    let pending = tokio::spawn({
        let list = list.clone();
        async move { list.load(1).await }
    });
    wait_for_fetches(&source, 1).await;

    list.unmount();
    release.send(()).unwrap();

    assert!(pending.await.unwrap().is_ok());
    let state = list.snapshot();
    assert!(state.items.is_empty());
    assert_eq!(state.total_pages, 0);

    // Further loads are not sent at all
    list.load(1).await.unwrap();
    assert_eq!(source.fetch_count(), 1);
}

#[tokio::test]
async fn test_load_more_accumulates_pages() {
    let source = Arc::new(MockPageSource::with_pages(3, 2));
    let list = PaginatedController::new(
        source.clone(),
        Arc::new(StaticToken::new("tok")),
        ListConfig::new(2).append(),
    );

    list.load(1).await.unwrap();
    while list.load_more().await.unwrap() {}

    assert_eq!(ids(&list), vec!["1-0", "1-1", "2-0", "2-1", "3-0", "3-1"]);
    assert_eq!(list.snapshot().page, 3);

    // Pull-to-refresh starts the list over
    list.refresh().await.unwrap();
    assert_eq!(ids(&list), vec!["1-0", "1-1"]);
    assert_eq!(list.snapshot().page, 1);
}

#[tokio::test]
async fn test_failed_load_more_does_not_skip_a_page() {
    let source = Arc::new(MockPageSource::with_pages(3, 1));
    let list = PaginatedController::new(
        source.clone(),
        Arc::new(StaticToken::new("tok")),
        ListConfig::new(1).append(),
    );
    list.load(1).await.unwrap();

    source.fail_fetches(Some(ClientError::network()));
    assert!(list.load_more().await.is_err());
    assert_eq!(list.snapshot().page, 1);
    assert_eq!(ids(&list), vec!["1-0"]);

    source.fail_fetches(None);
    assert!(list.load_more().await.unwrap());
    assert_eq!(ids(&list), vec!["1-0", "2-0"]);
    assert_eq!(list.snapshot().page, 2);
    assert_eq!(list.snapshot().error, None);
    assert_eq!(source.fetched_pages(), vec![1, 2, 2]);
}

#[tokio::test]
async fn test_load_past_last_page_shows_last_page() {
    let source = Arc::new(MockPageSource::with_pages(3, 2));
    // The server still answers for a page that no longer exists
    source.set_page(7, Vec::new(), 3);
    let list = controller(&source, 2);

    list.load(7).await.unwrap();

    let state = list.snapshot();
    assert_eq!(state.page, 3);
    assert_eq!(state.total_pages, 3);
    assert_eq!(state.items, items_for_page(3, 2));
    assert!(!state.loading);
    assert_eq!(source.fetched_pages(), vec![7, 3]);
}

#[tokio::test]
async fn test_subscribers_see_loaded_page() {
    let source = Arc::new(MockPageSource::with_pages(2, 1));
    let list = controller(&source, 1);
    let mut rx = list.subscribe();

    list.load(1).await.unwrap();

    assert!(rx.has_changed().unwrap());
    let state = rx.borrow_and_update().clone();
    assert_eq!(state.total_pages, 2);
    assert_eq!(state.items, items_for_page(1, 1));
}

// Session

#[tokio::test]
async fn test_restore_without_saved_token() {
    let backend = Arc::new(MockAuthBackend::new("tok"));
    let manager = SessionManager::new(backend.clone(), MemoryStore::new());
    assert_eq!(
        manager.restore().await.unwrap(),
        SessionState::Unauthenticated
    );
    assert!(!manager.session().is_authenticated());
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_login_without_remember_is_not_restored() {
    let store = MemoryStore::new();
    let backend = Arc::new(MockAuthBackend::new("tok"));

    let manager = SessionManager::new(backend.clone(), store.clone());
    manager.restore().await.unwrap();
    let message = manager
        .login("ana@example.com", "pw", RememberMe::Forget)
        .await
        .unwrap();
    assert_eq!(message, "Login successful!");
    assert_eq!(manager.state(), SessionState::Authenticated);

    let restarted = SessionManager::new(backend, store);
    assert_eq!(
        restarted.restore().await.unwrap(),
        SessionState::Unauthenticated
    );
}

#[tokio::test]
async fn test_login_with_remember_is_restored() {
    let store = MemoryStore::new();
    let backend = Arc::new(MockAuthBackend::new("tok").with_message("Welcome back"));

    let manager = SessionManager::new(backend.clone(), store.clone());
    let message = manager
        .login("ana@example.com", "pw", RememberMe::Remember)
        .await
        .unwrap();
    assert_eq!(message, "Welcome back");

    let restarted = SessionManager::new(backend, store.clone());
    assert_eq!(
        restarted.restore().await.unwrap(),
        SessionState::Authenticated
    );
    assert_eq!(restarted.session().token(), Some("tok"));
    assert_eq!(store.get(TOKEN_KEY).await.unwrap().as_deref(), Some("tok"));
}

#[tokio::test]
async fn test_forget_clears_previously_remembered_token() {
    let store = MemoryStore::new();
    store.set(TOKEN_KEY, "old").await.unwrap();
    let manager = SessionManager::new(Arc::new(MockAuthBackend::new("tok")), store.clone());

    manager
        .login("ana@example.com", "pw", RememberMe::Forget)
        .await
        .unwrap();

    assert_eq!(store.get(TOKEN_KEY).await.unwrap(), None);
    assert_eq!(manager.session().token(), Some("tok"));
}

#[tokio::test]
async fn test_restore_only_once() {
    let store = MemoryStore::new();
    let manager = SessionManager::new(Arc::new(MockAuthBackend::new("tok")), store.clone());
    manager.restore().await.unwrap();

    store.set(TOKEN_KEY, "late").await.unwrap();
    let err = manager.restore().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(manager.state(), SessionState::Unauthenticated);
}

#[tokio::test]
async fn test_restore_after_login_is_rejected() {
    let manager = SessionManager::new(Arc::new(MockAuthBackend::new("tok")), MemoryStore::new());
    manager
        .login("ana@example.com", "pw", RememberMe::Forget)
        .await
        .unwrap();
    assert!(manager.restore().await.is_err());
    assert_eq!(manager.state(), SessionState::Authenticated);
}

#[tokio::test]
async fn test_login_requires_fields() {
    let backend = Arc::new(MockAuthBackend::new("tok"));
    let manager = SessionManager::new(backend.clone(), MemoryStore::new());

    let err = manager
        .login("", "pw", RememberMe::Remember)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.message, "All fields are required.");
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_failed_login_leaves_state_unchanged() {
    let store = MemoryStore::new();
    let backend = Arc::new(MockAuthBackend::new("tok"));
    backend.fail_with(Some(ClientError::server(Some("Invalid credentials"))));
    let manager = SessionManager::new(backend, store.clone());

    let err = manager
        .login("ana@example.com", "wrong", RememberMe::Remember)
        .await
        .unwrap_err();

    assert_eq!(err.message, "Invalid credentials");
    assert_eq!(manager.state(), SessionState::Unauthenticated);
    assert_eq!(store.get(TOKEN_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn test_login_storage_failure_leaves_state_unchanged() {
    let store = FlakyStore::new(MemoryStore::new());
    store.fail_writes(true);
    let manager = SessionManager::new(Arc::new(MockAuthBackend::new("tok")), store);

    let err = manager
        .login("ana@example.com", "pw", RememberMe::Remember)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Storage);
    assert_eq!(manager.state(), SessionState::Unauthenticated);
}

#[tokio::test]
async fn test_signup_always_remembers() {
    let store = MemoryStore::new();
    let backend = Arc::new(MockAuthBackend::new("fresh"));
    let manager = SessionManager::new(backend.clone(), store.clone());

    let message = manager
        .signup("Ana", "ana@example.com", "pw")
        .await
        .unwrap();
    assert_eq!(message, "Signup successful!");

    let restarted = SessionManager::new(backend, store);
    assert_eq!(
        restarted.restore().await.unwrap(),
        SessionState::Authenticated
    );
}

#[tokio::test]
async fn test_signup_requires_name() {
    let backend = Arc::new(MockAuthBackend::new("tok"));
    let manager = SessionManager::new(backend.clone(), MemoryStore::new());

    assert!(manager.signup(" ", "ana@example.com", "pw").await.is_err());
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_logout_clears_session_and_storage() {
    let store = MemoryStore::new();
    let manager = SessionManager::new(Arc::new(MockAuthBackend::new("tok")), store.clone());
    manager
        .login("ana@example.com", "pw", RememberMe::Remember)
        .await
        .unwrap();

    manager.logout().await.unwrap();

    assert_eq!(manager.state(), SessionState::Unauthenticated);
    assert_eq!(store.get(TOKEN_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn test_logout_storage_failure_stays_authenticated() {
    let store = FlakyStore::new(MemoryStore::new());
    let manager = SessionManager::new(Arc::new(MockAuthBackend::new("tok")), store.clone());
    manager
        .login("ana@example.com", "pw", RememberMe::Remember)
        .await
        .unwrap();

    store.fail_writes(true);
    let err = manager.logout().await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Storage);
    assert_eq!(manager.state(), SessionState::Authenticated);
}

#[tokio::test]
async fn test_change_password_to_same_value_never_reaches_server() {
    let backend = Arc::new(MockAuthBackend::new("tok"));
    let manager = SessionManager::new(backend.clone(), MemoryStore::new());
    manager
        .login("ana@example.com", "pw", RememberMe::Forget)
        .await
        .unwrap();
    let calls = backend.calls();

    let err = manager.change_password("secret", "secret").await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(backend.calls(), calls);
}

#[tokio::test]
async fn test_change_password_requires_session() {
    let backend = Arc::new(MockAuthBackend::new("tok"));
    let manager = SessionManager::new(backend.clone(), MemoryStore::new());

    let err = manager.change_password("old", "new").await.unwrap_err();
    assert_eq!(err, ClientError::not_logged_in());
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_change_name_rejects_unchanged_name() {
    let backend = Arc::new(MockAuthBackend::new("tok").with_message("Name updated"));
    let manager = SessionManager::new(backend.clone(), MemoryStore::new());
    manager
        .login("ana@example.com", "pw", RememberMe::Forget)
        .await
        .unwrap();

    assert!(manager.change_name("Ana", "Ana").await.is_err());
    assert_eq!(manager.change_name("Ana", "Ana Maria").await.unwrap(), "Name updated");
}

#[tokio::test]
async fn test_session_handle_supplies_token_to_lists() {
    let manager = SessionManager::new(Arc::new(MockAuthBackend::new("tok")), MemoryStore::new());
    let handle = manager.handle();
    assert_eq!(handle.token(), None);

    manager
        .login("ana@example.com", "pw", RememberMe::Forget)
        .await
        .unwrap();

    let source = Arc::new(MockPageSource::<TestItem>::with_pages(1, 1));
    let list = PaginatedController::new(source.clone(), Arc::new(handle), ListConfig::new(1));
    list.load(1).await.unwrap();
    assert_eq!(source.seen_tokens(), vec!["tok"]);

    manager.logout().await.unwrap();
    assert!(list.load(1).await.is_err());
    assert_eq!(source.fetch_count(), 1);
}
