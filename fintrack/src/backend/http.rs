use super::{AuthBackend, AuthGrant, PageData, PageSource};
use crate::error::ClientError;
use async_trait::async_trait;
use fintrack_api::{
    endpoints::{
        expenses::Expense, goals::Goal, incomes::Income, jobs::Job, user::UserDetails,
    },
    Client, Request,
};
use secrecy::SecretString;
use std::sync::{Arc, Mutex, PoisonError};

/// REST backend for the tracker API.
///
/// Keeps one unauthenticated client for login/register and reuses the
/// authorized client for as long as the token stays the same.
pub struct HttpBackend {
    server_url: String,
    anonymous: Client,
    authorized: Mutex<Option<(String, Arc<Client>)>>,
}

impl HttpBackend {
    pub fn new(server_url: impl Into<String>) -> Self {
        let server_url = server_url.into();
        Self {
            anonymous: Client::new(&server_url),
            server_url,
            authorized: Mutex::new(None),
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Client sending `Authorization: Bearer <token>`.
    pub fn authorized(&self, token: &str) -> Arc<Client> {
        let mut slot = self.authorized.lock().unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref() {
            Some((current, client)) if current == token => client.clone(),
            _ => {
                tracing::debug!("Creating authorized API client");
                let client = Arc::new(Client::with_token(&self.server_url, token));
                *slot = Some((token.to_string(), client.clone()));
                client
            }
        }
    }
}

fn secret(value: &str) -> SecretString {
    SecretString::from(value.to_string())
}

#[async_trait]
impl AuthBackend for HttpBackend {
    async fn login(&self, email: &str, password: &str) -> Result<AuthGrant, ClientError> {
        let req = Request::auth().login(email, secret(password));
        let res = self.anonymous.send(req).await?;
        Ok(AuthGrant {
            token: res.token,
            message: res.message,
        })
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthGrant, ClientError> {
        let req = Request::auth().register(name, email, secret(password));
        let res = self.anonymous.send(req).await?;
        Ok(AuthGrant {
            token: res.token,
            message: res.message,
        })
    }

    async fn change_password(
        &self,
        token: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<Option<String>, ClientError> {
        let req = Request::auth().change_password(secret(old_password), secret(new_password));
        let res = self.authorized(token).send(req).await?;
        Ok(res.message)
    }

    async fn edit_name(&self, token: &str, name: &str) -> Result<Option<String>, ClientError> {
        let res = self
            .authorized(token)
            .send(Request::user().edit_name(name))
            .await?;
        Ok(res.message)
    }

    async fn user_details(&self, token: &str) -> Result<UserDetails, ClientError> {
        Ok(self.authorized(token).send(Request::user().get()).await?)
    }
}

/// Implements [`PageSource`] for one resource of the REST API.
macro_rules! http_page_source {
    ($source:ident, $item:ty, $repo:ident, $name:literal) => {
        pub struct $source {
            backend: Arc<HttpBackend>,
        }

        impl $source {
            pub fn new(backend: Arc<HttpBackend>) -> Self {
                Self { backend }
            }
        }

        #[async_trait]
        impl PageSource for $source {
            type Item = $item;

            fn name(&self) -> &str {
                $name
            }

            async fn fetch_page(
                &self,
                token: &str,
                page: u32,
                limit: u32,
            ) -> Result<PageData<$item>, ClientError> {
                let req = Request::$repo().list(page, limit);
                let res = self.backend.authorized(token).send(req).await?;
                Ok(PageData::from_paged(res))
            }

            async fn delete(&self, token: &str, id: &str) -> Result<(), ClientError> {
                let req = Request::$repo().delete(id);
                self.backend.authorized(token).send_or_default(req).await?;
                Ok(())
            }
        }
    };
}

http_page_source!(ExpenseSource, Expense, expenses, "expenses");
http_page_source!(IncomeSource, Income, incomes, "incomes");
http_page_source!(JobSource, Job, jobs, "jobs");

/// Goal list. Every page response also names the goal contributions go to,
/// which is kept for [`GoalSource::current_goal`].
pub struct GoalSource {
    backend: Arc<HttpBackend>,
    current: Mutex<Option<Goal>>,
}

impl GoalSource {
    pub fn new(backend: Arc<HttpBackend>) -> Self {
        Self {
            backend,
            current: Mutex::new(None),
        }
    }

    /// Current goal from the most recent page response
    pub fn current_goal(&self) -> Option<Goal> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl PageSource for GoalSource {
    type Item = Goal;

    fn name(&self) -> &str {
        "goals"
    }

    async fn fetch_page(
        &self,
        token: &str,
        page: u32,
        limit: u32,
    ) -> Result<PageData<Goal>, ClientError> {
        let req = Request::goals().list(page, limit);
        let mut res = self.backend.authorized(token).send(req).await?;
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = res.current_goal.take();
        Ok(PageData::from_paged(res))
    }

    async fn delete(&self, token: &str, id: &str) -> Result<(), ClientError> {
        let req = Request::goals().delete(id);
        self.backend.authorized(token).send_or_default(req).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorized_client_is_reused_per_token() {
        let backend = HttpBackend::new("http://localhost:9080");
        let first = backend.authorized("a");
        let again = backend.authorized("a");
        let other = backend.authorized("b");
        assert!(Arc::ptr_eq(&first, &again));
        assert!(!Arc::ptr_eq(&first, &other));
    }
}
