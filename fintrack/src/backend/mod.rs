mod http;

pub use http::{ExpenseSource, GoalSource, HttpBackend, IncomeSource, JobSource};

use crate::error::ClientError;
use async_trait::async_trait;
use fintrack_api::endpoints::{
    expenses::Expense, goals::Goal, incomes::Income, jobs::Job, user::UserDetails, Paged,
};

/// Token and optional greeting returned by login and register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    pub token: String,
    pub message: Option<String>,
}

/// Authentication and profile endpoints.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<AuthGrant, ClientError>;

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthGrant, ClientError>;

    /// Returns the server's confirmation message, if any.
    async fn change_password(
        &self,
        token: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<Option<String>, ClientError>;

    async fn edit_name(&self, token: &str, name: &str) -> Result<Option<String>, ClientError>;

    async fn user_details(&self, token: &str) -> Result<UserDetails, ClientError>;
}

/// One page of a server-owned list.
#[derive(Debug, Clone, PartialEq)]
pub struct PageData<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
}

impl<T> PageData<T> {
    pub fn new(items: Vec<T>, total_pages: u32) -> Self {
        Self { items, total_pages }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }

    pub fn from_paged<P>(response: P) -> Self
    where
        P: Paged<Item = T>,
    {
        let total_pages = response.total_pages();
        Self::new(response.into_items(), total_pages)
    }
}

/// List and delete endpoints of one resource.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: ListItem + Clone + Send + Sync + 'static;

    /// Resource name used in log lines
    fn name(&self) -> &str;

    async fn fetch_page(
        &self,
        token: &str,
        page: u32,
        limit: u32,
    ) -> Result<PageData<Self::Item>, ClientError>;

    async fn delete(&self, token: &str, id: &str) -> Result<(), ClientError>;
}

/// Supplies the bearer token for authenticated calls.
pub trait TokenSupplier: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// Items shown in a paginated list.
pub trait ListItem {
    fn id(&self) -> &str;

    /// One-line description for plain-text rendering
    fn summary(&self) -> String;
}

impl ListItem for Expense {
    fn id(&self) -> &str {
        &self.id
    }

    fn summary(&self) -> String {
        let recurring = if self.is_recurring { " (recurring)" } else { "" };
        format!("{}: {:.2}{}", self.name, self.amount, recurring)
    }
}

impl ListItem for Income {
    fn id(&self) -> &str {
        &self.id
    }

    fn summary(&self) -> String {
        match &self.description {
            Some(description) => format!("{}: {:.2} - {}", self.name, self.amount, description),
            None => format!("{}: {:.2}", self.name, self.amount),
        }
    }
}

impl ListItem for Goal {
    fn id(&self) -> &str {
        &self.id
    }

    fn summary(&self) -> String {
        let status = if self.is_achieved { "achieved" } else { "in progress" };
        format!(
            "{}: {:.2}/{:.2} by {} ({})",
            self.name,
            self.saved_amount,
            self.target_amount,
            self.deadline.format("%Y-%m-%d"),
            status
        )
    }
}

impl ListItem for Job {
    fn id(&self) -> &str {
        &self.id
    }

    fn summary(&self) -> String {
        format!("{} at {}: {:.2}", self.name, self.organization, self.salary)
    }
}
