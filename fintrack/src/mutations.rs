use crate::backend::{HttpBackend, TokenSupplier};
use crate::error::ClientError;
use fintrack_api::{
    endpoints::{
        expenses::NewExpense, goals::NewGoal, incomes::NewIncome, jobs::NewJob, MessageResponse,
    },
    Request,
};
use std::sync::Arc;

/// Authenticated create, update and contribute calls.
///
/// Deletes go through the list controllers so the visible page stays in
/// sync.
#[derive(Clone)]
pub struct Mutations {
    backend: Arc<HttpBackend>,
    tokens: Arc<dyn TokenSupplier>,
}

impl Mutations {
    pub fn new(backend: Arc<HttpBackend>, tokens: Arc<dyn TokenSupplier>) -> Self {
        Self { backend, tokens }
    }

    fn token(&self) -> Result<String, ClientError> {
        self.tokens.token().ok_or_else(ClientError::not_logged_in)
    }

    fn reply(res: MessageResponse, fallback: &str) -> String {
        res.message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }

    pub async fn add_expense(&self, expense: NewExpense) -> Result<String, ClientError> {
        let token = self.token()?;
        tracing::info!("Adding expense");
        let res = self
            .backend
            .authorized(&token)
            .send_or_default(Request::expenses().create(expense))
            .await?;
        Ok(Self::reply(res, "Expense added successfully!"))
    }

    pub async fn update_expense(
        &self,
        id: &str,
        expense: NewExpense,
    ) -> Result<String, ClientError> {
        let token = self.token()?;
        tracing::info!("Updating expense {}", id);
        let res = self
            .backend
            .authorized(&token)
            .send_or_default(Request::expenses().update(id, expense))
            .await?;
        Ok(Self::reply(res, "Expense updated successfully!"))
    }

    pub async fn add_income(&self, income: NewIncome) -> Result<String, ClientError> {
        let token = self.token()?;
        tracing::info!("Adding income");
        let res = self
            .backend
            .authorized(&token)
            .send_or_default(Request::incomes().create(income))
            .await?;
        Ok(Self::reply(res, "Income added successfully!"))
    }

    pub async fn update_income(&self, id: &str, income: NewIncome) -> Result<String, ClientError> {
        let token = self.token()?;
        tracing::info!("Updating income {}", id);
        let res = self
            .backend
            .authorized(&token)
            .send_or_default(Request::incomes().update(id, income))
            .await?;
        Ok(Self::reply(res, "Income updated successfully!"))
    }

    pub async fn add_goal(&self, goal: NewGoal) -> Result<String, ClientError> {
        let token = self.token()?;
        tracing::info!("Adding goal");
        let res = self
            .backend
            .authorized(&token)
            .send_or_default(Request::goals().create(goal))
            .await?;
        Ok(Self::reply(res, "Goal added successfully!"))
    }

    pub async fn update_goal(&self, id: &str, goal: NewGoal) -> Result<String, ClientError> {
        let token = self.token()?;
        tracing::info!("Updating goal {}", id);
        let res = self
            .backend
            .authorized(&token)
            .send_or_default(Request::goals().update(id, goal))
            .await?;
        Ok(Self::reply(res, "Goal updated successfully!"))
    }

    /// Move `amount` into the current goal.
    pub async fn contribute(&self, amount: f64) -> Result<String, ClientError> {
        let token = self.token()?;
        tracing::info!("Contributing to current goal");
        let res = self
            .backend
            .authorized(&token)
            .send_or_default(Request::goals().contribute(amount))
            .await?;
        Ok(Self::reply(
            res,
            &format!("Successfully added {} to your goal", amount),
        ))
    }

    pub async fn add_job(&self, job: NewJob) -> Result<String, ClientError> {
        let token = self.token()?;
        tracing::info!("Adding job");
        let res = self
            .backend
            .authorized(&token)
            .send_or_default(Request::jobs().create(job))
            .await?;
        Ok(Self::reply(res, "Job added successfully!"))
    }

    pub async fn update_job(&self, id: &str, job: NewJob) -> Result<String, ClientError> {
        let token = self.token()?;
        tracing::info!("Updating job {}", id);
        let res = self
            .backend
            .authorized(&token)
            .send_or_default(Request::jobs().update(id, job))
            .await?;
        Ok(Self::reply(res, "Job updated successfully!"))
    }
}
