use crate::endpoints::{
    auth::{ChangePassword, Login, Register},
    expenses::{CreateExpense, DeleteExpense, ListExpenses, NewExpense, UpdateExpense},
    goals::{Contribute, CreateGoal, DeleteGoal, ListGoals, NewGoal, UpdateGoal},
    incomes::{CreateIncome, DeleteIncome, ListIncomes, NewIncome, UpdateIncome},
    jobs::{CreateJob, DeleteJob, ListJobs, NewJob, UpdateJob},
    user::{EditName, GetUser},
    ResourceId,
};
use secrecy::SecretString;

pub struct AuthRepository;

impl AuthRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn login(&self, email: impl Into<String>, password: SecretString) -> Login {
        Login::new(email, password)
    }

    pub fn register(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
        password: SecretString,
    ) -> Register {
        Register::new(name, email, password)
    }

    pub fn change_password(&self, old: SecretString, new: SecretString) -> ChangePassword {
        ChangePassword::new(old, new)
    }
}

pub struct UserRepository;

impl UserRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn get(&self) -> GetUser {
        GetUser
    }

    pub fn edit_name(&self, name: impl Into<String>) -> EditName {
        EditName::new(name)
    }
}

pub struct ExpenseRepository;

impl ExpenseRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self, page: u32, limit: u32) -> ListExpenses {
        ListExpenses::new().page(page).limit(limit)
    }

    pub fn create(&self, expense: NewExpense) -> CreateExpense {
        CreateExpense::new(expense)
    }

    pub fn update(&self, expense_id: impl Into<ResourceId>, expense: NewExpense) -> UpdateExpense {
        UpdateExpense::new(expense_id, expense)
    }

    pub fn delete(&self, expense_id: impl Into<ResourceId>) -> DeleteExpense {
        DeleteExpense::new(expense_id)
    }
}

pub struct IncomeRepository;

impl IncomeRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self, page: u32, limit: u32) -> ListIncomes {
        ListIncomes::new().page(page).limit(limit)
    }

    pub fn create(&self, income: NewIncome) -> CreateIncome {
        CreateIncome::new(income)
    }

    pub fn update(&self, income_id: impl Into<ResourceId>, income: NewIncome) -> UpdateIncome {
        UpdateIncome::new(income_id, income)
    }

    pub fn delete(&self, income_id: impl Into<ResourceId>) -> DeleteIncome {
        DeleteIncome::new(income_id)
    }
}

pub struct GoalRepository;

impl GoalRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self, page: u32, limit: u32) -> ListGoals {
        ListGoals::new().page(page).limit(limit)
    }

    pub fn create(&self, goal: NewGoal) -> CreateGoal {
        CreateGoal::new(goal)
    }

    pub fn update(&self, goal_id: impl Into<ResourceId>, goal: NewGoal) -> UpdateGoal {
        UpdateGoal::new(goal_id, goal)
    }

    pub fn delete(&self, goal_id: impl Into<ResourceId>) -> DeleteGoal {
        DeleteGoal::new(goal_id)
    }

    pub fn contribute(&self, amount: f64) -> Contribute {
        Contribute::new(amount)
    }
}

pub struct JobRepository;

impl JobRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self, page: u32, limit: u32) -> ListJobs {
        ListJobs::new().page(page).limit(limit)
    }

    pub fn create(&self, job: NewJob) -> CreateJob {
        CreateJob::new(job)
    }

    pub fn update(&self, job_id: impl Into<ResourceId>, job: NewJob) -> UpdateJob {
        UpdateJob::new(job_id, job)
    }

    pub fn delete(&self, job_id: impl Into<ResourceId>) -> DeleteJob {
        DeleteJob::new(job_id)
    }
}
