use crate::error::ClientError;
use crate::utils::dates::parse_form_date;
use chrono::NaiveDate;
use fintrack_api::endpoints::{
    expenses::NewExpense, goals::NewGoal, incomes::NewIncome, jobs::NewJob,
};

pub const ALL_FIELDS_REQUIRED: &str = "All fields are required.";
pub const REQUIRED_FIELDS_MISSING: &str = "Please fill in all required fields";
pub const FILL_ALL_FIELDS: &str = "Please fill in all fields";
pub const INVALID_NUMBER: &str = "Please enter valid numeric values.";

/// Raw text of the add/edit expense form
#[derive(Default, Debug, Clone)]
pub struct ExpenseForm {
    pub name: String,
    pub amount: String,
    pub is_recurring: bool,
    /// `YYYY-MM-DD`; only read for recurring expenses
    pub deduction_date: String,
}

#[derive(Default, Debug, Clone)]
pub struct IncomeForm {
    pub name: String,
    pub amount: String,
    pub description: String,
}

#[derive(Default, Debug, Clone)]
pub struct GoalForm {
    pub name: String,
    pub target_amount: String,
    pub description: String,
    pub monthly_contribution: String,
    pub deadline: String,
}

#[derive(Default, Debug, Clone)]
pub struct JobForm {
    pub name: String,
    pub salary: String,
    pub organization: String,
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Reject the form when any of `fields` is blank.
pub fn require_fields(fields: &[&str]) -> Result<(), ClientError> {
    if fields.iter().any(|f| is_blank(f)) {
        return Err(ClientError::validation(ALL_FIELDS_REQUIRED));
    }
    Ok(())
}

/// Parse a positive, finite amount.
pub fn parse_amount(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount > 0.0)
}

fn numeric(input: &str) -> Result<f64, ClientError> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ClientError::validation(INVALID_NUMBER))
}

/// Validate an expense form. Non-recurring expenses are deducted `today`.
pub fn build_expense(form: &ExpenseForm, today: NaiveDate) -> Result<NewExpense, ClientError> {
    let amount = parse_amount(&form.amount)
        .filter(|_| !is_blank(&form.name))
        .ok_or_else(|| ClientError::validation(REQUIRED_FIELDS_MISSING))?;

    let deduction_date = if form.is_recurring {
        if is_blank(&form.deduction_date) {
            return Err(ClientError::validation(REQUIRED_FIELDS_MISSING));
        }
        parse_form_date(&form.deduction_date).map_err(ClientError::validation)?
    } else {
        today
    };

    Ok(NewExpense {
        name: form.name.trim().to_string(),
        amount,
        is_recurring: form.is_recurring,
        deduction_date,
    })
}

pub fn build_income(form: &IncomeForm) -> Result<NewIncome, ClientError> {
    if is_blank(&form.name) || is_blank(&form.amount) || is_blank(&form.description) {
        return Err(ClientError::validation(FILL_ALL_FIELDS));
    }
    let amount = parse_amount(&form.amount).ok_or_else(|| ClientError::validation(INVALID_NUMBER))?;

    Ok(NewIncome {
        name: form.name.trim().to_string(),
        amount,
        description: form.description.trim().to_string(),
    })
}

pub fn build_goal(form: &GoalForm) -> Result<NewGoal, ClientError> {
    if [
        &form.name,
        &form.target_amount,
        &form.description,
        &form.monthly_contribution,
        &form.deadline,
    ]
    .iter()
    .any(|f| is_blank(f))
    {
        return Err(ClientError::validation(FILL_ALL_FIELDS));
    }

    let target_amount = numeric(&form.target_amount)?;
    let monthly_contribution = numeric(&form.monthly_contribution)?;
    let deadline = parse_form_date(&form.deadline).map_err(ClientError::validation)?;

    Ok(NewGoal {
        name: form.name.trim().to_string(),
        target_amount,
        description: form.description.trim().to_string(),
        monthly_contribution,
        deadline,
    })
}

pub fn build_job(form: &JobForm) -> Result<NewJob, ClientError> {
    if is_blank(&form.name) || is_blank(&form.salary) || is_blank(&form.organization) {
        return Err(ClientError::validation(FILL_ALL_FIELDS));
    }
    let salary = numeric(&form.salary)?;

    Ok(NewJob {
        name: form.name.trim().to_string(),
        salary,
        organization: form.organization.trim().to_string(),
    })
}

/// Amount to move into the current goal.
pub fn contribution(input: &str) -> Result<f64, ClientError> {
    if is_blank(input) {
        return Err(ClientError::validation("Amount required."));
    }
    parse_amount(input).ok_or_else(|| ClientError::validation(INVALID_NUMBER))
}

/// Checked before any password change is sent.
pub fn password_change(old_password: &str, new_password: &str) -> Result<(), ClientError> {
    if old_password.is_empty() || new_password.is_empty() {
        return Err(ClientError::validation("Please fill all fields required."));
    }
    if old_password == new_password {
        return Err(ClientError::validation("Please add a different password"));
    }
    Ok(())
}

pub fn confirm_password(new_password: &str, confirmation: &str) -> Result<(), ClientError> {
    if new_password != confirmation {
        return Err(ClientError::validation("Password didn't match"));
    }
    Ok(())
}

pub fn name_change(current: &str, new_name: &str) -> Result<(), ClientError> {
    if is_blank(new_name) {
        return Err(ClientError::validation("Name required."));
    }
    if new_name.trim() == current.trim() {
        return Err(ClientError::validation("Please add a different name"));
    }
    Ok(())
}
