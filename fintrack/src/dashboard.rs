use crate::utils::{dates::days_left, math::goal_progress};
use chrono::{DateTime, Utc};
use fintrack_api::endpoints::{
    goals::Goal,
    user::{Activity, UserDetails},
};

#[derive(Debug, Clone, PartialEq)]
pub struct GoalSummary {
    pub name: String,
    pub saved_amount: f64,
    pub target_amount: f64,
    /// Between 0 and 1
    pub progress: f64,
    pub days_left: i64,
}

impl GoalSummary {
    pub fn new(goal: &Goal, now: DateTime<Utc>) -> Self {
        Self {
            name: goal.name.clone(),
            saved_amount: goal.saved_amount,
            target_amount: goal.target_amount,
            progress: goal_progress(goal.saved_amount, goal.target_amount),
            days_left: days_left(goal.deadline, now),
        }
    }
}

/// Home screen figures derived from `user/get`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub greeting: String,
    pub total_expense: f64,
    pub salary: Option<f64>,
    pub goal: Option<GoalSummary>,
    pub activities: Vec<Activity>,
}

impl Dashboard {
    pub fn new(details: UserDetails, now: DateTime<Utc>) -> Self {
        let name = details.user.name.trim();
        let greeting = if name.is_empty() {
            "Welcome!".to_string()
        } else {
            format!("Hi, {}!", name)
        };

        Self {
            greeting,
            total_expense: details.total_expense,
            salary: details.job.as_ref().map(|job| job.salary),
            goal: details.current_goal.as_ref().map(|g| GoalSummary::new(g, now)),
            activities: details.activities,
        }
    }

    /// Progress of the current goal, 0 without one.
    pub fn goal_progress(&self) -> f64 {
        self.goal.as_ref().map_or(0.0, |g| g.progress)
    }
}
