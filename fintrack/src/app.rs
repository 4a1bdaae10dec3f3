use crate::backend::{
    ExpenseSource, GoalSource, HttpBackend, IncomeSource, JobSource, ListItem, PageSource,
    TokenSupplier,
};
use crate::cli::{Command, ItemForm, Resource};
use crate::controller::PaginatedController;
use crate::dashboard::{Dashboard, GoalSummary};
use crate::mutations::Mutations;
use crate::session::{RememberMe, SessionManager, SessionState};
use crate::state::validators::{self, ExpenseForm, GoalForm, IncomeForm, JobForm};
use crate::state::ListConfig;
use crate::utils::dates::today;
use anyhow::Result;
use chrono::Utc;
use fintrack_auth::{FileStore, Settings};
use std::sync::Arc;

/// One CLI invocation: restores the saved session, runs a command and
/// prints the outcome.
pub struct App {
    settings: Settings,
    backend: Arc<HttpBackend>,
    session: SessionManager<HttpBackend, FileStore>,
}

impl App {
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;
        let store = settings.token_store()?;
        let backend = Arc::new(HttpBackend::new(&settings.server_url));
        let session = SessionManager::new(backend.clone(), store);
        Ok(Self {
            settings,
            backend,
            session,
        })
    }

    fn tokens(&self) -> Arc<dyn TokenSupplier> {
        Arc::new(self.session.handle())
    }

    fn mutations(&self) -> Mutations {
        Mutations::new(self.backend.clone(), self.tokens())
    }

    fn list_config(&self) -> ListConfig {
        ListConfig::new(self.settings.page_size)
    }

    pub async fn run(self, command: Command) -> Result<()> {
        tracing::info!("Using server {}", self.backend.server_url());
        self.session.restore().await?;

        match command {
            Command::Login {
                email,
                password,
                remember,
            } => {
                let remember = if remember {
                    RememberMe::Remember
                } else {
                    RememberMe::Forget
                };
                let message = self.session.login(&email, &password, remember).await?;
                println!("{}", message);
                if remember == RememberMe::Forget {
                    println!("Session not saved; pass --remember to stay signed in.");
                }
            }

            Command::Signup {
                name,
                email,
                password,
            } => {
                println!("{}", self.session.signup(&name, &email, &password).await?);
            }

            Command::Logout => {
                self.session.logout().await?;
                println!("Logged out.");
            }

            Command::Status => match self.session.state() {
                SessionState::Authenticated => println!("Signed in."),
                SessionState::Unauthenticated => println!("Not signed in."),
            },

            Command::Home => {
                let details = self.session.user_details().await?;
                print_dashboard(&Dashboard::new(details, Utc::now()));
            }

            Command::List {
                resource,
                page,
                all,
            } => self.list(resource, page, all).await?,

            Command::Delete { resource, id } => {
                self.delete(resource, &id).await?;
                println!("Deleted {}.", id);
            }

            Command::Add(form) => {
                println!("{}", self.save(None, form).await?);
            }

            Command::Edit(args) => {
                println!("{}", self.save(Some(&args.id), args.form).await?);
            }

            Command::Contribute { amount } => {
                let amount = validators::contribution(&amount)?;
                println!("{}", self.mutations().contribute(amount).await?);
            }

            Command::ChangePassword { old, new, confirm } => {
                validators::confirm_password(&new, &confirm)?;
                println!("{}", self.session.change_password(&old, &new).await?);
            }

            Command::ChangeName { name } => {
                let current = self.session.user_details().await?.user.name;
                println!("{}", self.session.change_name(&current, &name).await?);
            }
        }

        Ok(())
    }

    async fn list(&self, resource: Resource, page: u32, all: bool) -> Result<()> {
        let backend = self.backend.clone();
        match resource {
            Resource::Expenses => {
                self.show_list(Arc::new(ExpenseSource::new(backend)), page, all)
                    .await
            }
            Resource::Incomes => {
                self.show_list(Arc::new(IncomeSource::new(backend)), page, all)
                    .await
            }
            Resource::Goals => {
                let source = Arc::new(GoalSource::new(backend));
                self.show_list(source.clone(), page, all).await?;
                match source.current_goal() {
                    Some(goal) => print_goal(&GoalSummary::new(&goal, Utc::now())),
                    None => println!("No active goal."),
                }
                Ok(())
            }
            Resource::Jobs => self.show_list(Arc::new(JobSource::new(backend)), page, all).await,
        }
    }

    async fn show_list<S: PageSource>(&self, source: Arc<S>, page: u32, all: bool) -> Result<()> {
        let mut config = self.list_config();
        if all {
            config = config.append();
        }
        let controller = PaginatedController::new(source, self.tokens(), config);

        if all {
            controller.load(1).await?;
            while controller.load_more().await? {}
        } else {
            controller.load(page).await?;
        }

        let state = controller.snapshot();
        if state.items.is_empty() {
            println!("Nothing here yet.");
        }
        for item in &state.items {
            println!("{}  {}", item.id(), item.summary());
        }
        if !all && state.total_pages > 0 {
            let window = state
                .window()
                .iter()
                .map(|p| {
                    if *p == state.page {
                        format!("[{}]", p)
                    } else {
                        p.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(" ");
            println!("Page {} of {}: {}", state.page, state.total_pages, window);
        }
        Ok(())
    }

    async fn delete(&self, resource: Resource, id: &str) -> Result<()> {
        let backend = self.backend.clone();
        match resource {
            Resource::Expenses => self.delete_from(ExpenseSource::new(backend), id).await,
            Resource::Incomes => self.delete_from(IncomeSource::new(backend), id).await,
            Resource::Goals => self.delete_from(GoalSource::new(backend), id).await,
            Resource::Jobs => self.delete_from(JobSource::new(backend), id).await,
        }
    }

    async fn delete_from<S: PageSource>(&self, source: S, id: &str) -> Result<()> {
        let controller =
            PaginatedController::new(Arc::new(source), self.tokens(), self.list_config());
        controller.remove(id).await?;
        Ok(())
    }

    /// Create the item, or replace `id` when given.
    async fn save(&self, id: Option<&str>, form: ItemForm) -> Result<String> {
        let mutations = self.mutations();
        let message = match form {
            ItemForm::Expense {
                name,
                amount,
                recurring,
                deduction_date,
            } => {
                let expense = validators::build_expense(
                    &ExpenseForm {
                        name,
                        amount,
                        is_recurring: recurring,
                        deduction_date: deduction_date.unwrap_or_default(),
                    },
                    today(),
                )?;
                match id {
                    Some(id) => mutations.update_expense(id, expense).await?,
                    None => mutations.add_expense(expense).await?,
                }
            }
            ItemForm::Income {
                name,
                amount,
                description,
            } => {
                let income = validators::build_income(&IncomeForm {
                    name,
                    amount,
                    description,
                })?;
                match id {
                    Some(id) => mutations.update_income(id, income).await?,
                    None => mutations.add_income(income).await?,
                }
            }
            ItemForm::Goal {
                name,
                target,
                description,
                monthly,
                deadline,
            } => {
                let goal = validators::build_goal(&GoalForm {
                    name,
                    target_amount: target,
                    description,
                    monthly_contribution: monthly,
                    deadline,
                })?;
                match id {
                    Some(id) => mutations.update_goal(id, goal).await?,
                    None => mutations.add_goal(goal).await?,
                }
            }
            ItemForm::Job {
                name,
                salary,
                organization,
            } => {
                let job = validators::build_job(&JobForm {
                    name,
                    salary,
                    organization,
                })?;
                match id {
                    Some(id) => mutations.update_job(id, job).await?,
                    None => mutations.add_job(job).await?,
                }
            }
        };
        Ok(message)
    }
}

fn print_dashboard(dashboard: &Dashboard) {
    println!("{}", dashboard.greeting);
    println!("Total expenses: {:.2}", dashboard.total_expense);
    if let Some(salary) = dashboard.salary {
        println!("Salary: {:.2}", salary);
    }
    match &dashboard.goal {
        Some(goal) => print_goal(goal),
        None => println!("No active goal."),
    }
    if !dashboard.activities.is_empty() {
        println!("Recent activity:");
        for activity in &dashboard.activities {
            let sign = if activity.is_income() { "+" } else { "-" };
            println!("  {}{:.2}  {}", sign, activity.amount, activity.name);
        }
    }
}

fn print_goal(goal: &GoalSummary) {
    println!(
        "Goal {}: {:.2}/{:.2} ({:.0}%), {} days left",
        goal.name,
        goal.saved_amount,
        goal.target_amount,
        goal.progress * 100.0,
        goal.days_left
    );
}
