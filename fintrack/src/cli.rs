use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fintrack", version, about = "Track expenses, incomes, goals and jobs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Server base URL (overrides the config file).
    #[arg(long, global = true, env = "FINTRACK_SERVER_URL")]
    pub server_url: Option<String>,

    /// Directory for log files (default: ~/.config/fintrack/logs).
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in with email and password.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "FINTRACK_PASSWORD", hide_env_values = true)]
        password: String,
        /// Keep the session after this command exits.
        #[arg(long)]
        remember: bool,
    },

    /// Create an account and sign in.
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "FINTRACK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the saved session.
    Logout,

    /// Show whether a session is saved.
    Status,

    /// Totals, current goal and recent activity.
    Home,

    /// Show one page of a list.
    List {
        #[arg(value_enum)]
        resource: Resource,
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Keep loading pages until the end of the list.
        #[arg(long, conflicts_with = "page")]
        all: bool,
    },

    /// Delete an item by id.
    Delete {
        #[arg(value_enum)]
        resource: Resource,
        id: String,
    },

    /// Add an item.
    #[command(subcommand)]
    Add(ItemForm),

    /// Replace an existing item.
    Edit(EditArgs),

    /// Put money towards the current goal.
    Contribute { amount: String },

    ChangePassword {
        #[arg(long, env = "FINTRACK_OLD_PASSWORD", hide_env_values = true)]
        old: String,
        #[arg(long, env = "FINTRACK_NEW_PASSWORD", hide_env_values = true)]
        new: String,
        /// Repeat the new password.
        #[arg(long)]
        confirm: String,
    },

    ChangeName { name: String },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Expenses,
    Incomes,
    Goals,
    Jobs,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    pub id: String,
    #[command(subcommand)]
    pub form: ItemForm,
}

#[derive(Subcommand, Debug)]
pub enum ItemForm {
    Expense {
        #[arg(long)]
        name: String,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        recurring: bool,
        /// YYYY-MM-DD, required for recurring expenses
        #[arg(long)]
        deduction_date: Option<String>,
    },
    Income {
        #[arg(long)]
        name: String,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        description: String,
    },
    Goal {
        #[arg(long)]
        name: String,
        #[arg(long)]
        target: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        monthly: String,
        /// YYYY-MM-DD
        #[arg(long)]
        deadline: String,
    },
    Job {
        #[arg(long)]
        name: String,
        #[arg(long)]
        salary: String,
        #[arg(long)]
        organization: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_list_with_page() {
        let cli = Cli::try_parse_from(["fintrack", "list", "goals", "--page", "3"]).unwrap();
        match cli.command {
            Command::List {
                resource,
                page,
                all,
            } => {
                assert_eq!(resource, Resource::Goals);
                assert_eq!(page, 3);
                assert!(!all);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_edit_with_form() {
        let cli = Cli::try_parse_from([
            "fintrack", "edit", "abc", "job", "--name", "Dev", "--salary", "10", "--organization",
            "Acme",
        ])
        .unwrap();
        match cli.command {
            Command::Edit(args) => {
                assert_eq!(args.id, "abc");
                assert!(matches!(args.form, ItemForm::Job { .. }));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
