use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use super::resources::spinner;
use super::{output, Context};
use crate::api::ApiClient;
use crate::views::table::loading_message;
use crate::views::{build_table, DraftField, UsersView, ViewState};

#[derive(Args)]
pub struct UsersCommand {
    #[command(subcommand)]
    action: Option<UsersAction>,
}

#[derive(Subcommand)]
enum UsersAction {
    /// Edit a user's name, email or team
    Edit(EditArgs),
}

#[derive(Args)]
struct EditArgs {
    /// User identifier
    id: String,

    /// New display name
    #[arg(long)]
    name: Option<String>,

    /// New email address
    #[arg(long)]
    email: Option<String>,

    /// New team name (empty string for no team)
    #[arg(long)]
    team: Option<String>,
}

impl EditArgs {
    fn has_changes(&self) -> bool {
        self.name.is_some() || self.email.is_some() || self.team.is_some()
    }
}

impl UsersCommand {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        let client = ctx.client()?;
        let view = load_users(&client).await?;

        match self.action {
            None => {}
            Some(UsersAction::Edit(args)) => {
                if !view.open_edit_by_id(&args.id) {
                    anyhow::bail!("User {} not found", args.id);
                }

                if args.has_changes() {
                    apply_flags(&view, &args);
                    view.save(&client).await.map_err(anyhow::Error::msg)?;
                } else {
                    edit_interactively(&view, &client).await?;
                }

                println!("✓ User {} updated", args.id);
                println!();
            }
        }

        view.with_state(|state| {
            if let ViewState::Loaded(users) = state {
                output::print_table(&build_table(users, &ctx.dates));
            }
        });

        Ok(())
    }
}

async fn load_users(client: &ApiClient) -> Result<UsersView> {
    let view = UsersView::new();

    let pb = spinner(loading_message(view.list().resource()));
    view.load(client).await;
    pb.finish_and_clear();

    if let Some(message) = view.with_state(|state| state.error().map(str::to_string)) {
        anyhow::bail!(message);
    }

    Ok(view)
}

fn apply_flags(view: &UsersView, args: &EditArgs) {
    view.with_edit(|flow| {
        let fields = [
            (DraftField::Name, &args.name),
            (DraftField::Email, &args.email),
            (DraftField::Team, &args.team),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                flow.set_field(field, value.clone());
            }
        }
    });
}

/// Prompt for each field, save, and offer another attempt on failure
async fn edit_interactively(view: &UsersView, client: &ApiClient) -> Result<()> {
    let theme = ColorfulTheme::default();
    let fetched = view.team_choices();

    loop {
        let Some((target, draft, error)) = view.with_edit(|flow| {
            let draft = flow.draft()?.clone();
            Some((
                flow.target_name().unwrap_or_default().to_string(),
                draft,
                flow.error().map(str::to_string),
            ))
        }) else {
            return Ok(());
        };

        println!("✏️  Edit User — {}", target);
        if let Some(error) = error {
            println!("{}", console::style(format!("Error: {}", error)).red());
        }

        let name: String = Input::with_theme(&theme)
            .with_prompt(DraftField::Name.label())
            .with_initial_text(draft.name.clone())
            .allow_empty(true)
            .interact_text()
            .context("Failed to read name")?;

        let email: String = Input::with_theme(&theme)
            .with_prompt(DraftField::Email.label())
            .with_initial_text(draft.email.clone())
            .allow_empty(true)
            .interact_text()
            .context("Failed to read email")?;

        let (choices, current) = team_options(&fetched, &draft.team);
        let labels: Vec<&str> = choices
            .iter()
            .map(|c| if c.is_empty() { "— No Team —" } else { c.as_str() })
            .collect();
        let team = Select::with_theme(&theme)
            .with_prompt(DraftField::Team.label())
            .items(&labels)
            .default(current)
            .interact()
            .context("Failed to read team")?;

        view.with_edit(|flow| {
            flow.set_field(DraftField::Name, name);
            flow.set_field(DraftField::Email, email);
            flow.set_field(DraftField::Team, choices[team].clone());
        });

        match view.save(client).await {
            Ok(()) => return Ok(()),
            Err(message) => {
                eprintln!("{}", console::style(format!("Save failed: {}", message)).red());

                let retry = Confirm::with_theme(&theme)
                    .with_prompt("Try again?")
                    .default(true)
                    .interact()
                    .context("Failed to read confirmation")?;

                if !retry {
                    view.with_edit(|flow| flow.cancel());
                    anyhow::bail!(message);
                }
            }
        }
    }
}

/// Team choices for the prompt and the index to preselect. A current team
/// the server no longer lists (or that could not be fetched) stays
/// selectable so accepting the default keeps it.
fn team_options(fetched: &[String], current: &str) -> (Vec<String>, usize) {
    let mut choices = fetched.to_vec();
    if choices.is_empty() {
        choices.push(String::new());
    }

    let index = match choices.iter().position(|c| c == current) {
        Some(index) => index,
        None => {
            choices.push(current.to_string());
            choices.len() - 1
        }
    };

    (choices, index)
}
