// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use octofit_console::api::{Activities, ApiClient, ResourceApi, Teams, Users, Workouts};
use octofit_console::config::{Config, Environment};
use octofit_console::constants::limits::DEFAULT_LEADERBOARD_TOP;
use octofit_console::logging::LoggingConfig;
use octofit_console::screen::{
    CrudScreen, DeleteOutcome, DisplayRow, EntityForm, ScreenKind, SubmitOutcome,
};
use octofit_console::views::{rank_entries, LeaderboardScreen, RankedRow, TeamsScreen};

#[derive(Parser)]
#[command(name = "octofit-console", author, version)]
#[command(about = "Manage OctoFit users, teams, activities and workouts")]
struct Cli {
    /// API origin, overriding config file and environment
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Users,
    Teams,
    Activities,
    Workouts,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved API origin
    Origin,

    /// List every record of a kind
    List { kind: Kind },

    /// Show one record
    Show { kind: Kind, id: String },

    /// Create a record from `--set field=value` pairs
    Create {
        kind: Kind,
        #[arg(long = "set", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
    },

    /// Update a record from `--set field=value` pairs
    Edit {
        kind: Kind,
        id: String,
        #[arg(long = "set", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
    },

    /// Delete a record after confirmation
    Delete {
        kind: Kind,
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Teams with their members
    Teams,

    /// Ranked leaderboard
    Leaderboard {
        /// Only the first N entries (10 when no value is given)
        #[arg(long)]
        top: Option<Option<usize>>,
    },

    /// Ask the server to recompute one user's leaderboard entry
    RefreshStats { user_id: String },
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(field, value)| (field.trim().to_string(), value.to_string()))
        .filter(|(field, _)| !field.is_empty())
        .ok_or_else(|| format!("expected field=value, got `{}`", raw))
}

macro_rules! with_kind {
    ($kind:expr, $func:ident($($arg:expr),*)) => {
        match $kind {
            Kind::Users => $func::<Users>($($arg),*).await,
            Kind::Teams => $func::<Teams>($($arg),*).await,
            Kind::Activities => $func::<Activities>($($arg),*).await,
            Kind::Workouts => $func::<Workouts>($($arg),*).await,
        }
    };
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env = Environment::capture();
    let mut config = match cli.config.clone() {
        Some(path) => Config::load(Some(path))?,
        None => Config::load_from_env(&env)?,
    };

    let mut logging = LoggingConfig::from_env().with_settings(&config.logging);
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    logging.init()?;

    if let Some(base) = cli.api_base {
        config.api.base_url = Some(base);
        config.validate().context("Invalid --api-base")?;
    }

    let client = ApiClient::from_config(&config, &env);
    info!("Using API origin {}", client.base_url());

    match cli.command {
        Commands::Origin => println!("{}", client.base_url()),
        Commands::List { kind } => with_kind!(kind, list_records(&client))?,
        Commands::Show { kind, id } => with_kind!(kind, show_record(&client, &id))?,
        Commands::Create { kind, set } => with_kind!(kind, save_record(&client, None, &set))?,
        Commands::Edit { kind, id, set } => {
            with_kind!(kind, save_record(&client, Some(id.as_str()), &set))?
        }
        Commands::Delete { kind, id, yes } => with_kind!(kind, delete_record(&client, &id, yes))?,
        Commands::Teams => show_teams(&client).await?,
        Commands::Leaderboard { top } => {
            show_leaderboard(&client, top.map(|n| n.unwrap_or(DEFAULT_LEADERBOARD_TOP))).await?
        }
        Commands::RefreshStats { user_id } => {
            let entry = client.refresh_leaderboard_stats(&user_id).await?;
            println!("Updated stats for {}", user_id);
            print_leaderboard(&rank_entries(std::slice::from_ref(&entry)));
        }
    }

    Ok(())
}

async fn list_records<K>(client: &ApiClient) -> Result<()>
where
    K: ScreenKind,
    K::Record: DisplayRow,
{
    let mut screen = CrudScreen::new(client.resource::<K>());
    screen.load().await;
    if let Some(message) = screen.error() {
        bail!("{}", message);
    }

    let rows = screen.records().iter().map(DisplayRow::row).collect();
    print_table(<K::Record as DisplayRow>::COLUMNS, rows);
    Ok(())
}

async fn show_record<K>(client: &ApiClient, id: &str) -> Result<()>
where
    K: ScreenKind,
    K::Record: DisplayRow,
{
    let record = client
        .resource::<K>()
        .get(id)
        .await
        .with_context(|| format!("Failed to fetch {} {}", K::SINGULAR, id))?;

    for (column, value) in <K::Record as DisplayRow>::COLUMNS.iter().zip(record.row()) {
        println!("{:>12}: {}", column, value);
    }
    Ok(())
}

async fn save_record<K: ScreenKind>(
    client: &ApiClient,
    id: Option<&str>,
    assignments: &[(String, String)],
) -> Result<()> {
    let mut screen = CrudScreen::new(client.resource::<K>());

    match id {
        Some(id) => {
            screen.load().await;
            if let Some(message) = screen.error() {
                bail!("{}", message);
            }
            screen.open_edit(id)?;
        }
        None => screen.open_create(),
    }

    for (field, value) in assignments {
        screen.edit_field(field, value).with_context(|| {
            format!(
                "Editable {} fields: {}",
                K::SINGULAR,
                <K::Form as EntityForm<K>>::FIELDS.join(", ")
            )
        })?;
    }

    match screen.submit().await {
        SubmitOutcome::Saved => {
            println!("Saved {} ({} {} now listed)", K::SINGULAR, screen.records().len(), K::PLURAL);
            Ok(())
        }
        SubmitOutcome::Invalid => {
            let editor = screen
                .editor()
                .ok_or_else(|| anyhow!("Form closed unexpectedly"))?;
            for (field, message) in editor.field_errors() {
                eprintln!("  {}: {}", field, message);
            }
            bail!("The {} form has invalid fields", K::SINGULAR)
        }
        SubmitOutcome::Rejected => bail!(
            "{}",
            screen.error().unwrap_or("The server rejected the request")
        ),
        SubmitOutcome::NotEditing => bail!("No form is open"),
    }
}

async fn delete_record<K: ScreenKind>(client: &ApiClient, id: &str, yes: bool) -> Result<()> {
    let mut screen = CrudScreen::new(client.resource::<K>());
    screen.request_delete(id);

    if !yes && !confirm(&format!("Delete {} {}?", K::SINGULAR, id)).await? {
        screen.cancel_delete();
        println!("Cancelled");
        return Ok(());
    }

    match screen.confirm_delete().await {
        DeleteOutcome::Deleted => {
            println!("Deleted {} {}", K::SINGULAR, id);
            Ok(())
        }
        DeleteOutcome::Rejected => bail!(
            "{}",
            screen.error().unwrap_or("The server rejected the request")
        ),
        DeleteOutcome::NothingPending => bail!("Nothing to delete"),
    }
}

async fn confirm(question: &str) -> Result<bool> {
    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(format!("{} [y/N] ", question).as_bytes())
        .await?;
    stdout.flush().await?;

    let mut answer = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut answer)
        .await?;
    debug!("Confirmation answer: {:?}", answer.trim());

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

async fn show_teams(client: &ApiClient) -> Result<()> {
    let mut screen = TeamsScreen::new(client.teams(), client.users());
    screen.load().await;
    if let Some(message) = screen.screen().error() {
        bail!("{}", message);
    }

    for membership in screen.memberships() {
        println!(
            "[{}] {} ({})",
            membership.emblem(),
            membership.team.name,
            membership.member_label()
        );
        for name in membership.preview_names() {
            println!("    - {}", name);
        }
        if let Some(note) = membership
            .overflow_note()
            .or_else(|| membership.unloaded_note())
        {
            println!("    {}", note);
        }
    }
    Ok(())
}

async fn show_leaderboard(client: &ApiClient, top: Option<usize>) -> Result<()> {
    let rows = match top {
        Some(limit) => rank_entries(&client.leaderboard_top(limit).await?),
        None => {
            let mut screen = LeaderboardScreen::new(client.clone());
            screen.load().await;
            if let Some(message) = screen.error() {
                bail!("{}", message);
            }
            screen.rows()
        }
    };

    print_leaderboard(&rows);
    Ok(())
}

fn print_leaderboard(rows: &[RankedRow]) {
    let rows = rows
        .iter()
        .map(|row| {
            vec![
                match row.podium {
                    Some(podium) => format!("{} ({})", row.rank, podium.as_str()),
                    None => row.rank.to_string(),
                },
                row.username.clone(),
                row.team_name.clone(),
                row.total_activities.to_string(),
                row.total_calories.to_string(),
                row.total_distance.clone(),
                row.total_duration.to_string(),
            ]
        })
        .collect();

    print_table(
        &["Rank", "User", "Team", "Activities", "Calories", "Distance", "Minutes"],
        rows,
    );
}

fn print_table(columns: &[&str], rows: Vec<Vec<String>>) {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
    };

    println!("{}", render(columns.to_vec()));
    for row in &rows {
        println!("{}", render(row.iter().map(String::as_str).collect()));
    }
    if rows.is_empty() {
        println!("(none)");
    }
}
