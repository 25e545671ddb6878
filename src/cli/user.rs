use crate::cli::CliContext;
use crate::constants;
use crate::core::users::Outcome;
use crate::models::entry::Entry;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Table};
use serde::Serialize;
use zeroize::Zeroizing;

fn parse_username(s: &str) -> Result<String, String> {
    if s.is_empty() {
        return Err("username cannot be empty".into());
    }
    if s.contains(constants::FIELD_DELIMITER) {
        return Err(format!(
            "'{}' is the field delimiter and not allowed in usernames",
            constants::FIELD_DELIMITER
        ));
    }
    if s.trim() != s {
        return Err("leading or trailing whitespace not allowed".into());
    }
    if s.chars().any(char::is_control) {
        return Err("control characters not allowed".into());
    }
    Ok(s.to_string())
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    #[default]
    Text,
    Table,
    Json,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = ListFormat::Text)]
    pub format: ListFormat,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Username
    #[arg(value_parser = parse_username)]
    pub username: String,

    /// Password
    pub password: String,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Username
    #[arg(value_parser = parse_username)]
    pub username: String,
}

#[derive(Args, Debug)]
pub struct EditpassArgs {
    /// Username
    #[arg(value_parser = parse_username)]
    pub username: String,

    /// New password
    pub new_password: String,
}

#[derive(Serialize)]
struct ListItem {
    index: usize,
    username: String,
}

pub fn run_list(ctx: &CliContext, args: ListArgs) -> Result<()> {
    let entries = ctx.users.list()?;

    match args.format {
        ListFormat::Json => {
            let items: Vec<ListItem> = entries
                .into_iter()
                .enumerate()
                .map(|(i, e)| ListItem {
                    index: i + 1,
                    username: e.username,
                })
                .collect();
            let json = serde_json::to_string_pretty(&items).context("serialize list")?;
            println!("{}", json);
        }
        ListFormat::Text => {
            for line in text_lines(&entries) {
                println!("{}", line);
            }
        }
        ListFormat::Table if entries.is_empty() => println!("no users found"),
        ListFormat::Table => println!("{}", render_table(&entries)),
    }
    Ok(())
}

fn text_lines(entries: &[Entry]) -> Vec<String> {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{}. {}", i + 1, e.username))
        .collect()
}

fn render_table(entries: &[Entry]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Username").add_attribute(Attribute::Bold),
        Cell::new("Hash").add_attribute(Attribute::Bold),
    ]);
    for (i, entry) in entries.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            entry.username.clone(),
            entry.hash_scheme().unwrap_or("-").to_string(),
        ]);
    }
    table
}

pub fn run_add(ctx: &CliContext, args: AddArgs) -> Result<()> {
    let password = Zeroizing::new(args.password);
    let outcome = ctx
        .users
        .add(&args.username, &password)
        .with_context(|| format!("add user {}", args.username))?;
    let message = match outcome {
        Outcome::AlreadyExists => format!(
            "user {} already exists, use editpass to change the password",
            args.username
        ),
        _ => format!("user {} added", args.username),
    };
    ctx.report(outcome, &message);
    Ok(())
}

pub fn run_delete(ctx: &CliContext, args: DeleteArgs) -> Result<()> {
    let outcome = ctx
        .users
        .delete(&args.username)
        .with_context(|| format!("delete user {}", args.username))?;
    let message = match outcome {
        Outcome::NotFound => format!("user {} does not exist", args.username),
        _ => format!("user {} deleted", args.username),
    };
    ctx.report(outcome, &message);
    Ok(())
}

pub fn run_editpass(ctx: &CliContext, args: EditpassArgs) -> Result<()> {
    let password = Zeroizing::new(args.new_password);
    let outcome = ctx
        .users
        .change_password(&args.username, &password)
        .with_context(|| format!("change password for {}", args.username))?;
    let message = match outcome {
        Outcome::NotFound => format!("user {} does not exist", args.username),
        _ => format!("password for user {} updated", args.username),
    };
    ctx.report(outcome, &message);
    Ok(())
}
