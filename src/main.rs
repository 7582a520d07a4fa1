use anyhow::Result;
use structopt::StructOpt;

use credbook::model::form;
use credbook::model::storage::Kind;
use credbook::store::Store;
use credbook::theme;

#[derive(Debug, StructOpt)]
#[structopt(name = "credbook", about = "Keep a list of login credentials in a local store")]
enum Opt {
    /// Show all stored accounts
    List,
    /// Append a blank account
    Add,
    /// Change fields of one account
    Edit {
        id: i64,
        #[structopt(long)]
        login: Option<String>,
        #[structopt(long)]
        password: Option<String>,
        /// Account kind, local or LDAP
        #[structopt(long)]
        kind: Option<Kind>,
        /// All labels as one line, separated by ';'
        #[structopt(long)]
        labels: Option<String>,
    },
    /// Remove an account
    Rm { id: i64 },
    /// Switch between light and dark mode
    Theme,
}

// Main flow
fn main() -> Result<()> {
    pretty_env_logger::init();
    match Opt::from_args() {
        Opt::List => list(),
        Opt::Add => add(),
        Opt::Edit { id, login, password, kind, labels } => edit(id, login, password, kind, labels),
        Opt::Rm { id } => rm(id),
        Opt::Theme => toggle_theme(),
    }
}

fn list() -> Result<()> {
    let store = Store::open_default()?;
    if store.accounts().is_empty() {
        println!("No accounts stored");
        return Ok(());
    }
    for account in store.accounts() {
        println!(
            "{} {} login='{}' password={} labels=[{}]",
            account.id,
            account.kind,
            account.login,
            if account.password.is_some() { "set" } else { "-" },
            form::labels_line(&account.labels),
        );
    }
    Ok(())
}

fn add() -> Result<()> {
    let mut store = Store::open_default()?;
    let id = store.add()?;
    println!("Added account {}", id);
    Ok(())
}

fn edit(
    id: i64,
    login: Option<String>,
    password: Option<String>,
    kind: Option<Kind>,
    labels: Option<String>,
) -> Result<()> {
    let mut store = Store::open_default()?;
    let mut account = match store.get(id) {
        Some(a) => a.clone(),
        None => {
            println!("No account with id {}", id);
            return Ok(());
        }
    };
    if let Some(login) = login {
        account.login = login;
    }
    if let Some(password) = password {
        account.password = Some(password);
    }
    if let Some(kind) = kind {
        account.kind = kind;
    }
    if let Some(labels) = labels {
        account.set_labels_text(&labels);
    }
    if store.update(account)? {
        println!("Updated account {}", id);
        return Ok(());
    }
    // Stored anyway, only flagged
    println!("Updated account {}, some fields need fixing:", id);
    let errors = store.get(id).map(|a| a.errors).unwrap_or_default();
    if errors.login {
        println!("  login: required, at most {} characters", form::MAX_FIELD_CHARS);
    }
    if errors.password {
        println!("  password: required for local accounts, at most {} characters", form::MAX_FIELD_CHARS);
    }
    if errors.labels {
        println!("  labels: each label at most {} characters", form::MAX_LABEL_CHARS);
    }
    Ok(())
}

fn rm(id: i64) -> Result<()> {
    let mut store = Store::open_default()?;
    if store.remove(id)? {
        println!("Removed account {}", id);
    } else {
        println!("No account with id {}", id);
    }
    Ok(())
}

fn toggle_theme() -> Result<()> {
    let theme = theme::toggle_default()?;
    println!("Theme is now {}", theme.mode());
    Ok(())
}
