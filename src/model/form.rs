use itertools::Itertools;

use super::storage;
use super::storage::{Kind, Label};

pub const MAX_FIELD_CHARS: usize = 100;
pub const MAX_LABEL_CHARS: usize = 50;

// Form model, what an account looks like while it is being edited.
// Nothing is enforced at construction, a half filled account is a normal state.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: i64,
    pub labels: Vec<Label>,
    pub kind: Kind,
    pub login: String,
    pub password: Option<String>,
    pub labels_text: Option<String>,
    pub errors: FieldErrors,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FieldErrors {
    pub login: bool,
    pub password: bool,
    pub labels: bool,
}

impl FieldErrors {
    pub fn is_clear(self) -> bool {
        !(self.login || self.password || self.labels)
    }
}

impl Account {
    pub fn blank(id: i64) -> Account {
        Account {
            id,
            labels: vec![],
            kind: Kind::Local,
            login: String::new(),
            password: Some(String::new()),
            labels_text: Some(String::new()),
            errors: FieldErrors::default(),
        }
    }

    // Recompute the per-field flags. LDAP accounts never need a password.
    pub fn validate(&mut self) -> bool {
        self.errors = FieldErrors {
            login: self.login.trim().is_empty() || self.login.chars().count() > MAX_FIELD_CHARS,
            password: self.kind == Kind::Local
                && self
                    .password
                    .as_ref()
                    .map_or(true, |p| p.trim().is_empty() || p.chars().count() > MAX_FIELD_CHARS),
            labels: self.labels.iter().any(|l| l.text.chars().count() > MAX_LABEL_CHARS),
        };
        self.errors.is_clear()
    }

    // Keep the raw line as typed, derive the label list from it
    pub fn set_labels_text(&mut self, text: &str) {
        self.labels = parse_labels(text);
        self.labels_text = Some(text.to_owned());
    }
}

// One raw line into labels: split on ';', trim, drop empties
pub fn parse_labels(text: &str) -> Vec<Label> {
    text.split(';')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| Label { text: t.to_owned() })
        .collect_vec()
}

pub fn labels_line(labels: &[Label]) -> String {
    labels.iter().map(|l| l.text.as_str()).join("; ")
}

impl From<storage::Account> for Account {
    fn from(stored: storage::Account) -> Account {
        Account {
            id: stored.id,
            labels: stored.labels,
            kind: stored.kind,
            login: stored.login,
            password: stored.password,
            labels_text: stored.labels_text,
            errors: FieldErrors::default(),
        }
    }
}

impl From<&Account> for storage::Account {
    fn from(account: &Account) -> storage::Account {
        storage::Account {
            id: account.id,
            labels: account.labels.clone(),
            kind: account.kind,
            login: account.login.clone(),
            password: account.password.clone(),
            labels_text: account.labels_text.clone(),
        }
    }
}
