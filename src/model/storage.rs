use std::fmt;
use std::str::FromStr;

use anyhow::Error;
use serde::{Serialize, Deserialize};

// Storage model, exactly what goes to disk
#[derive(Debug, Hash, Eq, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub labels: Vec<Label>,
    #[serde(rename = "type")]
    pub kind: Kind,
    pub login: String,
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels_text: Option<String>,
}

#[derive(Debug, Hash, Eq, PartialEq, Clone, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
}

#[derive(Debug, Hash, Eq, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum Kind {
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "LDAP")]
    Ldap,
}

impl Kind {
    // Tags exactly as stored on disk
    pub fn from_tag(tag: &str) -> Option<Kind> {
        match tag {
            "local" => Some(Kind::Local),
            "LDAP" => Some(Kind::Ldap),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Kind::Local => "local",
            Kind::Ldap => "LDAP",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// What the CLI flag goes through, any case accepted
impl FromStr for Kind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Kind, Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Kind::Local),
            "ldap" => Ok(Kind::Ldap),
            _ => Err(Error::msg(format!("Unknown account kind '{}', expected local or LDAP", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags_round_trip() {
        assert_eq!(Kind::from_tag("local"), Some(Kind::Local));
        assert_eq!(Kind::from_tag("LDAP"), Some(Kind::Ldap));
        assert_eq!(Kind::from_tag("ldap"), None);
        assert_eq!(Kind::Local.tag(), "local");
        assert_eq!(Kind::Ldap.tag(), "LDAP");
    }

    #[test]
    fn kind_flag_parsing_accepts_any_case() {
        assert_eq!("LDAP".parse::<Kind>().unwrap(), Kind::Ldap);
        assert_eq!("Local".parse::<Kind>().unwrap(), Kind::Local);
        assert!("domain".parse::<Kind>().is_err());
    }

    #[test]
    fn kind_serialises_to_its_tag() {
        assert_eq!(serde_json::to_string(&Kind::Local).unwrap(), r#""local""#);
        assert_eq!(serde_json::to_string(&Kind::Ldap).unwrap(), r#""LDAP""#);
    }
}
