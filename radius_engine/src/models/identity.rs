//! Values handed in by the surrounding UI: who is signed in and which theme is active.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Signed-in user, as supplied by the authentication collaborator. Display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserIdentity {
    Name(String),
    Account { email: String },
}

impl UserIdentity {
    pub fn display_name(&self) -> &str {
        match self {
            UserIdentity::Name(name) => name,
            UserIdentity::Account { email } => email,
        }
    }
}

/// Light/dark mode flag from the theme provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(format!("Unknown theme: {}", s)),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}
