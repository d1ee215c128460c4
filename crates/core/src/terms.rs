//! Terms-of-service content model.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Supported content languages.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    En,
    Sv,
}

impl Lang {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Sv => "sv",
        }
    }
}

impl FromStr for Lang {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "en" => Ok(Lang::En),
            "sv" => Ok(Lang::Sv),
            _ => Err(()),
        }
    }
}

impl core::fmt::Display for Lang {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ordered section of the terms page, in one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermsSection {
    pub id: i32,
    pub lang_code: Lang,
    pub slug: String,
    pub title: String,
    pub body: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_en_and_sv_parse() {
        assert_eq!("en".parse(), Ok(Lang::En));
        assert_eq!("sv".parse(), Ok(Lang::Sv));
        assert!("de".parse::<Lang>().is_err());
        assert!("EN".parse::<Lang>().is_err());
    }
}
