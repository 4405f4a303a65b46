use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ExtractError;

/// Closed set of structured field kinds the extractor recognizes.
///
/// Declaration order is the iteration order of an `ExtractionResult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Email,
    Phone,
    Url,
    Date,
    Time,
    Currency,
    Hashtag,
    Mention,
    IpAddress,
    CreditCard,
}

impl FieldKind {
    pub const ALL: [FieldKind; 10] = [
        FieldKind::Email,
        FieldKind::Phone,
        FieldKind::Url,
        FieldKind::Date,
        FieldKind::Time,
        FieldKind::Currency,
        FieldKind::Hashtag,
        FieldKind::Mention,
        FieldKind::IpAddress,
        FieldKind::CreditCard,
    ];

    /// Machine name, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Url => "url",
            Self::Date => "date",
            Self::Time => "time",
            Self::Currency => "currency",
            Self::Hashtag => "hashtag",
            Self::Mention => "mention",
            Self::IpAddress => "ip_address",
            Self::CreditCard => "credit_card",
        }
    }

    /// Section heading used by the summary report.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Email => "EMAIL",
            Self::Phone => "PHONE",
            Self::Url => "URL",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Currency => "CURRENCY",
            Self::Hashtag => "HASHTAG",
            Self::Mention => "MENTION",
            Self::IpAddress => "IP ADDRESS",
            Self::CreditCard => "CREDIT CARD",
        }
    }

    /// Parses a comma-separated list such as `"email, phone,ip"`.
    /// Empty segments are ignored.
    pub fn parse_list(list: &str) -> Result<Vec<FieldKind>, ExtractError> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();

        let kind = match key.as_str() {
            "email" => Self::Email,
            "phone" => Self::Phone,
            "url" => Self::Url,
            "date" => Self::Date,
            "time" => Self::Time,
            "currency" => Self::Currency,
            "hashtag" => Self::Hashtag,
            "mention" => Self::Mention,
            "ipaddress" | "ip" => Self::IpAddress,
            "creditcard" | "card" => Self::CreditCard,
            _ => {
                return Err(ExtractError::invalid_argument(format!(
                    "unknown field kind '{}'",
                    s.trim()
                )))
            }
        };
        Ok(kind)
    }
}
