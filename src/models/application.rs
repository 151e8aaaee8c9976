use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub experience_level: String,
    pub language: String,
    pub availability: String,
    pub motivation: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Application {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn status(&self) -> Option<ApplicationStatus> {
        self.status.parse().ok()
    }
}

/// A validated submission, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplication {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub experience_level: ExperienceLevel,
    pub language: Language,
    pub availability: Availability,
    pub motivation: String,
}

/// Declares a closed set of string-backed values with `as_str`, `Display`
/// and `FromStr`. Parsing is exact and case-sensitive.
macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(()),
                }
            }
        }
    };
}

string_enum!(ExperienceLevel {
    Yes => "Yes",
    No => "No",
});

string_enum!(
    /// Languages the moderation team works in.
    Language {
        English => "English",
        German => "German",
        French => "French",
        Spanish => "Spanish",
        Italian => "Italian",
        Dutch => "Dutch",
        Portuguese => "Portuguese",
        Swedish => "Swedish",
        Danish => "Danish",
        Norwegian => "Norwegian",
    }
);

string_enum!(Availability {
    Day => "Day",
    Night => "Night",
    Both => "Both",
});

string_enum!(ApplicationStatus {
    Pending => "pending",
    Approved => "approved",
    Rejected => "rejected",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn resulting_status(&self) -> ApplicationStatus {
        match self {
            Decision::Approve => ApplicationStatus::Approved,
            Decision::Reject => ApplicationStatus::Rejected,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Approve => f.write_str("approve"),
            Decision::Reject => f.write_str("reject"),
        }
    }
}
