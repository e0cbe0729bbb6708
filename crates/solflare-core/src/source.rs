use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Upstream flare archives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveId {
    /// SWPC daily event files over anonymous FTP.
    Swpc,
    /// NGDC annual GOES XRS reports over HTTP.
    Ngdc,
}

impl ArchiveId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Swpc => "swpc",
            Self::Ngdc => "ngdc",
        }
    }
}

impl Display for ArchiveId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArchiveId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "swpc" => Ok(Self::Swpc),
            "ngdc" => Ok(Self::Ngdc),
            other => Err(ValidationError::InvalidArchive {
                value: other.to_owned(),
            }),
        }
    }
}
