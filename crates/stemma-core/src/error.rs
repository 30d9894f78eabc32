use std::fmt;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    PersonNotFound,
    UnresolvedReference,
    SelfReference,
    DuplicateParents,
    InvalidEnumValue,
    InvalidStructure,
    DanglingReference,
    ExtractionFailure,
    ShareDecodeFailed,
    StoreWriteFailed,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::PersonNotFound => "E2001",
            Self::UnresolvedReference => "E2002",
            Self::SelfReference => "E2003",
            Self::DuplicateParents => "E2004",
            Self::InvalidEnumValue => "E2005",
            Self::InvalidStructure => "E3001",
            Self::DanglingReference => "E3002",
            Self::ExtractionFailure => "E4001",
            Self::ShareDecodeFailed => "E4002",
            Self::StoreWriteFailed => "E5001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::PersonNotFound => "Person not found",
            Self::UnresolvedReference => "Relationship name did not resolve",
            Self::SelfReference => "Person references itself",
            Self::DuplicateParents => "Both parent slots hold the same person",
            Self::InvalidEnumValue => "Invalid gender value",
            Self::InvalidStructure => "Parent chain is cyclic or contradictory",
            Self::DanglingReference => "Reference to a removed person",
            Self::ExtractionFailure => "Extraction collaborator failed",
            Self::ShareDecodeFailed => "Share payload did not decode",
            Self::StoreWriteFailed => "Tree file write failed",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in the stemma config.toml and retry."),
            Self::PersonNotFound => None,
            Self::UnresolvedReference => {
                Some("Add the named person first, or re-run the import with more context.")
            }
            Self::SelfReference => Some("Pick a different person for the parent/spouse field."),
            Self::DuplicateParents => Some("A person's two parents must be distinct people."),
            Self::InvalidEnumValue => Some("Use one of: male, female, other."),
            Self::InvalidStructure => {
                Some("Run `stm verify` to locate the cycle, then break it by clearing a parent link.")
            }
            Self::DanglingReference => {
                Some("Run `stm verify` to list dangling references and repair them.")
            }
            Self::ExtractionFailure => {
                Some("Check the extractor endpoint configuration; no candidates were applied.")
            }
            Self::ShareDecodeFailed => Some("The share link is truncated or not a stemma export."),
            Self::StoreWriteFailed => Some("Check disk space and write permissions."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
