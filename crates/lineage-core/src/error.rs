use std::fmt;

/// Machine-readable rejection kinds for programmatic branching.
///
/// Every rejection is an expected, recoverable outcome of a graph operation,
/// never a fault. Callers (CLI, or any other transport adapter) map these to
/// their own status vocabulary using [`RejectionKind::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionKind {
    SelfParent,
    PersonNotFound,
    AgeRule,
    TooManyParents,
    Cycle,
    Duplicate,
    TreeTooDeep,
}

impl RejectionKind {
    /// Stable code identifier for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::SelfParent => "SELF_PARENT",
            Self::PersonNotFound => "PERSON_NOT_FOUND",
            Self::AgeRule => "AGE_RULE",
            Self::TooManyParents => "TOO_MANY_PARENTS",
            Self::Cycle => "CYCLE",
            Self::Duplicate => "DUPLICATE",
            Self::TreeTooDeep => "TREE_TOO_DEEP",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::SelfParent => "A person cannot be their own parent",
            Self::PersonNotFound => "Person not found",
            Self::AgeRule => "Parent is not old enough relative to the child",
            Self::TooManyParents => "A person can have at most 2 parents",
            Self::Cycle => "Relationship would create a cycle",
            Self::Duplicate => "Relationship already exists",
            Self::TreeTooDeep => "Descendant tree exceeds the depth bound",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::SelfParent => Some("Use two distinct person IDs."),
            Self::PersonNotFound => Some("Check the ID with `lin person list`."),
            Self::AgeRule => Some("The parent must be at least 15 years older than the child."),
            Self::TooManyParents => None,
            Self::Cycle => Some("A descendant cannot become an ancestor of the same person."),
            Self::Duplicate => None,
            Self::TreeTooDeep => Some("Raise [tree] max_depth in .lineage/config.toml."),
        }
    }
}

impl fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A structured, non-fatal outcome: a taxonomy kind plus a message specific
/// to the rejected operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub kind: RejectionKind,
    pub message: String,
}

impl Rejection {
    pub fn new(kind: RejectionKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// A rejection carrying the kind's default message.
    #[must_use]
    pub fn of(kind: RejectionKind) -> Self {
        Self::new(kind, kind.message())
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.code(), self.message)
    }
}

/// Error type for graph operations.
///
/// `Rejected` is the expected path: the operation was understood and refused
/// for a domain reason. `Store` is anything the persistence collaborator
/// failed at; it propagates unmodified so callers can treat it as a fault.
#[derive(Debug, thiserror::Error)]
pub enum LineageError {
    #[error("{0}")]
    Rejected(Rejection),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl LineageError {
    /// The rejection payload, if this is a domain rejection.
    #[must_use]
    pub const fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Rejected(r) => Some(r),
            Self::Store(_) => None,
        }
    }

    /// The taxonomy kind, if this is a domain rejection.
    #[must_use]
    pub const fn kind(&self) -> Option<RejectionKind> {
        match self.rejection() {
            Some(r) => Some(r.kind),
            None => None,
        }
    }
}

impl From<Rejection> for LineageError {
    fn from(rejection: Rejection) -> Self {
        Self::Rejected(rejection)
    }
}
