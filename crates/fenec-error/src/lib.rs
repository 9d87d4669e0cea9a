#![doc = r#"
fenec-error — workspace-wide error type and severity classification.

- A single [`Error`] enum shared across crates.
- [`Severity`] for coarse, programmatic handling.
- [`DomainError`] for the structured failure kinds named by the design
  (`InvalidEntity`, `StoreError`, `LLMError`, `PromptError`, `PlanError`,
  `ConfigError`).
- [`Result`] alias for ergonomic propagation.

Guidance
- Library code returns `fenec_error::Result<T>` and constructs a
  [`DomainError`] variant; it never logs or exits.
- Application code (the CLI) inspects [`Error::severity`] to decide whether to
  continue, and maps `Severity::Fatal` to a non-zero exit code.
"#]

pub mod domain;
pub mod severity;

pub use domain::DomainError;
pub use severity::Severity;

/// Workspace-wide result alias. Library code should propagate failures with
/// `?` and let the caller decide how to react via [`Error::severity`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error type used across the fenec workspace.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("io error: {0}")]
    Io(String),
}

impl Error {
    /// Coarse severity classification for programmatic handling, matching
    /// the propagation policy: `PromptError`/`ConfigError` are fatal, the
    /// rest are recoverable (log-and-continue or log-and-skip at the call
    /// site).
    pub fn severity(&self) -> Severity {
        match self {
            Error::Domain(d) if d.is_fatal() => Severity::Fatal,
            Error::Domain(DomainError::InvalidEntity { .. }) => Severity::Warning,
            Error::Domain(_) => Severity::Error,
            Error::Io(_) => Severity::Error,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Io(value.to_string())
    }
}
