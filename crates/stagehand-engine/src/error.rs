use std::fmt;
use std::path::PathBuf;

/// Failure while loading content through the `ContentManager`.
#[derive(Debug)]
pub enum ContentError {
    NotFound(PathBuf),
    Io { path: PathBuf, source: std::io::Error },
    Decode { path: PathBuf, reason: String },
    /// A load was attempted from a thread other than the context thread.
    OffContextThread { path: PathBuf },
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::NotFound(path) => write!(f, "asset not found: {}", path.display()),
            ContentError::Io { path, source } => write!(f, "failed to read {}: {source}", path.display()),
            ContentError::Decode { path, reason } => {
                write!(f, "failed to decode {}: {reason}", path.display())
            }
            ContentError::OffContextThread { path } => {
                write!(f, "{} must be loaded on the context thread", path.display())
            }
        }
    }
}

impl std::error::Error for ContentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContentError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors an actor can raise while being built or initialized.
///
/// Nothing inside `update`/`draw` fails; everything that can go wrong is
/// caught before the stage swaps the actor in.
#[derive(Debug)]
pub enum ActorError {
    /// Missing or corrupt asset. Fatal to the actor; the stage keeps the previous one.
    ResourceLoad(ContentError),
    /// Rejected manifest parameter, e.g. a non-positive speed.
    InvalidConfiguration(String),
    UnknownActor(String),
}

impl ActorError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        ActorError::InvalidConfiguration(msg.into())
    }
}

impl fmt::Display for ActorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActorError::ResourceLoad(err) => write!(f, "resource load failed: {err}"),
            ActorError::InvalidConfiguration(msg) => write!(f, "invalid configuration: {msg}"),
            ActorError::UnknownActor(name) => write!(f, "no actor registered as '{name}'"),
        }
    }
}

impl std::error::Error for ActorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ActorError::ResourceLoad(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ContentError> for ActorError {
    fn from(err: ContentError) -> Self {
        ActorError::ResourceLoad(err)
    }
}

/// Failure while reading a stage manifest.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => write!(f, "failed to read {}: {source}", path.display()),
            ConfigError::Parse(err) => write!(f, "malformed stage manifest: {err}"),
            ConfigError::Invalid(msg) => write!(f, "invalid stage manifest: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}
