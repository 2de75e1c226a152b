use serde::Serialize;
use std::path::PathBuf;

/// Placeholder name for listing lines that carry a single token.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Where and how to invoke the toolchain.
#[derive(Debug, Clone)]
pub struct ToolchainConfig {
    pub program: String,
    pub workdir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub name: String,
    pub version: String,
}

impl Dependency {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Parse `name@version`. Anything other than exactly one `@` is rejected.
    pub fn parse_query(query: &str) -> Option<Self> {
        let mut parts = query.split('@');
        let name = parts.next()?;
        let version = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::new(name, version))
    }

    pub fn query(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }
}

/// Parse the line-oriented output of `go list -m all`.
///
/// The first line names the main module and is always discarded.
pub fn parse_listing(output: &str) -> Vec<Dependency> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            match (fields.next(), fields.next()) {
                (Some(name), Some(version)) => Some(Dependency::new(name, version)),
                (Some(only), None) => Some(Dependency::new(UNKNOWN_NAME, only)),
                _ => None,
            }
        })
        .collect()
}

/// Toolchain subcommands that change the module's requirements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Tidy,
    /// `go get` with a raw `name@version` argument.
    Get(String),
    Remove(String),
}

impl Mutation {
    pub fn args(&self) -> Vec<String> {
        match self {
            Mutation::Tidy => vec!["mod".into(), "tidy".into()],
            Mutation::Get(query) => vec!["get".into(), query.clone()],
            Mutation::Remove(name) => vec!["get".into(), format!("{name}@none")],
        }
    }
}

/// Events delivered to the UI thread. Each unit of work produces exactly one.
#[cfg_attr(not(feature = "tui"), allow(dead_code))]
#[derive(Debug, Clone)]
pub enum AppEvent {
    DependenciesLoaded(Vec<Dependency>),
    CommandFailed(String),
    /// Animation tick carrying the generation of the loading phase that scheduled it.
    LoadingTick(u64),
}
