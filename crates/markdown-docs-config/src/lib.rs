//! Configuration primitives and loader for markdown-docs.
//!
//! Settings are resolved with the precedence stack
//! override flag → working directory → git root → built-in defaults.
//! Every value remembers the layer that supplied it, so relative paths are
//! anchored to the directory of the file that declared them and validation
//! errors can point at their origin.

use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = ".markdown-docs.toml";

const DEFAULT_DOCS_ROOT: &str = "docs";
const DEFAULT_EXTENSION: &str = "md";
const DEFAULT_TITLE: &str = "Documentation Hub";
const DEFAULT_TAGLINE: &str = "Explore tutorials and guides for different technologies";
const DEFAULT_CATEGORY_SUFFIX: &str = "Tutorial";
const DEFAULT_ROUTE_PREFIX: &str = "/docs";
const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Complete configuration resolved from defaults and on-disk overrides.
#[derive(Clone, Debug)]
pub struct Config {
    pub docs: DocsSettings,
    pub site: SiteSettings,
    pub server: ServerSettings,
    pub sources: ConfigSources,
}

/// Location and shape of the document tree.
#[derive(Clone, Debug)]
pub struct DocsSettings {
    pub root: PathBuf,
    /// File extension (without the leading dot) that marks a document.
    pub extension: String,
}

impl DocsSettings {
    /// Suffix appended to file names, e.g. `.md`.
    pub fn suffix(&self) -> String {
        format!(".{}", self.extension)
    }
}

/// Presentation settings shared by the page templates.
#[derive(Clone, Debug)]
pub struct SiteSettings {
    pub title: String,
    pub tagline: String,
    pub category_suffix: String,
    /// URL prefix under which documents are served, e.g. `/docs`.
    pub route_prefix: String,
}

#[derive(Clone, Debug)]
pub struct ServerSettings {
    pub bind: SocketAddr,
}

impl Config {
    /// Point the configuration at a different document root (CLI `--root`).
    pub fn with_docs_root(mut self, root: impl AsRef<Path>) -> Self {
        self.docs.root = make_absolute(root.as_ref(), &self.sources.working_directory);
        self
    }

    /// Override the bind address (CLI `--bind`).
    pub fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.server.bind = bind;
        self
    }
}

/// Provenance information for resolved configuration.
#[derive(Clone, Debug)]
pub struct ConfigSources {
    pub working_directory: PathBuf,
    pub layers: Vec<ConfigSource>,
}

/// Specific layer of configuration (default/git/local/override).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigSource {
    pub kind: ConfigSourceKind,
    pub path: Option<PathBuf>,
    pub base_dir: PathBuf,
}

impl ConfigSource {
    fn default(base_dir: PathBuf) -> Self {
        ConfigSource {
            kind: ConfigSourceKind::Default,
            path: None,
            base_dir,
        }
    }

    fn for_file(kind: ConfigSourceKind, path: PathBuf) -> Self {
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        ConfigSource {
            kind,
            path: Some(path),
            base_dir,
        }
    }

    fn describe(&self) -> String {
        match (&self.kind, &self.path) {
            (ConfigSourceKind::Default, _) => "built-in defaults".to_owned(),
            (kind, Some(path)) => format!("{} at {}", kind, path.display()),
            (kind, None) => kind.to_string(),
        }
    }
}

/// Kinds of configuration sources, ordered from lowest to highest precedence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigSourceKind {
    Default,
    GitRoot,
    Local,
    Override,
}

impl fmt::Display for ConfigSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConfigSourceKind::Default => "defaults",
            ConfigSourceKind::GitRoot => "git-root config",
            ConfigSourceKind::Local => "local config",
            ConfigSourceKind::Override => "override config",
        };
        f.write_str(label)
    }
}

/// Loader options, typically supplied by the CLI layer.
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub override_path: Option<PathBuf>,
    pub working_dir: Option<PathBuf>,
}

impl LoadOptions {
    pub fn with_override_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.override_path = Some(path.into());
        self
    }

    pub fn with_working_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(path.into());
        self
    }
}

/// Errors surfaced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to resolve working directory {attempted}: {source}")]
    WorkingDirectory {
        attempted: PathBuf,
        source: io::Error,
    },
    #[error("override config {path} not found")]
    OverrideNotFound { path: PathBuf },
    #[error("failed to read config {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("configuration validation failed:\n{0}")]
    Validation(ConfigValidationErrors),
}

impl Config {
    /// Loads configuration using the precedence rules and returns typed settings.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let working_dir = resolve_working_dir(options.working_dir)?;
        let override_path = options
            .override_path
            .map(|path| make_absolute(&path, &working_dir));

        if let Some(path) = &override_path {
            if !path.exists() {
                return Err(ConfigError::OverrideNotFound { path: path.clone() });
            }
        }

        let default_source = ConfigSource::default(working_dir.clone());
        let mut merged = PartialConfig::default();
        merged.merge(defaults_layer(default_source.clone()));

        let mut source_layers = vec![default_source];

        let git_root = find_git_root(&working_dir);
        let git_config_path = git_root.as_ref().map(|root| root.join(CONFIG_FILE_NAME));
        let local_config_path = working_dir.join(CONFIG_FILE_NAME);

        if let Some(path) = git_config_path.as_ref() {
            if path.exists() && Some(path) != override_path.as_ref() && path != &local_config_path {
                let source = ConfigSource::for_file(ConfigSourceKind::GitRoot, path.clone());
                merged.merge(load_layer(path, source.clone())?);
                source_layers.push(source);
            }
        }

        if local_config_path.exists() && Some(&local_config_path) != override_path.as_ref() {
            let source = ConfigSource::for_file(ConfigSourceKind::Local, local_config_path.clone());
            merged.merge(load_layer(&local_config_path, source.clone())?);
            source_layers.push(source);
        }

        if let Some(path) = override_path {
            let source = ConfigSource::for_file(ConfigSourceKind::Override, path.clone());
            merged.merge(load_layer(&path, source.clone())?);
            source_layers.push(source);
        }

        let resolved = merged
            .finalize(&working_dir)
            .map_err(ConfigError::Validation)?;
        Ok(Config {
            docs: resolved.docs,
            site: resolved.site,
            server: resolved.server,
            sources: ConfigSources {
                working_directory: working_dir,
                layers: source_layers,
            },
        })
    }
}

fn resolve_working_dir(override_dir: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    match override_dir {
        Some(path) => fs::canonicalize(&path).map_err(|source| ConfigError::WorkingDirectory {
            attempted: path,
            source,
        }),
        None => env::current_dir().map_err(|source| ConfigError::WorkingDirectory {
            attempted: PathBuf::from("."),
            source,
        }),
    }
}

fn make_absolute(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn load_layer(path: &Path, source: ConfigSource) -> Result<PartialConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.into(),
        source,
    })?;
    let raw: RawConfig = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.into(),
        source,
    })?;
    Ok(raw.into_partial(source))
}

fn defaults_layer(source: ConfigSource) -> PartialConfig {
    let located = |value: &str| Some(Located::new(value.to_string(), source.clone()));
    PartialConfig {
        docs: DocsPartial {
            root: Some(Located::new(PathBuf::from(DEFAULT_DOCS_ROOT), source.clone())),
            extension: located(DEFAULT_EXTENSION),
        },
        site: SitePartial {
            title: located(DEFAULT_TITLE),
            tagline: located(DEFAULT_TAGLINE),
            category_suffix: located(DEFAULT_CATEGORY_SUFFIX),
            route_prefix: located(DEFAULT_ROUTE_PREFIX),
        },
        server: ServerPartial {
            bind: located(DEFAULT_BIND),
        },
    }
}

fn find_git_root(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(".git").exists() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

#[derive(Clone, Debug, Default)]
struct PartialConfig {
    docs: DocsPartial,
    site: SitePartial,
    server: ServerPartial,
}

impl PartialConfig {
    fn merge(&mut self, other: PartialConfig) {
        self.docs.merge(other.docs);
        self.site.merge(other.site);
        self.server.merge(other.server);
    }

    fn finalize(self, working_dir: &Path) -> Result<ResolvedConfig, ConfigValidationErrors> {
        let mut errors = Vec::new();
        let fallback = ConfigSource::default(working_dir.to_path_buf());
        let or_default = |value: Option<Located<String>>, default: &str| {
            value.unwrap_or_else(|| Located::new(default.to_string(), fallback.clone()))
        };

        let root = self
            .docs
            .root
            .unwrap_or_else(|| Located::new(PathBuf::from(DEFAULT_DOCS_ROOT), fallback.clone()));
        let root = resolve_path(&root);

        let extension = or_default(self.docs.extension, DEFAULT_EXTENSION);
        // A single leading dot is accepted and dropped: ".md" means "md".
        let trimmed = extension
            .value
            .strip_prefix('.')
            .unwrap_or(&extension.value);
        if trimmed.is_empty() || trimmed.contains(['.', '/', '\\']) {
            errors.push(ConfigValidationError::new(
                Some(extension.source.clone()),
                format!(
                    "docs.extension must be a single non-empty suffix (received '{}')",
                    extension.value
                ),
            ));
        }
        let extension_value = trimmed.to_string();

        let title = or_default(self.site.title, DEFAULT_TITLE);
        if title.value.trim().is_empty() {
            errors.push(ConfigValidationError::new(
                Some(title.source.clone()),
                "site.title cannot be empty".into(),
            ));
        }

        let tagline = or_default(self.site.tagline, DEFAULT_TAGLINE);
        let category_suffix = or_default(self.site.category_suffix, DEFAULT_CATEGORY_SUFFIX);

        let route_prefix = or_default(self.site.route_prefix, DEFAULT_ROUTE_PREFIX);
        if let Err(message) = validate_route_prefix(&route_prefix.value) {
            errors.push(ConfigValidationError::new(
                Some(route_prefix.source.clone()),
                message,
            ));
        }

        let bind = or_default(self.server.bind, DEFAULT_BIND);
        let parsed_bind = match bind.value.parse::<SocketAddr>() {
            Ok(addr) => Some(addr),
            Err(err) => {
                errors.push(ConfigValidationError::new(
                    Some(bind.source.clone()),
                    format!("server.bind '{}' is not a socket address: {err}", bind.value),
                ));
                None
            }
        };

        match parsed_bind {
            Some(bind) if errors.is_empty() => Ok(ResolvedConfig {
                docs: DocsSettings {
                    root,
                    extension: extension_value,
                },
                site: SiteSettings {
                    title: title.value,
                    tagline: tagline.value,
                    category_suffix: category_suffix.value,
                    route_prefix: route_prefix.value,
                },
                server: ServerSettings { bind },
            }),
            _ => Err(ConfigValidationErrors(errors)),
        }
    }
}

fn validate_route_prefix(prefix: &str) -> Result<(), String> {
    if !prefix.starts_with('/') || prefix.len() < 2 {
        return Err(format!(
            "site.route_prefix must start with '/' and name a path segment (received '{prefix}')"
        ));
    }
    if prefix.ends_with('/') {
        return Err(format!(
            "site.route_prefix must not end with '/' (received '{prefix}')"
        ));
    }
    if prefix.contains(['*', ':', '?', '#']) {
        return Err(format!(
            "site.route_prefix contains reserved characters (received '{prefix}')"
        ));
    }
    Ok(())
}

#[derive(Clone, Debug, Default)]
struct DocsPartial {
    root: Option<Located<PathBuf>>,
    extension: Option<Located<String>>,
}

impl DocsPartial {
    fn merge(&mut self, other: DocsPartial) {
        if other.root.is_some() {
            self.root = other.root;
        }
        if other.extension.is_some() {
            self.extension = other.extension;
        }
    }
}

#[derive(Clone, Debug, Default)]
struct SitePartial {
    title: Option<Located<String>>,
    tagline: Option<Located<String>>,
    category_suffix: Option<Located<String>>,
    route_prefix: Option<Located<String>>,
}

impl SitePartial {
    fn merge(&mut self, other: SitePartial) {
        if other.title.is_some() {
            self.title = other.title;
        }
        if other.tagline.is_some() {
            self.tagline = other.tagline;
        }
        if other.category_suffix.is_some() {
            self.category_suffix = other.category_suffix;
        }
        if other.route_prefix.is_some() {
            self.route_prefix = other.route_prefix;
        }
    }
}

#[derive(Clone, Debug, Default)]
struct ServerPartial {
    bind: Option<Located<String>>,
}

impl ServerPartial {
    fn merge(&mut self, other: ServerPartial) {
        if other.bind.is_some() {
            self.bind = other.bind;
        }
    }
}

#[derive(Clone, Debug)]
struct Located<T> {
    value: T,
    source: ConfigSource,
}

impl<T> Located<T> {
    fn new(value: T, source: ConfigSource) -> Self {
        Located { value, source }
    }
}

fn resolve_path(located: &Located<PathBuf>) -> PathBuf {
    make_absolute(&located.value, &located.source.base_dir)
}

#[derive(Clone, Debug)]
struct ResolvedConfig {
    docs: DocsSettings,
    site: SiteSettings,
    server: ServerSettings,
}

/// Container for validation failures, formatted as a bullet list.
#[derive(Debug)]
pub struct ConfigValidationErrors(pub Vec<ConfigValidationError>);

impl fmt::Display for ConfigValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "- {err}")?;
        }
        Ok(())
    }
}

impl ConfigValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ConfigValidationError> {
        self.0.iter()
    }
}

/// Validation failure with optional provenance.
#[derive(Clone, Debug)]
pub struct ConfigValidationError {
    pub source: Option<ConfigSource>,
    pub message: String,
}

impl ConfigValidationError {
    fn new(source: Option<ConfigSource>, message: String) -> Self {
        ConfigValidationError { source, message }
    }
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(source) = &self.source {
            write!(f, " ({})", source.describe())?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    docs: Option<RawDocs>,
    #[serde(default)]
    site: Option<RawSite>,
    #[serde(default)]
    server: Option<RawServer>,
}

impl RawConfig {
    fn into_partial(self, source: ConfigSource) -> PartialConfig {
        let locate = |value: Option<String>| value.map(|value| Located::new(value, source.clone()));
        let docs = self.docs.unwrap_or_default();
        let site = self.site.unwrap_or_default();
        let server = self.server.unwrap_or_default();
        PartialConfig {
            docs: DocsPartial {
                root: docs.root.map(|value| Located::new(value, source.clone())),
                extension: locate(docs.extension),
            },
            site: SitePartial {
                title: locate(site.title),
                tagline: locate(site.tagline),
                category_suffix: locate(site.category_suffix),
                route_prefix: locate(site.route_prefix),
            },
            server: ServerPartial {
                bind: locate(server.bind),
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDocs {
    #[serde(default)]
    root: Option<PathBuf>,
    #[serde(default)]
    extension: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSite {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    tagline: Option<String>,
    #[serde(default)]
    category_suffix: Option<String>,
    #[serde(default)]
    route_prefix: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawServer {
    #[serde(default)]
    bind: Option<String>,
}
