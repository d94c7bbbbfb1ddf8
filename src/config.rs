//! Configuration loading
//!
//! The configuration is a small JSON document read once at startup. Fields are
//! coerced loosely (numbers may arrive as strings) but any value that cannot be
//! coerced aborts loading.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::constants::{DEFAULT_BROWSER_COMMAND, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use crate::mode::Mode;
use crate::url_builder::normalize_protocol;

/// Malformed, missing or unlocatable configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConfigurationError(String);

impl ConfigurationError {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Network endpoint serving the web content
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub protocol: String,
    pub host: String,
    pub port: u16,
}

/// Outer window geometry, in pixels
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowSettings {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        WindowSettings {
            x: 0,
            y: 0,
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

/// External browser used by the browser host
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    pub command: String,
    pub args: Vec<String>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        BrowserSettings {
            command: String::from(DEFAULT_BROWSER_COMMAND),
            args: Vec::new(),
        }
    }
}

/// Parsed application configuration. Built once, read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfiguration {
    pub connection: ConnectionSettings,
    /// Lowercased mode tag. Unknown tags are kept and rejected when a URL is built.
    pub mode: String,
    pub segment: Option<String>,
    /// Console numbers in document order, duplicates kept
    pub console_numbers: Vec<i64>,
    pub window: WindowSettings,
    pub browser: BrowserSettings,
}

impl AppConfiguration {
    /// The recognized mode, if the tag is one
    pub fn mode_kind(&self) -> Option<Mode> {
        Mode::parse(&self.mode)
    }

    /// Parse a configuration document from JSON text
    pub fn parse(text: &str) -> Result<Self, ConfigurationError> {
        let raw: Value = serde_json::from_str(text)
            .map_err(|e| ConfigurationError::new(format!("Configuration is not valid JSON: {}", e)))?;
        Self::from_value(&raw)
    }

    /// Build a configuration from an already parsed JSON document
    pub fn from_value(raw: &Value) -> Result<Self, ConfigurationError> {
        let root = as_object(raw, "root")?;
        ensure_fields(root, &["connection", "mode"], "root")?;

        let connection = parse_connection(&root["connection"])?;

        let mode = coerce_text(&root["mode"])
            .ok_or_else(|| ConfigurationError::new("Field 'mode' must not be null"))?
            .to_lowercase();

        let segment = root.get("segment").and_then(coerce_text);

        let console_numbers = parse_console_numbers(root)?;

        let window = match root.get("window") {
            None | Some(Value::Null) => WindowSettings::default(),
            Some(value) => parse_window(value)?,
        };

        let browser = match root.get("browser") {
            None | Some(Value::Null) => BrowserSettings::default(),
            Some(value) => BrowserSettings::deserialize(value).map_err(|e| {
                ConfigurationError::new(format!("Invalid 'browser' section: {}", e))
            })?,
        };

        Ok(AppConfiguration {
            connection,
            mode,
            segment,
            console_numbers,
            window,
            browser,
        })
    }
}

/// Load the configuration at `path`, probing fallback directories when the
/// path itself does not exist.
pub fn load(path: impl AsRef<Path>) -> Result<AppConfiguration, ConfigurationError> {
    let path = resolve_config_path(path.as_ref())?;
    debug!(path = %path.display(), "Reading configuration");

    let text = fs::read_to_string(&path).map_err(|e| {
        ConfigurationError::new(format!(
            "Cannot read configuration '{}': {}",
            path.display(),
            e
        ))
    })?;
    let config = AppConfiguration::parse(&text)?;

    if config.mode_kind().is_none() {
        warn!(mode = %config.mode, "Unrecognized mode, URL construction will fail");
    }
    info!(
        path = %path.display(),
        mode = %config.mode,
        consoles = config.console_numbers.len(),
        "Loaded configuration"
    );
    Ok(config)
}

/// Locate the configuration file.
///
/// The requested path wins if it exists. Otherwise the same file name is
/// looked up in the bundle resources directory, next to the executable and in
/// the current directory, in that order.
pub fn resolve_config_path(requested: &Path) -> Result<PathBuf, ConfigurationError> {
    resolve_in(requested, &search_dirs())
}

fn resolve_in(requested: &Path, search_dirs: &[PathBuf]) -> Result<PathBuf, ConfigurationError> {
    if requested.exists() {
        return Ok(requested.to_path_buf());
    }

    let not_found = || {
        ConfigurationError::new(format!(
            "Configuration file not found: {}",
            requested.display()
        ))
    };
    let file_name = requested.file_name().ok_or_else(not_found)?;
    let parent = requested.parent();

    for dir in search_dirs {
        if parent == Some(dir.as_path()) {
            continue;
        }
        let candidate = dir.join(file_name);
        if candidate.exists() {
            debug!(candidate = %candidate.display(), "Found configuration in fallback directory");
            return Ok(candidate);
        }
    }

    Err(not_found())
}

fn search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    let exe_dir = std::env::current_exe()
        .and_then(|exe| exe.canonicalize())
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));

    if let Some(exe_dir) = exe_dir {
        if let Some(resources) = bundle_resources_dir(&exe_dir) {
            dirs.push(resources);
        }
        dirs.push(exe_dir);
    }
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }

    dirs
}

/// `Foo.app/Contents/MacOS/<exe>` keeps its resources in `Foo.app/Contents/Resources`
fn bundle_resources_dir(exe_dir: &Path) -> Option<PathBuf> {
    if exe_dir.file_name()? != "MacOS" {
        return None;
    }
    let contents = exe_dir.parent()?;
    if contents.file_name()? != "Contents" {
        return None;
    }
    let resources = contents.join("Resources");
    resources.is_dir().then_some(resources)
}

fn as_object<'a>(value: &'a Value, source: &str) -> Result<&'a Map<String, Value>, ConfigurationError> {
    value.as_object().ok_or_else(|| {
        ConfigurationError::new(format!("Configuration '{}' must be a JSON object", source))
    })
}

fn ensure_fields(data: &Map<String, Value>, keys: &[&str], source: &str) -> Result<(), ConfigurationError> {
    for key in keys {
        if !data.contains_key(*key) {
            return Err(ConfigurationError::new(format!(
                "Configuration '{}' is missing key '{}'",
                source, key
            )));
        }
    }
    Ok(())
}

fn parse_connection(value: &Value) -> Result<ConnectionSettings, ConfigurationError> {
    let data = as_object(value, "connection")?;
    ensure_fields(data, &["protocol", "port"], "connection")?;

    // `ip` is the documented key, `host` is accepted as well
    let host = data
        .get("ip")
        .or_else(|| data.get("host"))
        .ok_or_else(|| ConfigurationError::new("Configuration 'connection' is missing key 'ip'"))?;

    let invalid = |field: &str| {
        ConfigurationError::new(format!("Invalid connection data: field '{}'", field))
    };

    let protocol = coerce_text(&data["protocol"]).ok_or_else(|| invalid("protocol"))?;
    if normalize_protocol(&protocol).is_empty() {
        return Err(invalid("protocol"));
    }
    let host = coerce_text(host).ok_or_else(|| invalid("ip"))?;
    let port = coerce_integer(&data["port"])
        .and_then(|port| u16::try_from(port).ok())
        .ok_or_else(|| invalid("port"))?;

    Ok(ConnectionSettings {
        protocol,
        host,
        port,
    })
}

fn parse_console_numbers(root: &Map<String, Value>) -> Result<Vec<i64>, ConfigurationError> {
    let raw = root
        .get("orcNumbers")
        .filter(|v| !v.is_null())
        .or_else(|| root.get("consoleNumbers").filter(|v| !v.is_null()));

    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    let items = raw
        .as_array()
        .ok_or_else(|| ConfigurationError::new("Expected 'orcNumbers' to be a list"))?;

    items
        .iter()
        .map(|item| {
            coerce_integer(item).ok_or_else(|| {
                ConfigurationError::new(format!(
                    "'orcNumbers' must contain numeric values, got {}",
                    item
                ))
            })
        })
        .collect()
}

fn parse_window(value: &Value) -> Result<WindowSettings, ConfigurationError> {
    let data = as_object(value, "window")?;
    let defaults = WindowSettings::default();
    let invalid = |field: &str| {
        ConfigurationError::new(format!("Invalid window data: field '{}'", field))
    };

    let offset = |field: &str, default: i32| -> Result<i32, ConfigurationError> {
        match data.get(field) {
            None | Some(Value::Null) => Ok(default),
            Some(v) => coerce_integer(v)
                .and_then(|n| i32::try_from(n).ok())
                .ok_or_else(|| invalid(field)),
        }
    };
    let extent = |field: &str, default: u32| -> Result<u32, ConfigurationError> {
        match data.get(field) {
            None | Some(Value::Null) => Ok(default),
            Some(v) => coerce_integer(v)
                .and_then(|n| u32::try_from(n).ok())
                .filter(|n| *n > 0)
                .ok_or_else(|| invalid(field)),
        }
    };

    Ok(WindowSettings {
        x: offset("x", defaults.x)?,
        y: offset("y", defaults.y)?,
        width: extent("width", defaults.width)?,
        height: extent("height", defaults.height)?,
    })
}

/// Integers, finite floats (truncated) and strings holding a decimal integer
fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Strings as-is, null as absent, anything else as its JSON text
fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
