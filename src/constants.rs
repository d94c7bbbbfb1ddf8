//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Application name, also used for the storage directory
pub const APP_NAME: &str = "EQueueBrowser";

/// Window title shown by hosts that have one
pub const WINDOW_TITLE: &str = "Operator Console";

/// Configuration file looked up when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Log file name, written under the application data directory
pub const LOG_FILE_NAME: &str = "equeue-kiosk.log";

/// Browser launched by the browser host unless configured otherwise
pub const DEFAULT_BROWSER_COMMAND: &str = "chromium";

/// Window geometry used when the configuration has no `window` section
pub const DEFAULT_WINDOW_WIDTH: u32 = 1280;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 720;

/// Smallest size a console pane is shrunk to
pub const MIN_PANE_WIDTH: u32 = 640;
pub const MIN_PANE_HEIGHT: u32 = 360;

/// Gap between console panes
pub const PANE_SPACING: u32 = 12;

/// Shown instead of panes when orc mode has no consoles assigned
pub const EMPTY_CONSOLE_MESSAGE: &str = "No consoles assigned for ORC mode.";

// Query suffixes appended to the base address per mode.
pub const DISPLAY_QUERY: &str = "/?app=equeuedisplay&platform=all";
pub const INFO_QUERY_PREFIX: &str = "/?app=infopanel&widget=map-infopanel-tv&panel=1&segment=";
pub const ORC_QUERY_PREFIX: &str = "/?app=equeueorc&platform=all&orcnumber=";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
