//! # EQueue Kiosk
//!
//! Kiosk shell for electronic-queue screens.
//!
//! ## Features
//! - JSON configuration with loose numeric coercion and fallback lookup
//! - Address construction for display boards, info panels and operator consoles
//! - Side-by-side console layout
//! - Pluggable rendering hosts (external browser, terminal preview, plain text)
//!
//! ## Flow
//! Configuration is loaded once, every pane address is resolved up front, and
//! the resulting plan is handed to a rendering host.

pub mod config;
pub mod constants;
pub mod host;
pub mod layout;
pub mod mode;
pub mod profile;
pub mod url_builder;

// Re-export commonly used types
pub use config::{load, AppConfiguration, ConfigurationError, ConnectionSettings};
pub use host::{populate, HostError, RenderHost};
pub use layout::{fit_panes, plan_panes, Arrangement, Pane, PaneGeometry, PanePlan};
pub use mode::Mode;
pub use profile::BrowserProfile;
pub use url_builder::{build_base_url, build_mode_url, UrlBuilderError};
