//! Rendering hosts - whatever actually shows the pane addresses
//!
//! The startup routine computes a [`PanePlan`] and hands each pane to a host.
//! Hosts own navigation, storage and window management.

pub mod browser;
pub mod stdout;
pub mod terminal;

use std::io;

use thiserror::Error;
use tracing::info;

use crate::layout::{Pane, PaneGeometry, PanePlan};

pub use browser::BrowserHost;
pub use stdout::StdoutHost;
pub use terminal::TerminalHost;

/// Host startup or runtime failure
#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to launch '{command}': {source}")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

/// Receives one call per pane, then runs until the session ends
pub trait RenderHost {
    /// Show `pane.url` in a pane placed at `geometry`. Fire-and-forget.
    fn render_url(&mut self, pane: &Pane, geometry: PaneGeometry) -> Result<(), HostError>;

    /// Show a message where panes would be
    fn show_placeholder(&mut self, message: &str) -> Result<(), HostError> {
        info!(placeholder = message, "No panes to render");
        Ok(())
    }

    /// Block until the host is closed
    fn wait(&mut self) -> Result<(), HostError>;
}

/// Feed every pane of `plan` to `host`, laid out within `viewport`
pub fn populate(
    host: &mut dyn RenderHost,
    plan: &PanePlan,
    viewport: PaneGeometry,
) -> Result<(), HostError> {
    if let Some(message) = &plan.placeholder {
        host.show_placeholder(message)?;
    }

    let geometry = plan.geometry(viewport);
    for (i, pane) in plan.panes.iter().enumerate() {
        let placement = geometry.get(i).copied().unwrap_or(viewport);
        info!(label = %pane.label, url = %pane.url, "Rendering pane");
        host.render_url(pane, placement)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Arrangement;

    #[derive(Default)]
    struct RecordingHost {
        rendered: Vec<(String, PaneGeometry)>,
        placeholders: Vec<String>,
    }

    impl RenderHost for RecordingHost {
        fn render_url(&mut self, pane: &Pane, geometry: PaneGeometry) -> Result<(), HostError> {
            self.rendered.push((pane.url.clone(), geometry));
            Ok(())
        }

        fn show_placeholder(&mut self, message: &str) -> Result<(), HostError> {
            self.placeholders.push(message.to_string());
            Ok(())
        }

        fn wait(&mut self) -> Result<(), HostError> {
            Ok(())
        }
    }

    fn pane(n: i64) -> Pane {
        Pane {
            label: format!("Console {}", n),
            url: format!("http://h:1/?orcnumber={}", n),
            console_number: Some(n),
        }
    }

    #[test]
    fn test_populate_renders_each_pane_in_order() {
        let plan = PanePlan {
            arrangement: Arrangement::Row,
            panes: vec![pane(2), pane(1)],
            placeholder: None,
        };
        let viewport = PaneGeometry { x: 0, y: 0, width: 2000, height: 800 };
        let mut host = RecordingHost::default();
        populate(&mut host, &plan, viewport).unwrap();

        let urls: Vec<_> = host.rendered.iter().map(|(u, _)| u.as_str()).collect();
        assert_eq!(urls, vec!["http://h:1/?orcnumber=2", "http://h:1/?orcnumber=1"]);
        assert!(host.rendered[0].1.x < host.rendered[1].1.x);
        assert!(host.placeholders.is_empty());
    }

    #[test]
    fn test_populate_shows_placeholder() {
        let plan = PanePlan {
            arrangement: Arrangement::Row,
            panes: Vec::new(),
            placeholder: Some("nothing".to_string()),
        };
        let viewport = PaneGeometry { x: 0, y: 0, width: 1280, height: 720 };
        let mut host = RecordingHost::default();
        populate(&mut host, &plan, viewport).unwrap();
        assert!(host.rendered.is_empty());
        assert_eq!(host.placeholders, vec!["nothing".to_string()]);
    }
}
