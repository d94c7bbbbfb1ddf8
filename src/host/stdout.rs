//! Plain-text host: prints one `label<TAB>address` line per pane

use std::io::Write;

use crate::host::{HostError, RenderHost};
use crate::layout::{Pane, PaneGeometry};

pub struct StdoutHost<W: Write> {
    out: W,
}

impl<W: Write> StdoutHost<W> {
    pub fn new(out: W) -> Self {
        StdoutHost { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderHost for StdoutHost<W> {
    fn render_url(&mut self, pane: &Pane, _geometry: PaneGeometry) -> Result<(), HostError> {
        writeln!(self.out, "{}\t{}", pane.label, pane.url)?;
        Ok(())
    }

    fn show_placeholder(&mut self, message: &str) -> Result<(), HostError> {
        writeln!(self.out, "# {}", message)?;
        Ok(())
    }

    fn wait(&mut self) -> Result<(), HostError> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfiguration;
    use crate::host::populate;
    use crate::layout::plan_panes;
    use serde_json::json;

    #[test]
    fn test_prints_console_addresses() {
        let config = AppConfiguration::from_value(&json!({
            "connection": { "protocol": "HTTP:", "ip": "queue", "port": "80" },
            "mode": "orc",
            "orcNumbers": [1, 2]
        }))
        .unwrap();
        let plan = plan_panes(&config).unwrap();
        let viewport = PaneGeometry::from(&config.window);

        let mut host = StdoutHost::new(Vec::new());
        populate(&mut host, &plan, viewport).unwrap();
        host.wait().unwrap();

        let text = String::from_utf8(host.into_inner()).unwrap();
        assert_eq!(
            text,
            "Console 1\thttp://queue:80/?app=equeueorc&platform=all&orcnumber=1\n\
             Console 2\thttp://queue:80/?app=equeueorc&platform=all&orcnumber=2\n"
        );
    }

    #[test]
    fn test_prints_placeholder() {
        let mut host = StdoutHost::new(Vec::new());
        host.show_placeholder("No consoles assigned for ORC mode.").unwrap();
        let text = String::from_utf8(host.into_inner()).unwrap();
        assert_eq!(text, "# No consoles assigned for ORC mode.\n");
    }
}
