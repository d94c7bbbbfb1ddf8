/// Display role requested by the configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Single queue board
    Display,
    /// Segment-specific info panel
    Info,
    /// Multi-pane operator console
    Orc,
}

impl Mode {
    /// Parses an already lowercased mode tag. Unknown tags yield `None`.
    pub fn parse(tag: &str) -> Option<Mode> {
        match tag {
            "display" => Some(Mode::Display),
            "info" => Some(Mode::Info),
            "orc" => Some(Mode::Orc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Display => "display",
            Mode::Info => "info",
            Mode::Orc => "orc",
        }
    }

    /// Whether the mode shows one pane per console number
    pub fn is_multi_pane(&self) -> bool {
        matches!(self, Mode::Orc)
    }
}
