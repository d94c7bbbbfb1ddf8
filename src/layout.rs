//! Pane planning and geometry
//!
//! A plan is computed once at startup: every pane address is resolved before
//! any host is started, so a broken console aborts the whole launch instead of
//! leaving a silently missing pane.

use tracing::debug;

use crate::config::{AppConfiguration, WindowSettings};
use crate::constants::{EMPTY_CONSOLE_MESSAGE, MIN_PANE_HEIGHT, MIN_PANE_WIDTH, PANE_SPACING};
use crate::mode::Mode;
use crate::url_builder::{build_mode_url, UrlBuilderError};

/// How panes are arranged in the window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arrangement {
    /// One pane filling the window
    Single,
    /// Panes side by side, left to right
    Row,
}

/// One web view to show
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pane {
    pub label: String,
    pub url: String,
    pub console_number: Option<i64>,
}

/// Pane rectangle in pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaneGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PaneGeometry {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<&WindowSettings> for PaneGeometry {
    fn from(window: &WindowSettings) -> Self {
        PaneGeometry {
            x: window.x,
            y: window.y,
            width: window.width,
            height: window.height,
        }
    }
}

/// Everything a host needs to populate its window
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanePlan {
    pub arrangement: Arrangement,
    pub panes: Vec<Pane>,
    /// Shown instead of panes when there is nothing to display
    pub placeholder: Option<String>,
}

impl PanePlan {
    /// Geometry for each pane within `viewport`, in pane order
    pub fn geometry(&self, viewport: PaneGeometry) -> Vec<PaneGeometry> {
        match self.arrangement {
            Arrangement::Single if !self.panes.is_empty() && !viewport.is_empty() => vec![viewport],
            Arrangement::Single => Vec::new(),
            Arrangement::Row => fit_panes(viewport, self.panes.len()),
        }
    }
}

/// Resolve the panes for the configured mode.
pub fn plan_panes(config: &AppConfiguration) -> Result<PanePlan, UrlBuilderError> {
    if config.mode_kind().map_or(false, |m| m.is_multi_pane()) {
        let panes = config
            .console_numbers
            .iter()
            .map(|&number| {
                Ok(Pane {
                    label: format!("Console {}", number),
                    url: build_mode_url(config, Mode::Orc.as_str(), Some(number))?,
                    console_number: Some(number),
                })
            })
            .collect::<Result<Vec<_>, UrlBuilderError>>()?;

        debug!(panes = panes.len(), "Planned console panes");
        let placeholder = panes
            .is_empty()
            .then(|| EMPTY_CONSOLE_MESSAGE.to_string());
        return Ok(PanePlan {
            arrangement: Arrangement::Row,
            panes,
            placeholder,
        });
    }

    let url = build_mode_url(config, &config.mode, None)?;
    Ok(PanePlan {
        arrangement: Arrangement::Single,
        panes: vec![Pane {
            label: config.mode.clone(),
            url,
            console_number: None,
        }],
        placeholder: None,
    })
}

/// Split `viewport` into `count` columns.
///
/// Each column gets an equal share of the width and the full height, but
/// never less than the minimum pane size, so a crowded row overflows to the
/// right instead of squeezing panes.
pub fn fit_panes(viewport: PaneGeometry, count: usize) -> Vec<PaneGeometry> {
    if count == 0 || viewport.is_empty() {
        return Vec::new();
    }

    let count_u32 = u32::try_from(count).unwrap_or(u32::MAX);
    let gaps = PANE_SPACING.saturating_mul(count_u32 - 1);
    let share = viewport.width.saturating_sub(gaps) / count_u32;
    let width = share.max(MIN_PANE_WIDTH);
    let height = viewport.height.max(MIN_PANE_HEIGHT);

    let step = i64::from(width) + i64::from(PANE_SPACING);
    (0..count)
        .map(|i| {
            let x = i64::from(viewport.x) + step * i as i64;
            PaneGeometry {
                x: i32::try_from(x).unwrap_or(i32::MAX),
                y: viewport.y,
                width,
                height,
            }
        })
        .collect()
}
