//! Designer configuration

use serde::{Deserialize, Serialize};

use crate::{DesignerError, Result};

fn default_grid_size() -> f64 {
    20.0
}

fn default_history_limit() -> usize {
    50
}

fn default_min_zoom() -> u32 {
    50
}

fn default_max_zoom() -> u32 {
    200
}

fn default_zoom_step() -> u32 {
    10
}

fn default_zoom() -> u32 {
    100
}

fn default_duplicate_offset() -> f64 {
    20.0
}

fn default_element_width() -> f64 {
    100.0
}

fn default_element_height() -> f64 {
    20.0
}

fn default_font_size() -> u32 {
    template::DEFAULT_FONT_SIZE
}

fn default_stack_origin() -> f64 {
    100.0
}

fn default_stack_spacing() -> f64 {
    30.0
}

fn default_true() -> bool {
    true
}

/// Tunables for the designer core
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DesignerConfig {
    /// Grid spacing in canvas units
    #[serde(default = "default_grid_size")]
    pub grid_size: f64,

    /// Maximum number of history snapshots kept
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Smallest zoom percentage
    #[serde(default = "default_min_zoom")]
    pub min_zoom: u32,

    /// Largest zoom percentage
    #[serde(default = "default_max_zoom")]
    pub max_zoom: u32,

    /// Zoom in/out increment in percent
    #[serde(default = "default_zoom_step")]
    pub zoom_step: u32,

    /// Initial zoom percentage
    #[serde(default = "default_zoom")]
    pub default_zoom: u32,

    /// Offset applied on both axes when duplicating
    #[serde(default = "default_duplicate_offset")]
    pub duplicate_offset: f64,

    /// Nominal element width used for bounds clamping
    #[serde(default = "default_element_width")]
    pub element_width: f64,

    /// Nominal element height used for bounds clamping
    #[serde(default = "default_element_height")]
    pub element_height: f64,

    /// Font size for new elements
    #[serde(default = "default_font_size")]
    pub default_font_size: u32,

    /// X position of auto-stacked new elements
    #[serde(default = "default_stack_origin")]
    pub stack_origin_x: f64,

    /// Y position of the first auto-stacked element
    #[serde(default = "default_stack_origin")]
    pub stack_origin_y: f64,

    /// Vertical distance between auto-stacked elements
    #[serde(default = "default_stack_spacing")]
    pub stack_spacing: f64,

    /// Snap dragged elements to the grid
    #[serde(default = "default_true")]
    pub snap_to_grid: bool,

    /// Draw the grid on the canvas
    #[serde(default = "default_true")]
    pub show_grid: bool,
}

impl Default for DesignerConfig {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
            history_limit: default_history_limit(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            zoom_step: default_zoom_step(),
            default_zoom: default_zoom(),
            duplicate_offset: default_duplicate_offset(),
            element_width: default_element_width(),
            element_height: default_element_height(),
            default_font_size: default_font_size(),
            stack_origin_x: default_stack_origin(),
            stack_origin_y: default_stack_origin(),
            stack_spacing: default_stack_spacing(),
            snap_to_grid: true,
            show_grid: true,
        }
    }
}

impl DesignerConfig {
    /// Parse and validate a config from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: DesignerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the designer cannot operate with
    pub fn validate(&self) -> Result<()> {
        if !(self.grid_size.is_finite() && self.grid_size > 0.0) {
            return Err(DesignerError::Config(format!(
                "grid size must be positive, got {}",
                self.grid_size
            )));
        }
        if self.history_limit == 0 {
            return Err(DesignerError::Config(
                "history limit must be at least 1".to_string(),
            ));
        }
        if self.min_zoom == 0 || self.min_zoom > self.max_zoom {
            return Err(DesignerError::Config(format!(
                "zoom range {}..={} is invalid",
                self.min_zoom, self.max_zoom
            )));
        }
        if !(self.min_zoom..=self.max_zoom).contains(&self.default_zoom) {
            return Err(DesignerError::Config(format!(
                "default zoom {} is outside {}..={}",
                self.default_zoom, self.min_zoom, self.max_zoom
            )));
        }
        let lengths = [
            ("element width", self.element_width),
            ("element height", self.element_height),
            ("duplicate offset", self.duplicate_offset),
            ("stack origin x", self.stack_origin_x),
            ("stack origin y", self.stack_origin_y),
            ("stack spacing", self.stack_spacing),
        ];
        for (name, value) in lengths {
            if !(value.is_finite() && value >= 0.0) {
                return Err(DesignerError::Config(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
