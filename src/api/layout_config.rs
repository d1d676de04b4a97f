use serde::{Deserialize, Serialize};

use crate::error::{PanelError, PanelResult};

/// Geometry constants of the panel layout.
///
/// Serializable so hosts can ship layout tweaks as JSON instead of code.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_horizontal_padding")]
    pub horizontal_padding: f64,
    #[serde(default = "default_title_text_left")]
    pub title_text_left: f64,
    #[serde(default = "default_title_text_top")]
    pub title_text_top: f64,
    /// Band above each chart body reserved for the measure title.
    #[serde(default = "default_title_band_height")]
    pub title_band_height: f64,
    #[serde(default = "default_y_axis_width")]
    pub y_axis_width: f64,
    #[serde(default = "default_graph_height")]
    pub graph_height: f64,
    /// Widest a single chart may get before another column is added.
    #[serde(default = "default_max_graph_width")]
    pub max_graph_width: f64,
    #[serde(default = "default_x_axis_height")]
    pub x_axis_height: f64,
    #[serde(default = "default_value_tick_count")]
    pub value_tick_count: usize,
    #[serde(default = "default_time_tick_count")]
    pub time_tick_count: usize,
}

fn default_horizontal_padding() -> f64 {
    10.0
}

fn default_title_text_left() -> f64 {
    6.0
}

fn default_title_text_top() -> f64 {
    17.0
}

fn default_title_band_height() -> f64 {
    20.0
}

fn default_y_axis_width() -> f64 {
    60.0
}

fn default_graph_height() -> f64 {
    100.0
}

fn default_max_graph_width() -> f64 {
    2000.0
}

fn default_x_axis_height() -> f64 {
    50.0
}

fn default_value_tick_count() -> usize {
    10
}

fn default_time_tick_count() -> usize {
    10
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_padding: default_horizontal_padding(),
            title_text_left: default_title_text_left(),
            title_text_top: default_title_text_top(),
            title_band_height: default_title_band_height(),
            y_axis_width: default_y_axis_width(),
            graph_height: default_graph_height(),
            max_graph_width: default_max_graph_width(),
            x_axis_height: default_x_axis_height(),
            value_tick_count: default_value_tick_count(),
            time_tick_count: default_time_tick_count(),
        }
    }
}

impl LayoutConfig {
    #[must_use]
    pub fn with_max_graph_width(mut self, max_graph_width: f64) -> Self {
        self.max_graph_width = max_graph_width;
        self
    }

    #[must_use]
    pub fn with_horizontal_padding(mut self, horizontal_padding: f64) -> Self {
        self.horizontal_padding = horizontal_padding;
        self
    }

    #[must_use]
    pub fn with_graph_height(mut self, graph_height: f64) -> Self {
        self.graph_height = graph_height;
        self
    }

    pub fn validate(self) -> PanelResult<Self> {
        for (field, value) in [
            ("horizontal_padding", self.horizontal_padding),
            ("title_text_left", self.title_text_left),
            ("title_text_top", self.title_text_top),
            ("title_band_height", self.title_band_height),
            ("y_axis_width", self.y_axis_width),
            ("graph_height", self.graph_height),
            ("x_axis_height", self.x_axis_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PanelError::InvalidConfig(format!(
                    "`{field}` must be finite and >= 0"
                )));
            }
        }

        if !self.max_graph_width.is_finite() || self.max_graph_width <= 0.0 {
            return Err(PanelError::InvalidConfig(
                "`max_graph_width` must be finite and > 0".to_owned(),
            ));
        }

        Ok(self)
    }

    pub fn to_json_pretty(self) -> PanelResult<String> {
        serde_json::to_string_pretty(&self).map_err(|e| {
            PanelError::InvalidConfig(format!("failed to serialize layout config: {e}"))
        })
    }

    /// Parses and validates a JSON config; missing fields take their defaults.
    pub fn from_json_str(input: &str) -> PanelResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            PanelError::InvalidConfig(format!("failed to parse layout config json: {e}"))
        })?;
        config.validate()
    }
}
