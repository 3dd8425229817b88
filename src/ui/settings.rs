/// Settings form state
///
/// Holds the raw text of each numeric input so the user can type freely;
/// values are parsed and range checked only when the form is applied.

use std::ops::RangeInclusive;

use crate::color::Background;
use crate::error::{GridError, Result};
use crate::state::config::{COLUMNS_RANGE, EXTENT_RANGE, PADDING_RANGE, ROWS_RANGE};
use crate::state::GridConfig;

/// Numeric inputs of the settings tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Rows,
    Columns,
    TotalWidth,
    TotalHeight,
    HorizontalPadding,
    VerticalPadding,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Rows,
        Field::Columns,
        Field::TotalWidth,
        Field::TotalHeight,
        Field::HorizontalPadding,
        Field::VerticalPadding,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Rows => "Rows",
            Field::Columns => "Columns",
            Field::TotalWidth => "Width (px)",
            Field::TotalHeight => "Height (px)",
            Field::HorizontalPadding => "Horizontal Padding (px)",
            Field::VerticalPadding => "Vertical Padding (px)",
        }
    }

    pub fn range(&self) -> RangeInclusive<u32> {
        match self {
            Field::Rows => ROWS_RANGE,
            Field::Columns => COLUMNS_RANGE,
            Field::TotalWidth | Field::TotalHeight => EXTENT_RANGE,
            Field::HorizontalPadding | Field::VerticalPadding => PADDING_RANGE,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }

    fn read(&self, config: &GridConfig) -> u32 {
        match self {
            Field::Rows => config.rows,
            Field::Columns => config.columns,
            Field::TotalWidth => config.total_width,
            Field::TotalHeight => config.total_height,
            Field::HorizontalPadding => config.horizontal_padding,
            Field::VerticalPadding => config.vertical_padding,
        }
    }

    fn write(&self, config: &mut GridConfig, value: u32) {
        match self {
            Field::Rows => config.rows = value,
            Field::Columns => config.columns = value,
            Field::TotalWidth => config.total_width = value,
            Field::TotalHeight => config.total_height = value,
            Field::HorizontalPadding => config.horizontal_padding = value,
            Field::VerticalPadding => config.vertical_padding = value,
        }
    }

    /// Parse and range check one input
    fn parse(&self, raw: &str) -> Result<u32> {
        let value: u32 = raw.trim().parse().map_err(|_| GridError::InvalidSetting {
            field: self.label(),
            reason: format!("'{}' is not a whole number", raw.trim()),
        })?;

        let range = self.range();
        if !range.contains(&value) {
            return Err(GridError::InvalidSetting {
                field: self.label(),
                reason: format!("must be between {} and {}", range.start(), range.end()),
            });
        }

        Ok(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    values: [String; 6],
    pub background: Background,
}

impl SettingsForm {
    /// Fill the form from the current config
    pub fn from_config(config: &GridConfig) -> Self {
        Self {
            values: Field::ALL.map(|field| field.read(config).to_string()),
            background: config.background_color,
        }
    }

    pub fn value(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    pub fn set(&mut self, field: Field, value: String) {
        self.values[field.index()] = value;
    }

    /// Parse every input into a config that can be laid out
    pub fn to_config(&self) -> Result<GridConfig> {
        let mut config = GridConfig {
            background_color: self.background,
            ..GridConfig::default()
        };

        for field in Field::ALL {
            let value = field.parse(self.value(field))?;
            field.write(&mut config, value);
        }

        config.validate()?;
        Ok(config)
    }
}

impl Default for SettingsForm {
    fn default() -> Self {
        Self::from_config(&GridConfig::default())
    }
}
