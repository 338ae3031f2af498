// Render Options
// Switches that used to be separate copies of the dashboard

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether result messages are shown as sent or reframed in first person.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MessageStyle {
    Verbatim,
    #[default]
    FirstPerson,
}

/// Placement of the class-probability and paragraph charts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ChartLayout {
    #[default]
    SideBySide,
    Stacked,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    #[serde(default)]
    pub message_style: MessageStyle,
    #[serde(default)]
    pub chart_layout: ChartLayout,
}

impl FromStr for MessageStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "verbatim" | "plain" => Ok(MessageStyle::Verbatim),
            "first-person" | "first_person" | "firstperson" => Ok(MessageStyle::FirstPerson),
            other => Err(format!("unknown message style: {}", other)),
        }
    }
}

impl fmt::Display for MessageStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageStyle::Verbatim => write!(f, "verbatim"),
            MessageStyle::FirstPerson => write!(f, "first-person"),
        }
    }
}

impl FromStr for ChartLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "side-by-side" | "side_by_side" | "columns" => Ok(ChartLayout::SideBySide),
            "stacked" | "rows" => Ok(ChartLayout::Stacked),
            other => Err(format!("unknown chart layout: {}", other)),
        }
    }
}

impl fmt::Display for ChartLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartLayout::SideBySide => write!(f, "side-by-side"),
            ChartLayout::Stacked => write!(f, "stacked"),
        }
    }
}
