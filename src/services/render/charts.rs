// Chart Data
// Bar-chart data shared by the terminal and HTML writers

use crate::models::{BarChart, ChartBar, ClassProbabilityRow, ParagraphRow};

const CLASS_CHART_SIZE: u32 = 300;
const PARAGRAPH_ROW_HEIGHT: u32 = 30;

/// Categorical palette, assigned to classes in response order.
const CATEGORY_PALETTE: [&str; 10] = [
    "#4c78a8", "#f58518", "#e45756", "#72b7b2", "#54a24b",
    "#eeca3b", "#b279a2", "#ff9da6", "#9d755d", "#bab0ac",
];

/// Red (0.0) through near-white to blue (1.0).
const DIVERGING_STOPS: [(u8, u8, u8); 5] = [
    (0x67, 0x00, 0x1f),
    (0xd6, 0x60, 0x4d),
    (0xf7, 0xf7, 0xf7),
    (0x43, 0x93, 0xc3),
    (0x05, 0x30, 0x61),
];

pub fn class_probability_chart(rows: &[ClassProbabilityRow]) -> BarChart {
    let bars = rows
        .iter()
        .enumerate()
        .map(|(i, row)| ChartBar {
            label: row.class_name.clone(),
            value: row.probability,
            color: CATEGORY_PALETTE[i % CATEGORY_PALETTE.len()].to_string(),
            text: None,
        })
        .collect();

    BarChart {
        title: "Class Probabilities".to_string(),
        x_title: "Class".to_string(),
        y_title: "Probability".to_string(),
        horizontal: false,
        width: CLASS_CHART_SIZE,
        height: CLASS_CHART_SIZE,
        bars,
    }
}

pub fn paragraph_chart(rows: &[ParagraphRow]) -> BarChart {
    let bars = rows
        .iter()
        .map(|row| ChartBar {
            label: row.paragraph_number.to_string(),
            value: row.ai_probability,
            color: diverging_color(row.ai_probability),
            text: Some(row.ai_probability_text.clone()),
        })
        .collect();

    BarChart {
        title: "Paragraph Analysis".to_string(),
        x_title: "AI Generation Probability".to_string(),
        y_title: "Paragraph".to_string(),
        horizontal: true,
        width: CLASS_CHART_SIZE,
        height: PARAGRAPH_ROW_HEIGHT.saturating_mul(rows.len() as u32),
        bars,
    }
}

/// Color for `value` on the [0, 1] diverging scale. Out-of-range and NaN
/// values are clamped to the nearest end.
pub fn diverging_color(value: f64) -> String {
    let t = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    let segments = (DIVERGING_STOPS.len() - 1) as f64;
    let scaled = t * segments;
    let idx = (scaled.floor() as usize).min(DIVERGING_STOPS.len() - 2);
    let local = scaled - idx as f64;

    let (r0, g0, b0) = DIVERGING_STOPS[idx];
    let (r1, g1, b1) = DIVERGING_STOPS[idx + 1];
    let lerp = |a: u8, b: u8| -> u8 {
        (a as f64 + (b as f64 - a as f64) * local).round().clamp(0.0, 255.0) as u8
    };

    format!("#{:02x}{:02x}{:02x}", lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph_row(n: usize, prob: f64) -> ParagraphRow {
        ParagraphRow {
            paragraph_number: n,
            start_sentence: 0,
            end_sentence: 0,
            sentence_count: 1,
            ai_probability_text: format!("{:.2}%", prob * 100.0),
            ai_probability: prob,
        }
    }

    #[test]
    fn test_diverging_color_endpoints() {
        assert_eq!(diverging_color(0.0), "#67001f");
        assert_eq!(diverging_color(0.5), "#f7f7f7");
        assert_eq!(diverging_color(1.0), "#053061");
    }

    #[test]
    fn test_diverging_color_clamps() {
        assert_eq!(diverging_color(-3.0), diverging_color(0.0));
        assert_eq!(diverging_color(7.5), diverging_color(1.0));
        assert_eq!(diverging_color(f64::NAN), diverging_color(0.0));
    }

    #[test]
    fn test_class_chart_keeps_order() {
        let rows = vec![
            ClassProbabilityRow { class_name: "human".into(), probability: 0.1 },
            ClassProbabilityRow { class_name: "ai".into(), probability: 0.8 },
        ];
        let chart = class_probability_chart(&rows);
        assert_eq!(chart.bars.len(), 2);
        assert_eq!(chart.bars[0].label, "human");
        assert_eq!(chart.bars[1].label, "ai");
        assert_ne!(chart.bars[0].color, chart.bars[1].color);
        assert_eq!((chart.width, chart.height), (300, 300));
    }

    #[test]
    fn test_paragraph_chart_height_scales() {
        let rows = vec![paragraph_row(1, 0.9), paragraph_row(2, 0.2), paragraph_row(3, 0.5)];
        let chart = paragraph_chart(&rows);
        assert!(chart.horizontal);
        assert_eq!(chart.height, 90);
        assert_eq!(chart.bars[0].label, "1");
        assert_eq!(chart.bars[0].text.as_deref(), Some("90.00%"));
        assert_eq!(paragraph_chart(&[]).height, 0);
    }
}
