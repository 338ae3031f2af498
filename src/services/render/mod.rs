// Render Module
// Turns one detection document into display-ready views:
// - validate: raw JSON -> typed document or raw fallback
// - format: percent / decimal / capitalization helpers
// - metrics: headline metrics and additional statistics
// - tables: class probability, paragraph and sentence tables
// - labels: classification badge, message tone, message rewrite
// - charts: chart-ready bar data
// - bundle: the render boundary that never fails
// - sidebar: static informational copy

pub mod validate;
pub mod format;
pub mod metrics;
pub mod tables;
pub mod labels;
pub mod charts;
pub mod options;
pub mod bundle;
pub mod sidebar;

pub use validate::{validate_document, RenderError, ValidatedDocument};
pub use format::{capitalize, format_decimal, format_percent};
pub use metrics::{additional_stats, summary_metrics};
pub use tables::{class_probability_table, paragraph_table, sentence_table};
pub use labels::{classification_badge, message_lines, rewrite_message, tone_for_class};
pub use charts::{class_probability_chart, paragraph_chart, diverging_color};
pub use options::{ChartLayout, MessageStyle, RenderOptions};
pub use bundle::{build_bundle, render_document, FALLBACK_NOTICE};
