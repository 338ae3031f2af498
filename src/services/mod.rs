// probeAI Core Services

pub mod analyze;
pub mod config_store;
pub mod detector_client;
pub mod input;
pub mod output;
pub mod render;
pub mod session;
pub mod settings;

pub use analyze::{analyze_text, render_response, Access, AnalyzeError};
pub use config_store::*;
pub use detector_client::{DetectionReply, DetectorClient, DetectorError};
pub use input::{load_text, normalize_input, read_stdin, InputError};
pub use output::{generate, ReportFormat, WriteOptions};
pub use render::{render_document, ChartLayout, MessageStyle, RenderOptions};
pub use session::{AccessPolicy, Session, SessionError, SessionState};
pub use settings::{ConfigError, Settings};
