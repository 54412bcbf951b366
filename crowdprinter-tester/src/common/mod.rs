pub mod output;
pub mod util;

pub use output::ReportSink;
pub use util::{artifacts_dir, capture_artifacts, split_csv};
