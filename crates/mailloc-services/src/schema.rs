use std::fs;
use std::path::{Path, PathBuf};

use crate::Result;

/// Dump JSON Schemas of the report types into `out_dir`.
pub fn write_schemas(out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;
    let mut written = Vec::new();
    macro_rules! dump {
        ($ty:ty, $name:literal) => {{
            let schema = schemars::schema_for!($ty);
            let path = out_dir.join($name);
            let f = fs::File::create(&path)?;
            serde_json::to_writer_pretty(f, &schema)?;
            written.push(path);
        }};
    }
    dump!(mailloc_domain::BuildSummary, "build_summary.schema.json");
    dump!(mailloc_domain::ResolutionReport, "resolution_report.schema.json");
    dump!(mailloc_domain::LocaleInfo, "locale_info.schema.json");
    tracing::info!(event = "schemas_written", dir = %out_dir.display(), count = written.len());
    Ok(written)
}
