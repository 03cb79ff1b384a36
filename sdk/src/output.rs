use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crudgen_compiler::{CrudError, GeneratorConfig};

use crate::generator::GeneratedFile;

/// Writes generated files below `root`. Nothing is written if any target
/// already exists and `force` is off.
pub fn write_files(root: &Path, files: &[GeneratedFile], force: bool) -> Result<Vec<PathBuf>, CrudError> {
    let targets: Vec<PathBuf> = files.iter().map(|f| root.join(&f.path)).collect();

    if !force {
        if let Some(existing) = targets.iter().find(|p| p.exists()) {
            return Err(CrudError::FileExists(existing.clone()));
        }
    }

    for (file, target) in files.iter().zip(&targets) {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(target, &file.contents)?;
        tracing::info!(path = %target.display(), "created");
    }

    Ok(targets)
}

/// Path of today's invocation log.
pub fn log_path(config: &GeneratorConfig) -> PathBuf {
    let date = chrono::Local::now().format("%Y-%m-%d");
    config.log_dir.join(format!("{}-{}.log", config.log_file, date))
}

/// Appends one invocation line to today's log.
pub fn append_log(config: &GeneratorConfig, line: &str) -> Result<(), CrudError> {
    let path = log_path(config);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    writeln!(file, "{}", line)?;
    Ok(())
}
