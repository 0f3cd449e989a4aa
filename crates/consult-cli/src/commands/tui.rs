use anyhow::{anyhow, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;

pub fn launch(config_path: Option<PathBuf>, verbose: bool) -> Result<()> {
    let binary = find_tui_binary();
    if verbose {
        eprintln!("tui: {}", binary.display());
    }
    let mut command = Command::new(binary);
    if let Some(path) = config_path {
        command.arg("--config").arg(path);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        let err = command.exec();
        Err(exec_error(err))
    }

    #[cfg(not(unix))]
    {
        let status = command.status().map_err(exec_error)?;
        std::process::exit(status.code().unwrap_or(1));
    }
}

fn find_tui_binary() -> PathBuf {
    let name = format!("consult-tui{}", env::consts::EXE_SUFFIX);
    if let Ok(current) = env::current_exe() {
        if let Some(dir) = current.parent() {
            let candidate = dir.join(&name);
            if candidate.is_file() {
                return candidate;
            }
        }
    }
    PathBuf::from(name)
}

fn exec_error(err: std::io::Error) -> anyhow::Error {
    if err.kind() == std::io::ErrorKind::NotFound {
        return anyhow!(
            "consult-tui binary not found; build it with `cargo build -p consult-tui` or install the package"
        );
    }
    anyhow!("launch consult-tui failed: {}", err)
}
