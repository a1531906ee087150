use std::path::{Path, PathBuf};

/// Directory root discovery starts from.
///
/// Priority:
/// 1. `--root` flag / `VIRALFY_ROOT` env var (passed in as `explicit`)
/// 2. The current working directory
///
/// A relative `explicit` path is resolved against the current directory.
pub fn resolve_start(explicit: Option<&Path>) -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    match explicit {
        Some(p) if p.is_absolute() => p.to_path_buf(),
        Some(p) => cwd.join(p),
        None => cwd,
    }
}

/// Locate the external scripts directory.
///
/// Priority:
/// 1. `--scripts-dir` flag / `VIRALFY_SCRIPTS_DIR` env var
/// 2. `<exe-dir>/scripts` (release archives)
/// 3. `<exe-dir>/../share/viralfy/scripts` (system packages)
/// 4. `<exe-dir>/../../scripts` (cargo `target/<profile>` inside a checkout)
/// 5. `./scripts`
pub fn resolve_scripts_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));

    let mut candidates = Vec::new();
    if let Some(dir) = &exe_dir {
        candidates.push(dir.join("scripts"));
        candidates.push(dir.join("../share/viralfy/scripts"));
        candidates.push(dir.join("../../scripts"));
    }
    candidates.push(PathBuf::from("scripts"));

    candidates
        .iter()
        .find(|c| c.is_dir())
        .cloned()
        .unwrap_or_else(|| {
            exe_dir
                .map(|d| d.join("scripts"))
                .unwrap_or_else(|| PathBuf::from("scripts"))
        })
}
