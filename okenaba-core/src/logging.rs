use std::path::PathBuf;

pub fn init() {
    init_with(None);
}

/// Initialise `env_logger` (default `info`, `RUST_LOG` respected).
///
/// With `log_file`, logs are appended there; if it cannot be opened we fall
/// back to stderr rather than failing the wizard.
pub fn init_with(log_file: Option<PathBuf>) {
    use env_logger::{Env, Target};
    use std::fs;
    use std::io;

    let target = match log_file {
        Some(path) => (|| -> io::Result<Target> {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            let file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)?;
            Ok(Target::Pipe(Box::new(file)))
        })()
        .unwrap_or(Target::Stderr),
        None => Target::Stderr,
    };

    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(target)
        .try_init();
}
