use std::path::Path;

use anyhow::Result;
use tracing::info;

use easer_core::AppConfig;

/// Write the default configuration to `path`
pub fn init(path: &Path, force: bool) -> Result<()> {
    if AppConfig::default().write_to(path, force)? {
        info!("Wrote default configuration to {}", path.display());
        println!("Created {}", path.display());
    } else {
        println!("{} already exists (use --force to replace it)", path.display());
    }
    Ok(())
}

pub fn show(config: &AppConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
