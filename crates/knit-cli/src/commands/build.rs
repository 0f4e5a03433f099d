//! `knit build`: bundle an entry module into one file.

use crate::cli::BuildArgs;
use crate::commands::utils;
use crate::config::KnitConfig;
use crate::error::Result;
use crate::ui;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// What a successful build produced.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    /// Path of the written bundle.
    pub path: PathBuf,
    pub module_count: usize,
    /// Bundle size in bytes.
    pub size: u64,
    pub duration: Duration,
}

/// Execute the build command.
///
/// 1. Load and validate configuration (CLI > Env > File > Defaults)
/// 2. Check the entry module and output directory
/// 3. Build the graph and generate the bundle
/// 4. Clean the output directory if requested, then write the bundle
/// 5. Print the build summary
pub async fn execute(args: BuildArgs) -> Result<()> {
    let base_dir = utils::get_cwd()?;
    let config = KnitConfig::load(&args, &base_dir)?;
    config.validate()?;

    build(&config, &base_dir).await?;
    Ok(())
}

/// Build and write the bundle described by `config`.
///
/// Relative paths in `config` resolve against `base_dir`. Nothing on disk
/// changes unless the bundle was generated successfully.
pub async fn build(config: &KnitConfig, base_dir: &Path) -> Result<BuildOutcome> {
    let root = config.project_root(base_dir);
    let entry = utils::resolve_path(Path::new(&config.entry), &root);
    utils::validate_entry(&entry)?;

    let out_dir = utils::resolve_path(&config.out_dir, &root);
    utils::ensure_output_dir(&out_dir)?;

    ui::info(&format!("Building {}", config.entry));
    tracing::debug!(
        root = %root.display(),
        out_dir = %out_dir.display(),
        module_ids = ?config.module_ids,
        cache_modules = config.cache_modules,
        "build configuration"
    );

    let spinner = ui::Spinner::new("Resolving modules...");
    let result = match config.to_build_options(&root).build().await {
        Ok(result) => result,
        Err(err) => {
            spinner.fail("Build failed");
            return Err(err.into());
        }
    };
    spinner.finish(&format!("Bundled {} modules", result.module_count()));

    if config.clean {
        ui::info(&format!(
            "Cleaning output directory: {}",
            utils::display_path(&out_dir, &root)
        ));
        utils::clean_output_dir(&out_dir)?;
    }

    let path = result.write_to(&out_dir, &config.filename).await?;

    let outcome = BuildOutcome {
        path,
        module_count: result.module_count(),
        size: result.size() as u64,
        duration: result.duration,
    };

    ui::print_build_summary(
        &utils::display_path(&outcome.path, &root),
        outcome.module_count,
        outcome.size,
        outcome.duration,
    );
    ui::success(&format!(
        "Build completed in {}",
        ui::format_duration(outcome.duration)
    ));

    Ok(outcome)
}
