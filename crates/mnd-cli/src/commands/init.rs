//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# mnd configuration

# Minimum severity that makes `mnd check` exit non-zero
fail_on = "warning"

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./"

# Glob patterns to exclude from analysis
exclude = [
    "**/vendor/**",
    "**/testdata/**",
]

# Respect .gitignore files
respect_gitignore = true

# Worker threads (default: one per CPU)
# parallelism = 4

# Ignore lists. Entries are regular expressions.
[ignore]
# Numbers must match the whole literal
numbers = ["0", '0\.0', "1", '1\.0']

# Calls to these functions (`pkg.Func`) are never checked
functions = [
    'time\.Date',
    'strconv\.FormatInt',
    'strconv\.FormatUint',
    'strconv\.FormatFloat',
    'strconv\.ParseInt',
    'strconv\.ParseUint',
    'strconv\.ParseFloat',
]

# Files whose path matches are skipped
files = []

# Check configurations
# Each check can be enabled/disabled and have its severity overridden

[checks.argument]
enabled = true
# severity = "warning"

[checks.assign]
enabled = true

[checks.case]
enabled = true

[checks.condition]
enabled = true

[checks.operation]
enabled = true

[checks.return]
enabled = true
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new("mnd.toml"), force)?;

    println!("Created mnd.toml");
    println!("\nNext steps:");
    println!("  1. Edit mnd.toml to configure checks");
    println!("  2. Run: mnd check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;
    Ok(())
}
