//! The `gyandarshak init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("gyandarshak.toml").exists() {
        println!("gyandarshak.toml already exists, skipping.");
    } else {
        std::fs::write("gyandarshak.toml", SAMPLE_CONFIG)?;
        println!("Created gyandarshak.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit base_url in gyandarshak.toml if the API is not local");
    println!("  2. Run: gyandarshak register --name ... --email ... --password ...");
    println!("  3. Run: gyandarshak login --email ... --password ...");
    println!("  4. export GYANDARSHAK_TOKEN=<token printed by login>");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gyandarshak configuration

base_url = "http://127.0.0.1:8000"
token = "${GYANDARSHAK_TOKEN}"
timeout_secs = 30
"#;
