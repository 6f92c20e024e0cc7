//! The `wiscar init` command.

use std::path::Path;

use anyhow::Result;

use wiscar_core::bank::QuestionBank;
use wiscar_core::parser::bank_to_toml;

pub fn execute() -> Result<()> {
    // Create wiscar.toml
    if Path::new("wiscar.toml").exists() {
        println!("wiscar.toml already exists, skipping.");
    } else {
        std::fs::write("wiscar.toml", SAMPLE_CONFIG)?;
        println!("Created wiscar.toml");
    }

    // Write the built-in bank as an editable starting point
    std::fs::create_dir_all("banks")?;
    let bank_path = Path::new("banks/default.toml");
    if bank_path.exists() {
        println!("banks/default.toml already exists, skipping.");
    } else {
        std::fs::write(bank_path, bank_to_toml(&QuestionBank::builtin())?)?;
        println!("Created banks/default.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit banks/default.toml to adapt the questions");
    println!("  2. Run: wiscar validate --bank banks/default.toml");
    println!("  3. Run: wiscar take");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# wiscar configuration

# Question bank used when --bank is not given.
bank = "banks/default.toml"

# "lenient" assumes a neutral score when nothing was answered for it,
# "strict" refuses to score instead.
coverage = "lenient"

# Output format when --format is not given: text, json, markdown
default_format = "text"
"#;
