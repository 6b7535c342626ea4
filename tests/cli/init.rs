use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in [
        "messageFunctions",
        "lookupFunction",
        "localeVariable",
        "lexiconPath",
        "lexiconName",
        "namespaceSuffixes",
        "defaultNamespace",
        "wordOverrides",
        "maxKeyLength",
    ] {
        assert!(parsed.get(field).is_some(), "Config should have '{field}' field");
    }
    assert_eq!(parsed["lookupFunction"], "lookup");
    assert_eq!(parsed["wordOverrides"]["да"], "yes");

    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .lexmigrc.json

    ----- stderr -----
    ");

    let content = test.read_file(".lexmigrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".lexmigrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    Error: .lexmigrc.json already exists
    ");
    assert_eq!(test.read_file(".lexmigrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;
    test.write_file("menu.py", "title = \"Главное меню\"\n")?;

    let output = test.migrate_command("menu.py").output()?;
    assert!(
        output.status.success(),
        "Migrate should work with initialized config. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(test.exists("LEXICON_RU.auto.py"));

    Ok(())
}
