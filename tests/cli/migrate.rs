use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::CliTest;

const HANDLERS: &str = r#"from bot.lexicon import lookup


async def start(message, lang, name):
    text = f"Привет, {name}!"
    await message.answer("Выберите действие")
    if message.text == "Да":
        return
"#;

const MIGRATED_HANDLERS: &str = r#"from bot.lexicon import lookup


async def start(message, lang, name):
    # text = f"Привет, {name}!"
    text = lookup("greet.privet_name_value", lang).format(name=name)
    # await message.answer("Выберите действие")
    await message.answer(lookup("greet.vyberite_deystvie", lang))
    if message.text == "Да":
        return
"#;

const LEXICON: &str = r#"# Generated by lexmig. Hand-added entries are preserved on re-runs.

LEXICON_RU = {
    "greet": {
        "privet_name_value": "Привет, {name}!",
        "vyberite_deystvie": "Выберите действие",
    },
}
"#;

#[test]
fn test_migrate_rewrites_file_and_writes_lexicon() -> Result<()> {
    let test = CliTest::with_file("greet_handlers.py", HANDLERS)?;

    assert_cmd_snapshot!(test.migrate_command("greet_handlers.py"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Migrated 2 literal(s) in greet_handlers.py (namespace greet)
      - lexicon: 2 new entries in LEXICON_RU.auto.py
      - backup: greet_handlers.py.bak

    ----- stderr -----
    ");

    assert_eq!(test.read_file("greet_handlers.py")?, MIGRATED_HANDLERS);
    assert_eq!(test.read_file("LEXICON_RU.auto.py")?, LEXICON);
    assert_eq!(test.read_file("greet_handlers.py.bak")?, HANDLERS);

    Ok(())
}

#[test]
fn test_migrate_dry_run_changes_nothing() -> Result<()> {
    let test = CliTest::with_file("greet_handlers.py", HANDLERS)?;

    let mut cmd = test.migrate_command("greet_handlers.py");
    cmd.arg("--dry-run");
    assert_cmd_snapshot!(cmd, @r"
    success: false
    exit_code: 1
    ----- stdout -----
    Would migrate 2 literal(s) in greet_handlers.py (namespace greet)
    Run without --dry-run to apply.

    ----- stderr -----
    ");

    assert_eq!(test.read_file("greet_handlers.py")?, HANDLERS);
    assert!(!test.exists("greet_handlers.py.bak"));
    assert!(!test.exists("LEXICON_RU.auto.py"));

    Ok(())
}

#[test]
fn test_migrate_missing_input() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.migrate_command("missing.py"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Input file not found: missing.py
    ");
    assert!(!test.exists("LEXICON_RU.auto.py"));

    Ok(())
}

#[test]
fn test_migrate_twice_is_a_no_op() -> Result<()> {
    let test = CliTest::with_file("greet_handlers.py", HANDLERS)?;

    let first = test.migrate_command("greet_handlers.py").output()?;
    assert!(first.status.success());

    let second = test.migrate_command("greet_handlers.py").output()?;
    assert!(second.status.success());
    let stdout = String::from_utf8(second.stdout)?;
    assert_eq!(
        stdout,
        "✓ Migrated 0 literal(s) in greet_handlers.py (namespace greet)\n  - backup: greet_handlers.py.bak\n"
    );

    assert_eq!(test.read_file("greet_handlers.py")?, MIGRATED_HANDLERS);
    assert_eq!(test.read_file("LEXICON_RU.auto.py")?, LEXICON);
    // The backup holds the input as it was before this run
    assert_eq!(test.read_file("greet_handlers.py.bak")?, MIGRATED_HANDLERS);

    Ok(())
}

#[test]
fn test_migrate_dry_run_after_migration_succeeds() -> Result<()> {
    let test = CliTest::with_file("greet_handlers.py", HANDLERS)?;
    test.migrate_command("greet_handlers.py").output()?;

    let mut cmd = test.migrate_command("greet_handlers.py");
    cmd.arg("--dry-run");
    let output = cmd.output()?;
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "✓ Nothing to migrate in greet_handlers.py\n"
    );

    Ok(())
}

#[test]
fn test_migrate_tolerates_malformed_lexicon() -> Result<()> {
    let test = CliTest::with_file("greet_handlers.py", HANDLERS)?;
    test.write_file("LEXICON_RU.auto.py", "LEXICON_RU = {\"greet\": {broken\n")?;

    let output = test.migrate_command("greet_handlers.py").output()?;
    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.starts_with("warning: Failed to parse lexicon"), "{stderr}");
    assert!(stderr.contains("existing entries are ignored"), "{stderr}");

    assert_eq!(test.read_file("LEXICON_RU.auto.py")?, LEXICON);
    assert_eq!(test.read_file("greet_handlers.py")?, MIGRATED_HANDLERS);

    Ok(())
}

#[test]
fn test_migrate_keeps_hand_edited_entries() -> Result<()> {
    let test = CliTest::with_file("greet_handlers.py", HANDLERS)?;
    test.write_file(
        "LEXICON_RU.auto.py",
        r#"LEXICON_RU = {
    'greet': {
        'hello': 'Привет, {name}!',  # reworded by hand
        'vyberite_deystvie': 'Выберите действие, пожалуйста',
    },
    'menu': {'title': 'Меню'},
}
"#,
    )?;

    let output = test.migrate_command("greet_handlers.py").output()?;
    assert!(output.status.success());

    let content = test.read_file("greet_handlers.py")?;
    assert!(content.contains(r#"text = lookup("greet.hello", lang).format(name=name)"#));
    assert!(content.contains(r#"await message.answer(lookup("greet.vyberite_deystvie_1", lang))"#));

    assert_eq!(
        test.read_file("LEXICON_RU.auto.py")?,
        r#"# Generated by lexmig. Hand-added entries are preserved on re-runs.

LEXICON_RU = {
    "greet": {
        "hello": "Привет, {name}!",
        "vyberite_deystvie": "Выберите действие, пожалуйста",
        "vyberite_deystvie_1": "Выберите действие",
    },
    "menu": {
        "title": "Меню",
    },
}
"#
    );

    Ok(())
}

#[test]
fn test_migrate_start_line() -> Result<()> {
    let test = CliTest::with_file(
        "menu.py",
        "HEADER = 'Заголовок'\n\ntitle = 'Главное меню'\n",
    )?;

    let mut cmd = test.migrate_command("menu.py");
    cmd.args(["--start-line", "3"]);
    let output = cmd.output()?;
    assert!(output.status.success());

    assert_eq!(
        test.read_file("menu.py")?,
        "HEADER = 'Заголовок'\n\n# title = 'Главное меню'\ntitle = lookup(\"menu.glavnoe_menyu\", lang)\n"
    );

    Ok(())
}

#[test]
fn test_migrate_triple_quoted_literal() -> Result<()> {
    let test = CliTest::with_file(
        "help_handlers.py",
        "HELP = \"\"\"Справка\nКоманды:\n/start\"\"\"\n",
    )?;

    let output = test.migrate_command("help_handlers.py").output()?;
    assert!(output.status.success());

    assert_eq!(
        test.read_file("help_handlers.py")?,
        "# HELP = \"\"\"Справка\n# Команды:\n# /start\"\"\"\nHELP = lookup(\"help.spravka_komandy_start\", lang)\n"
    );
    assert!(
        test.read_file("LEXICON_RU.auto.py")?
            .contains(r#""spravka_komandy_start": "Справка\nКоманды:\n/start","#)
    );

    Ok(())
}

#[test]
fn test_migrate_namespace_and_lexicon_flags() -> Result<()> {
    let test = CliTest::with_file("bot/start.py", "reply = \"Готово\"\n")?;

    let mut cmd = test.migrate_command("bot/start.py");
    cmd.args(["--namespace", "common", "--lexicon", "lexicon/ru/auto.py"]);
    let output = cmd.output()?;
    assert!(output.status.success());

    assert_eq!(
        test.read_file("bot/start.py")?,
        "# reply = \"Готово\"\nreply = lookup(\"common.gotovo\", lang)\n"
    );
    assert!(test.read_file("lexicon/ru/auto.py")?.contains("\"common\": {"));
    assert!(test.exists("bot/start.py.bak"));

    Ok(())
}

#[test]
fn test_migrate_invalid_namespace() -> Result<()> {
    let test = CliTest::with_file("menu.py", "title = 'Меню'\n")?;

    let mut cmd = test.migrate_command("menu.py");
    cmd.args(["--namespace", "a.b"]);
    let output = cmd.output()?;
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(test.read_file("menu.py")?, "title = 'Меню'\n");

    Ok(())
}

#[test]
fn test_migrate_uses_config_file() -> Result<()> {
    let test = CliTest::with_file("menu.py", "await bot.notify(user, \"Привет\")\n")?;
    test.write_file(
        ".lexmigrc.json",
        r#"{
            "messageFunctions": ["notify"],
            "lookupFunction": "i18n.t",
            "localeVariable": "user.lang",
            "lexiconPath": "locales/ru.py",
            "lexiconName": "RU",
            "wordOverrides": {"привет": "hello"}
        }"#,
    )?;

    let output = test.migrate_command("menu.py").output()?;
    assert!(output.status.success());

    assert_eq!(
        test.read_file("menu.py")?,
        "# await bot.notify(user, \"Привет\")\nawait bot.notify(user, i18n.t(\"menu.hello\", user.lang))\n"
    );
    assert!(test.read_file("locales/ru.py")?.contains("RU = {"));

    Ok(())
}

#[test]
fn test_migrate_manual_fix_note() -> Result<()> {
    let test = CliTest::with_file("shop.py", "total = f\"Итого: {order.total}\"\n")?;

    let output = test.migrate_command("shop.py").output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Note: 1 replacement(s) need a manual fix"));
    assert!(
        test.read_file("shop.py")?
            .contains(r#"total = lookup("shop.itogo_order_total_value", lang).format(/*** NEED MANUAL FIX ***/)"#)
    );

    Ok(())
}

#[test]
fn test_migrate_raw_literal_and_escaped_braces() -> Result<()> {
    let test = CliTest::with_file(
        "files.py",
        "path = r\"Папка C:\\new\\table\"\nlabel = f\"Скобки {{}}\"\n",
    )?;

    let output = test.migrate_command("files.py").output()?;
    assert!(output.status.success());

    assert_eq!(
        test.read_file("files.py")?,
        "# path = r\"Папка C:\\new\\table\"\npath = lookup(\"files.papka_c_new_table\", lang)\n# label = f\"Скобки {{}}\"\nlabel = lookup(\"files.skobki\", lang).format()\n"
    );
    let lexicon = test.read_file("LEXICON_RU.auto.py")?;
    assert!(lexicon.contains(r#""papka_c_new_table": "Папка C:\\new\\table","#), "{lexicon}");
    assert!(lexicon.contains(r#""skobki": "Скобки {{}}","#), "{lexicon}");

    Ok(())
}

#[test]
fn test_migrate_verbose_lists_literals() -> Result<()> {
    let test = CliTest::with_file("greet_handlers.py", HANDLERS)?;

    let mut cmd = test.migrate_command("greet_handlers.py");
    cmd.args(["--dry-run", "-v"]);
    let output = cmd.output()?;
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("--> greet_handlers.py:5:12  [assignment]"), "{stdout}");
    assert!(stdout.contains("--> greet_handlers.py:6:26  [answer()]"), "{stdout}");
    assert!(stdout.contains("skipped: greet_handlers.py:7:24"), "{stdout}");

    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Note: No .lexmigrc.json found"));

    Ok(())
}
