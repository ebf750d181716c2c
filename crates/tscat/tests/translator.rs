//! Integration tests for layered translation lookup.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tscat::parser::parse_catalog;
use tscat::{LoadError, LoadOptions, Request, Translation, Translator, load_file};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

fn translator_with(documents: &[&str]) -> Translator {
    let mut translator = Translator::new();
    for document in documents {
        translator.install(parse_catalog(document).unwrap());
    }
    translator
}

fn plural(translator: &Translator, context: &str, source: &str, count: i64) -> String {
    let request = Request::builder()
        .context(context)
        .source(source)
        .count(count)
        .build();
    translator.translate_with(&request)
}

const POLISH_HOURS: &str = r#"<TS language="pl"><context><name>TopBar</name>
<message numerus="yes"><source>%n hour(s)</source>
<translation><numerusform>%n godzina</numerusform><numerusform>%n godziny</numerusform><numerusform>%n godzin</numerusform></translation>
</message></context></TS>"#;

// =========================================================================
// Lookup against real catalogs
// =========================================================================

#[test]
fn every_recorded_entry_is_returned_exactly() {
    let catalog = load_file(fixture("digiwage_hr_HR.ts")).unwrap();
    let mut translator = Translator::new();
    translator.install(catalog.clone());

    for (context, message) in catalog.messages() {
        if let Translation::Single(text) = &message.translation {
            assert_eq!(translator.translate(&context.name, &message.source), text);
        }
    }
}

#[test]
fn missing_context_or_source_returns_source() {
    let mut translator = Translator::new();
    translator.install_file(fixture("digiwage_pl.ts")).unwrap();

    assert_eq!(translator.translate("AddNewAddressDialog", "SAVE"), "ZAPISZ");
    assert_eq!(translator.translate("SendWidget", "SAVE"), "SAVE");
    assert_eq!(translator.translate("AddressBookPage", "SAVE"), "SAVE");
    assert_eq!(translator.translate("AddressBookPage", "&Paste"), "&Paste");
    assert!(!translator.contains("AddressBookPage", "&Paste"));
    assert!(translator.contains("AddressBookPage", "&New"));
}

#[test]
fn empty_translator_returns_source() {
    let translator = Translator::new();
    assert_eq!(translator.layer_count(), 0);
    assert_eq!(translator.translate("TopBar", "Pending"), "Pending");
}

#[test]
fn croatian_numerus_selects_by_count() {
    let mut translator = Translator::new();
    translator.install_file(fixture("digiwage_hr_HR.ts")).unwrap();

    let source = "%n active connection(s)";
    assert_eq!(plural(&translator, "TopBar", source, 1), "1 aktivna veza");
    assert_eq!(plural(&translator, "TopBar", source, 3), "3 aktivnih veza");
    assert_eq!(plural(&translator, "TopBar", source, 21), "21 aktivna veza");
    assert_eq!(plural(&translator, "TopBar", "%n day(s)", 1), "1 dan");
    assert_eq!(plural(&translator, "TopBar", "%n day(s)", 12), "12 dana");
}

#[test]
fn polish_numerus_selects_by_count() {
    let translator = translator_with(&[POLISH_HOURS]);
    let cases = [
        (1, "1 godzina"),
        (2, "2 godziny"),
        (4, "4 godziny"),
        (5, "5 godzin"),
        (12, "12 godzin"),
        (21, "21 godzin"),
        (22, "22 godziny"),
        (0, "0 godzin"),
    ];
    for (count, expected) in cases {
        assert_eq!(plural(&translator, "TopBar", "%n hour(s)", count), expected);
    }
}

#[test]
fn numerus_without_count_uses_first_form() {
    let translator = translator_with(&[POLISH_HOURS]);
    assert_eq!(translator.translate("TopBar", "%n hour(s)"), "%n godzina");
}

#[test]
fn count_is_substituted_into_source_fallback() {
    let translator = translator_with(&[POLISH_HOURS]);
    assert_eq!(
        plural(&translator, "TopBar", "%n week(s)", 3),
        "3 week(s)"
    );
}

#[test]
fn missing_forms_clamp_to_last_stored_form() {
    let translator = translator_with(&[r#"<TS language="pl"><context><name>TopBar</name>
<message numerus="yes"><source>%n day(s)</source>
<translation><numerusform>%n dzień</numerusform><numerusform>%n dni</numerusform></translation>
</message></context></TS>"#]);
    assert_eq!(plural(&translator, "TopBar", "%n day(s)", 5), "5 dni");
}

// =========================================================================
// Layers
// =========================================================================

#[test]
fn later_catalogs_take_precedence() {
    let translator = translator_with(&[
        r#"<TS language="hr"><context><name>TopBar</name>
<message><source>Pending</source><translation>Na čekanju</translation></message>
<message><source>Tor Disabled</source><translation>Tor isključen</translation></message>
</context></TS>"#,
        r#"<TS language="hr_HR"><context><name>TopBar</name>
<message><source>Tor Disabled</source><translation>Tor onemogućen</translation></message>
</context></TS>"#,
    ]);
    assert_eq!(translator.languages(), vec!["hr", "hr_HR"]);
    assert_eq!(translator.translate("TopBar", "Tor Disabled"), "Tor onemogućen");
    assert_eq!(translator.translate("TopBar", "Pending"), "Na čekanju");
}

#[test]
fn empty_form_falls_through_to_earlier_layer() {
    let translator = translator_with(&[
        POLISH_HOURS,
        r#"<TS language="pl_PL"><context><name>TopBar</name>
<message numerus="yes"><source>%n hour(s)</source>
<translation><numerusform>%n godz.</numerusform><numerusform></numerusform><numerusform></numerusform></translation>
</message></context></TS>"#,
    ]);
    assert_eq!(plural(&translator, "TopBar", "%n hour(s)", 1), "1 godz.");
    assert_eq!(plural(&translator, "TopBar", "%n hour(s)", 3), "3 godziny");
}

#[test]
fn for_locale_loads_base_then_territory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("app_hr.ts"),
        r#"<TS language="hr"><context><name>TopBar</name>
<message><source>Locked</source><translation>Zaključano</translation></message>
<message><source>Available</source><translation>Dostupno</translation></message>
</context></TS>"#,
    )
    .unwrap();
    fs::copy(fixture("digiwage_hr_HR.ts"), dir.path().join("app_hr_HR.ts")).unwrap();

    let translator = Translator::for_locale(dir.path(), "app_", "hr_HR", LoadOptions::default());
    assert_eq!(translator.languages(), vec!["hr", "hr_HR"]);
    assert_eq!(translator.translate("TopBar", "Available"), "Raspoloživo");
    assert_eq!(translator.translate("TopBar", "Locked"), "Zaključano");
    assert_eq!(translator.translate("AddNewAddressDialog", "SAVE"), "SPREMI");
}

#[test]
fn for_locale_skips_missing_and_broken_files() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("app_pl.ts"), "<TS><context>").unwrap();
    fs::copy(fixture("digiwage_pl.ts"), dir.path().join("app_pl_PL.ts")).unwrap();

    let translator = Translator::for_locale(dir.path(), "app_", "pl_PL", LoadOptions::default());
    assert_eq!(translator.layer_count(), 1);
    assert_eq!(translator.translate("AddressBookPage", "&Delete"), "&Usuń");

    let translator = Translator::for_locale(dir.path(), "app_", "de_DE", LoadOptions::default());
    assert_eq!(translator.layer_count(), 0);
}

// =========================================================================
// Disambiguation and entry states
// =========================================================================

#[test]
fn disambiguation_selects_entry_and_falls_back_to_plain_key() {
    let translator = translator_with(&[r#"<TS language="pl"><context><name>AddressBookPage</name>
<message><source>Address</source><translation>Adres</translation></message>
<message><source>Address</source><comment>column header</comment><translation>Adresy</translation></message>
</context></TS>"#]);
    let lookup = |disambiguation| {
        translator.translate_with(
            &Request::builder()
                .context("AddressBookPage")
                .source("Address")
                .maybe_disambiguation(disambiguation)
                .build(),
        )
    };
    assert_eq!(lookup(None), "Adres");
    assert_eq!(lookup(Some("column header")), "Adresy");
    assert_eq!(lookup(Some("tooltip")), "Adres");
}

#[test]
fn find_translation_agrees_with_translate_with() {
    let translator = translator_with(&[r#"<TS language="pl"><context><name>AddressBookPage</name>
<message><source>Address</source><comment>column header</comment><translation>Adresy</translation></message>
<message numerus="yes"><source>%n address(es)</source>
<translation><numerusform></numerusform><numerusform>%n adresy</numerusform><numerusform>%n adresów</numerusform></translation>
</message></context></TS>"#]);

    let header = Request::builder()
        .context("AddressBookPage")
        .source("Address")
        .disambiguation("column header")
        .build();
    assert_eq!(translator.find_translation(&header), Some("Adresy"));
    assert_eq!(translator.translate_with(&header), "Adresy");
    assert!(!translator.contains("AddressBookPage", "Address"));

    let five = Request::builder()
        .context("AddressBookPage")
        .source("%n address(es)")
        .count(5)
        .build();
    assert_eq!(translator.find_translation(&five), Some("%n adresów"));
    assert_eq!(translator.translate_with(&five), "5 adresów");

    let one = Request::builder()
        .context("AddressBookPage")
        .source("%n address(es)")
        .count(1)
        .build();
    assert_eq!(translator.find_translation(&one), None);
    assert_eq!(translator.translate_with(&one), "1 address(es)");
}

#[test]
fn unfinished_entries_follow_load_options() {
    let document = r#"<TS language="hr_HR"><context><name>TopBar</name>
<message><source>Immature</source><translation type="unfinished">Nezrelo</translation></message>
</context></TS>"#;
    let mut translator = Translator::new();
    translator.install(parse_catalog(document).unwrap());
    assert_eq!(translator.translate("TopBar", "Immature"), "Nezrelo");

    let options = LoadOptions::builder().include_unfinished(false).build();
    let mut translator = Translator::with_options(options);
    translator.install(parse_catalog(document).unwrap());
    assert_eq!(translator.translate("TopBar", "Immature"), "Immature");
}

#[test]
fn retired_and_empty_entries_are_ignored() {
    let translator = translator_with(&[r#"<TS language="pl"><context><name>TopBar</name>
<message><source>Pending</source><translation type="vanished">Oczekujące</translation></message>
<message><source>Immature</source><translation type="obsolete">Niedojrzałe</translation></message>
<message><source>Available</source><translation></translation></message>
</context></TS>"#]);
    assert_eq!(translator.translate("TopBar", "Pending"), "Pending");
    assert_eq!(translator.translate("TopBar", "Immature"), "Immature");
    assert_eq!(translator.translate("TopBar", "Available"), "Available");
}

// =========================================================================
// Loading errors
// =========================================================================

#[test]
fn load_file_reports_missing_file() {
    let err = load_file("/nonexistent/app_hr.ts").unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/app_hr.ts"));
}

#[test]
fn load_file_reports_parse_position() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.ts");
    fs::write(&path, "<TS>\n<context>\n<name>TopBar</nam>\n</context>\n</TS>").unwrap();

    let err = load_file(&path).unwrap_err();
    let LoadError::Parse { line, .. } = &err else {
        panic!("expected parse error, got {err:?}");
    };
    assert_eq!(*line, 3);
    assert!(err.to_string().contains("broken.ts:3:"));
}
