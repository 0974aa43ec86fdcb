use proptest::prelude::*;
use sheetloc::formats::escape_text;
use sheetloc::transform::{is_array_literal, is_plural_block};
use sheetloc::types::{QuantityKeyword, RawDocument, RawTable, TargetValue};
use sheetloc::{Localizer, LocalizationConfig, SheetParser, ValueTransformer};
use std::str::FromStr;
use tempfile::TempDir;

fn identifier_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,15}").expect("valid identifier regex")
}

fn plain_text_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 _\\-\\.,!\\?'\n%&<>\"]{1,30}").expect("valid text regex")
}

fn keyword_strategy() -> impl Strategy<Value = QuantityKeyword> {
    prop::sample::select(QuantityKeyword::ALL.to_vec())
}

fn cell_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of(proptest::string::string_regex("[a-z ]{0,6}").expect("valid cell regex"))
}

fn languages() -> Vec<String> {
    vec!["en".to_string(), "de".to_string()]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn escaping_removes_line_breaks_and_bare_apostrophes(text in plain_text_strategy()) {
        let escaped = escape_text(&text, true);
        prop_assert!(!escaped.contains('\n'));
        let apostrophes = text.matches('\'').count();
        let breaks = text.matches('\n').count();
        prop_assert_eq!(escaped.chars().count(), text.chars().count() + apostrophes + breaks);
        let chars: Vec<char> = escaped.chars().collect();
        for (i, c) in chars.iter().enumerate() {
            if *c == '\'' {
                prop_assert!(i > 0 && chars[i - 1] == '\\');
            }
        }
    }

    #[test]
    fn escaping_without_apostrophes_only_touches_line_breaks(text in plain_text_strategy()) {
        let escaped = escape_text(&text, false);
        prop_assert_eq!(escaped, text.replace('\n', "\\n"));
    }

    #[test]
    fn text_without_markers_stays_plain(id in identifier_strategy(), text in plain_text_strategy()) {
        prop_assume!(!text.contains('|') && !text.starts_with("[\""));
        let value = ValueTransformer::new().classify(&id, Some(text.as_str()), None).unwrap();
        prop_assert_eq!(value, TargetValue::Plain { identifier: id, text, comment: None });
    }

    #[test]
    fn plural_blocks_keep_line_order(
        id in identifier_strategy(),
        lines in prop::collection::vec((keyword_strategy(), "[A-Za-z %d]{1,12}"), 1..6),
    ) {
        let block = lines
            .iter()
            .map(|(keyword, text)| format!("{}|{}", keyword, text))
            .collect::<Vec<_>>()
            .join("\n");
        prop_assert!(is_plural_block(&block));
        prop_assert!(!is_array_literal(&block));

        let value = ValueTransformer::new().classify(&id, Some(block.as_str()), None).unwrap();
        match value {
            TargetValue::Plural { entries, .. } => prop_assert_eq!(entries, lines),
            other => prop_assert!(false, "expected plural, got {:?}", other),
        }
    }

    #[test]
    fn quantity_keywords_are_closed(word in "[a-z]{1,8}") {
        let parsed = QuantityKeyword::from_str(&word);
        let known = ["zero", "one", "two", "few", "many", "other"].contains(&word.as_str());
        prop_assert_eq!(parsed.is_ok(), known);
    }

    #[test]
    fn parsed_entries_always_have_an_identifier(
        rows in prop::collection::vec(prop::collection::vec(cell_strategy(), 0..5), 0..12),
    ) {
        let mut table_rows = vec![vec![
            Some("Identifier iOS".to_string()),
            Some("Identifier Android".to_string()),
            Some("en".to_string()),
            Some("de".to_string()),
        ]];
        table_rows.extend(rows.iter().cloned());
        let document = RawDocument::new(vec![RawTable::new("Main", table_rows)]);

        let sheet = SheetParser::new().parse(&document, None, &languages()).unwrap();
        let entries: Vec<_> = sheet.entries().collect();
        prop_assert!(entries.len() <= rows.len());
        for entry in entries {
            prop_assert!(entry.has_identifier());
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn generated_files_pass_the_drift_check(
        values in prop::collection::btree_map(
            identifier_strategy(),
            (prop::option::of(plain_text_strategy()), prop::option::of(plain_text_strategy())),
            1..8,
        ),
    ) {
        let mut rows = vec![vec![
            Some("Identifier Android".to_string()),
            Some("en".to_string()),
            Some("de".to_string()),
        ]];
        for (id, (en, de)) in &values {
            rows.push(vec![Some(id.clone()), en.clone(), de.clone()]);
        }
        let document = RawDocument::new(vec![RawTable::new("Main", rows)]);

        let dir = TempDir::new().unwrap();
        let config = LocalizationConfig::new(dir.path().join("sheet.json"), languages())
            .with_localization_path(dir.path().join("res"));
        let localizer = Localizer::new();

        let paths = localizer.localize_document(&document, &config).unwrap();
        prop_assert_eq!(paths.len(), 2);
        prop_assert!(localizer.check_document(&document, &config).is_ok());
    }
}
