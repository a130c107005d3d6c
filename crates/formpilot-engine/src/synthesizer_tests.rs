use chrono::TimeZone;
use regex::Regex;

use super::*;
use crate::model::ContextualSignal;
use crate::testing::{checkbox, select, text_input};

fn synthesizer() -> ValueSynthesizer {
    ValueSynthesizer::with_seed(VocabularyConfig::default(), 42)
}

fn fixed_now() -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 3, 9, 14, 5, 7).unwrap()
}

#[test]
fn test_select_gets_second_option() {
    let mut s = synthesizer();
    assert_eq!(
        s.synthesize(&select(1, 3)),
        Some(SynthesizedValue::AlternateOption { index: 1 })
    );
    assert_eq!(
        s.synthesize(&select(1, 2)),
        Some(SynthesizedValue::AlternateOption { index: 1 })
    );
}

#[test]
fn test_single_option_select_is_left_alone() {
    let mut s = synthesizer();
    assert_eq!(s.synthesize(&select(1, 1)), None);
    assert_eq!(s.synthesize(&select(1, 0)), None);
}

#[test]
fn test_toggle_checked_only_when_unchecked() {
    let mut s = synthesizer();
    assert_eq!(s.synthesize(&checkbox(1)), Some(SynthesizedValue::CheckedBoolean));

    let mut checked = checkbox(2);
    checked.checked = true;
    assert_eq!(s.synthesize(&checked), None);

    let mut radio = checkbox(3);
    radio.input_type = "radio".to_string();
    assert_eq!(s.synthesize(&radio), Some(SynthesizedValue::CheckedBoolean));
}

#[test]
fn test_extension_is_four_digits() {
    let pattern = Regex::new(r"^\d{4}$").unwrap();
    let mut s = synthesizer();
    for _ in 0..200 {
        let value = s.synthesize(&text_input(1, "分機")).unwrap();
        let SynthesizedValue::NumericExtension { value } = value else {
            panic!("expected extension, got {value:?}");
        };
        assert!(pattern.is_match(&value), "{value}");
        let n: u32 = value.parse().unwrap();
        assert!((1000..=9999).contains(&n));
    }
}

#[test]
fn test_extension_keyword_found_in_row_text() {
    let mut control = text_input(1, "");
    control.signal = ContextualSignal {
        row_text: "聯絡電話 分機".to_string(),
        ..Default::default()
    };
    let mut s = synthesizer();
    assert!(matches!(s.synthesize(&control), Some(SynthesizedValue::NumericExtension { .. })));
}

#[test]
fn test_extension_takes_precedence_over_subject() {
    let mut s = synthesizer();
    let value = s.synthesize(&text_input(1, "主旨 分機")).unwrap();
    assert!(matches!(value, SynthesizedValue::NumericExtension { .. }));
}

#[test]
fn test_subject_line_format() {
    let mut s = synthesizer();
    for keyword in ["主旨", "呈核主旨"] {
        let value = s.synthesize_at(&text_input(1, keyword), fixed_now()).unwrap();
        assert_eq!(
            value,
            SynthesizedValue::SubjectLine {
                value: "[測試執行時間: 2026/03/09 14:05:07] 系統自動填寫主旨".to_string()
            }
        );
    }
}

#[test]
fn test_generic_text_format() {
    let pattern = Regex::new(r"^Auto_\d{2}:\d{2}:\d{2}_\d{1,2}$").unwrap();
    let mut s = synthesizer();
    for _ in 0..100 {
        let value = s.synthesize_at(&text_input(1, "備註"), fixed_now()).unwrap();
        let SynthesizedValue::GenericText { value } = value else {
            panic!("expected generic text");
        };
        assert!(pattern.is_match(&value), "{value}");
        assert!(value.starts_with("Auto_14:05:07_"));
    }
}

#[test]
fn test_textarea_treated_as_text() {
    let mut control = text_input(1, "說明");
    control.tag = "textarea".to_string();
    control.input_type.clear();
    let mut s = synthesizer();
    assert!(matches!(s.synthesize(&control), Some(SynthesizedValue::GenericText { .. })));
}

#[test]
fn test_seeded_synthesizers_agree() {
    let mut a = synthesizer();
    let mut b = synthesizer();
    let control = text_input(1, "分機");
    for _ in 0..10 {
        assert_eq!(a.synthesize(&control), b.synthesize(&control));
    }
}

#[test]
fn test_custom_vocabulary() {
    let vocabulary = VocabularyConfig {
        extension_keywords: vec!["ext".to_string()],
        generic_prefix: "Filled".to_string(),
        ..Default::default()
    };
    let mut s = ValueSynthesizer::with_seed(vocabulary, 7);
    assert!(matches!(s.synthesize(&text_input(1, "phone ext")), Some(SynthesizedValue::NumericExtension { .. })));
    let value = s.synthesize(&text_input(2, "分機")).unwrap();
    assert!(value.text().unwrap().starts_with("Filled_"));
}
