//! Integration tests for plural form selection.

use tscat::runtime::{numerus_form_count, numerus_index, plural_category};

#[test]
fn polish_and_croatian_small_counts() {
    for language in ["pl", "hr_HR"] {
        assert_eq!(numerus_index(language, 1), 0, "{language}");
        for n in 2..=4 {
            assert_eq!(numerus_index(language, n), 1, "{language} {n}");
        }
        for n in 5..=20 {
            assert_eq!(numerus_index(language, n), 2, "{language} {n}");
        }
    }
}

#[test]
fn twenty_one_differs_between_polish_and_croatian() {
    assert_eq!(numerus_index("hr_HR", 21), 0);
    assert_eq!(numerus_index("pl", 21), 2);
    assert_eq!(numerus_index("hr_HR", 12), 2);
    assert_eq!(numerus_index("pl", 12), 2);
    assert_eq!(numerus_index("hr_HR", 102), 1);
    assert_eq!(numerus_index("pl", 102), 1);
}

#[test]
fn bcp47_and_qt_names_share_rules() {
    assert_eq!(plural_category("hr-HR", 3), plural_category("hr_HR", 3));
    assert_eq!(plural_category("hr", 11), "other");
}

#[test]
fn form_counts_per_language() {
    assert_eq!(numerus_form_count("pl"), 3);
    assert_eq!(numerus_form_count("hr_HR"), 3);
    assert_eq!(numerus_form_count("en"), 2);
    assert_eq!(numerus_form_count("ja"), 1);
    assert_eq!(numerus_form_count("ar"), 6);
}

#[test]
fn negative_counts_do_not_panic() {
    assert_eq!(numerus_index("pl", -1), 0);
}
