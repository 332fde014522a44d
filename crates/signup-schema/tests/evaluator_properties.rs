use proptest::prelude::*;
use signup_schema::{evaluate, messages, Candidate, Field, Schema};

fn age_error(raw: &str) -> Option<String> {
    evaluate(&Candidate::new("Ana", "ana@x.com", raw))
        .get(Field::Age)
        .map(str::to_string)
}

#[test]
fn empty_candidate_reports_three_required_style_errors() {
    let errors = evaluate(&Candidate::empty());

    assert_eq!(errors.len(), 3);
    assert_eq!(errors.get(Field::Name), Some("Must enter a name"));
    assert_eq!(errors.get(Field::Email), Some("Must enter email"));
    assert_eq!(errors.get(Field::Age), Some("Please enter an Integer"));
}

#[test]
fn decimal_age_is_a_type_error() {
    assert_eq!(age_error("12.5").as_deref(), Some("Please enter an Integer"));
    assert_eq!(age_error("abc").as_deref(), Some("Please enter an Integer"));
}

#[test]
fn scenario_b_reports_every_field() {
    let errors = evaluate(&Candidate::new("", "bad", "-5"));

    assert_eq!(errors.get(Field::Name), Some(messages::NAME_REQUIRED));
    assert_eq!(errors.get(Field::Email), Some(messages::EMAIL_INVALID));
    assert_eq!(errors.get(Field::Age), Some(messages::AGE_NOT_POSITIVE));
}

proptest! {
    #[test]
    fn prop_non_integer_text_reports_only_type_error(raw in "[a-zA-Z][a-zA-Z0-9 .]{0,8}") {
        let got = age_error(&raw);
        prop_assert_eq!(got.as_deref(), Some(messages::AGE_NOT_INTEGER));
    }

    #[test]
    fn prop_decimal_text_reports_type_error(whole in 0i64..1000, frac in 1u32..100) {
        let raw = format!("{whole}.{frac}");
        let got = age_error(&raw);
        prop_assert_eq!(got.as_deref(), Some(messages::AGE_NOT_INTEGER));
    }

    #[test]
    fn prop_non_positive_age_reports_positivity(age in -10_000i64..=0) {
        let got = age_error(&age.to_string());
        prop_assert_eq!(got.as_deref(), Some(messages::AGE_NOT_POSITIVE));
    }

    #[test]
    fn prop_age_over_max_reports_ceiling(age in 126i64..100_000) {
        let got = age_error(&age.to_string());
        prop_assert_eq!(got.as_deref(), Some("Age must be at most 125"));
    }

    #[test]
    fn prop_age_in_range_passes(age in 1i64..=125) {
        let got = age_error(&age.to_string());
        prop_assert_eq!(got, None);
    }

    #[test]
    fn prop_long_name_reports_length(name in "[a-zA-Z]{16,40}") {
        let errors = evaluate(&Candidate::new(name, "ana@x.com", "30"));
        prop_assert_eq!(errors.get(Field::Name), Some("Name must be at most 15 characters"));
    }

    #[test]
    fn prop_short_name_passes(name in "[a-zA-Z]{1,15}") {
        let errors = evaluate(&Candidate::new(name, "ana@x.com", "30"));
        prop_assert_eq!(errors.get(Field::Name), None);
    }

    #[test]
    fn prop_email_without_at_is_invalid(email in "[a-z0-9.]{1,20}") {
        let errors = evaluate(&Candidate::new("Ana", email, "30"));
        prop_assert_eq!(errors.get(Field::Email), Some(messages::EMAIL_INVALID));
    }

    #[test]
    fn prop_email_without_tld_is_invalid(local in "[a-z]{1,10}", domain in "[a-z]{1,10}") {
        let errors = evaluate(&Candidate::new("Ana", format!("{local}@{domain}"), "30"));
        prop_assert_eq!(errors.get(Field::Email), Some(messages::EMAIL_INVALID));
    }

    #[test]
    fn prop_well_formed_email_passes(
        local in "[a-z][a-z0-9._+]{0,10}",
        domain in "[a-z][a-z0-9]{0,10}",
        tld in "[a-z]{2,6}",
    ) {
        let errors = evaluate(&Candidate::new("Ana", format!("{local}@{domain}.{tld}"), "30"));
        prop_assert_eq!(errors.get(Field::Email), None);
    }

    #[test]
    fn prop_evaluate_is_idempotent(
        name in ".{0,20}",
        email in ".{0,20}",
        age in ".{0,6}",
    ) {
        let candidate = Candidate::new(name, email, age);
        let schema = Schema::signup();
        prop_assert_eq!(schema.evaluate(&candidate), schema.evaluate(&candidate));
    }

    #[test]
    fn prop_admit_agrees_with_evaluate(
        name in "[a-zA-Z ]{0,20}",
        age in "-?[0-9]{1,4}",
    ) {
        let candidate = Candidate::new(name, "ana@x.com", age);
        let schema = Schema::signup();
        prop_assert_eq!(schema.admit(&candidate).is_ok(), schema.evaluate(&candidate).is_empty());
    }
}
