// Phrase properties over the whole day

use wiener_uhr::phrase::{
    OPENING, PhraseStyle, TimeOfDay, compute_viennese_time, compute_viennese_time_with,
    prefers_alternative,
};

fn every_minute() -> impl Iterator<Item = TimeOfDay> {
    (0..24).flat_map(|h| (0..60).map(move |m| TimeOfDay::new(h, m).unwrap()))
}

#[test]
fn full_hour_is_punkt() {
    for hour in 0..24 {
        let vt = compute_viennese_time(TimeOfDay::new(hour, 0).unwrap());
        assert_eq!(vt.lead_phrase(), "punkt", "hour {}", hour);
        assert_eq!(vt.second_phrase(), "");
        assert_eq!(vt.line_count(), 3);
    }
}

#[test]
fn quarters_of_two_pm_name_three() {
    for (minute, lead) in [(15, "viertel"), (30, "halb"), (45, "dreiviertel")] {
        let vt = compute_viennese_time(TimeOfDay::new(14, minute).unwrap());
        assert_eq!(vt.lead_phrase(), lead);
        assert_eq!(vt.second_phrase(), "");
        assert_eq!(vt.hour_name(), "Drei");
    }
}

#[test]
fn five_past_one() {
    let vt = compute_viennese_time(TimeOfDay::new(13, 5).unwrap());
    assert_eq!(vt.lead_phrase(), "fünf nach ");
    assert_eq!(vt.second_phrase(), "");
    assert_eq!(vt.line_count(), 3);
    assert_eq!(vt.hour_name(), "Eins");
    assert_eq!(vt.to_string(), "Es ist fünf nach Eins");
}

#[test]
fn midnight_reads_zwoelf() {
    let vt = compute_viennese_time(TimeOfDay::new(0, 0).unwrap());
    assert_eq!(vt.hour_name(), "Zwölf");
    let vt = compute_viennese_time_with(TimeOfDay::new(23, 45).unwrap(), PhraseStyle::Canonical);
    assert_eq!(vt.to_string(), "Es ist dreiviertel Zwölf");
}

#[test]
fn round_tens_pick_one_of_two() {
    for hour in 0..24 {
        for minute in [10, 20, 40, 50] {
            let time = TimeOfDay::new(hour, minute).unwrap();
            let seeded = compute_viennese_time(time);
            let canonical = compute_viennese_time_with(time, PhraseStyle::Canonical);
            let alternative = compute_viennese_time_with(time, PhraseStyle::Alternative);
            assert_ne!(canonical, alternative, "{}", time);

            let expected = if prefers_alternative(time) { alternative } else { canonical };
            assert_eq!(seeded, expected, "{}", time);
        }
    }
}

#[test]
fn seeded_choice_uses_both_wordings() {
    let round_tens: Vec<TimeOfDay> = (0..24)
        .flat_map(|h| [10, 20, 40, 50].map(|m| TimeOfDay::new(h, m).unwrap()))
        .collect();
    assert_eq!(round_tens.len(), 96);

    let alternative = round_tens.iter().filter(|&&t| prefers_alternative(t)).count();
    assert!(alternative > 0, "seeded choice never picked the ten based wording");
    assert!(alternative < 96, "seeded choice never picked the canonical wording");
}

#[test]
fn canonical_round_tens_follow_general_rule() {
    let at = |m| compute_viennese_time_with(TimeOfDay::new(9, m).unwrap(), PhraseStyle::Canonical);
    assert_eq!(at(10).to_string(), "Es ist fünf vor viertel Zehn");
    assert_eq!(at(20).to_string(), "Es ist fünf nach viertel Zehn");
    assert_eq!(at(40).to_string(), "Es ist fünf vor dreiviertel Zehn");
    assert_eq!(at(50).to_string(), "Es ist fünf nach dreiviertel Zehn");

    // same output as the neighbouring minutes of each range
    assert_eq!(at(40).second_phrase(), at(39).second_phrase());
    assert_eq!(at(50).second_phrase(), at(51).second_phrase());
}

#[test]
fn alternative_wording() {
    let at = |m| compute_viennese_time_with(TimeOfDay::new(9, m).unwrap(), PhraseStyle::Alternative);
    assert_eq!(at(10).to_string(), "Es ist zehn nach Neun");
    assert_eq!(at(20).to_string(), "Es ist zehn vor halb Zehn");
    assert_eq!(at(40).to_string(), "Es ist zehn nach halb Zehn");
    assert_eq!(at(50).to_string(), "Es ist zehn vor Zehn");

    let canonical = compute_viennese_time_with(TimeOfDay::new(9, 10).unwrap(), PhraseStyle::Canonical);
    assert_eq!(canonical.to_string(), "Es ist fünf vor viertel Zehn");
}

#[test]
fn line_shape_holds_all_day() {
    for time in every_minute() {
        let vt = compute_viennese_time(time);
        let lines = vt.display_lines();

        let expected = if vt.second_phrase().len() > 2 { 4 } else { 3 };
        assert_eq!(vt.line_count(), expected, "{}", time);
        assert_eq!(lines.len(), expected, "{}", time);
        assert_eq!(lines.first(), Some(OPENING));
        assert_eq!(lines.last(), Some(vt.hour_name()));
        assert!(!vt.lead_phrase().is_empty(), "{}", time);
    }
}

#[test]
fn same_time_same_phrase() {
    for time in every_minute() {
        assert_eq!(compute_viennese_time(time), compute_viennese_time(time));
    }
}

#[test]
fn out_of_range_rejected() {
    assert!(TimeOfDay::new(24, 0).is_err());
    assert!(TimeOfDay::new(12, 60).is_err());
}
