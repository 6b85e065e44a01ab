use clickhero_domain_chart::{
    export_chart_json, import_chart_bytes, triple_click_theme, ChartImportError, CueId,
    CueVisibility, EventTag, ScheduleError,
};
use pretty_assertions::assert_eq;

#[test]
fn chart_json_parses_tags() {
    let json = br#"{
        "title": "Click Track",
        "bpm": 110,
        "events": [
            { "time_s": 1.091, "tags": ["clickable", { "cue_on": "a" }] },
            { "time_s": 2.182, "tags": [{ "cue_off": "a" }] }
        ]
    }"#;

    let chart = import_chart_bytes(json).expect("chart should parse");

    assert_eq!(chart.beats_per_bar, 4);
    assert_eq!(chart.events.len(), 2);
    assert!(chart.events[0].tags.contains(EventTag::CueOn(CueId::A)));
    assert!(chart.events[0].is_clickable());
    assert!(!chart.events[1].is_clickable());
}

#[test]
fn chart_import_rejects_unsorted_events() {
    let json = br#"{
        "title": "Broken",
        "bpm": 110,
        "events": [
            { "time_s": 98.050, "tags": ["clickable"] },
            { "time_s": 97.817, "tags": ["clickable"] }
        ]
    }"#;

    let err = import_chart_bytes(json).unwrap_err();
    assert!(matches!(
        err,
        ChartImportError::Schedule(ScheduleError::OutOfOrder { index: 1, .. })
    ));
}

#[test]
fn chart_import_rejects_zero_tempo() {
    let json = br#"{ "title": "Still", "bpm": 0, "events": [] }"#;
    assert!(matches!(
        import_chart_bytes(json),
        Err(ChartImportError::InvalidTempo(_))
    ));
}

#[test]
fn exported_chart_imports_back_unchanged() {
    let chart = triple_click_theme();
    let json = export_chart_json(&chart).unwrap();
    let imported = import_chart_bytes(json.as_bytes()).unwrap();
    assert_eq!(imported, chart);
}

#[test]
fn builtin_chart_is_valid_and_cues_balance() {
    let chart = triple_click_theme();
    let timeline = chart.timeline().expect("built-in chart must be sorted");

    assert_eq!(timeline.clickable_count(), 6);

    // Both phrases reveal one cue per click, then hide all three together.
    for phrase_start in [0, 4] {
        let mut cues = CueVisibility::default();
        for (offset, cue) in CueId::ALL.into_iter().enumerate() {
            let event = timeline.event_at(phrase_start + offset).unwrap();
            assert!(event.is_clickable());
            cues.apply(event.tags);
            assert_eq!(cues.shown().last(), Some(cue));
            assert_eq!(cues.shown().count(), offset + 1);
        }

        let hide = timeline.event_at(phrase_start + 3).unwrap();
        assert!(!hide.is_clickable());
        cues.apply(hide.tags);
        assert_eq!(cues.shown().count(), 0);
    }
}

#[test]
fn bundled_click_track_loads_from_disk() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../charts/click_track_110.json");
    let chart = clickhero_domain_chart::import_chart_path(&path).unwrap();

    assert_eq!(chart.bpm, 110.0);
    let timeline = chart.timeline().unwrap();
    assert_eq!(timeline.clickable_count(), 9);
    assert!(!timeline.is_clickable(9));
}
