use clickhero_domain_chart::{CueId, EventTag, MusicEvent, Timeline};
use clickhero_domain_eval::{AccuracyTier, InputResolver, ResolverConfig, ThresholdTable};
use pretty_assertions::assert_eq;

fn resolver(events: Vec<MusicEvent>) -> InputResolver {
    let timeline = Timeline::new(events).expect("test schedule must be sorted");
    InputResolver::new(&timeline, ResolverConfig::default(), ThresholdTable::default())
}

#[test]
fn single_event_scores_once() {
    let mut resolver = resolver(vec![MusicEvent::clickable(0.5)]);

    let result = resolver.resolve(0.52).expect("event is within reach");
    assert_eq!(result.event_index, 0);
    assert_eq!(result.tier, AccuracyTier::Great);
    assert_eq!(result.score, 500);
    assert!(result.offset_s > 0.0);
    assert_eq!(resolver.cumulative_score(), 500);
    assert_eq!(resolver.states()[0].consumed_at_s(), Some(0.52));
    assert_eq!(resolver.states()[0].result(), Some(&result));

    assert_eq!(resolver.resolve(0.53), None);
    assert_eq!(resolver.cumulative_score(), 500);
}

#[test]
fn action_ten_millis_late_is_perfect() {
    let mut resolver = resolver(vec![MusicEvent::clickable(0.5)]);

    let result = resolver.resolve(0.51).unwrap();
    assert_eq!(result.tier, AccuracyTier::Perfect);
    assert_eq!(resolver.cumulative_score(), 1000);
}

#[test]
fn nearest_following_event_wins_when_closer() {
    let mut resolver = resolver(vec![MusicEvent::clickable(1.0), MusicEvent::clickable(1.06)]);

    // 0.04 after the first event, 0.02 before the second.
    let result = resolver.resolve(1.04).unwrap();
    assert_eq!(result.event_index, 1);
    assert_eq!(result.tier, AccuracyTier::Great);
    assert!(result.offset_s < 0.0);

    assert!(!resolver.states()[0].is_consumed());
    assert!(resolver.states()[1].is_consumed());
}

#[test]
fn equal_distance_prefers_preceding_event() {
    let mut resolver = resolver(vec![MusicEvent::clickable(1.0), MusicEvent::clickable(1.5)]);

    let result = resolver.resolve(1.25).unwrap();
    assert_eq!(result.event_index, 0);
    assert!(!resolver.states()[1].is_consumed());
}

#[test]
fn preceding_pick_is_the_latest_not_the_first() {
    let mut resolver = resolver(vec![
        MusicEvent::clickable(0.6),
        MusicEvent::clickable(0.8),
        MusicEvent::clickable(3.0),
    ]);

    let result = resolver.resolve(1.0).unwrap();
    assert_eq!(result.event_index, 1);
    assert_eq!(result.tier, AccuracyTier::Ok);

    let result = resolver.resolve(1.0).unwrap();
    assert_eq!(result.event_index, 0);
    assert_eq!(result.tier, AccuracyTier::Miss);

    assert_eq!(resolver.resolve(1.0), None);
}

#[test]
fn consumed_event_is_never_matched_again() {
    let mut resolver = resolver(vec![MusicEvent::clickable(2.0)]);

    resolver.resolve(1.99).unwrap();
    for now_s in [1.99, 2.0, 2.1, 2.4] {
        assert_eq!(resolver.resolve(now_s), None);
    }
    assert_eq!(resolver.stats().whiffs, 4);
}

#[test]
fn action_out_of_window_is_a_whiff() {
    let mut resolver = resolver(vec![MusicEvent::clickable(0.5), MusicEvent::clickable(1.0)]);

    assert_eq!(resolver.resolve(10.0), None);
    assert_eq!(resolver.cumulative_score(), 0);
    assert!(resolver.states().iter().all(|state| !state.is_consumed()));
}

#[test]
fn cue_only_events_are_not_candidates() {
    let mut resolver = resolver(vec![
        MusicEvent::new(1.0, [EventTag::CueOn(CueId::A)]),
        MusicEvent::clickable(1.3),
    ]);

    let result = resolver.resolve(1.0).unwrap();
    assert_eq!(result.event_index, 1);
}

#[test]
fn far_action_inside_window_consumes_as_miss() {
    let mut resolver = resolver(vec![MusicEvent::clickable(1.0)]);

    let result = resolver.resolve(1.4).unwrap();
    assert_eq!(result.tier, AccuracyTier::Miss);
    assert_eq!(result.score, 0);
    assert!(resolver.states()[0].is_consumed());
    assert_eq!(resolver.stats().miss, 1);
}

#[test]
fn expired_events_break_combo_without_being_consumed() {
    let mut resolver = resolver(vec![
        MusicEvent::clickable(0.5),
        MusicEvent::clickable(1.0),
        MusicEvent::clickable(2.0),
    ]);

    resolver.resolve(0.5).unwrap();
    assert_eq!(resolver.stats().combo, 1);

    assert_eq!(resolver.expire_through(1.6), vec![1]);
    assert_eq!(resolver.stats().combo, 0);
    assert_eq!(resolver.stats().expired, 1);
    assert!(!resolver.states()[1].is_consumed());

    // Already swept; a second pass reports nothing new.
    assert_eq!(resolver.expire_through(1.6), Vec::<usize>::new());

    let result = resolver.resolve(1.98).unwrap();
    assert_eq!(result.event_index, 2);
    assert_eq!(resolver.stats().max_combo, 1);
    assert_eq!(resolver.stats().hits(), 2);
}

#[test]
fn expired_event_is_never_matched_afterwards() {
    let mut resolver = resolver(vec![MusicEvent::clickable(1.0)]);

    assert_eq!(resolver.expire_through(1.51), vec![0]);
    // Back inside the event's window, e.g. after a calibration change.
    assert_eq!(resolver.resolve(1.15), None);

    let stats = resolver.stats();
    assert_eq!((stats.expired, stats.hits(), stats.whiffs), (1, 0, 1));
    assert!(!resolver.states()[0].is_consumed());
}

#[test]
fn events_skipped_before_a_cue_are_neither_expired_nor_matched() {
    let mut resolver = resolver(vec![
        MusicEvent::clickable(1.0),
        MusicEvent::clickable(9.6),
        MusicEvent::clickable(10.5),
    ]);

    resolver.skip_before(9.5);
    assert_eq!(resolver.expire_through(10.0), Vec::<usize>::new());
    assert_eq!(resolver.stats().expired, 0);

    assert_eq!(resolver.resolve(9.6).unwrap().event_index, 1);
    assert_eq!(resolver.resolve(10.5).unwrap().event_index, 2);
    assert_eq!(resolver.stats().accuracy(), 1.0);
}
