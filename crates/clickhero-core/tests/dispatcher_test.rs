use clickhero_core::{EventDispatcher, GamePhase, PlaySession};
use clickhero_domain_chart::{CueId, CueVisibility, EventTag, MusicEvent, Timeline};
use clickhero_domain_eval::{ResolverConfig, ThresholdTable};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn timeline(events: Vec<MusicEvent>) -> Arc<Timeline> {
    Arc::new(Timeline::new(events).expect("test schedule must be sorted"))
}

#[test]
fn advance_drains_every_crossed_event() {
    let timeline = timeline(vec![
        MusicEvent::clickable(1.0),
        MusicEvent::clickable(1.1),
        MusicEvent::clickable(1.2),
    ]);
    let mut dispatcher = EventDispatcher::new(timeline);
    let mut cues = CueVisibility::default();

    assert!(dispatcher.advance(0.9, &mut cues).is_empty());

    let fired = dispatcher.advance(1.5, &mut cues);
    assert_eq!(fired.iter().map(|f| f.index).collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(dispatcher.cursor(), 3);
    assert!(dispatcher.is_done());
}

#[test]
fn terminal_cursor_is_idempotent() {
    let mut dispatcher = EventDispatcher::new(timeline(vec![MusicEvent::clickable(0.5)]));
    let mut cues = CueVisibility::default();

    assert_eq!(dispatcher.advance(0.5, &mut cues).len(), 1);
    assert!(dispatcher.advance(0.6, &mut cues).is_empty());
    assert!(dispatcher.advance(100.0, &mut cues).is_empty());
    assert_eq!(dispatcher.cursor(), 1);
}

#[test]
fn fired_events_toggle_cues_in_order() {
    let timeline = timeline(vec![
        MusicEvent::new(1.0, [EventTag::Clickable, EventTag::CueOn(CueId::A)]),
        MusicEvent::new(1.2, [EventTag::CueOn(CueId::B)]),
        MusicEvent::new(2.0, [EventTag::CueOff(CueId::A)]),
    ]);
    let mut dispatcher = EventDispatcher::new(timeline);
    let mut cues = CueVisibility::default();

    dispatcher.advance(1.3, &mut cues);
    assert!(cues.is_shown(CueId::A));
    assert!(cues.is_shown(CueId::B));
    assert!(!cues.is_shown(CueId::C));

    dispatcher.advance(2.0, &mut cues);
    assert!(!cues.is_shown(CueId::A));
    assert!(cues.is_shown(CueId::B));
}

#[test]
fn fresh_session_replays_from_the_top() {
    let timeline = timeline(vec![
        MusicEvent::new(0.5, [EventTag::Clickable, EventTag::CueOn(CueId::C)]),
        MusicEvent::clickable(1.0),
    ]);
    let mut session = PlaySession::new(
        timeline.clone(),
        ResolverConfig::default(),
        ThresholdTable::default(),
        GamePhase::Game,
    );
    session.advance(2.0);
    session.resolve_action(1.0).unwrap();
    assert_eq!(session.cursor(), 2);
    assert_eq!(session.cumulative_score(), 1000);

    // Clock jumped back to zero: rebuild rather than rewind.
    let mut session = PlaySession::new(
        timeline,
        ResolverConfig::default(),
        ThresholdTable::default(),
        GamePhase::Game,
    );
    assert_eq!(session.cursor(), 0);
    assert_eq!(session.cumulative_score(), 0);
    assert_eq!(session.cue_visibility(), CueVisibility::default());
    assert!(session.event_states().iter().all(|s| !s.is_consumed()));

    assert_eq!(session.advance(0.5).len(), 1);
    assert!(session.cue_visibility().is_shown(CueId::C));
}
