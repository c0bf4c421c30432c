//! Integration tests for the beatgrid editing core
//!
//! Drives a whole session the way an editor front end would: load settings, enter
//! notes, draw repeats, then tick playback and check what sounds.

use beatgrid::{render_grid, EditError, Event, Link, Pitch, Session, SessionConfig, Timeline};

fn note(start: i32, duration: i32, pitch: Pitch, octave: i32) -> Event {
    Event::new(start, duration, pitch, octave).unwrap()
}

/// Tick `session` with 5 ms steps for `seconds`, returning `(link location, new pass)` per jump.
fn play_for(session: &mut Session, seconds: f64) -> Vec<(i32, i32)> {
    let steps = (seconds / 0.005).round() as usize;
    let mut jumps = Vec::new();
    for _ in 0..steps {
        let tick = session.advance(session.time() + 0.005).unwrap();
        if let Some(link) = tick.jumped {
            jumps.push((link.location(), tick.iteration));
        }
    }
    jumps
}

#[test]
fn test_span_consistency_for_many_notes() {
    let notes = vec![
        note(0, 4, Pitch::C, 4),
        note(1, 3, Pitch::Cs, 5),
        note(8, 1, Pitch::A, 3),
        note(6, 16, Pitch::Fs, 2),
        Event::with_voice(5, 3, Pitch::G, 4, 2, 100).unwrap(),
        Event::with_voice(6, 7, Pitch::B, 5, 0, 100).unwrap(),
    ];
    let timeline = Timeline::from_notes(&notes);

    assert_eq!(timeline.length(), 22);
    for n in &notes {
        for beat in 0..timeline.length() + 2 {
            let present = timeline.get_notes(beat).unwrap().contains(n);
            assert_eq!(present, n.is_active_at(beat), "{:?} at beat {}", n, beat);
        }
    }
    assert_eq!(timeline.highest().unwrap().pitch(), Pitch::B);
    assert_eq!(timeline.lowest().unwrap().pitch(), Pitch::Fs);
}

#[test]
fn test_edit_then_play_repeat() {
    let config = SessionConfig::from_yaml_str("tempo: 120\nbeats-per-measure: 3\n").unwrap();
    let mut session = Session::with_config(&config).unwrap();

    for (beat, pitch) in [(0, Pitch::C), (3, Pitch::E), (6, Pitch::G)] {
        session.add_note(&note(beat, 3, pitch, 4));
    }
    assert_eq!(session.length(), 9);

    session.add_link(Link::new(8, 0, 0).unwrap());
    session.play();

    let jumps = play_for(&mut session, 4.5);
    assert_eq!(jumps, vec![(8, 1)]);
    assert_eq!(session.iteration(), 1);

    // Second pass runs past the loop point into silence.
    let jumps = play_for(&mut session, 4.5);
    assert!(jumps.is_empty());
    let tick = session.advance(session.time()).unwrap();
    assert!(tick.beat > 8);
    assert!(tick.sounding.is_empty());
}

#[test]
fn test_first_and_second_endings() {
    // Beats 0-3 are the common part, 4-5 the first ending, 6-7 the second ending.
    let mut session = Session::new();
    session.add_link(Link::new(6, 0, 0).unwrap());
    session.add_link(Link::new(4, 6, 1).unwrap());

    let mut heard = Vec::new();
    let mut last_beat = -1;
    for _ in 0..2000 {
        let tick = session.advance(session.time() + 0.005).unwrap();
        if tick.beat != last_beat {
            heard.push(tick.beat);
            last_beat = tick.beat;
        }
        if tick.beat >= 8 {
            break;
        }
    }
    assert_eq!(heard, vec![0, 1, 2, 3, 4, 5, 0, 1, 2, 3, 6, 7, 8]);
}

#[test]
fn test_seek_past_repeats_does_not_retrigger() {
    let mut session = Session::new();
    session.add_link(Link::new(4, 0, 0).unwrap());
    session.seek(3.0).unwrap();
    assert_eq!(session.iteration(), 1);

    let jumps = play_for(&mut session, 2.0);
    assert!(jumps.is_empty());
}

#[test]
fn test_append_overlay_and_grid() {
    let mut melody = Timeline::from_notes(&[note(0, 2, Pitch::C, 4), note(2, 2, Pitch::D, 4)]);
    let bass = Timeline::from_notes(&[note(0, 4, Pitch::C, 3)]);
    let coda = Timeline::from_notes(&[note(0, 1, Pitch::C, 4)]);

    melody.overlay(&bass);
    melody.append(&coda).unwrap();

    assert_eq!(melody.length(), 5);
    assert_eq!(melody.note_count(), 4);
    assert_eq!(melody.get_notes(4).unwrap(), vec![note(4, 1, Pitch::C, 4)]);

    let grid = render_grid(&melody);
    assert_eq!(grid.lines().count(), 6);
    assert!(grid.starts_with("  C3C#3"));
}

#[test]
fn test_errors_leave_state_untouched() {
    let mut session = Session::new();
    let e = note(2, 2, Pitch::C, 4);
    session.add_note(&e);
    session.add_link(Link::new(4, 0, 0).unwrap());

    assert!(matches!(
        session.move_note(&e, -3),
        Err(EditError::InvalidArgument(_))
    ));
    assert!(matches!(
        session.remove_link(&Link::new(4, 0, 1).unwrap()),
        Err(EditError::NotFound(_))
    ));
    assert!(session.set_tempo(0).is_err());
    assert!(session.get_notes(-1).is_err());

    assert_eq!(session.get_notes(2).unwrap(), vec![e]);
    assert_eq!(session.all_links().len(), 1);
    assert_eq!(session.tempo(), 120);
}

#[test]
fn test_tick_serializes_for_drivers() {
    let mut session = Session::new();
    session.add_note(&note(0, 1, Pitch::Fs, 4));
    let tick = session.advance(0.0).unwrap();

    let yaml = serde_yaml::to_string(&tick).unwrap();
    assert!(yaml.contains("F#"));
    assert!(yaml.contains("iteration: 0"));
    assert!(!yaml.contains("jumped"));
}
