use super::*;
use crate::error::EditError;

fn link(location: i32, target: i32, iteration: i32) -> Link {
    Link::new(location, target, iteration).unwrap()
}

fn table(links: &[Link]) -> LinkTable {
    let mut table = LinkTable::new();
    for l in links {
        table.add(l.clone());
    }
    table
}

/// Tick the transport forward in fixed steps, collecting (time, iteration) after every jump.
fn run(transport: &mut Transport, links: &LinkTable, steps: usize) -> Vec<(f64, i32)> {
    let mut jumps = Vec::new();
    for _ in 0..steps {
        let proposed = transport.time() + DEFAULT_TICK_SECONDS;
        if transport.advance(proposed, links).unwrap().is_some() {
            jumps.push((transport.time(), transport.iteration()));
        }
    }
    jumps
}

#[test]
fn test_link_rejects_negative_fields() {
    assert!(matches!(
        Link::new(-1, 0, 0),
        Err(EditError::InvalidArgument(_))
    ));
    assert!(Link::new(0, -1, 0).is_err());
    assert!(Link::new(0, 0, -1).is_err());

    let mut l = link(0, 20, 2);
    assert!(l.set_iteration(-2).is_err());
    assert_eq!(l.iteration(), 2);
    l.set_iteration(1000).unwrap();
    assert_eq!(l.iteration(), 1000);
}

#[test]
fn test_add_renumbers_later_links() {
    let mut links = table(&[link(10, 0, 0), link(20, 0, 1), link(30, 0, 2)]);
    links.add(link(40, 0, 1));

    let iterations: Vec<i32> = links.iter().map(Link::iteration).collect();
    assert_eq!(iterations, vec![0, 1, 2, 3]);

    let locations: Vec<i32> = links.iter().map(Link::location).collect();
    assert_eq!(locations, vec![10, 40, 20, 30]);
}

#[test]
fn test_add_at_end_does_not_renumber() {
    let mut links = table(&[link(10, 0, 0)]);
    links.add(link(20, 0, 5));
    let iterations: Vec<i32> = links.iter().map(Link::iteration).collect();
    assert_eq!(iterations, vec![0, 5]);
}

#[test]
fn test_remove_leaves_gaps() {
    let mut links = table(&[link(10, 0, 0), link(20, 0, 1), link(30, 0, 2)]);
    let removed = links.remove(&link(20, 0, 1)).unwrap();
    assert_eq!(removed.location(), 20);

    let iterations: Vec<i32> = links.iter().map(Link::iteration).collect();
    assert_eq!(iterations, vec![0, 2]);
    assert_eq!(links.links_at(20).count(), 0);
    assert_eq!(links.links_at(30).next().unwrap().iteration(), 2);
}

#[test]
fn test_remove_absent_link_is_not_found() {
    let mut links = table(&[link(10, 0, 0)]);
    assert!(matches!(
        links.remove(&link(10, 0, 1)),
        Err(EditError::NotFound(_))
    ));
    assert_eq!(links.len(), 1);
}

#[test]
fn test_links_at_returns_table_order() {
    let links = table(&[link(8, 4, 1), link(8, 0, 0), link(3, 1, 0)]);
    // Adding (8 -> 0, 0) pushed (8 -> 4) to pass 2; adding (3 -> 1, 0) pushed both again.
    let at_eight: Vec<(i32, i32)> = links
        .links_at(8)
        .map(|l| (l.target(), l.iteration()))
        .collect();
    assert_eq!(at_eight, vec![(0, 1), (4, 3)]);
    assert_eq!(links.links_at(5).count(), 0);
}

#[test]
fn test_beat_rounding_uses_half_tick() {
    let transport = Transport::default();
    assert_eq!(transport.beat_at(0.0), 0);
    assert_eq!(transport.beat_at(0.5), 1);
    assert_eq!(transport.beat_at(3.75), 7);
    assert_eq!(transport.beat_at(3.755), 8);
    assert_eq!(transport.beat_at(4.5), 9);
}

#[test]
fn test_loop_jumps_once_then_plays_through() {
    let links = table(&[link(8, 0, 0)]);
    let mut transport = Transport::default();

    // 4.5 seconds of 5 ms ticks: the loop point is reached once and fires.
    let jumps = run(&mut transport, &links, 900);
    assert_eq!(jumps, vec![(0.0, 1)]);

    // Second pass: beat 8 is passed again without jumping.
    let jumps = run(&mut transport, &links, 900);
    assert!(jumps.is_empty());
    assert_eq!(transport.iteration(), 1);
    assert!(transport.current_beat() > 8);
}

#[test]
fn test_jump_returns_target_time() {
    let links = table(&[link(8, 2, 0)]);
    let mut transport = Transport::default();
    let fired = transport.advance(4.0, &links).unwrap();
    assert_eq!(fired, Some(link(8, 2, 0)));
    assert_eq!(transport.time(), 1.0);
    assert_eq!(transport.current_beat(), 2);
}

#[test]
fn test_no_jump_moves_to_proposed_time() {
    let links = table(&[link(8, 0, 0)]);
    let mut transport = Transport::default();
    assert_eq!(transport.advance(1.25, &links).unwrap(), None);
    assert_eq!(transport.time(), 1.25);
    assert_eq!(transport.iteration(), 0);
}

#[test]
fn test_jumps_do_not_chain_within_one_tick() {
    let links = table(&[link(8, 4, 0), link(4, 0, 1)]);
    let mut transport = Transport::default();

    transport.advance(4.0, &links).unwrap();
    assert_eq!(transport.time(), 2.0);
    assert_eq!(transport.iteration(), 1);

    // The link at the target beat is resolved on the following tick.
    let fired = transport.advance(2.005, &links).unwrap();
    assert_eq!(fired, Some(link(4, 0, 1)));
    assert_eq!(transport.time(), 0.0);
    assert_eq!(transport.iteration(), 2);
}

#[test]
fn test_simultaneous_links_fire_on_their_own_pass() {
    let links = table(&[link(8, 0, 0), link(8, 4, 1)]);
    let mut transport = Transport::default();

    assert_eq!(transport.advance(4.0, &links).unwrap(), Some(link(8, 0, 0)));
    assert_eq!(transport.advance(4.0, &links).unwrap(), Some(link(8, 4, 1)));
    assert_eq!(transport.time(), 2.0);
    assert_eq!(transport.advance(4.0, &links).unwrap(), None);
    assert_eq!(transport.iteration(), 2);
}

#[test]
fn test_reset_iteration_after_seek() {
    let links = table(&[link(4, 0, 0), link(8, 0, 1)]);
    let mut transport = Transport::default();

    transport.seek(3.0, &links).unwrap();
    assert_eq!(transport.iteration(), 1);

    transport.seek(5.0, &links).unwrap();
    assert_eq!(transport.iteration(), 2);

    transport.seek(0.0, &links).unwrap();
    assert_eq!(transport.iteration(), 0);
}

#[test]
fn test_seek_onto_link_beat_ignores_tick_lead() {
    let links = table(&[link(3, 0, 0), link(4, 0, 1)]);
    // Half a 0.6 s tick would pull 2.0 s back to beat 3.
    let mut transport = Transport::new(120, 4, 0.6).unwrap();
    assert_eq!(transport.beat_at(2.0), 3);
    assert_eq!(transport.nearest_beat(2.0), 4);

    transport.seek(2.0, &links).unwrap();
    assert_eq!(transport.iteration(), 1);
}

#[test]
fn test_reset_iteration_without_links() {
    let links = LinkTable::new();
    let mut transport = Transport::default();
    transport.set_iteration(3).unwrap();
    transport.reset_iteration(&links);
    assert_eq!(transport.iteration(), 0);
}

#[test]
fn test_advance_rejects_bad_times() {
    let links = LinkTable::new();
    let mut transport = Transport::default();
    assert!(transport.advance(-0.1, &links).is_err());
    assert!(transport.advance(f64::NAN, &links).is_err());
    assert!(transport.seek(f64::INFINITY, &links).is_err());
    assert_eq!(transport.time(), 0.0);
}

#[test]
fn test_transport_settings_validate() {
    assert!(Transport::new(0, 4, 0.005).is_err());
    assert!(Transport::new(120, 0, 0.005).is_err());
    assert!(Transport::new(120, 4, 0.0).is_err());

    let mut transport = Transport::new(90, 3, 0.01).unwrap();
    assert!(transport.set_tempo(-5).is_err());
    assert_eq!(transport.tempo(), 90);
    assert_eq!(transport.measure_of(7), 2);
    assert_eq!(transport.time_of(3), 2.0);
}
