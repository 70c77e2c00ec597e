//! Observer notifications seen from outside the crate.

#![allow(clippy::unwrap_used)]

use std::cell::RefCell;
use std::rc::Rc;

use planar_mesh::math::{Point2, Vector2};
use planar_mesh::mesh::{Mesh, MeshEvent, MeshObserver};

fn p(x: f64, y: f64) -> Point2 {
    Point2::new(x, y)
}

type Log = Rc<RefCell<Vec<MeshEvent>>>;

fn record(mesh: &mut Mesh) -> Log {
    let log: Log = Rc::default();
    let sink = Rc::clone(&log);
    mesh.add_observer(MeshObserver::new().on_any(move |_, event| sink.borrow_mut().push(event)));
    log
}

#[test]
fn each_mutation_fires_exactly_one_event() {
    let mut mesh = Mesh::new();
    let log = record(&mut mesh);

    let a = mesh.add_vertex(p(0.0, 0.0));
    let b = mesh.add_vertex(p(1.0, 0.0));
    let c = mesh.add_vertex(p(0.0, 1.0));
    let e = mesh.add_edge(a, b).unwrap();
    let f = mesh.add_face(a, b, c).unwrap();
    mesh.move_vertex(c, Vector2::new(0.0, 1.0)).unwrap();
    mesh.remove_face(f).unwrap();
    mesh.remove_edge(e).unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            MeshEvent::VertexAdded(a),
            MeshEvent::VertexAdded(b),
            MeshEvent::VertexAdded(c),
            MeshEvent::EdgeAdded(e),
            MeshEvent::FaceAdded(f),
            MeshEvent::VertexMoved(c),
            MeshEvent::FaceRemoved(f),
            MeshEvent::EdgeRemoved(e),
        ]
    );
}

#[test]
fn failed_mutations_are_silent() {
    let mut mesh = Mesh::new();
    let mut other = Mesh::new();
    let a = mesh.add_vertex(p(0.0, 0.0));
    let foreign = other.add_vertex(p(0.0, 0.0));
    let log = record(&mut mesh);

    assert!(mesh.add_edge(a, foreign).is_err());
    assert!(mesh.remove_vertex(foreign).is_err());
    assert!(mesh.move_vertex(foreign, Vector2::new(1.0, 0.0)).is_err());
    assert!(log.borrow().is_empty());
}

#[test]
fn typed_handlers_only_see_their_kind() {
    let mut mesh = Mesh::new();
    let moved = Rc::new(RefCell::new(Vec::new()));
    let transformed = Rc::new(RefCell::new(0));
    let (moved_sink, transformed_sink) = (Rc::clone(&moved), Rc::clone(&transformed));
    mesh.add_observer(
        MeshObserver::new()
            .on_vertex_moved(move |mesh, id| {
                moved_sink.borrow_mut().push(mesh.vertex(id).unwrap().point);
            })
            .on_transform_updated(move |_| *transformed_sink.borrow_mut() += 1),
    );

    let a = mesh.add_vertex(p(0.0, 0.0));
    mesh.set_vertex_position(a, p(2.0, 3.0)).unwrap();
    mesh.transform_mut().set_scale(Vector2::new(2.0, 2.0));
    mesh.remove_vertex(a).unwrap();

    assert_eq!(*moved.borrow(), vec![p(2.0, 3.0)]);
    assert_eq!(*transformed.borrow(), 1);
}

#[test]
fn several_observers_all_notified() {
    let mut mesh = Mesh::new();
    let first = record(&mut mesh);
    let second = record(&mut mesh);
    assert_eq!(mesh.observer_count(), 2);

    mesh.add_vertex(p(0.0, 0.0));
    assert_eq!(first.borrow().len(), 1);
    assert_eq!(second.borrow().len(), 1);
}

#[test]
fn deregistered_observer_hears_nothing_more() {
    let mut mesh = Mesh::new();
    let log: Log = Rc::default();
    let sink = Rc::clone(&log);
    let id = mesh.add_observer(MeshObserver::new().on_any(move |_, e| sink.borrow_mut().push(e)));

    mesh.add_vertex(p(0.0, 0.0));
    let observer = mesh.remove_observer(id).unwrap();
    mesh.add_vertex(p(1.0, 0.0));
    drop(mesh);

    assert_eq!(log.borrow().len(), 1);
    // The handed-back observer can be attached elsewhere.
    let mut other = Mesh::new();
    other.add_observer(observer);
    other.add_vertex(p(0.0, 0.0));
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn remove_vertex_reports_cascade_in_order() {
    let mut mesh = Mesh::rectangle(Vector2::new(1.0, 1.0));
    let corner = mesh.vertex_at(0).unwrap();
    let log = record(&mut mesh);

    mesh.remove_vertex(corner).unwrap();

    let events = log.borrow();
    // Corner 0 is shared by both faces and by the bottom and left edges.
    assert_eq!(events.len(), 2 + 2 + 1);
    assert!(events[..2].iter().all(|e| matches!(e, MeshEvent::FaceRemoved(_))));
    assert!(events[2..4].iter().all(|e| matches!(e, MeshEvent::EdgeRemoved(_))));
    assert_eq!(events[4], MeshEvent::VertexRemoved(corner));
    assert_eq!((mesh.vertex_count(), mesh.edge_count(), mesh.face_count()), (3, 2, 0));
}

#[test]
fn transform_edits_in_one_scope_announce_once() {
    let mut mesh = Mesh::square(1.0);
    let log = record(&mut mesh);
    {
        let mut t = mesh.transform_mut();
        t.move_x(3.0);
        t.move_y(-1.0);
        t.rotate(0.25);
        t.set_origin(p(0.5, 0.5));
    }
    assert_eq!(*log.borrow(), vec![MeshEvent::TransformUpdated]);
}

#[test]
fn replacing_and_dropping_announce_erasing() {
    let mut mesh = Mesh::square(1.0);
    let log = record(&mut mesh);

    mesh.replace_with(&Mesh::circle(5.0));
    let erasing = |log: &Log| log.borrow().iter().filter(|e| **e == MeshEvent::Erasing).count();
    assert_eq!(erasing(&log), 1);
    assert_eq!(mesh.face_count(), 5);

    drop(mesh);
    assert_eq!(erasing(&log), 2);
    assert_eq!(log.borrow().last(), Some(&MeshEvent::Erasing));
}
