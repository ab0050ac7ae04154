//! End-to-end hover sessions over a project card.

use std::time::Duration;

use folio_core::event::ReadyState;
use folio_core::geometry::{ClientRect, Point};
use folio_web::host::HostDocument;
use folio_web::tilt::{PointerOffset, TiltConfig, TiltInteractor, TiltRotation};
use proptest::prelude::*;

const MS_16: Duration = Duration::from_millis(16);

fn card() -> ClientRect {
    ClientRect::new(40.0, 120.0, 320.0, 420.0)
}

fn session() -> (HostDocument, TiltInteractor) {
    let mut doc = HostDocument::new(ReadyState::Complete);
    doc.set_bounding_rect("project-hook-fetch", card());
    let tilt = TiltInteractor::new("project-hook-fetch", TiltConfig::default());
    (doc, tilt)
}

fn settle(tilt: &mut TiltInteractor) {
    for _ in 0..300 {
        tilt.tick(MS_16);
    }
}

#[test]
fn hover_sweep_then_leave_returns_to_rest() {
    let (doc, mut tilt) = session();
    tilt.pointer_enter(&doc);

    let rect = card();
    for step in 0..=10 {
        let fraction = f64::from(step) / 10.0;
        tilt.pointer_move(Point::new(
            rect.left + rect.width * fraction,
            rect.top + rect.height * (1.0 - fraction),
        ));
        tilt.tick(MS_16);
    }
    settle(&mut tilt);
    let leaning = tilt.rotation();
    assert_eq!(leaning.rotate_x_deg, 10.0);
    assert_eq!(leaning.rotate_y_deg, 10.0);

    tilt.pointer_leave();
    settle(&mut tilt);
    assert_eq!(tilt.rotation(), TiltRotation::default());
    assert_eq!(tilt.css_transform(), "rotateX(0.000deg) rotateY(0.000deg)");
}

#[test]
fn second_session_measures_fresh_rect() {
    let (mut doc, mut tilt) = session();
    tilt.pointer_enter(&doc);
    tilt.pointer_leave();

    doc.set_bounding_rect("project-hook-fetch", ClientRect::new(0.0, 0.0, 100.0, 100.0));
    tilt.pointer_enter(&doc);
    tilt.pointer_move(Point::new(75.0, 25.0));
    assert_eq!(tilt.raw_offset(), PointerOffset { x: 0.25, y: -0.25 });
}

#[test]
fn zero_sized_card_is_treated_as_absent() {
    let mut doc = HostDocument::new(ReadyState::Complete);
    doc.set_bounding_rect("collapsed", ClientRect::new(10.0, 10.0, 0.0, 50.0));
    let mut tilt = TiltInteractor::new("collapsed", TiltConfig::default());
    tilt.pointer_enter(&doc);
    assert!(!tilt.pointer_move(Point::new(10.0, 20.0)));
    assert_eq!(tilt.target_rotation(), TiltRotation::default());
}

proptest! {
    #[test]
    fn target_rotation_stays_within_max(
        px in -200.0f64..600.0,
        py in -200.0f64..800.0,
        max in 1.0f64..45.0,
    ) {
        let (doc, _) = session();
        let mut tilt = TiltInteractor::new(
            "project-hook-fetch",
            TiltConfig { max_rotation_deg: max, ..TiltConfig::default() },
        );
        tilt.pointer_enter(&doc);
        tilt.pointer_move(Point::new(px, py));
        let target = tilt.target_rotation();
        prop_assert!(target.rotate_x_deg.abs() <= max + 1e-9);
        prop_assert!(target.rotate_y_deg.abs() <= max + 1e-9);
    }

    #[test]
    fn pointer_inside_card_maps_to_half_unit_offsets(fx in 0.0f64..1.0, fy in 0.0f64..1.0) {
        let (doc, mut tilt) = session();
        tilt.pointer_enter(&doc);
        let rect = card();
        tilt.pointer_move(Point::new(rect.left + rect.width * fx, rect.top + rect.height * fy));
        let offset = tilt.raw_offset();
        prop_assert!((-0.5..=0.5).contains(&offset.x));
        prop_assert!((-0.5..=0.5).contains(&offset.y));
        prop_assert!((offset.x - (fx - 0.5)).abs() < 1e-9);
    }
}
