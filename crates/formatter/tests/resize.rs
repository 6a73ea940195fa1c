use blot_formatter::{HandlePlacement, ResizeController};
use blot_formatter_core::{BlotSpec, HostElement, ImageSpec, MemoryElement, Rect, ResizeOptions, point, size};

fn image(width: f32, height: f32) -> MemoryElement {
    MemoryElement::new("img")
        .with_bounds(Rect::from_xywh(0.0, 0.0, width, height))
        .with_natural_size(size(width, height))
}

fn controller(options: ResizeOptions) -> ResizeController {
    ResizeController::new(&options)
}

#[test]
fn corner_drag_preserves_natural_ratio() {
    // 800x600; the bottom-right corner dragged so the unconstrained delta
    // implies width 400 must land on 400x300.
    let mut el = image(800.0, 600.0);
    let mut resize = controller(ResizeOptions::default());

    resize.begin(HandlePlacement::BottomRight, point(800.0, 600.0), &ImageSpec, &el);
    let next = resize.update(point(400.0, 580.0), &ImageSpec, &mut el).unwrap();

    assert_eq!(next.width, 400.0);
    assert!((next.height - 300.0).abs() < 1e-2);
    assert_eq!(el.attr("width").as_deref(), Some("400"));
    assert_eq!(el.attr("height").as_deref(), Some("300"));
}

#[test]
fn ratio_holds_on_every_intermediate_move() {
    let mut el = image(800.0, 600.0);
    let mut resize = controller(ResizeOptions::default());
    resize.begin(HandlePlacement::BottomRight, point(800.0, 600.0), &ImageSpec, &el);

    let expected = 800.0 / 600.0;
    for pointer in [
        point(700.0, 610.0),
        point(620.0, 500.0),
        point(500.0, 430.0),
        point(450.0, 700.0),
    ] {
        let next = resize.update(pointer, &ImageSpec, &mut el).unwrap();
        assert!((next.width / next.height - expected).abs() < 1e-3);
    }
}

#[test]
fn sizes_never_fall_below_the_floor() {
    let mut el = image(800.0, 600.0);
    let mut resize = controller(ResizeOptions::default());
    resize.begin(HandlePlacement::BottomRight, point(800.0, 600.0), &ImageSpec, &el);

    let next = resize
        .update(point(-5000.0, -5000.0), &ImageSpec, &mut el)
        .unwrap();
    assert!(next.width >= 16.0);
    assert!(next.height >= 16.0);
}

#[test]
fn configured_ceiling_caps_both_axes() {
    let options = ResizeOptions {
        max_size: Some(1000.0),
        ..ResizeOptions::default()
    };
    let mut el = image(800.0, 600.0);
    let mut resize = controller(options);
    resize.begin(HandlePlacement::BottomRight, point(800.0, 600.0), &ImageSpec, &el);

    let next = resize
        .update(point(10000.0, 10000.0), &ImageSpec, &mut el)
        .unwrap();
    assert!(next.width <= 1000.0);
    assert!(next.height <= 1000.0);
}

#[test]
fn edge_handle_affects_a_single_axis_without_lock() {
    let options = ResizeOptions {
        lock_aspect_ratio: false,
        ..ResizeOptions::default()
    };
    let mut el = image(800.0, 600.0);
    let mut resize = controller(options);
    resize.begin(HandlePlacement::Right, point(800.0, 300.0), &ImageSpec, &el);

    let next = resize.update(point(900.0, 350.0), &ImageSpec, &mut el).unwrap();
    assert_eq!(next, size(900.0, 600.0));
}

#[test]
fn vertical_edge_drives_height_with_lock() {
    let mut el = image(800.0, 600.0);
    let mut resize = controller(ResizeOptions::default());
    resize.begin(HandlePlacement::Bottom, point(400.0, 600.0), &ImageSpec, &el);

    let next = resize.update(point(400.0, 300.0), &ImageSpec, &mut el).unwrap();
    assert_eq!(next.height, 300.0);
    assert!((next.width - 400.0).abs() < 1e-2);
}

#[test]
fn top_left_drag_grows_up_and_left() {
    let mut el = image(800.0, 600.0);
    let mut resize = controller(ResizeOptions::default());
    resize.begin(HandlePlacement::TopLeft, point(0.0, 0.0), &ImageSpec, &el);

    let next = resize.update(point(-100.0, -10.0), &ImageSpec, &mut el).unwrap();
    assert_eq!(next.width, 900.0);
    assert!((next.height - 675.0).abs() < 1e-2);
}

#[test]
fn cancel_restores_the_size_captured_at_drag_start() {
    let mut el = image(800.0, 600.0);
    let mut resize = controller(ResizeOptions::default());

    resize.begin(HandlePlacement::BottomRight, point(800.0, 600.0), &ImageSpec, &el);
    resize.update(point(400.0, 580.0), &ImageSpec, &mut el).unwrap();
    assert_eq!(el.bounds().size, size(400.0, 300.0));

    let restored = resize.cancel(&ImageSpec, &mut el).unwrap();
    assert_eq!(restored, size(800.0, 600.0));
    assert_eq!(el.bounds().size, size(800.0, 600.0));
    assert_eq!(el.attr("width").as_deref(), Some("800"));
    assert!(!resize.is_dragging());
}

#[test]
fn degenerate_reference_stays_finite_and_floored() {
    // A zero-size blot offers no usable ratio; the lock disables itself and
    // deltas clamp to the floor instead of producing NaN.
    let mut el = MemoryElement::new("img")
        .with_bounds(Rect::from_xywh(0.0, 0.0, 0.0, 0.0))
        .with_natural_size(size(0.0, 0.0));
    let mut resize = controller(ResizeOptions::default());

    resize.begin(HandlePlacement::BottomRight, point(0.0, 0.0), &ImageSpec, &el);
    assert_eq!(resize.session().unwrap().ratio(), None);

    let next = resize.update(point(-50.0, -50.0), &ImageSpec, &mut el).unwrap();
    assert!(next.width.is_finite() && next.height.is_finite());
    assert!(next.width >= 16.0 && next.height >= 16.0);
}

#[test]
fn end_commits_and_clears_the_session() {
    let mut el = image(800.0, 600.0);
    let mut resize = controller(ResizeOptions::default());

    resize.begin(HandlePlacement::BottomRight, point(800.0, 600.0), &ImageSpec, &el);
    resize.update(point(400.0, 580.0), &ImageSpec, &mut el).unwrap();

    let committed = resize.end(&ImageSpec, &mut el).unwrap();
    assert_eq!(committed, size(400.0, 300.0));
    assert!(!resize.is_dragging());
    assert_eq!(resize.end(&ImageSpec, &mut el), None);
}

#[test]
fn moves_without_a_session_are_ignored() {
    let mut el = image(800.0, 600.0);
    let mut resize = controller(ResizeOptions::default());
    assert_eq!(resize.update(point(100.0, 100.0), &ImageSpec, &mut el), None);
    assert_eq!(el.attr("width"), None);
}
