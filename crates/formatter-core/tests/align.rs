use blot_formatter_core::{
    ActionBehavior, AlignOptions, Aligner, Alignment, HostElement, MemoryElement,
};

fn aligner() -> Aligner {
    Aligner::new(&AlignOptions::default())
}

#[test]
fn apply_sets_attribute_and_styles() {
    let mut el = MemoryElement::new("img");
    aligner().apply(&mut el, Alignment::Left);

    assert_eq!(el.attr("data-align").as_deref(), Some("left"));
    assert_eq!(el.style("display").as_deref(), Some("inline"));
    assert_eq!(el.style("float").as_deref(), Some("left"));
    assert_eq!(el.style("margin").as_deref(), Some("0 1em 1em 0"));
}

#[test]
fn center_after_left_clears_float() {
    let mut el = MemoryElement::new("img");
    let aligner = aligner();

    aligner.apply(&mut el, Alignment::Left);
    aligner.apply(&mut el, Alignment::Center);

    assert_eq!(el.attr("data-align").as_deref(), Some("center"));
    assert_eq!(el.style("display").as_deref(), Some("block"));
    assert_eq!(el.style("float"), None);
    assert_eq!(el.style("margin").as_deref(), Some("auto"));
}

#[test]
fn alignments_are_mutually_exclusive() {
    let aligner = aligner();
    for applied in Alignment::all() {
        let mut el = MemoryElement::new("img");
        aligner.apply(&mut el, applied);
        for other in Alignment::all() {
            assert_eq!(aligner.is_aligned(&el, other), applied == other);
        }
        assert_eq!(aligner.alignment_of(&el), Some(applied));
    }
}

#[test]
fn alignment_is_read_from_attribute_not_style() {
    let mut el = MemoryElement::new("img");
    el.set_style("float", Some("right"));

    let aligner = aligner();
    assert!(!aligner.is_aligned(&el, Alignment::Right));
    assert_eq!(aligner.alignment_of(&el), None);
}

#[test]
fn clear_removes_attribute_and_styles() {
    let mut el = MemoryElement::new("img");
    let aligner = aligner();

    aligner.apply(&mut el, Alignment::Right);
    aligner.clear(&mut el);

    assert_eq!(el.attr("data-align"), None);
    assert_eq!(el.style("display"), None);
    assert_eq!(el.style("float"), None);
    assert_eq!(el.style("margin"), None);
}

#[test]
fn style_writes_can_be_disabled() {
    let options = AlignOptions {
        apply_style: false,
        ..AlignOptions::default()
    };
    let mut el = MemoryElement::new("img");
    Aligner::new(&options).apply(&mut el, Alignment::Center);

    assert_eq!(el.attr("data-align").as_deref(), Some("center"));
    assert_eq!(el.style("display"), None);
    assert_eq!(el.style("margin"), None);
}

#[test]
fn custom_attribute_name_is_honored() {
    let options = AlignOptions {
        attribute: "data-blot-align".to_string(),
        ..AlignOptions::default()
    };
    let mut el = MemoryElement::new("img");
    Aligner::new(&options).apply(&mut el, Alignment::Left);

    assert_eq!(el.attr("data-blot-align").as_deref(), Some("left"));
    assert_eq!(el.attr("data-align"), None);
}

#[test]
fn reselecting_active_alignment_deselects_when_allowed() {
    let aligner = aligner();
    let mut el = MemoryElement::new("img");

    let actions = aligner.actions();
    let center = actions
        .iter()
        .find(|action| action.id == "align.center")
        .unwrap();
    let ActionBehavior::Mutate(apply) = &center.behavior else {
        panic!("expected a mutating action");
    };

    apply(&mut el).unwrap();
    assert!(aligner.is_aligned(&el, Alignment::Center));

    apply(&mut el).unwrap();
    assert_eq!(el.attr("data-align"), None);
}

#[test]
fn reselecting_is_a_noop_when_deselect_is_disallowed() {
    let mut options = AlignOptions::default();
    options.toolbar.allow_deselect = false;
    let aligner = Aligner::new(&options);
    let mut el = MemoryElement::new("img");

    let actions = aligner.actions();
    let right = actions
        .iter()
        .find(|action| action.id == "align.right")
        .unwrap();
    let ActionBehavior::Mutate(apply) = &right.behavior else {
        panic!("expected a mutating action");
    };

    apply(&mut el).unwrap();
    apply(&mut el).unwrap();
    assert_eq!(el.attr("data-align").as_deref(), Some("right"));
}
