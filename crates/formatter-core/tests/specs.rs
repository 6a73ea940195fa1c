use blot_formatter_core::{
    ActionKind, BlotSpec, HostElement, IframeVideoSpec, ImageSpec, MemoryElement, Rect, Size,
    SpecRegistry, size,
};

struct AnyImage;

impl BlotSpec for AnyImage {
    fn id(&self) -> &'static str {
        "any-image"
    }

    fn matches(&self, el: &dyn HostElement) -> bool {
        el.tag() == "img"
    }

    fn set_size(&self, _el: &mut dyn HostElement, _size: Size) {}
}

#[test]
fn first_matching_spec_wins_in_registration_order() {
    let registry = SpecRegistry::new(vec![Box::new(AnyImage), Box::new(ImageSpec)]).unwrap();
    let el = MemoryElement::new("img");

    let ix = registry.resolve(&el).unwrap();
    assert_eq!(registry.get(ix).unwrap().id(), "any-image");
}

#[test]
fn unmatched_node_resolves_to_none() {
    let registry = SpecRegistry::default_specs();
    let el = MemoryElement::new("p");
    assert_eq!(registry.resolve(&el), None);
}

#[test]
fn default_specs_claim_images_and_iframes() {
    let registry = SpecRegistry::default_specs();

    let img = MemoryElement::new("img");
    let ix = registry.resolve(&img).unwrap();
    assert_eq!(registry.get(ix).unwrap().id(), "image");

    let iframe = MemoryElement::new("iframe");
    let ix = registry.resolve(&iframe).unwrap();
    assert_eq!(registry.get(ix).unwrap().id(), "iframe-video");
}

#[test]
fn duplicate_spec_ids_are_rejected() {
    let err = SpecRegistry::new(vec![Box::new(ImageSpec), Box::new(ImageSpec)]).unwrap_err();
    assert!(err.message().contains("duplicate"));
}

#[test]
fn empty_registry_is_rejected() {
    assert!(SpecRegistry::new(Vec::new()).is_err());
}

#[test]
fn image_set_size_writes_attributes_idempotently() {
    let mut el = MemoryElement::new("img").with_bounds(Rect::from_xywh(0.0, 0.0, 800.0, 600.0));

    ImageSpec.set_size(&mut el, size(300.4, 200.6));
    assert_eq!(el.attr("width").as_deref(), Some("300"));
    assert_eq!(el.attr("height").as_deref(), Some("201"));

    ImageSpec.set_size(&mut el, size(300.4, 200.6));
    assert_eq!(el.attr("width").as_deref(), Some("300"));
    assert_eq!(el.attr("height").as_deref(), Some("201"));
    assert_eq!(el.bounds().size, size(300.0, 201.0));
}

#[test]
fn iframe_set_size_writes_inline_style() {
    let mut el = MemoryElement::new("iframe").with_bounds(Rect::from_xywh(0.0, 0.0, 560.0, 315.0));

    IframeVideoSpec.set_size(&mut el, size(640.0, 360.0));
    assert_eq!(el.style("width").as_deref(), Some("640px"));
    assert_eq!(el.style("height").as_deref(), Some("360px"));
    assert_eq!(el.bounds().size, size(640.0, 360.0));
}

#[test]
fn sizes_report_displayed_and_missing_natural() {
    let el = MemoryElement::new("iframe").with_bounds(Rect::from_xywh(10.0, 10.0, 560.0, 315.0));
    let sizes = IframeVideoSpec.sizes(&el);

    assert_eq!(sizes.displayed, size(560.0, 315.0));
    assert_eq!(sizes.natural, None);
}

#[test]
fn iframe_actions_exclude_the_link_toggle() {
    assert!(!IframeVideoSpec.actions().contains(&ActionKind::SetLink));
    assert!(ImageSpec.actions().contains(&ActionKind::SetLink));
}
