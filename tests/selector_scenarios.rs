use std::cell::RefCell;
use std::rc::Rc;

use radio_selector::field::{FilePayload, Rgb};
use radio_selector::{
    DefaultProcessor, ParamsHandle, RadioSelector, SelectorEvent, SelectorOptions, StoredOption,
};
use serde_json::{Value, json};

type Events = Rc<RefCell<Vec<SelectorEvent>>>;

fn background_schema() -> Value {
    json!({
        "name": "background",
        "label": "Background",
        "fields": [
            {"name": "image", "type": "image", "label": "Image"},
            {"name": "color", "widget": "colorSelector", "label": "Color"}
        ]
    })
}

fn mount(params: Value) -> (RadioSelector, Events) {
    mount_with(params, SelectorOptions::default())
}

fn mount_with(params: Value, options: SelectorOptions) -> (RadioSelector, Events) {
    let mut selector = RadioSelector::from_documents(&background_schema(), params, |_, _| {})
        .expect("schema parses")
        .with_options(options);
    selector.mount(&DefaultProcessor);
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    selector.subscribe(move |event| sink.borrow_mut().push(event));
    (selector, events)
}

fn upload(selector: &mut RadioSelector, index: usize, path: &str) {
    selector.edit_child(index, |child| {
        child
            .as_image_mut()
            .expect("image child")
            .upload(FilePayload::new(path))
    });
}

fn pick(selector: &mut RadioSelector, index: usize, color: Option<Rgb>) {
    selector.edit_child(index, |child| child.as_color_mut().expect("color child").pick(color));
}

#[test]
fn selected_index_is_in_range_after_construction() {
    for params in [json!({}), json!({"color": "ff0000"}), json!({"unknown": 1}), json!([1])] {
        let (selector, _) = mount(params);
        assert!(selector.get_selected_index() < selector.children().len());
    }
}

#[test]
fn last_populated_field_wins_initial_selection() {
    let (selector, events) = mount(json!({
        "image": {"path": "/img.png"},
        "color": "00ff00"
    }));
    assert_eq!(selector.get_selected_index(), 1);
    assert_eq!(
        selector.get_stored_option(),
        Some(&StoredOption::color("#00ff00"))
    );
    assert_eq!(
        selector.store().get(0),
        Some(&StoredOption::image("/img.png"))
    );
    assert!(events.borrow().is_empty());
}

#[test]
fn selecting_same_index_twice_fires_one_pair() {
    let (mut selector, events) = mount(json!({"image": {"path": "/img.png"}}));
    pick(&mut selector, 1, Some(Rgb::new(0, 0, 0xff)));
    assert!(events.borrow().is_empty());

    assert!(selector.set_selected_index(1));
    assert!(!selector.set_selected_index(1));
    assert_eq!(
        *events.borrow(),
        vec![SelectorEvent::OptionRemoved, SelectorEvent::OptionAdded]
    );
}

#[test]
fn stored_option_is_none_until_active_field_reports() {
    let (selector, _) = mount(json!({}));
    assert_eq!(selector.get_selected_index(), 0);
    assert!(selector.get_stored_option().is_none());
}

#[test]
fn image_then_switch_to_empty_color() {
    let (mut selector, events) = mount(json!({}));
    assert_eq!(selector.get_selected_index(), 0);

    upload(&mut selector, 0, "/img.png");
    assert_eq!(
        selector.get_stored_option(),
        Some(&StoredOption::image("/img.png"))
    );
    assert_eq!(*events.borrow(), vec![SelectorEvent::OptionAdded]);

    events.borrow_mut().clear();
    assert!(selector.set_selected_index(1));
    assert_eq!(*events.borrow(), vec![SelectorEvent::OptionRemoved]);
    assert!(selector.get_stored_option().is_none());
    assert_eq!(selector.choices().visible(), 1);
}

#[test]
fn color_picker_null_clears_stored_option() {
    let (mut selector, events) = mount(json!({}));
    selector.set_selected_index(1);
    events.borrow_mut().clear();

    pick(&mut selector, 1, Some(Rgb::new(0xff, 0, 0)));
    assert_eq!(
        selector.get_stored_option(),
        Some(&StoredOption::color("#ff0000"))
    );
    pick(&mut selector, 1, None);
    assert!(selector.get_stored_option().is_none());
    assert_eq!(
        *events.borrow(),
        vec![SelectorEvent::OptionAdded, SelectorEvent::OptionRemoved]
    );
}

#[test]
fn inactive_field_changes_are_stored_silently() {
    let (mut selector, events) = mount(json!({}));
    pick(&mut selector, 1, Some(Rgb::new(1, 2, 3)));
    assert!(events.borrow().is_empty());
    assert_eq!(selector.get_selected_index(), 0);

    selector.set_selected_index(1);
    assert_eq!(*events.borrow(), vec![SelectorEvent::OptionAdded]);
    assert_eq!(
        selector.get_stored_option(),
        Some(&StoredOption::color("#010203"))
    );
}

#[test]
fn validate_prunes_unchecked_choice() {
    let (mut selector, _) = mount(json!({"image": {"path": "/img.png"}}));
    selector.set_selected_index(1);
    pick(&mut selector, 1, Some(Rgb::new(0xff, 0, 0)));

    assert!(selector.validate());
    let params = selector.params();
    assert!(!params.contains_key("image"));
    assert_eq!(params.get("color"), Some(json!("ff0000")));
}

#[test]
fn relative_image_paths_resolve_against_content_base() {
    let options = SelectorOptions::default().with_content_base("https://cdn.example/content");
    let (mut selector, _) = mount_with(json!({"image": {"path": "bg one.png"}}), options);
    assert_eq!(
        selector.get_stored_option(),
        Some(&StoredOption::image("https://cdn.example/content/bg%20one.png"))
    );
    upload(&mut selector, 0, "https://elsewhere.example/a.png");
    assert_eq!(
        selector.get_stored_option(),
        Some(&StoredOption::image("https://elsewhere.example/a.png"))
    );
}

#[test]
fn params_handle_is_shared_with_the_host() {
    let params = ParamsHandle::from_value(json!({}));
    let host_view = params.clone();
    let schema = radio_selector::parse_selector_schema(&background_schema()).unwrap();
    let mut selector = RadioSelector::new(schema, params, |_, _| {});
    selector.mount(&DefaultProcessor);
    upload(&mut selector, 0, "/img.png");
    assert_eq!(host_view.get("image"), Some(json!({"path": "/img.png"})));
}

#[test]
fn unsubscribed_listeners_stop_receiving_events() {
    let (mut selector, events) = mount(json!({}));
    let extra = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&extra);
    let id = selector.subscribe(move |_| *counter.borrow_mut() += 1);
    upload(&mut selector, 0, "/a.png");
    assert!(selector.unsubscribe(id));
    upload(&mut selector, 0, "/b.png");
    assert_eq!(*extra.borrow(), 1);
    assert_eq!(events.borrow().len(), 3);
}

#[test]
fn stored_options_serialize_with_host_wire_names() {
    let (selector, _) = mount(json!({"color": "abcdef"}));
    let wire = serde_json::to_value(selector.get_stored_option()).unwrap();
    assert_eq!(wire, json!({"type": "bgColor", "value": "#abcdef"}));
}

#[test]
fn unparseable_saved_color_is_not_an_active_option() {
    let (mut selector, events) = mount(json!({"color": "not-a-color"}));
    assert_eq!(selector.get_selected_index(), 1);
    assert!(selector.get_stored_option().is_none());

    assert!(selector.validate());
    assert_eq!(selector.params().get("color"), Some(json!("")));
    assert!(selector.get_stored_option().is_none());
    assert!(events.borrow().is_empty());
}

#[test]
fn saved_color_is_seeded_in_canonical_form() {
    let (mut selector, _) = mount(json!({"color": "FFF"}));
    assert_eq!(
        selector.get_stored_option(),
        Some(&StoredOption::color("#ffffff"))
    );
    selector.validate();
    assert_eq!(selector.params().get("color"), Some(json!("ffffff")));
}
