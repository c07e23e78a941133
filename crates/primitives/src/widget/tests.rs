use super::{TargetType, Widget, WidgetClass, WidgetType};

static VIEW: WidgetClass = WidgetClass::root("View");
static TEXT_VIEW: WidgetClass = WidgetClass::extends("TextView", &VIEW);
static BUTTON: WidgetClass = WidgetClass::extends("Button", &TEXT_VIEW);
static IMAGE_VIEW: WidgetClass = WidgetClass::extends("ImageView", &VIEW);

#[derive(Default)]
struct Button {
	pressed: bool,
}

impl Widget for Button {
	fn class(&self) -> &'static WidgetClass {
		Self::CLASS
	}
}

impl WidgetType for Button {
	const CLASS: &'static WidgetClass = &BUTTON;
}

struct Image;

impl Widget for Image {
	fn class(&self) -> &'static WidgetClass {
		&IMAGE_VIEW
	}
}

#[test]
fn test_class_is_a_walks_ancestry() {
	assert!(BUTTON.is_a(&BUTTON));
	assert!(BUTTON.is_a(&TEXT_VIEW));
	assert!(BUTTON.is_a(&VIEW));
	assert!(!VIEW.is_a(&BUTTON));
	assert!(!IMAGE_VIEW.is_a(&TEXT_VIEW));
}

#[test]
fn test_ancestry_order() {
	let names: Vec<_> = BUTTON.ancestry().map(WidgetClass::name).collect();
	assert_eq!(names, ["Button", "TextView", "View"]);
	assert_eq!(VIEW.parent(), None);
}

#[test]
fn test_classes_compare_by_name() {
	static OTHER_VIEW: WidgetClass = WidgetClass::root("View");
	assert_eq!(VIEW, OTHER_VIEW);
	assert!(TEXT_VIEW.is_a(&OTHER_VIEW));
}

#[test]
fn test_dyn_widget_downcast() {
	let mut button = Button::default();
	let widget: &mut dyn Widget = &mut button;
	assert!(widget.is::<Button>());
	assert!(widget.downcast_ref::<Image>().is_none());

	widget.downcast_mut::<Button>().expect("button").pressed = true;
	assert!(button.pressed);
}

#[test]
fn test_debug_shows_parent_name() {
	let debug = format!("{:?}", BUTTON);
	assert!(debug.contains("Button"));
	assert!(debug.contains("TextView"));
	assert_eq!(Image.class().to_string(), "ImageView");
}

struct FakeButton;

impl Widget for FakeButton {
	fn class(&self) -> &'static WidgetClass {
		&BUTTON
	}
}

#[test]
fn test_class_target_accepts_subclasses() {
	let target = TargetType::class(&TEXT_VIEW);
	assert!(target.accepts(&Button::default()));
	assert!(target.accepts(&FakeButton));
	assert!(!target.accepts(&Image));
}

#[test]
fn test_pinned_target_requires_concrete_type() {
	let target = TargetType::of::<Button>();
	assert_eq!(target.widget_class(), &BUTTON);
	assert!(target.accepts(&Button::default()));
	assert!(!target.accepts(&FakeButton), "same class, different concrete type");
	assert_ne!(target, TargetType::class(&BUTTON));
}
