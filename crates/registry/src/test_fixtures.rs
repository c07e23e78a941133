use trellis_primitives::{Widget, WidgetClass, WidgetType};

pub static VIEW: WidgetClass = WidgetClass::root("View");
pub static TEXT_VIEW: WidgetClass = WidgetClass::extends("TextView", &VIEW);
pub static IMAGE_VIEW: WidgetClass = WidgetClass::extends("ImageView", &VIEW);

#[derive(Debug, Default)]
pub struct TextView {
	pub text: String,
	pub size: f64,
	pub enabled: bool,
}

impl Widget for TextView {
	fn class(&self) -> &'static WidgetClass {
		Self::CLASS
	}
}

impl WidgetType for TextView {
	const CLASS: &'static WidgetClass = &TEXT_VIEW;
}

#[derive(Debug, Default)]
pub struct ImageView {
	pub source: Option<String>,
}

impl Widget for ImageView {
	fn class(&self) -> &'static WidgetClass {
		Self::CLASS
	}
}

impl WidgetType for ImageView {
	const CLASS: &'static WidgetClass = &IMAGE_VIEW;
}
