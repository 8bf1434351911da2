//! Section pages shown after a tile is opened.
//!
//! Pages are deliberately thin: a back button, the section title, and a
//! hint line. The actual configuration work happens in the external tool
//! the grid launches when the page opens.

use gtk4::prelude::*;
use gtk4::{Align, Box as GtkBox, Button, Image, Label, Orientation};

use crate::styles::class;

/// Build a page for one section.
pub fn build_section_page(
    title: &str,
    command: Option<&str>,
    on_back: impl Fn() + 'static,
) -> GtkBox {
    let page = GtkBox::new(Orientation::Vertical, 0);
    page.add_css_class(class::PAGE);

    let back_btn = Button::new();
    back_btn.set_has_frame(false);
    back_btn.add_css_class(class::BTN_RESET);
    back_btn.add_css_class(class::BACK);
    back_btn.set_halign(Align::Start);

    let back_content = GtkBox::new(Orientation::Horizontal, 6);
    back_content.append(&Image::from_icon_name("go-previous-symbolic"));
    back_content.append(&Label::new(Some("Back")));
    back_btn.set_child(Some(&back_content));

    back_btn.connect_clicked(move |_| on_back());
    page.append(&back_btn);

    let body = GtkBox::new(Orientation::Vertical, 8);
    body.set_valign(Align::Center);
    body.set_halign(Align::Center);
    body.set_vexpand(true);

    let title_label = Label::new(Some(title));
    title_label.add_css_class(class::PAGE_TITLE);
    body.append(&title_label);

    let hint = match command {
        Some(cmd) => format!("Opened in {}", display_name(cmd)),
        None => "No external tool configured for this section.".to_string(),
    };
    let hint_label = Label::new(Some(&hint));
    hint_label.add_css_class(class::PAGE_HINT);
    body.append(&hint_label);

    page.append(&body);
    page
}

/// First word of a command line, for the hint text.
fn display_name(command: &str) -> &str {
    command.split_whitespace().next().unwrap_or(command)
}
