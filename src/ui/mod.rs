pub mod status;

use iced::{
    widget::{button, column, container, row, text, text_input, Id, Space},
    Alignment, Element, Length,
};

use crate::application::FormController;
use crate::domain::{OutputFormat, ThemePreference};
use status::StatusAreaMessage;

const URL_INPUT_ID: &str = "url-input";

pub fn url_input_id() -> Id {
    Id::new(URL_INPUT_ID)
}

#[derive(Debug, Clone)]
pub enum FormMessage {
    UrlChanged(String),
    ActionPressed(OutputFormat),
    ThemeTogglePressed,
    Status(StatusAreaMessage),
}

pub fn view(form: &FormController, theme: ThemePreference) -> Element<'_, FormMessage> {
    let theme_label = if theme.is_dark() { "Light mode" } else { "Dark mode" };

    let header = row![
        text("Media Grabber").size(32),
        Space::new().width(Length::Fill),
        button(text(theme_label).size(14))
            .style(button::secondary)
            .on_press(FormMessage::ThemeTogglePressed),
    ]
    .align_y(Alignment::Center);

    let actions = row(OutputFormat::ALL.into_iter().map(|format| action_button(form, format)))
        .spacing(10);

    let content = column![
        header,
        Space::new().height(Length::Fixed(20.0)),
        text("YouTube URL:").size(16),
        text_input("https://www.youtube.com/watch?v=...", form.url())
            .id(url_input_id())
            .on_input(FormMessage::UrlChanged)
            .padding(10),
        Space::new().height(Length::Fixed(10.0)),
        actions,
        Space::new().height(Length::Fixed(20.0)),
        form.status_area().view().map(FormMessage::Status),
    ]
    .padding(20)
    .spacing(10)
    .max_width(640.0);

    container(content).center_x(Length::Fill).into()
}

/// One control per format; the format is bound here, not looked up on press.
fn action_button(form: &FormController, format: OutputFormat) -> Element<'_, FormMessage> {
    let label = if form.processing() == Some(format) {
        "Processing..."
    } else {
        format.label()
    };

    let pressed = (!form.controls_disabled()).then_some(FormMessage::ActionPressed(format));

    button(text(label))
        .style(button::primary)
        .padding([10, 20])
        .on_press_maybe(pressed)
        .into()
}
