use std::path::PathBuf;

use iced::{
    border,
    widget::{button, column, container, text},
    Element, Length, Theme,
};
use url::Url;

use crate::domain::{StatusKind, StatusMessage};

/// What happened to a download link after it was activated.
#[derive(Debug, Clone, PartialEq)]
pub enum TransferState {
    Ready,
    Saving(f32),
    Saved(PathBuf),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DownloadLink {
    pub id: u64,
    pub url: Url,
    /// Save-as hint offered when the link is activated
    pub filename: String,
    pub transfer: TransferState,
}

impl DownloadLink {
    pub fn label(&self) -> String {
        format!("Download \"{}\"", self.filename)
    }

    pub fn is_saving(&self) -> bool {
        matches!(self.transfer, TransferState::Saving(_))
    }
}

/// Rendered children of the status region, in display order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusItem<'a> {
    Message(&'a StatusMessage),
    Link(&'a DownloadLink),
}

#[derive(Debug, Clone)]
pub enum StatusAreaMessage {
    DownloadLinkPressed,
}

/// The status region: at most one message, at most one download link.
#[derive(Debug, Default)]
pub struct StatusArea {
    message: Option<StatusMessage>,
    link: Option<DownloadLink>,
    next_link_id: u64,
}

impl StatusArea {
    /// Clears the whole region, then shows `text` styled as `kind`.
    pub fn show_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.link = None;
        self.message = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    /// Replaces any previous link. It renders right after the status
    /// message, or alone when there is none.
    pub fn add_download_link(&mut self, url: Url, filename: impl Into<String>) -> u64 {
        self.next_link_id += 1;
        self.link = Some(DownloadLink {
            id: self.next_link_id,
            url,
            filename: filename.into(),
            transfer: TransferState::Ready,
        });
        self.next_link_id
    }

    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    pub fn download_link(&self) -> Option<&DownloadLink> {
        self.link.as_ref()
    }

    /// The link with `id`, if it is still the one on display.
    pub fn download_link_mut(&mut self, id: u64) -> Option<&mut DownloadLink> {
        self.link.as_mut().filter(|link| link.id == id)
    }

    pub fn items(&self) -> Vec<StatusItem<'_>> {
        self.message
            .iter()
            .map(StatusItem::Message)
            .chain(self.link.iter().map(StatusItem::Link))
            .collect()
    }

    pub fn view(&self) -> Element<'_, StatusAreaMessage> {
        let children = self.items().into_iter().map(|item| match item {
            StatusItem::Message(message) => status_view(message),
            StatusItem::Link(link) => link_view(link),
        });

        column(children).spacing(16).width(Length::Fill).into()
    }
}

fn status_view(message: &StatusMessage) -> Element<'_, StatusAreaMessage> {
    let kind = message.kind;
    container(text(&message.text).size(15))
        .padding(16)
        .width(Length::Fill)
        .style(move |theme: &Theme| status_style(theme, kind))
        .into()
}

fn link_view(link: &DownloadLink) -> Element<'_, StatusAreaMessage> {
    let pressed = (!link.is_saving()).then_some(StatusAreaMessage::DownloadLinkPressed);

    let caption = match &link.transfer {
        TransferState::Ready => None,
        TransferState::Saving(progress) => Some(text(format!("Saving: {:.1}%", progress * 100.0))),
        TransferState::Saved(path) => Some(text(format!("Saved: {}", path.display()))),
        TransferState::Failed(e) => Some(text(format!("Save failed: {}", e)).style(text::danger)),
    };

    let mut content = column![button(text(link.label()).size(16))
        .style(button::primary)
        .padding([8, 20])
        .on_press_maybe(pressed)]
    .spacing(6);

    if let Some(caption) = caption {
        content = content.push(caption.size(13));
    }

    content.into()
}

/// Background and text colour per status kind, for both light and dark themes.
pub fn status_style(theme: &Theme, kind: StatusKind) -> container::Style {
    let palette = theme.extended_palette();
    let pair = match kind {
        StatusKind::Error => palette.danger.weak,
        StatusKind::Success => palette.success.weak,
        StatusKind::Loading => palette.primary.weak,
        StatusKind::Info => palette.background.weak,
    };

    container::Style {
        background: Some(pair.color.into()),
        text_color: Some(pair.text),
        border: border::rounded(8),
        ..container::Style::default()
    }
}
