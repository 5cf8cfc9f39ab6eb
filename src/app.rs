use std::path::PathBuf;

use futures::StreamExt;
use iced::{system, task, theme::Mode, widget::operation, Task, Theme};

use crate::api::ProcessClient;
use crate::application::{DownloadCoordinator, FormController, SaveEvent, Submission};
use crate::config::AppConfig;
use crate::domain::{AppError, OutputFormat, ProcessedFile};
use crate::theme::{JsonFileStore, MemoryStore, PreferenceStore, ThemeManager};
use crate::ui::{self, status::StatusAreaMessage, status::TransferState, FormMessage};

pub struct MediaGrabber {
    form: FormController,
    themes: ThemeManager,
    coordinator: DownloadCoordinator,
    // Never aborted today; kept so a timeout can cancel the request later.
    in_flight: Option<task::Handle>,
}

/// Builds the app and, when no theme is saved or forced, asks the desktop
/// for its colour scheme.
pub fn boot() -> (MediaGrabber, Task<Message>) {
    let app = MediaGrabber::new(AppConfig::from_env());
    let task = if app.themes.awaiting_system() {
        system::theme().map(Message::SystemThemeDetected)
    } else {
        Task::none()
    };
    (app, task)
}

impl MediaGrabber {
    pub fn new(config: AppConfig) -> Self {
        tracing::info!(backend = %config.api.base_url, "Starting Media Grabber");

        let store: Box<dyn PreferenceStore> = match &config.preferences_path {
            Some(path) => Box::new(JsonFileStore::open(path)),
            None => {
                tracing::warn!("No config directory found; theme preference will not persist");
                Box::new(MemoryStore::default())
            }
        };
        let themes = ThemeManager::load(store, config.forced_color_scheme);
        let coordinator = DownloadCoordinator::new(ProcessClient::new(config.api));

        Self::from_parts(FormController::new(), themes, coordinator)
    }

    pub fn from_parts(
        form: FormController,
        themes: ThemeManager,
        coordinator: DownloadCoordinator,
    ) -> Self {
        Self {
            form,
            themes,
            coordinator,
            in_flight: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Form(FormMessage),
    SystemThemeDetected(Mode),
    ProcessFinished(OutputFormat, Result<ProcessedFile, AppError>),
    /// (Link id, selected path)
    SavePathSelected(u64, Option<PathBuf>),
    /// (Link id, event)
    Save(u64, SaveEvent),
}

pub fn update(app: &mut MediaGrabber, message: Message) -> Task<Message> {
    match message {
        Message::Form(FormMessage::UrlChanged(url)) => {
            app.form.set_url(url);
        }
        Message::Form(FormMessage::ActionPressed(format)) => match app.form.submit(format) {
            Submission::Started(request) => {
                let coordinator = app.coordinator.clone();
                let (task, handle) = Task::perform(
                    async move { coordinator.process(request).await },
                    move |result| Message::ProcessFinished(format, result),
                )
                .abortable();
                app.in_flight = Some(handle);
                return task;
            }
            Submission::Rejected(e) => {
                tracing::debug!("Rejected input: {}", e);
                return operation::focus(ui::url_input_id());
            }
            Submission::Ignored => {}
        },
        Message::Form(FormMessage::ThemeTogglePressed) => {
            let theme = app.themes.toggle();
            tracing::info!(theme = theme.as_str(), "Theme toggled");
        }
        Message::Form(FormMessage::Status(StatusAreaMessage::DownloadLinkPressed)) => {
            let Some(link) = app.form.status_area().download_link() else {
                return Task::none();
            };
            if link.is_saving() {
                return Task::none();
            }

            let id = link.id;
            let filename = link.filename.clone();
            let coordinator = app.coordinator.clone();
            if let Some(link) = app.form.status_area_mut().download_link_mut(id) {
                link.transfer = TransferState::Saving(0.0);
            }

            return Task::perform(
                async move { coordinator.choose_save_path(filename).await },
                move |path| Message::SavePathSelected(id, path),
            );
        }
        Message::SystemThemeDetected(mode) => {
            tracing::debug!(?mode, "Desktop colour scheme");
            app.themes.apply_system_mode(mode);
        }
        Message::ProcessFinished(format, result) => {
            app.in_flight = None;
            app.form.finish(format, result);
        }
        Message::SavePathSelected(id, path) => {
            let Some(link) = app.form.status_area_mut().download_link_mut(id) else {
                return Task::none();
            };

            match path {
                Some(path) => {
                    tracing::info!(url = %link.url, path = %path.display(), "Saving download");
                    let stream = app.coordinator.save_stream(link.url.clone(), path);
                    return Task::stream(stream.map(move |event| Message::Save(id, event)));
                }
                None => {
                    // Dialog cancelled
                    link.transfer = TransferState::Ready;
                }
            }
        }
        Message::Save(id, event) => {
            let Some(link) = app.form.status_area_mut().download_link_mut(id) else {
                return Task::none();
            };

            link.transfer = match event {
                SaveEvent::Progress(progress) => TransferState::Saving(progress),
                SaveEvent::Completed(path) => {
                    tracing::info!(path = %path.display(), "Download saved");
                    TransferState::Saved(path)
                }
                SaveEvent::Failed(e) => {
                    tracing::error!("Download failed: {}", e);
                    TransferState::Failed(e.to_string())
                }
            };
        }
    }
    Task::none()
}

pub fn view(app: &MediaGrabber) -> iced::Element<'_, Message> {
    ui::view(&app.form, app.themes.current()).map(Message::Form)
}

pub fn theme(app: &MediaGrabber) -> Theme {
    app.themes.theme()
}
