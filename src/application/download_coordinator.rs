use std::ffi::OsString;
use std::path::{Path, PathBuf};

use futures::{stream::BoxStream, StreamExt};
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::{
    api::{ProcessClient, ProcessRequest},
    domain::{AppError, ProcessedFile},
    utils::sanitize_filename,
};

#[derive(Debug, Clone)]
pub enum SaveEvent {
    Progress(f32),
    Completed(PathBuf),
    Failed(AppError),
}

/// Talks to the backend on behalf of the form and the download link.
#[derive(Clone)]
pub struct DownloadCoordinator {
    api_client: ProcessClient,
}

impl DownloadCoordinator {
    pub fn new(api_client: ProcessClient) -> Self {
        Self { api_client }
    }

    /// Runs one `/process` round trip and resolves the returned link.
    pub async fn process(&self, request: ProcessRequest) -> Result<ProcessedFile, AppError> {
        let response = self.api_client.process(&request).await?;
        let url = self
            .api_client
            .resolve_download_url(&response.download_url)?;

        if let Some(message) = &response.message {
            tracing::debug!("Backend says: {}", message);
        }

        Ok(ProcessedFile {
            url,
            filename: response.filename,
        })
    }

    pub async fn choose_save_path(&self, suggested_filename: String) -> Option<PathBuf> {
        rfd::AsyncFileDialog::new()
            .set_file_name(sanitize_filename(&suggested_filename))
            .save_file()
            .await
            .map(|handle| handle.path().to_path_buf())
    }

    /// Streams `url` into a `.part` file next to `path` and moves it onto
    /// `path` only once the whole body is on disk. On failure `path` is left
    /// untouched and the partial file is removed.
    pub fn save_stream(&self, url: Url, path: PathBuf) -> BoxStream<'static, SaveEvent> {
        futures::stream::unfold(
            SaveRuntimeState::Start {
                client: self.api_client.clone(),
                url,
                path,
            },
            |state| async move {
                match state {
                    SaveRuntimeState::Start { client, url, path } => {
                        let (total_size, stream) = match client.download_file_stream(&url).await {
                            Ok(response) => response,
                            Err(e) => return failed(e.into()),
                        };

                        let part_path = partial_path(&path);
                        let file = match tokio::fs::File::create(&part_path).await {
                            Ok(file) => file,
                            Err(e) => {
                                return failed(AppError::Io(format!(
                                    "Failed to create file: {}",
                                    e
                                )));
                            }
                        };

                        Some((
                            SaveEvent::Progress(0.0),
                            SaveRuntimeState::Saving {
                                file,
                                stream: stream.boxed(),
                                written: 0,
                                total: total_size,
                                path,
                                part_path,
                            },
                        ))
                    }
                    SaveRuntimeState::Saving {
                        mut file,
                        mut stream,
                        mut written,
                        total,
                        path,
                        part_path,
                    } => match stream.next().await {
                        Some(Ok(chunk)) => {
                            if let Err(e) = file.write_all(&chunk).await {
                                discard(file, &part_path).await;
                                return failed(AppError::Io(format!("Write error: {}", e)));
                            }

                            written += chunk.len() as u64;

                            let progress = match total {
                                Some(total_size) if total_size > 0 => {
                                    written as f32 / total_size as f32
                                }
                                _ => 0.0,
                            };

                            Some((
                                SaveEvent::Progress(progress),
                                SaveRuntimeState::Saving {
                                    file,
                                    stream,
                                    written,
                                    total,
                                    path,
                                    part_path,
                                },
                            ))
                        }
                        Some(Err(e)) => {
                            discard(file, &part_path).await;
                            failed(e.into())
                        }
                        None => {
                            if let Err(e) = file.sync_all().await {
                                discard(file, &part_path).await;
                                return failed(AppError::Io(format!(
                                    "Failed to sync file: {}",
                                    e
                                )));
                            }
                            drop(file);

                            if let Err(e) = tokio::fs::rename(&part_path, &path).await {
                                let _ = tokio::fs::remove_file(&part_path).await;
                                return failed(AppError::Io(format!(
                                    "Failed to move file into place: {}",
                                    e
                                )));
                            }

                            Some((SaveEvent::Completed(path), SaveRuntimeState::Finished))
                        }
                    },
                    SaveRuntimeState::Finished => None,
                }
            },
        )
        .boxed()
    }
}

/// `song.mp3` -> `song.mp3.part`
fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".part");
    path.with_file_name(name)
}

fn failed(error: AppError) -> Option<(SaveEvent, SaveRuntimeState)> {
    Some((SaveEvent::Failed(error), SaveRuntimeState::Finished))
}

async fn discard(file: tokio::fs::File, part_path: &Path) {
    drop(file);
    if let Err(e) = tokio::fs::remove_file(part_path).await {
        tracing::warn!("Failed to remove {}: {}", part_path.display(), e);
    }
}

enum SaveRuntimeState {
    Start {
        client: ProcessClient,
        url: Url,
        path: PathBuf,
    },
    Saving {
        file: tokio::fs::File,
        stream: BoxStream<'static, crate::api::Result<bytes::Bytes>>,
        written: u64,
        total: Option<u64>,
        path: PathBuf,
        part_path: PathBuf,
    },
    Finished,
}
