//! Stem Mixer desktop app.
//!
//! Paste a YouTube link, pick a mix type, get an MP3. The pipeline itself is
//! synchronous and runs on a blocking task; the UI polls a shared progress
//! snapshot while it is in flight.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use iced::widget::{button, column, container, progress_bar, radio, row, text, text_input, Row};
use iced::{Element, Length, Subscription, Task, Theme};

use stem_mixer::{
    DemucsSeparator, FfmpegEncoder, MixCache, MixPipeline, MixPreset, Settings, YtDlpFetcher,
};

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Stem Mixer starting");

    iced::application("Stem Mixer", StemMixer::update, StemMixer::view)
        .subscription(StemMixer::subscription)
        .theme(|_| Theme::Dark)
        .window_size((560.0, 560.0))
        .run_with(|| (StemMixer::new(), Task::none()))
}

struct StemMixer {
    settings: Arc<Settings>,
    cache: Arc<MixCache>,

    url: String,
    preset: MixPreset,

    is_processing: bool,
    // Written by the pipeline's progress callback, read on each tick.
    progress: Arc<Mutex<(u8, String)>>,
    progress_value: f32,
    status_text: String,

    result_path: Option<PathBuf>,
    error_text: Option<String>,
    save_note: Option<String>,

    playback_stop: Option<Arc<AtomicBool>>,
}

#[derive(Debug, Clone)]
enum Message {
    UrlChanged(String),
    PresetPicked(MixPreset),
    Generate,
    Tick,
    JobFinished(Result<PathBuf, String>),
    TogglePlayback,
    SaveCopy,
    SaveTargetChosen(Option<PathBuf>),
    SaveFinished(Result<PathBuf, String>),
}

impl StemMixer {
    fn new() -> Self {
        let settings = Settings::default_config_path()
            .map(|path| Settings::load_or_default(&path))
            .unwrap_or_default();

        Self {
            settings: Arc::new(settings),
            cache: Arc::new(MixCache::new()),
            url: String::new(),
            preset: MixPreset::Karaoke,
            is_processing: false,
            progress: Arc::new(Mutex::new((0, String::new()))),
            progress_value: 0.0,
            status_text: String::new(),
            result_path: None,
            error_text: None,
            save_note: None,
            playback_stop: None,
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        if self.is_processing {
            iced::time::every(Duration::from_millis(200)).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::UrlChanged(url) => {
                self.url = url;
            }

            Message::PresetPicked(preset) => {
                self.preset = preset;
            }

            Message::Generate => {
                if self.is_processing {
                    return Task::none();
                }
                if self.url.trim().is_empty() {
                    self.status_text = "Please enter a YouTube URL.".to_string();
                    return Task::none();
                }

                self.stop_playback();
                self.is_processing = true;
                self.result_path = None;
                self.error_text = None;
                self.save_note = None;
                self.progress_value = 0.0;
                self.status_text = "Starting process...".to_string();
                *self.progress.lock().expect("progress lock") =
                    (0, "Starting process...".to_string());

                let url = self.url.trim().to_string();
                let preset = self.preset;
                let settings = Arc::clone(&self.settings);
                let cache = Arc::clone(&self.cache);
                let progress = Arc::clone(&self.progress);

                return Task::perform(
                    async move {
                        let job = tokio::task::spawn_blocking(move || {
                            run_mix_job(&settings, &cache, &url, preset, &progress)
                        });
                        job.await
                            .unwrap_or_else(|e| Err(format!("Mix job panicked: {e}")))
                    },
                    Message::JobFinished,
                );
            }

            Message::Tick => {
                let (percent, message) = {
                    let snapshot = self.progress.lock().expect("progress lock");
                    (snapshot.0, snapshot.1.clone())
                };
                self.progress_value = percent as f32;
                if !message.is_empty() {
                    self.status_text = message;
                }
            }

            Message::JobFinished(result) => {
                self.is_processing = false;
                match result {
                    Ok(path) => {
                        tracing::info!("mix finished: {}", path.display());
                        self.progress_value = 100.0;
                        self.status_text = "Mix complete!".to_string();
                        self.result_path = Some(path);
                    }
                    Err(detail) => {
                        tracing::error!("mix failed: {detail}");
                        self.status_text = "Mix failed.".to_string();
                        self.error_text = Some(detail);
                    }
                }
            }

            Message::TogglePlayback => {
                if self.playback_stop.is_some() {
                    self.stop_playback();
                } else if let Some(path) = self.result_path.clone() {
                    let stop = Arc::new(AtomicBool::new(false));
                    self.playback_stop = Some(Arc::clone(&stop));
                    std::thread::spawn(move || {
                        if let Err(e) = play_blocking(&path, &stop) {
                            tracing::warn!("playback failed: {e}");
                        }
                    });
                }
            }

            Message::SaveCopy => {
                if let Some(src) = self.result_path.clone() {
                    let file_name = src
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "final_mix.mp3".to_string());

                    return Task::perform(
                        async move {
                            rfd::AsyncFileDialog::new()
                                .set_file_name(&file_name)
                                .save_file()
                                .await
                                .map(|handle| handle.path().to_path_buf())
                        },
                        Message::SaveTargetChosen,
                    );
                }
            }

            Message::SaveTargetChosen(target) => {
                if let (Some(src), Some(dest)) = (self.result_path.clone(), target) {
                    return Task::perform(
                        async move {
                            tokio::task::spawn_blocking(move || {
                                std::fs::copy(&src, &dest)
                                    .map(|_| dest)
                                    .map_err(|e| e.to_string())
                            })
                            .await
                            .unwrap_or_else(|e| Err(format!("Save task panicked: {e}")))
                        },
                        Message::SaveFinished,
                    );
                }
            }

            Message::SaveFinished(result) => match result {
                Ok(dest) => {
                    self.save_note = Some(format!("Saved to {}", dest.display()));
                }
                Err(detail) => {
                    self.save_note = Some(format!("Save failed: {detail}"));
                }
            },
        }

        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let header = column![
            text("Stem Mixer").size(28),
            text("Paste a YouTube link, choose a mix type, and get a custom audio track.")
                .size(14),
        ]
        .spacing(6);

        let url_input = text_input("https://www.youtube.com/watch?v=...", &self.url)
            .on_input(Message::UrlChanged)
            .padding(10);

        let presets: Vec<Element<Message>> = MixPreset::ALL
            .into_iter()
            .map(|preset| {
                radio(
                    preset.label(),
                    preset,
                    Some(self.preset),
                    Message::PresetPicked,
                )
                .size(18)
                .into()
            })
            .collect();
        let preset_row = Row::with_children(presets).spacing(18);

        let generate = button(text("Generate Mix"))
            .on_press_maybe((!self.is_processing).then_some(Message::Generate))
            .padding(12);

        let mut content = column![header, url_input, preset_row, generate]
            .spacing(16)
            .padding(24);

        if self.is_processing {
            content = content.push(progress_bar(0.0..=100.0, self.progress_value));
        }

        if !self.status_text.is_empty() {
            content = content.push(text(&self.status_text).size(14));
        }

        if let Some(detail) = &self.error_text {
            content = content.push(text(detail).size(13));
        }

        if let Some(path) = &self.result_path {
            let play_label = if self.playback_stop.is_some() {
                "Stop"
            } else {
                "Play"
            };
            let actions = row![
                button(text(play_label)).on_press(Message::TogglePlayback),
                button(text("Save a copy")).on_press(Message::SaveCopy),
            ]
            .spacing(12);

            content = content
                .push(text(format!("Output: {}", path.display())).size(13))
                .push(actions);
        }

        if let Some(note) = &self.save_note {
            content = content.push(text(note).size(13));
        }

        container(content).width(Length::Fill).into()
    }

    fn stop_playback(&mut self) {
        if let Some(stop) = self.playback_stop.take() {
            stop.store(true, Ordering::Relaxed);
        }
    }
}

/// Build the real collaborators and run one synchronous mix job, mirroring
/// progress into the shared snapshot the UI polls.
fn run_mix_job(
    settings: &Settings,
    cache: &MixCache,
    url: &str,
    preset: MixPreset,
    progress: &Mutex<(u8, String)>,
) -> Result<PathBuf, String> {
    let fetcher = YtDlpFetcher::new(&settings.yt_dlp_program);
    let separator = DemucsSeparator::new(&settings.python_program, &settings.demucs_model);
    let encoder = FfmpegEncoder::new(&settings.ffmpeg_program);

    let pipeline = MixPipeline {
        fetcher: &fetcher,
        separator: &separator,
        encoder: &encoder,
        settings,
        cache,
    };

    pipeline
        .run(url, preset, |percent, message| {
            *progress.lock().expect("progress lock") = (percent, message.to_string());
        })
        .map_err(|e| e.to_string())
}

/// Decode and play a file on the calling thread until it ends or `stop` is
/// raised. Runs on a worker thread; the audio device handle must stay alive
/// for the duration.
fn play_blocking(path: &Path, stop: &AtomicBool) -> anyhow::Result<()> {
    let file = std::fs::File::open(path)?;
    let (_stream, handle) = rodio::OutputStream::try_default()?;
    let sink = rodio::Sink::try_new(&handle)?;
    sink.append(rodio::Decoder::new(std::io::BufReader::new(file))?);

    while !sink.empty() && !stop.load(Ordering::Relaxed) {
        std::thread::sleep(Duration::from_millis(100));
    }

    Ok(())
}
