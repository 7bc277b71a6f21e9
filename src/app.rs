// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait, owning the playback transport, the annotation
//! timeline, the companion models, and the single open drawing session,
//! and coordinating between the UI panels and the data model.

use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver};

use crate::editor::session::EditorSession;
use crate::io::{media, serialization};
use crate::models::annotation::Timeline;
use crate::models::config::VideoConfig;
use crate::models::focus::{FocusRecorder, FocusRecording};
use crate::models::settings::{AudioSettings, VideoSettings};
use crate::models::timestamp::TimestampList;
use crate::ui::canvas::Spotlight;
use crate::ui::{annotations, canvas, effects, focus, timeline, timestamps, toolbar};

/// Seconds of countdown before a focus recording starts.
const FOCUS_COUNTDOWN_SECS: f64 = 3.0;

/// Playback clock standing in for the video element. All time-keyed
/// features (annotations, focus, timestamps) run off this.
pub struct Transport {
    pub current_time: f64,
    pub duration: f64,
    pub playing: bool,
}

impl Transport {
    fn new(duration: f64) -> Self {
        Self {
            current_time: 0.0,
            duration,
            playing: false,
        }
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle(&mut self) {
        self.playing = !self.playing;
    }

    pub fn seek(&mut self, time: f64) {
        self.current_time = time.clamp(0.0, self.duration);
    }

    fn tick(&mut self, dt: f64) {
        if self.playing {
            self.current_time += dt;
            if self.current_time >= self.duration {
                self.current_time = self.duration;
                self.playing = false;
            }
        }
    }
}

/// Which side-panel section is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Timestamps,
    Annotation,
    Audio,
    Video,
    Focus,
    Settings,
}

impl Section {
    const ALL: [Section; 6] = [
        Section::Timestamps,
        Section::Annotation,
        Section::Audio,
        Section::Video,
        Section::Focus,
        Section::Settings,
    ];

    fn label(self) -> &'static str {
        match self {
            Section::Timestamps => "Timestamps",
            Section::Annotation => "Annotation",
            Section::Audio => "Audio",
            Section::Video => "Video",
            Section::Focus => "Focus",
            Section::Settings => "Settings",
        }
    }
}

/// Focus feature state: the live toggle, the pre-record countdown, the
/// in-flight recorder, and which recording is playing back.
#[derive(Default)]
struct FocusState {
    enabled: bool,
    countdown_until: Option<f64>,
    recorder: Option<FocusRecorder>,
    playback: Option<usize>,
}

/// In-progress add-timestamp popup fields.
#[derive(Default)]
struct TimestampDraft {
    title: String,
    description: String,
}

/// Main application state.
pub struct VantaApp {
    /// Playback clock for the annotated video
    transport: Transport,

    /// Loaded frame texture for display
    frame_texture: Option<egui::TextureHandle>,

    /// Frame dimensions (width, height)
    frame_size: Option<(u32, u32)>,

    /// Saved annotations, sorted by start time
    annotations: Timeline,

    /// Chapter markers
    timestamps: TimestampList,

    video_settings: VideoSettings,
    audio_settings: AudioSettings,

    /// Saved focus recordings
    focus_recordings: Vec<FocusRecording>,
    focus: FocusState,

    /// The open drawing session, at most one
    session: Option<EditorSession>,

    /// Text-shape input buffer for the drawing controls
    session_text_draft: String,

    /// GPU textures for image shapes in the open session
    shape_textures: HashMap<u64, egui::TextureHandle>,

    /// Whether annotations display during playback
    show_overlay: bool,

    /// Identity of the annotation currently on the overlay; redraws
    /// happen only when this changes
    displayed_annotation: Option<u64>,
    overlay_texture: Option<egui::TextureHandle>,

    active_section: Section,
    timestamp_draft: Option<TimestampDraft>,

    /// Pending user-visible notice (import results etc.)
    alert: Option<String>,

    /// Receiver for background frame loading
    frame_loader: Option<Receiver<Result<media::LoadedImage, String>>>,

    /// Loading state message
    loading_message: Option<String>,

    /// Video rect of the previous frame, used to size new sessions
    last_video_rect: Option<egui::Rect>,
}

impl Default for VantaApp {
    fn default() -> Self {
        Self::new()
    }
}

impl VantaApp {
    /// Create a new VANTA application instance.
    pub fn new() -> Self {
        Self {
            transport: Transport::new(600.0),
            frame_texture: None,
            frame_size: None,
            annotations: Timeline::new(),
            timestamps: TimestampList::demo(),
            video_settings: VideoSettings::default(),
            audio_settings: AudioSettings::default(),
            focus_recordings: Vec::new(),
            focus: FocusState::default(),
            session: None,
            session_text_draft: String::new(),
            shape_textures: HashMap::new(),
            show_overlay: false,
            displayed_annotation: None,
            overlay_texture: None,
            active_section: Section::Timestamps,
            timestamp_draft: None,
            alert: None,
            frame_loader: None,
            loading_message: None,
            last_video_rect: None,
        }
    }

    /// Open a drawing session sized to the current video rect. A second
    /// session while one is open is a logic error; the trigger is
    /// disabled, so this just guards.
    fn open_session(&mut self) {
        if self.session.is_some() {
            return;
        }
        let (width, height) = match self.last_video_rect {
            Some(rect) => (
                (rect.width().round() as u32).max(1),
                (rect.height().round() as u32).max(1),
            ),
            None => (1280, 720),
        };
        self.transport.pause();
        self.session = Some(EditorSession::new(width, height));
        log::info!("Opened drawing session ({width}x{height})");
    }

    /// Save the open session as an annotation, then close it.
    fn save_session(&mut self) {
        if let Some(session) = &self.session {
            let record = session.save(self.transport.current_time);
            self.annotations.insert(record);
        }
        self.close_session();
    }

    /// Close the open session, discarding any unsaved drawing. Resumes
    /// playback exactly once; dropping the session releases its surface.
    fn close_session(&mut self) {
        if self.session.take().is_some() {
            self.shape_textures.clear();
            self.session_text_draft.clear();
            self.transport.play();
            log::info!("Closed drawing session");
        }
    }

    fn stop_focus_recording(&mut self) {
        if let Some(recorder) = self.focus.recorder.take() {
            let recording = recorder.finish(self.transport.current_time);
            log::info!(
                "Recorded focus pass {} - {} with {} samples",
                recording.start_time,
                recording.end_time,
                recording.coordinates.len()
            );
            self.focus_recordings.push(recording);
        }
    }

    fn exit_focus_mode(&mut self) {
        self.focus.enabled = false;
        self.focus.playback = None;
        self.focus.countdown_until = None;
    }

    /// Load a frame image and create a texture for display
    /// (asynchronously; a worker thread feeds the channel polled in update).
    fn load_frame_image(&mut self, path: std::path::PathBuf) {
        let (sender, receiver) = channel();
        self.frame_loader = Some(receiver);
        self.loading_message = Some("Loading frame image...".to_string());

        std::thread::spawn(move || {
            let result = media::load_image(&path)
                .map_err(|e| format!("Failed to load image: {e}"))
                .inspect(|img| {
                    log::info!("Loaded frame: {} ({}x{})", path.display(), img.width, img.height);
                });
            let _ = sender.send(result);
        });
    }

    fn poll_frame_loader(&mut self, ctx: &egui::Context) {
        if let Some(receiver) = &self.frame_loader {
            if let Ok(result) = receiver.try_recv() {
                self.frame_loader = None;
                self.loading_message = None;

                match result {
                    Ok(loaded) => {
                        let size = [loaded.width as usize, loaded.height as usize];
                        let color_image =
                            egui::ColorImage::from_rgba_unmultiplied(size, &loaded.pixels);
                        self.frame_texture = Some(ctx.load_texture(
                            "frame_image",
                            color_image,
                            egui::TextureOptions::LINEAR,
                        ));
                        self.frame_size = Some((loaded.width, loaded.height));
                    }
                    Err(e) => {
                        log::error!("{e}");
                        self.alert = Some(e);
                    }
                }
            }
        }

        if self.loading_message.is_some() {
            ctx.request_repaint();
        }
    }

    /// Keep the playback overlay in sync with the timeline. Change
    /// detection is by record identity, so the texture only re-uploads
    /// when a different annotation (or none) becomes visible.
    fn update_overlay(&mut self, ctx: &egui::Context) {
        if !self.show_overlay {
            self.displayed_annotation = None;
            self.overlay_texture = None;
            return;
        }

        let visible = self.annotations.visible_at(self.transport.current_time);
        let visible_id = visible.map(|r| r.id);
        if visible_id == self.displayed_annotation {
            return;
        }

        self.displayed_annotation = visible_id;
        self.overlay_texture = visible.and_then(|record| {
            let (w, h) = record.raster.dimensions();
            if w == 0 || h == 0 {
                return None;
            }
            let color_image = egui::ColorImage::from_rgba_unmultiplied(
                [w as usize, h as usize],
                record.raster.as_raw(),
            );
            Some(ctx.load_texture(
                format!("annotation_overlay_{}", record.id),
                color_image,
                egui::TextureOptions::LINEAR,
            ))
        });
        log::info!("Overlay changed to {visible_id:?}");
    }

    fn advance_focus(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);

        // Countdown, then start sampling.
        if let Some(until) = self.focus.countdown_until {
            if now >= until {
                self.focus.countdown_until = None;
                self.focus.recorder = Some(FocusRecorder::begin(self.transport.current_time));
                self.transport.play();
                log::info!("Focus recording started");
            } else {
                let remaining = (until - now).ceil().max(1.0) as u64;
                egui::Area::new(egui::Id::new("focus_countdown"))
                    .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                    .show(ctx, |ui| {
                        ui.label(
                            egui::RichText::new(remaining.to_string())
                                .size(100.0)
                                .color(egui::Color32::WHITE),
                        );
                    });
            }
            ctx.request_repaint();
        }

        // Playback runs until its range ends or the transport stops.
        if let Some(index) = self.focus.playback {
            let done = match self.focus_recordings.get(index) {
                Some(rec) => {
                    self.transport.current_time >= rec.end_time
                        || rec.coordinates.is_empty()
                        || !self.transport.playing
                }
                None => true,
            };
            if done {
                self.focus.playback = None;
                self.transport.pause();
                log::info!("Focus playback finished");
            }
        }
    }

    fn current_spotlight(&self) -> Option<Spotlight> {
        if self.session.is_some() {
            return None;
        }
        if let Some(index) = self.focus.playback {
            let rec = self.focus_recordings.get(index)?;
            let sample = rec.sample_at(self.transport.current_time)?;
            return Some(Spotlight::Video(sample.x, sample.y));
        }
        if self.focus.enabled {
            return Some(Spotlight::Pointer);
        }
        None
    }

    fn handle_escape(&mut self) {
        if self.session.is_some() {
            self.close_session();
        } else if self.focus.recorder.is_some() {
            self.stop_focus_recording();
        } else if self.focus.playback.is_some() || self.focus.enabled {
            self.exit_focus_mode();
        }
    }

    /// The full config as it would be exported.
    fn build_config(&self) -> anyhow::Result<VideoConfig> {
        let annotations = self
            .annotations
            .records()
            .iter()
            .map(serialization::record_to_export)
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(VideoConfig {
            timestamps: self.timestamps.entries().to_vec(),
            audio_settings: self.audio_settings.clone(),
            video_settings: self.video_settings.clone(),
            annotations,
            focus_recordings: self.focus_recordings.clone(),
        })
    }

    fn export_config_dialog(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .add_filter("YAML", &["yaml", "yml"])
            .set_file_name("video_config.json")
            .save_file()
        else {
            return;
        };
        let result = self
            .build_config()
            .and_then(|config| serialization::export_config(&config, &path));
        match result {
            Ok(()) => {
                log::info!("Exported configuration to {}", path.display());
                self.alert = Some("Configuration exported successfully!".to_string());
            }
            Err(e) => {
                log::error!("Failed to export configuration: {e}");
                self.alert = Some(format!("Error exporting configuration: {e}"));
            }
        }
    }

    /// Import a full config, replacing every section.
    fn import_config_dialog(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Config", &["json", "yaml", "yml"])
            .pick_file()
        else {
            return;
        };
        match serialization::import_config(&path).and_then(|config| {
            let records = config
                .annotations
                .iter()
                .map(serialization::export_to_record)
                .collect::<anyhow::Result<Vec<_>>>()?;
            Ok((config, records))
        }) {
            Ok((config, records)) => {
                self.timestamps.replace(config.timestamps);
                self.audio_settings = config.audio_settings;
                self.video_settings = config.video_settings;
                self.focus_recordings = config.focus_recordings;
                self.annotations.import_replace(records);
                self.displayed_annotation = None;
                self.overlay_texture = None;
                self.alert = Some("Configuration imported successfully!".to_string());
            }
            Err(e) => {
                log::error!("Failed to import configuration: {e}");
                self.alert = Some(format!("Error importing configuration: {e}"));
            }
        }
    }

    /// Import just annotations. Failure leaves the timeline untouched.
    fn import_annotations_dialog(&mut self) {
        let Some(path) = rfd::FileDialog::new().add_filter("JSON", &["json"]).pick_file() else {
            return;
        };
        match serialization::import_annotations(&path).and_then(|exports| {
            exports
                .iter()
                .map(serialization::export_to_record)
                .collect::<anyhow::Result<Vec<_>>>()
        }) {
            Ok(records) => {
                self.annotations.import_replace(records);
                self.displayed_annotation = None;
                self.overlay_texture = None;
                self.alert = Some("Annotations imported successfully!".to_string());
            }
            Err(e) => {
                log::error!("Error importing annotations: {e}");
                self.alert =
                    Some("Error importing annotations. Please check the file format.".to_string());
            }
        }
    }

    fn import_timestamps_dialog(&mut self) {
        let Some(path) = rfd::FileDialog::new().add_filter("JSON", &["json"]).pick_file() else {
            return;
        };
        match serialization::import_timestamps(&path) {
            Ok(entries) => {
                self.timestamps.replace(entries);
                self.alert = Some("Timestamps imported successfully!".to_string());
            }
            Err(e) => {
                log::error!("Error importing timestamps: {e}");
                self.alert =
                    Some("Error importing timestamps. Please check the file format.".to_string());
            }
        }
    }

    fn import_focus_dialog(&mut self) {
        let Some(path) = rfd::FileDialog::new().add_filter("JSON", &["json"]).pick_file() else {
            return;
        };
        match serialization::import_focus_recordings(&path) {
            Ok(recordings) => {
                self.focus_recordings = recordings;
                self.alert = Some("Focus recordings imported successfully!".to_string());
            }
            Err(e) => {
                log::error!("Error importing focus recordings: {e}");
                self.alert = Some(
                    "Error importing focus recordings. Please check the file format.".to_string(),
                );
            }
        }
    }

    fn show_side_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("sections")
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for section in Section::ALL {
                        if ui
                            .selectable_label(self.active_section == section, section.label())
                            .clicked()
                        {
                            self.active_section = section;
                        }
                    }
                });
                ui.separator();

                match self.active_section {
                    Section::Timestamps => {
                        let action = timestamps::show(ui, &self.timestamps);
                        match action {
                            timestamps::TimestampsAction::None => {}
                            timestamps::TimestampsAction::Seek(t) => self.transport.seek(t),
                            timestamps::TimestampsAction::OpenAddPopup => {
                                self.transport.pause();
                                self.timestamp_draft = Some(TimestampDraft::default());
                            }
                            timestamps::TimestampsAction::Import => self.import_timestamps_dialog(),
                            timestamps::TimestampsAction::Delete(index) => {
                                self.timestamps.remove(index)
                            }
                        }
                    }
                    Section::Annotation => {
                        let action = annotations::show(
                            ui,
                            &mut self.annotations,
                            &mut self.show_overlay,
                            self.session.is_some(),
                        );
                        match action {
                            annotations::AnnotationsAction::None => {}
                            annotations::AnnotationsAction::OpenEditor => self.open_session(),
                            annotations::AnnotationsAction::Seek(t) => self.transport.seek(t),
                            annotations::AnnotationsAction::Import => {
                                self.import_annotations_dialog()
                            }
                        }
                    }
                    Section::Audio => effects::show_audio(ui, &mut self.audio_settings),
                    Section::Video => effects::show_video(ui, &mut self.video_settings),
                    Section::Focus => {
                        let action = focus::show(
                            ui,
                            self.focus.enabled,
                            self.focus.recorder.is_some() || self.focus.countdown_until.is_some(),
                            &self.focus_recordings,
                        );
                        match action {
                            focus::FocusAction::None => {}
                            focus::FocusAction::SetFocusMode(enabled) => {
                                self.focus.enabled = enabled;
                                if !enabled {
                                    self.focus.playback = None;
                                }
                            }
                            focus::FocusAction::StartRecording => {
                                self.focus.enabled = true;
                                self.transport.pause();
                                self.focus.countdown_until =
                                    Some(ctx.input(|i| i.time) + FOCUS_COUNTDOWN_SECS);
                            }
                            focus::FocusAction::StopRecording => self.stop_focus_recording(),
                            focus::FocusAction::Play(index) => {
                                if let Some(rec) = self.focus_recordings.get(index) {
                                    let start = rec.start_time;
                                    self.focus.enabled = true;
                                    self.focus.playback = Some(index);
                                    self.transport.seek(start);
                                    self.transport.play();
                                }
                            }
                            focus::FocusAction::Delete(index) => {
                                if index < self.focus_recordings.len() {
                                    self.focus_recordings.remove(index);
                                }
                            }
                            focus::FocusAction::Import => self.import_focus_dialog(),
                        }
                    }
                    Section::Settings => {
                        if ui.button("Export Configuration...").clicked() {
                            self.export_config_dialog();
                        }
                        if ui.button("Import Configuration...").clicked() {
                            self.import_config_dialog();
                        }
                    }
                }
            });
    }

    fn show_floating_windows(&mut self, ctx: &egui::Context) {
        // Drawing controls float below the video, draggable like the
        // rest of the tool windows.
        if self.session.is_some() {
            let default_pos = self
                .last_video_rect
                .map(|r| r.left_bottom() + egui::vec2(0.0, 10.0))
                .unwrap_or(egui::pos2(40.0, 40.0));

            let mut action = toolbar::ToolbarAction::None;
            if let Some(session) = &mut self.session {
                egui::Window::new("Drawing Tools")
                    .collapsible(false)
                    .resizable(false)
                    .default_pos(default_pos)
                    .show(ctx, |ui| {
                        action = toolbar::show(ui, session, &mut self.session_text_draft);
                    });
            }
            match action {
                toolbar::ToolbarAction::None => {}
                toolbar::ToolbarAction::Save => self.save_session(),
                toolbar::ToolbarAction::Close => self.close_session(),
            }
        }

        // Add-timestamp popup.
        if let Some(draft) = &mut self.timestamp_draft {
            let mut add = false;
            let mut cancel = false;
            egui::Window::new("Add Timestamp")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.add(egui::TextEdit::singleline(&mut draft.title).hint_text("Title"));
                    ui.add(
                        egui::TextEdit::multiline(&mut draft.description)
                            .hint_text("Description")
                            .desired_rows(3),
                    );
                    ui.horizontal(|ui| {
                        add = ui.button("Add").clicked();
                        cancel = ui.button("Cancel").clicked();
                    });
                });

            if add {
                if let Some(draft) = self.timestamp_draft.take() {
                    self.timestamps
                        .add(draft.title, draft.description, self.transport.current_time);
                }
                self.transport.play();
            } else if cancel {
                self.timestamp_draft = None;
                self.transport.play();
            }
        }

        // Import/export notices.
        if let Some(message) = self.alert.clone() {
            egui::Window::new("Notice")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(message);
                    if ui.button("OK").clicked() {
                        self.alert = None;
                    }
                });
        }
    }
}

impl eframe::App for VantaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_frame_loader(ctx);

        let dt = ctx.input(|i| i.stable_dt) as f64;
        self.transport.tick(dt);
        if self.transport.playing {
            ctx.request_repaint();
        }

        self.advance_focus(ctx);
        self.update_overlay(ctx);

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.handle_escape();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Frame Image...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["jpg", "jpeg", "png", "bmp", "tiff", "tif"])
                            .pick_file()
                        {
                            self.load_frame_image(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Import Configuration...").clicked() {
                        self.import_config_dialog();
                        ui.close_menu();
                    }
                    if ui.button("Export Configuration...").clicked() {
                        self.export_config_dialog();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Transport bar; locked while drawing, matching the paused video.
        egui::TopBottomPanel::bottom("transport").show(ctx, |ui| {
            timeline::show(ui, &mut self.transport, self.session.is_some());
        });

        self.show_side_panel(ctx);

        // Main canvas (center)
        let spotlight = self.current_spotlight();
        let canvas_output = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if let Some(message) = &self.loading_message {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(20.0);
                            ui.spinner();
                            ui.add_space(10.0);
                            ui.label(
                                egui::RichText::new(message)
                                    .size(16.0)
                                    .color(egui::Color32::from_gray(200)),
                            );
                        });
                    });
                    None
                } else {
                    Some(canvas::show(
                        ui,
                        &self.frame_texture,
                        self.frame_size,
                        self.overlay_texture.as_ref(),
                        spotlight,
                        self.session.as_mut(),
                        &mut self.shape_textures,
                    ))
                }
            })
            .inner;

        if let Some(output) = canvas_output {
            self.last_video_rect = Some(output.video_rect);

            // Feed the in-flight focus recording from the live pointer.
            if let Some(recorder) = &mut self.focus.recorder {
                if let Some(pointer) = output.pointer {
                    recorder.offer(self.transport.current_time, pointer.x, pointer.y);
                }
                ctx.request_repaint();
            }
        }

        self.show_floating_windows(ctx);
    }
}
