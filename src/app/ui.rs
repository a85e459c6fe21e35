use egui::{Color32, Context};
use image::ImageReader;
use std::sync::{Arc, Mutex};

use super::{App, Screen};

/// Draw the main application UI
pub fn draw_ui(app: &mut App, ctx: &Context, app_arc: Arc<Mutex<App>>) {
    egui::TopBottomPanel::top("header").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("LibQuality");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                match app.screen {
                    Screen::Dashboard => {
                        if ui.button("Clear Cache").clicked() {
                            app.clear_cache();
                        }
                    }
                    Screen::Repository(_) => {
                        if ui.button("< Back").clicked() {
                            app.back_to_dashboard();
                        }
                    }
                }
            });
        });
    });

    egui::CentralPanel::default().show(ctx, |ui| match app.screen.clone() {
        Screen::Dashboard => draw_dashboard(app, ui, &app_arc),
        Screen::Repository(full_name) => draw_repository(app, ui, &full_name),
    });

    // Update plot if needed
    if app.update_needed {
        if let Err(e) = crate::plotting::generate_plot(app) {
            log::error!("plotting error: {e}");
        } else {
            load_plot_texture(app, ctx);
        }
        app.update_needed = false;
    }
}

fn draw_dashboard(app: &mut App, ui: &mut egui::Ui, app_arc: &Arc<Mutex<App>>) {
    ui.label("This is a simple tool to compare quality of different open source libraries available in GitHub");
    ui.separator();

    ui.horizontal(|ui| {
        ui.label("Repository:");
        ui.add(
            egui::TextEdit::singleline(&mut app.new_repo)
                .hint_text("Type repository name. Ex: facebook/react"),
        );

        if ui.button("Search").clicked() && !app.is_searching {
            submit_search(app, app_arc.clone());
        }
    });

    if let Some(error) = &app.input_error {
        ui.colored_label(Color32::RED, error);
    }

    if app.is_searching {
        ui.label("Searching... Please wait.");
        ui.spinner();
    }

    ui.separator();

    let mut open_target = None;
    egui::ScrollArea::vertical().show(ui, |ui| {
        for repository in &app.repositories {
            let label = format!("{}  |  Language: {}", repository.full_name, repository.language);
            if ui.button(label).clicked() {
                open_target = Some(repository.full_name.clone());
            }
        }
    });

    if let Some(full_name) = open_target {
        open_repository(app, app_arc.clone(), full_name);
    }
}

fn draw_repository(app: &mut App, ui: &mut egui::Ui, full_name: &str) {
    ui.heading(full_name);

    if app.is_loading_detail {
        ui.label("Loading... Please wait.");
        ui.spinner();
        return;
    }

    // Fetch failed or still absent: render only the static shell.
    let Some(data) = &app.repository_data else {
        return;
    };

    ui.label(format!("Language: {}", data.language));
    ui.separator();

    ui.horizontal(|ui| {
        ui.label(format!("Stars: {}", data.stargazers_count));
        ui.label(format!("Forks: {}", data.forks_count));
        ui.label(format!("Open Issues: {}", data.open_issues_count));

        if let Some(today) = &app.issue_of_day {
            ui.label(format!("Avg Age: {}d", today.mean_of_issue));
            ui.label(format!("Std Age: {}d", today.deviation_of_issue));
        }
        if let Some(age) = app.oldest_issue_age {
            ui.label(format!("Oldest Issue: {}d", age));
        }
    });

    ui.separator();
    egui::ScrollArea::vertical().show(ui, |ui| {
        if let Some(texture) = &app.plot_texture {
            ui.image(texture);
        }
    });
}

fn submit_search(app: &mut App, app_arc: Arc<Mutex<App>>) {
    let query = app.new_repo.clone();
    let api = app.api.clone();
    let store = app.store.clone();
    app.is_searching = true;

    tokio::spawn(async move {
        let result = crate::api::submit(&api, &store, &query).await;
        let mut app = app_arc.lock().unwrap();
        app.apply_search(result);
        app.is_searching = false;
    });
}

fn open_repository(app: &mut App, app_arc: Arc<Mutex<App>>, full_name: String) {
    app.open_repository(full_name.clone());
    let api = app.api.clone();

    tokio::spawn(async move {
        match api.lookup_repository(&full_name).await {
            Ok(bundle) => {
                let mut app = app_arc.lock().unwrap();
                app.update_with_bundle(&full_name, bundle);
            }
            Err(e) => {
                log::error!("failed to load details for {full_name}: {e:#}");
                let mut app = app_arc.lock().unwrap();
                if app.screen == Screen::Repository(full_name) {
                    app.is_loading_detail = false;
                }
            }
        }
    });
}

fn load_plot_texture(app: &mut App, ctx: &Context) {
    if let Ok(image) = ImageReader::open(&app.plot_path).and_then(|reader| {
        reader
            .decode()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }) {
        let size = [image.width() as usize, image.height() as usize];
        let pixels = image.to_rgba8();
        let pixels = pixels.as_flat_samples();
        let texture = ctx.load_texture(
            "plot_texture",
            egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice()),
            egui::TextureOptions::LINEAR,
        );
        app.plot_texture = Some(texture);
    } else {
        log::error!("failed to load plot image");
    }
}
