use egui::{Color32, Context, RichText, TextureHandle};
use std::time::Duration;

use super::DashboardApp;
use crate::error::Result;
use crate::plotting::{ChartView, Tooltip};

const RISING: Color32 = Color32::from_rgb(0x3E, 0xC9, 0x72);
const FALLING: Color32 = Color32::from_rgb(0xF4, 0x3F, 0x5E);

/// Draw the main application UI
pub fn draw_ui(app: &mut DashboardApp, ctx: &Context) {
    ctx.set_visuals(if app.is_dark() {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });
    if app.live.is_some() {
        app.poll_feed();
        ctx.request_repaint_after(Duration::from_millis(250));
    }

    egui::SidePanel::left("side_panel").show(ctx, |ui| {
        ui.heading("Dashboard");
        ui.separator();

        let mut dark = app.is_dark();
        if ui.checkbox(&mut dark, "Dark mode").changed() {
            app.set_dark_mode(dark);
        }

        if let Some(live) = &app.live {
            ui.separator();
            ui.label("Live price");
            if let Some(value) = live.value {
                ui.heading(format!("{value:.2}"));
            }
            if let Some(deviation) = &live.deviation {
                ui.colored_label(if live.falling { FALLING } else { RISING }, deviation);
            }
        }

        if let Some(error) = &app.error_message {
            ui.separator();
            ui.colored_label(Color32::RED, error);
        }
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| {
            for index in 0..app.widgets.len() {
                draw_widget(app, index, ui, ctx);
                ui.separator();
            }
        });
    });
}

fn draw_widget(app: &mut DashboardApp, index: usize, ui: &mut egui::Ui, ctx: &Context) {
    let texture = match chart_texture(app, index, ctx) {
        Ok(texture) => texture,
        Err(e) => {
            tracing::error!(error = %e, "chart render failed");
            app.error_message = Some(format!("Render error: {e}"));
            return;
        }
    };

    let widget = &app.widgets[index];
    ui.label(RichText::new(&widget.element_id).strong());
    let response = ui.image(&texture);
    if let Some(pointer) = response.hover_pos() {
        let chart = widget.chart();
        let chart = chart.borrow();
        let (width, height) = chart.size();
        let rect = response.rect;
        let x = (pointer.x - rect.min.x) / rect.width() * width as f32;
        let y = (pointer.y - rect.min.y) / rect.height() * height as f32;
        if let Some(tip) = chart.tooltip_at(x as f64, y as f64) {
            response.on_hover_ui_at_pointer(|ui| draw_tooltip(ui, &tip));
        }
    }

    let Some(container) = widget.legend_container.clone() else {
        return;
    };
    let items = app
        .page
        .borrow()
        .legend_items(&container)
        .map(<[_]>::to_vec)
        .unwrap_or_default();

    let mut clicked = None;
    ui.horizontal_wrapped(|ui| {
        for (position, item) in items.iter().enumerate() {
            let swatch = item.entry.swatch_color.to_egui().gamma_multiply(item.opacity);
            let text = match &item.value_text {
                Some(value) => format!("{value}  {}", item.entry.label),
                None => item.entry.label.clone(),
            };
            let button = egui::Button::new(
                RichText::new(text).color(ui.visuals().text_color().gamma_multiply(item.opacity)),
            )
            .fill(Color32::TRANSPARENT)
            .stroke(egui::Stroke::new(3.0, swatch));
            if ui.add(button).clicked() {
                clicked = Some(position);
            }
        }
    });

    if let Some(position) = clicked {
        app.click_legend(index, position);
    }
}

fn draw_tooltip(ui: &mut egui::Ui, tip: &Tooltip) {
    egui::Frame::none()
        .fill(tip.background.to_egui())
        .stroke(egui::Stroke::new(1.0, tip.border.to_egui()))
        .rounding(4.0)
        .inner_margin(6.0)
        .show(ui, |ui| {
            if let Some(title) = &tip.title {
                ui.label(RichText::new(title).strong().color(tip.title_color.to_egui()));
            }
            ui.label(RichText::new(&tip.body).color(tip.body_color.to_egui()));
        });
}

/// The widget's chart image, re-rendered only when its revision moved.
fn chart_texture(app: &mut DashboardApp, index: usize, ctx: &Context) -> Result<TextureHandle> {
    let widget = &app.widgets[index];
    let chart = widget.chart();
    let chart = chart.borrow();
    let revision = chart.revision();

    if let Some((cached, texture)) = app.textures.get(&widget.element_id) {
        if *cached == revision {
            return Ok(texture.clone());
        }
    }

    let (width, height) = chart.size();
    let pixels = chart.render_rgb()?;
    let image = egui::ColorImage::from_rgb([width as usize, height as usize], &pixels);
    let texture = ctx.load_texture(
        format!("chart-{}", widget.element_id),
        image,
        egui::TextureOptions::LINEAR,
    );
    tracing::trace!(element_id = %widget.element_id, revision, kind = ?chart.kind(), "chart texture refreshed");
    app.textures
        .insert(widget.element_id.clone(), (revision, texture.clone()));
    Ok(texture)
}
