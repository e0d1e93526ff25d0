// src/ui/charts.rs
use eframe::egui::{self, pos2, vec2, Color32, Pos2, RichText, Sense, Shape, Stroke};
use egui_plot::{Line, Plot, Points};
use std::f32::consts::{FRAC_PI_2, TAU};

use super::rgb;
use crate::analysis::{GradeChart, HistoryChart};
use crate::controller::ChartInstance;

const DONUT_SIZE: f32 = 200.0;
const HOLE_RATIO: f32 = 0.6;
const LINE_COLOR: [u8; 3] = [0x3B, 0x82, 0xF6];

pub fn show_grade_donut(ui: &mut egui::Ui, instance: &mut ChartInstance<GradeChart>) {
    instance.take_fresh();
    let chart = &instance.chart;

    ui.horizontal(|ui| {
        let (rect, response) = ui.allocate_exact_size(vec2(DONUT_SIZE, DONUT_SIZE), Sense::hover());
        let center = rect.center();
        let outer = DONUT_SIZE / 2.0 - 4.0;
        let inner = outer * HOLE_RATIO;
        let painter = ui.painter_at(rect);

        let arcs = chart.arcs();
        if arcs.is_empty() {
            painter.circle_stroke(
                center,
                (outer + inner) / 2.0,
                Stroke::new(outer - inner, Color32::from_gray(220)),
            );
        }

        let hovered = response
            .hover_pos()
            .and_then(|pos| turn_at(center, pos, inner, outer))
            .and_then(|turn| chart.slice_at(turn));

        for (index, start, sweep) in arcs {
            let mut color = rgb(chart.slices[index].grade.color().rgb());
            if hovered.is_some() && hovered != Some(index) {
                color = color.gamma_multiply(0.6);
            }
            let steps = ((sweep * 96.0).ceil() as usize).max(2);
            for step in 0..steps {
                let a0 = start + sweep * step as f32 / steps as f32;
                let a1 = start + sweep * (step + 1) as f32 / steps as f32;
                painter.add(Shape::convex_polygon(
                    vec![
                        on_ring(center, outer, a0),
                        on_ring(center, outer, a1),
                        on_ring(center, inner, a1),
                        on_ring(center, inner, a0),
                    ],
                    color,
                    Stroke::NONE,
                ));
            }
        }

        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            chart.total().to_string(),
            egui::FontId::proportional(20.0),
            ui.visuals().strong_text_color(),
        );

        if let Some(index) = hovered {
            response.on_hover_text(chart.tooltip(index));
        }

        ui.vertical(|ui| {
            for slice in &chart.slices {
                ui.horizontal(|ui| {
                    let (swatch, _) = ui.allocate_exact_size(vec2(12.0, 12.0), Sense::hover());
                    ui.painter()
                        .rect_filled(swatch, 2.0, rgb(slice.grade.color().rgb()));
                    ui.label(slice.grade.range_label());
                    ui.label(RichText::new(slice.count.to_string()).weak());
                });
            }
        });
    });
}

/// Point on a ring, `turn` measured clockwise from twelve o'clock.
fn on_ring(center: Pos2, radius: f32, turn: f32) -> Pos2 {
    let angle = turn * TAU - FRAC_PI_2;
    pos2(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

fn turn_at(center: Pos2, pos: Pos2, inner: f32, outer: f32) -> Option<f32> {
    let offset = pos - center;
    let distance = offset.length();
    if distance < inner || distance > outer {
        return None;
    }
    Some(((offset.y.atan2(offset.x) + FRAC_PI_2) / TAU).rem_euclid(1.0))
}

pub fn show_history_plot(ui: &mut egui::Ui, instance: &mut ChartInstance<HistoryChart>) {
    let fresh = instance.take_fresh();
    let chart = &instance.chart;

    if chart.is_empty() {
        ui.label(RichText::new("No emails sent yet").weak());
        return;
    }

    let labels = chart.clone();
    let hover_labels = chart.clone();
    let mut plot = Plot::new("email_history")
        .height(220.0)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .include_y(0.0)
        .include_y((chart.max_count() + 1) as f64)
        .x_grid_spacer(egui_plot::uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .y_grid_spacer(egui_plot::uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .x_axis_formatter(move |x, _, _| labels.label_at(x).unwrap_or_default().to_string())
        .y_axis_formatter(|y, _, _| {
            if y >= 0.0 && y.fract() == 0.0 {
                format!("{}", y as u64)
            } else {
                String::new()
            }
        })
        .label_formatter(move |_, point| {
            let day = hover_labels.label_at(point.x.round()).unwrap_or_default();
            format!("{}\nEmails Sent: {}", day, point.y.round() as u64)
        });
    if fresh {
        plot = plot.reset();
    }

    let color = rgb(LINE_COLOR);
    plot.show(ui, |plot_ui| {
        plot_ui.line(
            Line::new(chart.line_points())
                .color(color)
                .fill(0.0)
                .name("Emails Sent"),
        );
        plot_ui.points(Points::new(chart.line_points()).radius(4.0).color(color));
    });
}
