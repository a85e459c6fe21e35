use lru::LruCache;
use once_cell::sync::Lazy;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::styles::{ChartStyle, ChartTheme};
use crate::app::{App, Screen};
use crate::history::data_points;
use crate::utils::aggregate_series;

type PlotError = Box<dyn Error + Send + Sync>;

// Rendered bitmaps are cached for 5 minutes, keyed by the table contents.
static PLOT_CACHE: Lazy<Mutex<LruCache<PlotCacheKey, (Vec<u8>, Instant)>>> =
    Lazy::new(|| Mutex::new(LruCache::new(NonZeroUsize::new(10).unwrap())));

const PLOT_CACHE_TTL: Duration = Duration::from_secs(300);

#[derive(Hash, Eq, PartialEq)]
struct PlotCacheKey {
    title: String,
    data_hash: u64,
}

impl PlotCacheKey {
    fn new(title: &str, points: &[(String, u64)]) -> Self {
        use std::hash::{Hash, Hasher};
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        points.hash(&mut hasher);

        Self {
            title: title.to_string(),
            data_hash: hasher.finish(),
        }
    }
}

fn chart_title(app: &App) -> String {
    let full_name = match (&app.repository_data, &app.screen) {
        (Some(data), _) => data.full_name.clone(),
        (None, Screen::Repository(full_name)) => full_name.clone(),
        _ => String::new(),
    };
    format!("Total Issues from {} | Days", full_name)
}

/// Render the issue-history chart for the current app state into
/// `app.plot_path` as a PNG.
///
/// The prepared chart table is consumed as-is (header row skipped); long
/// histories are downsampled before drawing. Identical tables re-use a
/// cached bitmap instead of re-rendering.
pub fn generate_plot(app: &App) -> Result<(), PlotError> {
    let Some(table) = &app.chart_data else {
        return Ok(());
    };
    let points = aggregate_series(&data_points(table), 500);
    let title = chart_title(app);

    let cache_key = PlotCacheKey::new(&title, &points);
    if let Some((bitmap, timestamp)) = PLOT_CACHE.lock().unwrap().get(&cache_key) {
        if timestamp.elapsed() < PLOT_CACHE_TTL {
            std::fs::write(&app.plot_path, bitmap)?;
            return Ok(());
        }
    }

    let style = ChartStyle::default();
    {
        let root = BitMapBackend::new(&app.plot_path, (style.width, style.height))
            .into_drawing_area();
        draw_issue_chart(&root, &title, &points)?;
        root.present()?;
    }

    let bitmap = std::fs::read(&app.plot_path)?;
    PLOT_CACHE
        .lock()
        .unwrap()
        .put(cache_key, (bitmap, Instant::now()));

    Ok(())
}

/// Internal function to draw the chart on a prepared drawing area
fn draw_issue_chart(
    root_area: &DrawingArea<BitMapBackend, Shift>,
    title: &str,
    points: &[(String, u64)],
) -> Result<(), PlotError> {
    let theme = ChartTheme::default();
    let style = ChartStyle::default();

    root_area.fill(&theme.background_color)?;

    let counts: Vec<f64> = points.iter().map(|(_, count)| *count as f64).collect();
    let (min_val, max_val) = calculate_adaptive_range(&counts);
    let x_max = (points.len() as f64).max(1.0);

    let mut chart_builder = ChartBuilder::on(root_area)
        .caption(
            title,
            ("sans-serif", style.caption_size)
                .into_font()
                .color(&theme.text_color),
        )
        .margin(style.margin)
        .set_all_label_area_size(style.label_area_size)
        .build_cartesian_2d(0f64..x_max, min_val..max_val)?;

    // Store the dates in a longer-lived variable
    let dates: Vec<String> = points.iter().map(|(date, _)| date.clone()).collect();
    let x_label_formatter = move |x: &f64| {
        let idx = *x as usize;
        if idx < dates.len() {
            // Show fewer labels to prevent overlap
            if idx == 0
                || idx == dates.len() - 1
                || (idx % (dates.len() / 4).max(1) == 0 && idx > 0 && idx < dates.len() - 1)
            {
                dates[idx].clone()
            } else {
                String::new()
            }
        } else {
            String::new()
        }
    };

    chart_builder
        .configure_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(theme.grid_color)
        .axis_style(theme.axis_color)
        .y_desc("Issues")
        .label_style(
            ("sans-serif", style.font_size)
                .into_font()
                .color(&theme.text_color),
        )
        .x_label_formatter(&x_label_formatter)
        .y_label_formatter(&|y| format!("{:.0}", y))
        // Rotate x labels for better readability
        .x_label_style(
            ("sans-serif", style.font_size)
                .into_font()
                .color(&theme.text_color)
                .transform(FontTransform::Rotate90)
                .pos(Pos::new(HPos::Right, VPos::Center)),
        )
        .draw()?;

    draw_issue_series(&mut chart_builder, points, &theme, &style)?;

    Ok(())
}

fn draw_issue_series<'a>(
    chart_builder: &mut ChartContext<'a, BitMapBackend<'a>, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    points: &[(String, u64)],
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<(), PlotError> {
    if points.is_empty() {
        return Ok(());
    }

    let series: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, (_, count))| (i as f64, *count as f64))
        .collect();

    // Draw a subtle glow under the main line
    chart_builder.draw_series(LineSeries::new(
        series.clone(),
        theme.glow_color.stroke_width(style.glow_width),
    ))?;

    let line_color = theme.line_color;
    chart_builder
        .draw_series(LineSeries::new(
            series,
            line_color.stroke_width(style.line_width),
        ))?
        .label("Issues")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_color));

    chart_builder
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .label_font(
            ("sans-serif", style.font_size)
                .into_font()
                .color(&theme.text_color),
        )
        .draw()?;

    Ok(())
}

fn calculate_adaptive_range(values: &[f64]) -> (f64, f64) {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    if sorted.is_empty() {
        return (0.0, 1.0);
    }

    // Remove extreme outliers (values beyond 95th percentile)
    let p95_idx = ((sorted.len() as f64 * 0.95) as usize)
        .max(1)
        .min(sorted.len() - 1);
    let normal_max = sorted[p95_idx];
    let absolute_max = sorted[sorted.len() - 1];

    // Use the 95th percentile for the main scale, but ensure we can still see the peaks
    let display_max = if absolute_max > normal_max * 2.0 {
        normal_max * 1.2
    } else {
        absolute_max * 1.1
    };

    (0.0, display_max.max(1.0))
}
