mod chart;
mod styles;

pub use chart::generate_plot;
pub use styles::{ChartStyle, ChartTheme};
