//! Human-readable race report.

use crate::{error::SimResult, simulator::RaceResult};
use askama::Template;

#[derive(Template)]
#[template(path = "report.html")]
struct RaceReport<'a> {
    distance: f64,
    result:   &'a RaceResult,
}

/// Render a finished race as an HTML fragment.
pub fn render_html(distance: f64, result: &RaceResult) -> SimResult<String> {
    Ok(RaceReport { distance, result }.render()?)
}
