//! Plain-text rendering of view frames for the terminal.

use lotwatch_core::{CarparkDetail, RenderTarget, ViewFrame};

/// Longest name shown in the list before truncation.
const NAME_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum View {
    List,
    Detail,
}

/// Render target that prints each frame to stdout.
#[derive(Debug)]
pub(crate) struct Terminal {
    view: View,
}

impl Terminal {
    pub(crate) fn new(view: View) -> Self {
        Self { view }
    }
}

impl RenderTarget for Terminal {
    fn render(&mut self, frame: &ViewFrame) {
        let text = match self.view {
            View::List => format_list(frame),
            View::Detail => frame
                .detail
                .as_ref()
                .map_or_else(|| "no carpark selected\n".to_string(), format_detail),
        };
        print!("{text}");
    }
}

pub(crate) fn format_list(frame: &ViewFrame) -> String {
    let mut out = format!("{} (sorted by {})\n", frame.count_label, frame.query.sort_key);
    if frame.list.is_empty() {
        out.push_str("no carparks match\n");
        return out;
    }

    out.push_str(&format!(
        "  {:<8}{:>6}  {:<6}{:<6}{:<11}NAME\n",
        "ID", "LOTS", "STATE", "TYPE", "DISTANCE"
    ));
    for item in &frame.list {
        let marker = if item.active { '*' } else { ' ' };
        out.push_str(&format!(
            "{marker} {:<8}{:>6}  {:<6}{:<6}{:<11}{}\n",
            item.id,
            item.available_lots,
            item.availability.to_string(),
            item.lot_type,
            item.distance,
            truncate(&format!("{} ({})", item.name, item.area), NAME_WIDTH),
        ));
    }
    out
}

pub(crate) fn format_detail(detail: &CarparkDetail) -> String {
    [
        detail.name.clone(),
        format!("  Area:        {}", detail.area),
        format!("  Available:   {} lots", detail.available_lots),
        format!("  Lot type:    {}", detail.lot_type),
        format!("  Agency:      {}", detail.agency),
        format!("  Distance:    {}", detail.distance),
        format!("  Coordinates: {}", detail.coordinates),
        format!("  Map:         {}", detail.maps_link),
    ]
    .iter()
    .fold(String::new(), |mut out, line| {
        out.push_str(line);
        out.push('\n');
        out
    })
}

pub(crate) fn format_lot_types(lot_types: &[&str]) -> String {
    if lot_types.is_empty() {
        return "no lot types in feed\n".to_string();
    }
    lot_types.iter().map(|t| format!("{t}\n")).collect()
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
