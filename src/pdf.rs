use crate::models::{Exercise, FitnessPlan};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use std::io::BufWriter;
use thiserror::Error;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const TOP_MARGIN: f32 = 15.0;
const BOTTOM_LIMIT: f32 = 270.0;
const TIP_WRAP_CHARS: usize = 95;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF rendering failed: {0}")]
    Render(String),
}

/// Text-only export: workout pages, then diet, then tips.
pub fn render_plan_pdf(plan: &FitnessPlan) -> Result<Vec<u8>, ExportError> {
    let (doc, page, layer) = PdfDocument::new("AI Fitness Plan", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Render(format!("{e:?}")))?;
    let mut pen = Pen { doc: &doc, font, layer: doc.get_page(page).get_layer(layer), y: TOP_MARGIN, pages: 1 };

    pen.line("AI Fitness Plan", 20.0, 10.0, 10.0);
    pen.line("Workout Plan", 16.0, 10.0, 8.0);
    for (i, day) in plan.workout_plan.iter().enumerate() {
        pen.line(&format!("{}. {}", i + 1, day.day), 13.0, 10.0, 6.0);
        for ex in &day.exercises {
            pen.line(&exercise_line(ex), 10.0, 14.0, 5.0);
        }
        pen.gap(4.0);
    }

    pen.new_page();
    pen.line("Diet Plan", 16.0, 10.0, 8.0);
    let diet = &plan.diet_plan;
    for (title, items) in [
        ("Breakfast", &diet.breakfast),
        ("Lunch", &diet.lunch),
        ("Dinner", &diet.dinner),
        ("Snacks", &diet.snacks),
    ] {
        pen.line(title, 13.0, 10.0, 6.0);
        for item in items {
            pen.line(&format!("- {item}"), 10.0, 14.0, 5.0);
        }
        pen.gap(4.0);
    }

    pen.new_page();
    pen.line("AI Tips", 16.0, 10.0, 8.0);
    for tip in &plan.tips {
        for row in wrap(&format!("- {tip}"), TIP_WRAP_CHARS) {
            pen.line(&row, 10.0, 14.0, 5.0);
        }
    }
    drop(pen);

    let mut buf: Vec<u8> = Vec::new();
    {
        let mut writer = BufWriter::new(&mut buf);
        doc.save(&mut writer).map_err(|e| ExportError::Render(format!("{e:?}")))?;
    }
    Ok(buf)
}

fn exercise_line(ex: &Exercise) -> String {
    let mut line = format!("- {}", ex.name);
    let sets = ex.sets.to_string();
    if !sets.is_empty() && sets != "0" {
        line.push_str(&format!(": {sets} sets"));
    }
    if !ex.reps.is_empty() {
        line.push_str(&format!(" x {}", ex.reps));
    }
    if !ex.rest.is_empty() {
        line.push_str(&format!(" (Rest: {})", ex.rest));
    }
    line
}

/// Greedy word wrap on character counts.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            rows.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

/// Writes top-down (y measured from the top edge) and breaks pages.
struct Pen<'a> {
    doc: &'a PdfDocumentReference,
    font: IndirectFontRef,
    layer: PdfLayerReference,
    y: f32,
    pages: usize,
}

impl Pen<'_> {
    fn line(&mut self, text: &str, size: f32, x: f32, advance: f32) {
        self.layer.use_text(text, size, Mm(x), Mm(PAGE_HEIGHT - self.y), &self.font);
        self.y += advance;
        if self.y > BOTTOM_LIMIT {
            self.new_page();
        }
    }

    fn gap(&mut self, advance: f32) {
        self.y += advance;
    }

    fn new_page(&mut self) {
        self.pages += 1;
        let (page, layer) =
            self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), format!("Page {}", self.pages));
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = TOP_MARGIN;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sets;
    use crate::testing::stub_plan;

    #[test]
    fn renders_a_pdf_document() {
        let bytes = render_plan_pdf(&stub_plan()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn exercise_line_skips_empty_fields() {
        let ex = Exercise {
            name: "Plank".into(),
            sets: Sets::from(3u32),
            reps: "45s".into(),
            rest: String::new(),
            notes: None,
        };
        assert_eq!(exercise_line(&ex), "- Plank: 3 sets x 45s");
    }

    #[test]
    fn wrap_respects_width() {
        let rows = wrap("one two three four five", 9);
        assert_eq!(rows, vec!["one two", "three", "four five"]);
    }
}
