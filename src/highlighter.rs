use std::collections::HashMap;

use log::{debug, info};
use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};

use crate::error::AnalysisError;
use crate::keywords::{DEFAULT_HIGHLIGHT_COLOR, KeywordRegistry, Rgb};

/// Glyph advance in 1/1000 em used when a font carries no /Widths array.
const DEFAULT_GLYPH_UNITS: f32 = 500.0;
/// Highlight box extent above the baseline, in em.
const ASCENT_RATIO: f32 = 0.75;
/// Highlight box extent below the baseline, in em.
const DESCENT_RATIO: f32 = 0.25;

/// An axis-aligned region in page space (PDF points, origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq)]
struct Rect {
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
}

/// One text-showing operation reconstructed from a page's content stream:
/// decoded text, baseline origin, font size, and per-character advances.
#[derive(Debug, Clone)]
struct TextRun {
    text: String,
    x: f32,
    y: f32,
    font_size: f32,
    advances: Vec<f32>,
}

impl TextRun {
    /// Bounding region of `keyword` starting at character index `char_idx`.
    fn region(&self, char_idx: usize, char_len: usize) -> Rect {
        let x0: f32 = self.x + self.advances[..char_idx].iter().sum::<f32>();
        let width: f32 = self.advances[char_idx..char_idx + char_len].iter().sum();
        Rect {
            x0,
            y0: self.y - DESCENT_RATIO * self.font_size,
            x1: x0 + width,
            y1: self.y + ASCENT_RATIO * self.font_size,
        }
    }
}

/// Per-font decode and width information gathered from page resources.
struct FontInfo<'a> {
    dict: &'a Dictionary,
    first_char: i64,
    widths: Vec<f32>,
}

impl<'a> FontInfo<'a> {
    fn from_dict(doc: &'a Document, dict: &'a Dictionary) -> Self {
        let first_char = dict
            .get(b"FirstChar")
            .ok()
            .and_then(|obj| resolve(doc, obj).as_i64().ok())
            .unwrap_or(0);

        let widths = dict
            .get(b"Widths")
            .ok()
            .and_then(|obj| resolve(doc, obj).as_array().ok())
            .map(|array| {
                array
                    .iter()
                    .map(|w| as_number(resolve(doc, w)).unwrap_or(DEFAULT_GLYPH_UNITS))
                    .collect()
            })
            .unwrap_or_default();

        FontInfo {
            dict,
            first_char,
            widths,
        }
    }

    /// Width of one glyph in 1/1000 em.
    fn glyph_units(&self, code: u8) -> f32 {
        let idx = code as i64 - self.first_char;
        if idx >= 0 && (idx as usize) < self.widths.len() {
            self.widths[idx as usize]
        } else {
            DEFAULT_GLYPH_UNITS
        }
    }

    /// Decode a shown string through the font's encoding, falling back to
    /// Latin-1 when no usable encoding is present.
    fn decode(&self, doc: &Document, bytes: &[u8]) -> String {
        if let Ok(encoding) = self.dict.get_font_encoding(doc) {
            if let Ok(text) = Document::decode_text(&encoding, bytes) {
                return text;
            }
        }
        bytes.iter().map(|&b| b as char).collect()
    }
}

/// PDF highlight annotation component
///
/// Locates literal keyword occurrences on each page by replaying the page's
/// content stream (text matrix, font size, spacing, /Widths-based glyph
/// advances) and writes one `/Highlight` annotation per occurrence, colored
/// by the keyword's category. The search is case-SENSITIVE over the decoded
/// text, unlike the counting pass — a documented asymmetry carried over
/// as-is. A keyword split across two text-showing operators is not located.
pub struct PdfHighlighter;

impl PdfHighlighter {
    pub fn new() -> Self {
        PdfHighlighter
    }

    /// Produce a new PDF byte buffer with highlight annotations added and
    /// every other part of the document unchanged.
    pub fn highlight(
        &self,
        pdf_bytes: &[u8],
        registry: &KeywordRegistry,
        colors: &HashMap<String, Rgb>,
    ) -> Result<Vec<u8>, AnalysisError> {
        let mut doc = Document::load_mem(pdf_bytes)?;
        let pages: Vec<(u32, ObjectId)> = doc.get_pages().into_iter().collect();
        let mut total_annotations = 0;

        for (page_number, page_id) in pages {
            let runs = collect_text_runs(&doc, page_id)?;
            let mut annotation_ids = Vec::new();

            for entry in registry.iter() {
                let color = colors
                    .get(&entry.category)
                    .copied()
                    .unwrap_or(DEFAULT_HIGHLIGHT_COLOR);

                for rect in keyword_regions(&runs, &entry.keyword) {
                    let id = doc.add_object(highlight_annotation(rect, color));
                    annotation_ids.push(id);
                }
            }

            if !annotation_ids.is_empty() {
                debug!(
                    "Page {}: adding {} highlight annotations",
                    page_number,
                    annotation_ids.len()
                );
                total_annotations += annotation_ids.len();
                append_annotations(&mut doc, page_id, annotation_ids)?;
            }
        }

        info!("Highlighting complete: {} annotations added", total_annotations);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        Ok(buffer)
    }
}

impl Default for PdfHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// Replay a page's content stream into positioned text runs.
fn collect_text_runs(doc: &Document, page_id: ObjectId) -> Result<Vec<TextRun>, AnalysisError> {
    let fonts = doc.get_page_fonts(page_id).unwrap_or_default();
    let font_infos: HashMap<Vec<u8>, FontInfo> = fonts
        .iter()
        .map(|(name, dict)| (name.clone(), FontInfo::from_dict(doc, *dict)))
        .collect();

    let content_data = doc
        .get_page_content(page_id)
        .map_err(|e| AnalysisError::Highlight(format!("page content unavailable: {e}")))?;
    let content = Content::decode(&content_data)
        .map_err(|e| AnalysisError::Highlight(format!("content stream decode failed: {e}")))?;

    let mut runs = Vec::new();

    // Text state. Only the translation part of the text matrix is tracked;
    // rotated or scaled text gets approximate boxes.
    let mut text_matrix = [1.0f32, 0.0, 0.0, 1.0, 0.0, 0.0];
    let mut line_matrix = text_matrix;
    let mut current_font: Vec<u8> = Vec::new();
    let mut font_size: f32 = 12.0;
    let mut char_spacing: f32 = 0.0;
    let mut word_spacing: f32 = 0.0;
    let mut leading: f32 = 0.0;
    let mut in_text_block = false;

    for op in &content.operations {
        match op.operator.as_str() {
            "BT" => {
                in_text_block = true;
                text_matrix = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
                line_matrix = text_matrix;
            }
            "ET" => {
                in_text_block = false;
            }
            "Tf" => {
                if op.operands.len() >= 2 {
                    if let Ok(name) = op.operands[0].as_name() {
                        current_font = name.to_vec();
                    }
                    if let Some(size) = as_number(&op.operands[1]) {
                        font_size = size;
                    }
                }
            }
            "Tc" => {
                char_spacing = op.operands.first().and_then(as_number).unwrap_or(0.0);
            }
            "Tw" => {
                word_spacing = op.operands.first().and_then(as_number).unwrap_or(0.0);
            }
            "TL" => {
                leading = op.operands.first().and_then(as_number).unwrap_or(0.0);
            }
            "Td" | "TD" => {
                if op.operands.len() >= 2 {
                    let tx = as_number(&op.operands[0]).unwrap_or(0.0);
                    let ty = as_number(&op.operands[1]).unwrap_or(0.0);
                    if op.operator == "TD" {
                        leading = -ty;
                    }
                    line_matrix[4] += tx;
                    line_matrix[5] += ty;
                    text_matrix = line_matrix;
                }
            }
            "Tm" => {
                if op.operands.len() >= 6 {
                    for (i, operand) in op.operands.iter().take(6).enumerate() {
                        text_matrix[i] =
                            as_number(operand).unwrap_or(if i == 0 || i == 3 { 1.0 } else { 0.0 });
                    }
                    line_matrix = text_matrix;
                }
            }
            "T*" => {
                line_matrix[5] -= leading;
                text_matrix = line_matrix;
            }
            "Tj" | "'" | "\"" => {
                if op.operator != "Tj" {
                    // Quote operators move to the next line before showing;
                    // the double quote also resets word and char spacing.
                    if op.operator == "\"" && op.operands.len() >= 3 {
                        word_spacing = as_number(&op.operands[0]).unwrap_or(word_spacing);
                        char_spacing = as_number(&op.operands[1]).unwrap_or(char_spacing);
                    }
                    line_matrix[5] -= leading;
                    text_matrix = line_matrix;
                }
                if in_text_block {
                    let string_operand = op.operands.last();
                    if let Some(Object::String(bytes, _)) = string_operand {
                        let elements = [ShownElement::Text(bytes.as_slice())];
                        show_elements(
                            &elements,
                            &font_infos,
                            doc,
                            &current_font,
                            font_size,
                            char_spacing,
                            word_spacing,
                            &mut text_matrix,
                            &mut runs,
                        );
                    }
                }
            }
            "TJ" => {
                if in_text_block && !op.operands.is_empty() {
                    if let Ok(array) = op.operands[0].as_array() {
                        let elements: Vec<ShownElement> = array
                            .iter()
                            .filter_map(|item| match item {
                                Object::String(bytes, _) => {
                                    Some(ShownElement::Text(bytes.as_slice()))
                                }
                                other => as_number(other).map(ShownElement::Adjustment),
                            })
                            .collect();
                        show_elements(
                            &elements,
                            &font_infos,
                            doc,
                            &current_font,
                            font_size,
                            char_spacing,
                            word_spacing,
                            &mut text_matrix,
                            &mut runs,
                        );
                    }
                }
            }
            _ => {}
        }
    }

    debug!("Collected {} text runs from page object {:?}", runs.len(), page_id);
    Ok(runs)
}

enum ShownElement<'a> {
    Text(&'a [u8]),
    /// TJ position adjustment in 1/1000 em (positive moves left).
    Adjustment(f32),
}

/// Turn one text-showing operation into a run and advance the text matrix.
///
/// Kerning adjustments inside a TJ array are folded into the preceding
/// glyph's advance so keyword matches inside a kerned word stay contiguous.
#[allow(clippy::too_many_arguments)]
fn show_elements(
    elements: &[ShownElement],
    font_infos: &HashMap<Vec<u8>, FontInfo<'_>>,
    doc: &Document,
    current_font: &[u8],
    font_size: f32,
    char_spacing: f32,
    word_spacing: f32,
    text_matrix: &mut [f32; 6],
    runs: &mut Vec<TextRun>,
) {
    let font_info = font_infos.get(current_font);
    let mut run_x = text_matrix[4];
    let run_y = text_matrix[5];
    let mut text = String::new();
    let mut advances: Vec<f32> = Vec::new();

    for element in elements {
        match element {
            ShownElement::Text(bytes) => {
                let decoded = match font_info {
                    Some(info) => info.decode(doc, bytes),
                    None => bytes.iter().map(|&b| b as char).collect(),
                };
                let char_count = decoded.chars().count();
                if char_count == 0 {
                    continue;
                }

                let byte_advances: Vec<f32> = bytes
                    .iter()
                    .map(|&code| {
                        let units = font_info
                            .map(|info| info.glyph_units(code))
                            .unwrap_or(DEFAULT_GLYPH_UNITS);
                        let mut advance = units / 1000.0 * font_size + char_spacing;
                        if code == b' ' {
                            advance += word_spacing;
                        }
                        advance
                    })
                    .collect();

                if char_count == bytes.len() {
                    // Single-byte encoding: one advance per decoded char.
                    advances.extend(byte_advances);
                } else {
                    // Multi-byte encoding: distribute the total evenly.
                    let total: f32 = byte_advances.iter().sum();
                    advances.extend(std::iter::repeat_n(total / char_count as f32, char_count));
                }
                text.push_str(&decoded);
            }
            ShownElement::Adjustment(amount) => {
                let delta = -amount / 1000.0 * font_size;
                match advances.last_mut() {
                    Some(last) => *last += delta,
                    None => run_x += delta,
                }
            }
        }
    }

    let total_width: f32 = advances.iter().sum();
    text_matrix[4] = run_x + total_width;

    if !text.trim().is_empty() {
        runs.push(TextRun {
            text,
            x: run_x,
            y: run_y,
            font_size,
            advances,
        });
    }
}

/// Case-sensitive occurrences of `keyword` within single runs.
fn keyword_regions(runs: &[TextRun], keyword: &str) -> Vec<Rect> {
    if keyword.is_empty() {
        return Vec::new();
    }
    let keyword_chars = keyword.chars().count();
    let mut regions = Vec::new();

    for run in runs {
        for (byte_idx, _) in run.text.match_indices(keyword) {
            let char_idx = run.text[..byte_idx].chars().count();
            if char_idx + keyword_chars > run.advances.len() {
                continue;
            }
            let rect = run.region(char_idx, keyword_chars);
            if rect.x1 > rect.x0 {
                regions.push(rect);
            }
        }
    }

    regions
}

fn highlight_annotation(rect: Rect, color: Rgb) -> Dictionary {
    let (r, g, b) = color;
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Highlight",
        "Rect" => vec![
            Object::Real(rect.x0),
            Object::Real(rect.y0),
            Object::Real(rect.x1),
            Object::Real(rect.y1),
        ],
        // Quad order: upper-left, upper-right, lower-left, lower-right.
        "QuadPoints" => vec![
            Object::Real(rect.x0),
            Object::Real(rect.y1),
            Object::Real(rect.x1),
            Object::Real(rect.y1),
            Object::Real(rect.x0),
            Object::Real(rect.y0),
            Object::Real(rect.x1),
            Object::Real(rect.y0),
        ],
        "C" => vec![Object::Real(r), Object::Real(g), Object::Real(b)],
        "F" => 4,
    }
}

/// Append annotation references to the page's /Annots, handling both a
/// direct array and a referenced array object.
fn append_annotations(
    doc: &mut Document,
    page_id: ObjectId,
    annotation_ids: Vec<ObjectId>,
) -> Result<(), AnalysisError> {
    let references: Vec<Object> = annotation_ids.into_iter().map(Object::Reference).collect();

    let existing = doc
        .get_object(page_id)?
        .as_dict()?
        .get(b"Annots")
        .ok()
        .cloned();

    match existing {
        Some(Object::Reference(array_id)) => {
            let array = doc.get_object_mut(array_id)?.as_array_mut()?;
            array.extend(references);
        }
        Some(Object::Array(mut array)) => {
            array.extend(references);
            doc.get_object_mut(page_id)?
                .as_dict_mut()?
                .set("Annots", Object::Array(array));
        }
        _ => {
            doc.get_object_mut(page_id)?
                .as_dict_mut()?
                .set("Annots", Object::Array(references));
        }
    }

    Ok(())
}

/// Follow a reference one level; direct objects pass through.
fn resolve<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(object),
        _ => object,
    }
}

fn as_number(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
