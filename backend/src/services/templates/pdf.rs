use actix_web::web;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use genpdf::elements::{Break, FrameCellDecorator, Image as PdfImage, Paragraph, TableLayout};
use genpdf::style::Style;
use genpdf::{Alignment, Document};
use image::imageops::FilterType;
use image::{load_from_memory, DynamicImage, GenericImageView};
use png::{BitDepth as PngBitDepth, ColorType as PngColorType, Encoder as PngEncoder};
use serde::Deserialize;
use std::error::Error;
use std::path::PathBuf;
use tempfile::NamedTempFile;

use common::builder::render::{
    employee_grid_rows, format_money, net_pay_line, resolve_table, substitute_variables,
    TableKind,
};
use common::model::payslip::{Block, BlockContent, PayslipConfig, TableContent};
use common::model::record::PayslipRecord;

use crate::config::AppConfig;
use crate::db;

const IMAGE_DPI: f64 = 150.0;
// Browser CSS pixels are 96/in; PDF points are 72/in.
const PX_TO_PT: f32 = 0.75;

#[derive(Deserialize)]
pub struct PdfQuery {
    month: Option<String>,
}

/// Entry point for the HTTP handler: renders the template against the
/// employee's payslip for the requested month and returns the PDF inline.
pub async fn process(
    path: web::Path<(String, String)>,
    query: web::Query<PdfQuery>,
    app_config: web::Data<AppConfig>,
) -> impl actix_web::Responder {
    let (template_id, employee_id) = path.into_inner();
    let month = query
        .month
        .clone()
        .unwrap_or_else(db::current_month);
    match generate_payslip_pdf(&template_id, &employee_id, &month, &app_config).await {
        Ok(bytes) => actix_web::HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header(("Content-Disposition", "inline; filename=\"payslip.pdf\""))
            .body(bytes),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable()
            .body(format!("PDF generation failed: {}", e)),
    }
}

/// Parse a CSS pixel length like `"24px"` into PDF points.
fn px_to_pt(value: &str, fallback_px: f32) -> u8 {
    let px = value
        .trim_end_matches("px")
        .parse::<f32>()
        .unwrap_or(fallback_px);
    (px * PX_TO_PT).round().clamp(4.0, 72.0) as u8
}

/// Load the font family (adjust path/name if needed).
fn load_font() -> Result<genpdf::fonts::FontFamily<genpdf::fonts::FontData>, Box<dyn Error>> {
    if let Ok(family) = genpdf::fonts::from_files("./fonts", "Arial", None) {
        return Ok(family);
    }
    genpdf::fonts::from_files("./fonts", "LiberationSans", None).map_err(Into::into)
}

/// Configure and return a genpdf Document with font and decorator set.
fn configure_document(config: &PayslipConfig) -> Result<Document, Box<dyn Error>> {
    let font_family = load_font()?;
    let mut doc = Document::new(font_family);
    doc.set_title(&config.name);
    doc.set_font_size(px_to_pt(&config.styles.font_size, 12.0));
    doc.set_line_spacing(1.2);

    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(10);
    doc.set_page_decorator(decorator);
    Ok(doc)
}

/// Decode a logo/image value, accepting both a bare base64 string and a
/// `data:image/...;base64,` URL.
fn decode_image(value: &str) -> Option<Vec<u8>> {
    let raw = value.rsplit_once("base64,").map_or(value, |(_, b)| b);
    BASE64.decode(raw.trim()).ok()
}

/// Re-encode image bytes as an RGB PNG scaled to `max_px` CSS pixels and
/// embed it. The temp file must outlive rendering, so it is pushed into
/// `temp_files`.
fn push_image(
    bytes: &[u8],
    max_px: f64,
    temp_files: &mut Vec<NamedTempFile>,
    doc: &mut Document,
) -> Result<(), Box<dyn Error>> {
    let css_to_px = IMAGE_DPI / 96.0;
    let max_target_px = max_px * css_to_px;

    let img = load_from_memory(bytes)?;
    let (orig_w, orig_h) = img.dimensions();
    let scale = (max_target_px / orig_w as f64)
        .min(max_target_px / orig_h as f64)
        .min(1.0);
    let resized: DynamicImage = if scale >= 1.0 {
        img
    } else {
        let new_w = (orig_w as f64 * scale).max(1.0).round() as u32;
        let new_h = (orig_h as f64 * scale).max(1.0).round() as u32;
        img.resize(new_w, new_h, FilterType::Lanczos3)
    };

    // Flatten alpha over white and drop to RGB before PNG re-encoding.
    let rgba = resized.to_rgba8();
    let (w, h) = rgba.dimensions();
    let mut background = image::RgbaImage::from_pixel(w, h, image::Rgba([255, 255, 255, 255]));
    image::imageops::overlay(&mut background, &rgba, 0, 0);
    let rgb_image = DynamicImage::ImageRgba8(background).to_rgb8();
    let raw = rgb_image.into_raw();

    let mut tmp = NamedTempFile::new()?;
    {
        let file = tmp.as_file_mut();
        let mut encoder = PngEncoder::new(file, w, h);
        encoder.set_color(PngColorType::Rgb);
        encoder.set_depth(PngBitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&raw)?;
    }

    let path: PathBuf = tmp.path().to_path_buf();
    let mut img_elem = PdfImage::from_path(path)?;
    img_elem.set_dpi(IMAGE_DPI);
    temp_files.push(tmp);
    doc.push(img_elem);
    Ok(())
}

fn alignment_of(value: &str) -> Alignment {
    match value {
        "center" => Alignment::Center,
        "right" => Alignment::Right,
        _ => Alignment::Left,
    }
}

fn push_money_table(
    doc: &mut Document,
    kind: TableKind,
    content: &TableContent,
    record: Option<&PayslipRecord>,
) -> Result<(), Box<dyn Error>> {
    let resolved = resolve_table(kind, content, record);
    let columns = if resolved.show_ytd {
        vec![3, 1, 1]
    } else {
        vec![3, 1]
    };
    let mut table = TableLayout::new(columns);
    table.set_cell_decorator(FrameCellDecorator::new(false, true, false));

    let header = Style::new().bold();
    let mut row = table.row();
    row.push_element(Paragraph::new("").styled_string(resolved.title.clone(), header));
    row.push_element(Paragraph::new("").styled_string("Amount", header).aligned(Alignment::Right));
    if resolved.show_ytd {
        row.push_element(Paragraph::new("").styled_string("YTD", header).aligned(Alignment::Right));
    }
    row.push()?;

    for line in &resolved.rows {
        let mut row = table.row();
        row.push_element(Paragraph::new(line.name.clone()));
        row.push_element(
            Paragraph::new(format!("₹{}", format_money(line.amount))).aligned(Alignment::Right),
        );
        if resolved.show_ytd {
            row.push_element(
                Paragraph::new(format!("₹{}", format_money(line.ytd))).aligned(Alignment::Right),
            );
        }
        row.push()?;
    }

    let mut row = table.row();
    row.push_element(Paragraph::new("").styled_string("Total", header));
    row.push_element(
        Paragraph::new("")
            .styled_string(format!("₹{}", format_money(resolved.total_amount)), header)
            .aligned(Alignment::Right),
    );
    if resolved.show_ytd {
        row.push_element(
            Paragraph::new("")
                .styled_string(format!("₹{}", format_money(resolved.total_ytd)), header)
                .aligned(Alignment::Right),
        );
    }
    row.push()?;

    doc.push(table);
    Ok(())
}

fn push_block(
    doc: &mut Document,
    block: &Block,
    record: Option<&PayslipRecord>,
    temp_files: &mut Vec<NamedTempFile>,
) -> Result<(), Box<dyn Error>> {
    match &block.content {
        BlockContent::Text(text) => {
            let style = if text.weight == "bold" {
                Style::new().bold()
            } else {
                Style::new()
            };
            let style = style.with_font_size(px_to_pt(&text.size, 14.0));
            let rendered = substitute_variables(&text.text, record);
            for line in rendered.split('\n') {
                doc.push(
                    Paragraph::new("")
                        .styled_string(line, style)
                        .aligned(alignment_of(&text.align)),
                );
            }
        }
        BlockContent::Divider(_) => {
            // genpdf has no horizontal rule element; a framed empty table row
            // draws the same thin line across the page.
            let mut table = TableLayout::new(vec![1]);
            table.set_cell_decorator(FrameCellDecorator::new(false, true, false));
            let mut row = table.row();
            row.push_element(Break::new(0));
            row.push()?;
            doc.push(table);
        }
        BlockContent::Spacer(spacer) => {
            let lines = (px_to_pt(&spacer.height, 20.0) as f64 / 10.0).max(1.0);
            doc.push(Break::new(lines));
        }
        BlockContent::Image(image) => {
            if let Some(bytes) = decode_image(&image.url) {
                let max_px = image
                    .height
                    .trim_end_matches("px")
                    .parse::<f64>()
                    .unwrap_or(120.0);
                push_image(&bytes, max_px, temp_files, doc)?;
            }
        }
        BlockContent::CompanyHeader(header) => {
            if header.show_logo {
                if let Some(bytes) = decode_image(&header.logo_image) {
                    let max_px = header
                        .logo_size
                        .trim_end_matches("px")
                        .parse::<f64>()
                        .unwrap_or(80.0);
                    push_image(&bytes, max_px, temp_files, doc)?;
                }
            }
            let name_style = Style::new()
                .bold()
                .with_font_size(px_to_pt(&header.company_name_size, 24.0));
            doc.push(
                Paragraph::new("")
                    .styled_string(header.company_name.clone(), name_style)
                    .aligned(alignment_of(&header.logo_align)),
            );
            if header.show_address && !header.company_address.is_empty() {
                doc.push(
                    Paragraph::new(header.company_address.clone())
                        .aligned(alignment_of(&header.logo_align)),
                );
            }
        }
        BlockContent::PayslipTitle(title) => {
            let style = Style::new().bold().with_font_size(14);
            doc.push(
                Paragraph::new("")
                    .styled_string(substitute_variables(&title.text, record), style)
                    .aligned(alignment_of(&title.align)),
            );
        }
        BlockContent::EmployeeDetailsGrid(grid) => {
            let pairs = employee_grid_rows(&grid.fields, record);
            let columns = grid.columns.max(1) as usize;
            let mut table = TableLayout::new(vec![1; columns * 2]);
            table.set_cell_decorator(FrameCellDecorator::new(false, false, false));
            for chunk in pairs.chunks(columns) {
                let mut row = table.row();
                for (label, value) in chunk {
                    row.push_element(
                        Paragraph::new("").styled_string(label.clone(), Style::new().bold()),
                    );
                    row.push_element(Paragraph::new(value.clone()));
                }
                // Short final chunks still need every cell filled.
                for _ in chunk.len()..columns {
                    row.push_element(Break::new(0));
                    row.push_element(Break::new(0));
                }
                row.push()?;
            }
            doc.push(table);
        }
        BlockContent::EarningsTable(content) => {
            push_money_table(doc, TableKind::Earnings, content, record)?;
        }
        BlockContent::DeductionsTable(content) => {
            push_money_table(doc, TableKind::Deductions, content, record)?;
        }
        BlockContent::ReimbursementsTable(content) => {
            push_money_table(doc, TableKind::Reimbursements, content, record)?;
        }
        BlockContent::NetPayBox(net_pay) => {
            let (amount, words) = net_pay_line(record);
            doc.push(
                Paragraph::new("")
                    .styled_string(
                        format!("{}: {}", net_pay.title, amount),
                        Style::new().bold().with_font_size(12),
                    )
                    .aligned(Alignment::Center),
            );
            if !words.is_empty() {
                doc.push(Paragraph::new(words).aligned(Alignment::Center));
            }
        }
        BlockContent::Unknown => {
            doc.push(Paragraph::new("[unsupported component]"));
        }
    }
    doc.push(Break::new(0.5));
    Ok(())
}

/// Renders the template bound to one payroll record and returns the PDF
/// bytes. A missing record is not an error: the template renders with its
/// tokens intact, the same as the builder canvas.
pub async fn generate_payslip_pdf(
    template_id: &str,
    employee_id: &str,
    month: &str,
    app_config: &AppConfig,
) -> Result<Vec<u8>, Box<dyn Error>> {
    let config = super::get::get_template(template_id, app_config).await?;
    let record =
        crate::services::payroll::payslip::get_payslip(employee_id, month, app_config).await?;

    let mut doc = configure_document(&config)?;
    let mut temp_files: Vec<NamedTempFile> = Vec::new();
    for block in config.ordered_blocks() {
        push_block(&mut doc, block, record.as_ref(), &mut temp_files)?;
    }

    let mut bytes: Vec<u8> = Vec::new();
    doc.render(&mut bytes)?;
    // temp_files dropped and cleaned up here
    Ok(bytes)
}
