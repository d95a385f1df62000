//! PDF serialization of a finished [`Surface`].

use super::surface::{DrawOp, PageContent, Surface};
use super::text::{encode_win_ansi, Font, MM_TO_PT};
use crate::error::Result;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Document-level metadata written to the PDF `Info` dictionary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Document title
    pub title: String,
    /// Subject line
    pub subject: Option<String>,
    /// Producing application
    pub producer: String,
}

impl DocumentInfo {
    /// Create document info with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the subject line.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self {
            title: "Summary Report".to_string(),
            subject: None,
            producer: format!("summarease {}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Serialize every page of `surface` into PDF bytes.
///
/// Text uses the standard Helvetica faces, page content and images are
/// Flate-compressed, and all pages share one resource dictionary.
pub fn write_pdf(surface: &Surface, info: &DocumentInfo) -> Result<Vec<u8>> {
    let config = surface.config();
    let page_height_pt = config.page_height * MM_TO_PT;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for font in [Font::Regular, Font::Bold] {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), font_id);
    }

    let mut xobjects = Dictionary::new();
    for (index, image) in surface.images().iter().enumerate() {
        let stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => image.width as i64,
                "Height" => image.height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "FlateDecode",
            },
            deflate(&image.rgb)?,
        );
        let image_id = doc.add_object(stream);
        xobjects.set(image_name(index), image_id);
    }

    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
        "XObject" => xobjects,
    });

    let mut kids: Vec<Object> = Vec::new();
    for page in surface.pages() {
        let content = Content {
            operations: page_operations(page, page_height_pt),
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! { "Filter" => "FlateDecode" },
            deflate(&content.encode()?)?,
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            (config.page_width * MM_TO_PT).into(),
            page_height_pt.into(),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = add_info(&mut doc, info);
    doc.trailer.set("Info", info_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    log::debug!(
        "Serialized {} pages, {} images into {} bytes",
        page_count,
        surface.images().len(),
        buffer.len()
    );
    Ok(buffer)
}

fn add_info(doc: &mut Document, info: &DocumentInfo) -> ObjectId {
    let created = chrono::Local::now().format("D:%Y%m%d%H%M%S").to_string();
    let mut dict = dictionary! {
        "Title" => Object::string_literal(info.title.as_str()),
        "Producer" => Object::string_literal(info.producer.as_str()),
        "CreationDate" => Object::string_literal(created),
    };
    if let Some(subject) = &info.subject {
        dict.set("Subject", Object::string_literal(subject.as_str()));
    }
    doc.add_object(dict)
}

fn image_name(index: usize) -> String {
    format!("Im{}", index)
}

fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Translate page operations into PDF content operators.
///
/// Surface coordinates are millimetres from the top; PDF user space is
/// points from the bottom.
fn page_operations(page: &PageContent, page_height_pt: f32) -> Vec<Operation> {
    let pt = |mm: f32| mm * MM_TO_PT;
    let flip = |mm: f32| page_height_pt - mm * MM_TO_PT;
    let mut ops = Vec::new();

    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                size,
                font,
                text,
            } => {
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![Object::Name(font.resource_name().as_bytes().to_vec()), (*size).into()],
                ));
                ops.push(Operation::new("Td", vec![pt(*x).into(), flip(*y).into()]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                gray,
            } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new("g", vec![(*gray).into()]));
                ops.push(Operation::new(
                    "re",
                    vec![
                        pt(*x).into(),
                        flip(y + height).into(),
                        pt(*width).into(),
                        pt(*height).into(),
                    ],
                ));
                ops.push(Operation::new("f", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                width,
            } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new("w", vec![pt(*width).into()]));
                ops.push(Operation::new("G", vec![Object::Integer(0)]));
                ops.push(Operation::new("m", vec![pt(*x1).into(), flip(*y1).into()]));
                ops.push(Operation::new("l", vec![pt(*x2).into(), flip(*y2).into()]));
                ops.push(Operation::new("S", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            DrawOp::Image {
                image,
                x,
                y,
                width,
                height,
            } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new(
                    "cm",
                    vec![
                        pt(*width).into(),
                        Object::Integer(0),
                        Object::Integer(0),
                        pt(*height).into(),
                        pt(*x).into(),
                        flip(y + height).into(),
                    ],
                ));
                ops.push(Operation::new(
                    "Do",
                    vec![Object::Name(image_name(*image).into_bytes())],
                ));
                ops.push(Operation::new("Q", vec![]));
            }
        }
    }

    ops
}
