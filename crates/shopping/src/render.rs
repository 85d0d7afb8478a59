use std::collections::BTreeMap;

use lopdf::{
    Dictionary, Document, Object, ObjectId, Stream, StringFormat,
    content::{Content, Operation},
    dictionary,
};
use ttf_parser::{Face, GlyphId};

use crate::ShoppingItem;

// A4 in points.
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;

const MARGIN_X: i64 = 40;
const HEADER_Y: i64 = 790;
const HEADER_FONT_SIZE: i64 = 14;
const FIRST_LINE_Y: i64 = 750;
const LINE_SPACING: i64 = 30;
const FONT_SIZE: i64 = 11;
const BOTTOM_MARGIN: i64 = 40;

/// Embedded whole so Cyrillic and other non-Latin names render.
const FONT_DATA: &[u8] = include_bytes!("../fonts/DejaVuSans.ttf");
const FONT_NAME: &str = "DejaVuSans";

fn header(owner: &str) -> String {
    format!("Shopping list for {owner}:")
}

/// First letter upper-cased, the rest lower-cased.
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn line(item: &ShoppingItem) -> String {
    format!(
        "{} - {} {}.",
        capitalize(&item.name),
        item.amount,
        item.measurement_unit
    )
}

pub fn render_text(owner: &str, items: &[ShoppingItem]) -> String {
    let mut text = header(owner);
    text.push('\n');

    for item in items {
        text.push_str(&line(item));
        text.push('\n');
    }

    text
}

/// Maps text to two-byte glyph ids (`Identity-H`) and remembers which
/// glyphs were drawn, for the width table and the ToUnicode map.
struct GlyphEncoder<'a> {
    face: Face<'a>,
    used: BTreeMap<u16, char>,
}

impl<'a> GlyphEncoder<'a> {
    fn new(data: &'a [u8]) -> anyhow::Result<Self> {
        Ok(Self {
            face: Face::parse(data, 0)?,
            used: BTreeMap::new(),
        })
    }

    /// Characters missing from the font fall back to glyph 0 (`.notdef`).
    fn encode(&mut self, text: &str) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(text.len() * 2);

        for c in text.chars() {
            let GlyphId(id) = self.face.glyph_index(c).unwrap_or(GlyphId(0));
            if id != 0 {
                self.used.entry(id).or_insert(c);
            }
            bytes.extend_from_slice(&id.to_be_bytes());
        }

        bytes
    }

    /// Glyph advance in PDF text space units (1/1000 em).
    fn width(&self, id: u16) -> i64 {
        let advance = self.face.glyph_hor_advance(GlyphId(id)).unwrap_or(0);
        i64::from(advance) * 1000 / i64::from(self.face.units_per_em().max(1))
    }

    fn scaled(&self, value: i16) -> i64 {
        i64::from(value) * 1000 / i64::from(self.face.units_per_em().max(1))
    }

    /// `W` array entries, `id [width]` per drawn glyph.
    fn widths(&self) -> Vec<Object> {
        self.used
            .keys()
            .flat_map(|&id| {
                [
                    Object::Integer(i64::from(id)),
                    Object::Array(vec![Object::Integer(self.width(id))]),
                ]
            })
            .collect()
    }

    /// CMap translating glyph ids back to Unicode, so the text can be
    /// searched and copied.
    fn to_unicode(&self) -> String {
        let mut cmap = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n",
        );

        let entries = self.used.iter().collect::<Vec<_>>();
        // A bfchar block holds at most 100 entries.
        for chunk in entries.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
            for (id, c) in chunk {
                let unicode = c
                    .encode_utf16(&mut [0; 2])
                    .iter()
                    .map(|unit| format!("{unit:04X}"))
                    .collect::<String>();
                cmap.push_str(&format!("<{id:04X}> <{unicode}>\n"));
            }
            cmap.push_str("endbfchar\n");
        }

        cmap.push_str(
            "endcmap\n\
             CMapName currentdict /CMap defineresource pop\n\
             end\n\
             end\n",
        );

        cmap
    }

    /// Adds the Type0 font with its descendant, descriptor, font file and
    /// ToUnicode map. Returns the Type0 font id.
    fn embed(&self, doc: &mut Document) -> ObjectId {
        let bbox = self.face.global_bounding_box();
        let ascent = self.scaled(self.face.ascender());
        let descent = self.scaled(self.face.descender());
        let cap_height = self
            .face
            .capital_height()
            .map_or(ascent, |height| self.scaled(height));

        let file_id = doc.add_object(Stream::new(
            dictionary! { "Length1" => FONT_DATA.len() as i64 },
            FONT_DATA.to_vec(),
        ));
        let descriptor_id = doc.add_object(dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => FONT_NAME,
            "Flags" => 32,
            "FontBBox" => vec![
                Object::Integer(self.scaled(bbox.x_min)),
                Object::Integer(self.scaled(bbox.y_min)),
                Object::Integer(self.scaled(bbox.x_max)),
                Object::Integer(self.scaled(bbox.y_max)),
            ],
            "ItalicAngle" => 0,
            "Ascent" => ascent,
            "Descent" => descent,
            "CapHeight" => cap_height,
            "StemV" => 80,
            "FontFile2" => file_id,
        });
        let cid_font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "CIDFontType2",
            "BaseFont" => FONT_NAME,
            "CIDSystemInfo" => dictionary! {
                "Registry" => Object::string_literal("Adobe"),
                "Ordering" => Object::string_literal("Identity"),
                "Supplement" => 0,
            },
            "FontDescriptor" => descriptor_id,
            "CIDToGIDMap" => "Identity",
            "DW" => 1000,
            "W" => self.widths(),
        });
        let to_unicode_id = doc.add_object(Stream::new(
            Dictionary::new(),
            self.to_unicode().into_bytes(),
        ));

        doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => FONT_NAME,
            "Encoding" => "Identity-H",
            "DescendantFonts" => vec![Object::Reference(cid_font_id)],
            "ToUnicode" => to_unicode_id,
        })
    }
}

fn show_text(
    operations: &mut Vec<Operation>,
    encoder: &mut GlyphEncoder,
    x: i64,
    y: i64,
    size: i64,
    text: &str,
) {
    operations.push(Operation::new("BT", vec![]));
    operations.push(Operation::new(
        "Tf",
        vec![Object::Name(b"F1".to_vec()), Object::Integer(size)],
    ));
    operations.push(Operation::new(
        "Td",
        vec![Object::Integer(x), Object::Integer(y)],
    ));
    operations.push(Operation::new(
        "Tj",
        vec![Object::String(encoder.encode(text), StringFormat::Hexadecimal)],
    ));
    operations.push(Operation::new("ET", vec![]));
}

/// Lays the list out on as many A4 pages as needed. The header sits on the
/// first page only.
fn paginate(
    encoder: &mut GlyphEncoder,
    owner: &str,
    items: &[ShoppingItem],
) -> Vec<Vec<Operation>> {
    let mut pages = vec![];
    let mut operations = vec![];
    show_text(
        &mut operations,
        encoder,
        MARGIN_X,
        HEADER_Y,
        HEADER_FONT_SIZE,
        &header(owner),
    );

    let mut y = FIRST_LINE_Y;
    for item in items {
        if y < BOTTOM_MARGIN {
            pages.push(std::mem::take(&mut operations));
            y = HEADER_Y;
        }

        show_text(&mut operations, encoder, MARGIN_X, y, FONT_SIZE, &line(item));
        y -= LINE_SPACING;
    }

    pages.push(operations);
    pages
}

pub fn render_pdf(owner: &str, items: &[ShoppingItem]) -> anyhow::Result<Vec<u8>> {
    let mut encoder = GlyphEncoder::new(FONT_DATA)?;
    let pages = paginate(&mut encoder, owner, items);

    let mut doc = Document::with_version("1.5");
    let pages_id: ObjectId = doc.new_object_id();

    let font_id = encoder.embed(&mut doc);
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids = vec![];
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(PAGE_WIDTH),
            Object::Integer(PAGE_HEIGHT),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal("Shopping list"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;

    Ok(buffer)
}
