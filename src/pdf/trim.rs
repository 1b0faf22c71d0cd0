use anyhow::{anyhow, bail, Context, Result};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId};

/// Normalized crop region, top-left origin, each coordinate a fraction of
/// the page's width or height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl TrimRect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Result<Self> {
        for (name, value) in [
            ("left", left),
            ("top", top),
            ("right", right),
            ("bottom", bottom),
        ] {
            if !(0.0..=1.0).contains(&value) {
                bail!("Trim {} must be between 0 and 1, got {}", name, value);
            }
        }
        if left >= right {
            bail!("Trim left ({}) must be less than right ({})", left, right);
        }
        if top >= bottom {
            bail!("Trim top ({}) must be less than bottom ({})", top, bottom);
        }
        Ok(TrimRect {
            left,
            top,
            right,
            bottom,
        })
    }

    pub fn from_slice(values: &[f32]) -> Result<Self> {
        match values {
            [left, top, right, bottom] => Self::new(*left, *top, *right, *bottom),
            _ => bail!("Trim takes exactly four values, got {}", values.len()),
        }
    }
}

/// Crop a page in place: the trimmed region is rescaled to fill the page's
/// original size. Content outside the region maps outside the page and is
/// clipped by the CropBox.
pub fn trim_page(doc: &mut Document, page_id: ObjectId, trim: &TrimRect) -> Result<()> {
    let (llx, lly, urx, ury) = media_box(doc, page_id)?;
    let width = urx - llx;
    let height = ury - lly;

    // The trim rectangle is top-left based; PDF user space is bottom-left.
    let x0 = llx + width * trim.left;
    let x1 = llx + width * trim.right;
    let y1 = ury - height * trim.top;
    let y0 = ury - height * trim.bottom;

    let sx = width / (x1 - x0);
    let sy = height / (y1 - y0);
    let tx = llx - sx * x0;
    let ty = lly - sy * y0;

    let data = doc
        .get_page_content(page_id)
        .context("Failed to read page content")?;
    let content = Content::decode(&data).context("Failed to decode page content")?;

    let mut operations = Vec::with_capacity(content.operations.len() + 3);
    operations.push(Operation::new("q", vec![]));
    operations.push(Operation::new(
        "cm",
        vec![
            Object::Real(sx),
            Object::Real(0.0),
            Object::Real(0.0),
            Object::Real(sy),
            Object::Real(tx),
            Object::Real(ty),
        ],
    ));
    operations.extend(content.operations);
    operations.push(Operation::new("Q", vec![]));

    let encoded = Content { operations }
        .encode()
        .context("Failed to encode page content")?;
    doc.change_page_content(page_id, encoded)
        .context("Failed to replace page content")?;

    let full_box = Object::Array(vec![
        Object::Real(llx),
        Object::Real(lly),
        Object::Real(urx),
        Object::Real(ury),
    ]);
    let page = doc.get_dictionary_mut(page_id)?;
    page.set("MediaBox", full_box.clone());
    page.set("CropBox", full_box);
    // Stale print boxes would disagree with the rewritten geometry.
    page.remove(b"BleedBox");
    page.remove(b"TrimBox");
    page.remove(b"ArtBox");

    Ok(())
}

/// Effective MediaBox of a page, following Parent inheritance.
fn media_box(doc: &Document, page_id: ObjectId) -> Result<(f32, f32, f32, f32)> {
    let mut current = Some(page_id);
    while let Some(id) = current {
        let dict = doc
            .get_object(id)
            .and_then(|obj| obj.as_dict())
            .map_err(|_| anyhow!("Page tree node is not a dictionary"))?;
        if let Some(rect) = read_box(doc, dict) {
            return Ok(rect);
        }
        current = dict.get(b"Parent").and_then(|p| p.as_reference()).ok();
    }
    Err(anyhow!("Page has no MediaBox"))
}

fn read_box(doc: &Document, dict: &lopdf::Dictionary) -> Option<(f32, f32, f32, f32)> {
    let raw = dict.get(b"MediaBox").ok()?;
    let resolved = match raw {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    let arr = resolved.as_array().ok()?;
    if arr.len() != 4 {
        return None;
    }
    Some((
        object_to_f32(&arr[0])?,
        object_to_f32(&arr[1])?,
        object_to_f32(&arr[2])?,
        object_to_f32(&arr[3])?,
    ))
}

fn object_to_f32(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(f) => Some(*f),
        _ => None,
    }
}
