use anyhow::{bail, Context, Result};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId};
use std::collections::HashMap;
use std::path::Path;

pub fn run<P: AsRef<Path>>(inputs: &[P], output: P) -> Result<()> {
    if inputs.is_empty() {
        bail!("No input files specified");
    }

    let mut merged = Document::with_version("1.5");
    let mut page_refs: Vec<Object> = Vec::new();
    // One bookmark per input, pointing at that file's first page.
    let mut bookmarks: Vec<(String, ObjectId)> = Vec::new();

    for input in inputs {
        let path = input.as_ref();
        let doc = Document::load(path)
            .with_context(|| format!("Failed to load PDF: {}", path.display()))?;

        let pages = doc.get_pages();
        let Some(&first_page) = pages.values().next() else {
            bail!("Input PDF has no pages: {}", path.display());
        };

        // Renumber every object past the merged document's ids, then rewrite
        // internal references to match.
        let mut id_map: HashMap<ObjectId, ObjectId> = HashMap::new();
        let mut next_id = merged.max_id + 1;
        for &old_id in doc.objects.keys() {
            id_map.insert(old_id, (next_id, 0));
            next_id += 1;
        }
        merged.max_id = next_id - 1;

        for (&old_id, object) in &doc.objects {
            let mut object = object.clone();
            remap_references(&mut object, &id_map);
            merged.objects.insert(id_map[&old_id], object);
        }

        for (_, page_id) in pages {
            page_refs.push(Object::Reference(id_map[&page_id]));
        }

        bookmarks.push((bookmark_title(path), id_map[&first_page]));
        println!("Merging file {}", path.display());
    }

    let pages_id = merged.add_object(dictionary! {
        "Type" => "Pages",
        "Count" => page_refs.len() as i64,
        "Kids" => page_refs.clone(),
    });

    let outlines_id = add_outlines(&mut merged, &bookmarks);

    let catalog_id = merged.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
        "Outlines" => Object::Reference(outlines_id),
    });
    merged.trailer.set("Root", Object::Reference(catalog_id));
    merged
        .trailer
        .set("Size", Object::Integer(merged.max_id as i64 + 1));

    merged
        .save(&output)
        .with_context(|| format!("Failed to save merged PDF: {}", output.as_ref().display()))?;

    println!(
        "Merged {} files ({} pages) into {}",
        inputs.len(),
        page_refs.len(),
        output.as_ref().display()
    );

    Ok(())
}

/// Outline title derived from the file name: drop the extension, underscores
/// become spaces.
fn bookmark_title(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().replace('_', " "))
        .unwrap_or_else(|| path.display().to_string())
}

/// Build a flat outline tree with one top-level item per bookmark.
fn add_outlines(doc: &mut Document, bookmarks: &[(String, ObjectId)]) -> ObjectId {
    let outlines_id = doc.new_object_id();
    let item_ids: Vec<ObjectId> = bookmarks.iter().map(|_| doc.new_object_id()).collect();

    for (i, (title, page_id)) in bookmarks.iter().enumerate() {
        let mut item = dictionary! {
            "Title" => Object::string_literal(title.as_str()),
            "Parent" => Object::Reference(outlines_id),
            "Dest" => vec![
                Object::Reference(*page_id),
                Object::Name(b"Fit".to_vec()),
            ],
        };
        if i > 0 {
            item.set("Prev", Object::Reference(item_ids[i - 1]));
        }
        if i + 1 < item_ids.len() {
            item.set("Next", Object::Reference(item_ids[i + 1]));
        }
        doc.objects.insert(item_ids[i], Object::Dictionary(item));
    }

    let outlines = dictionary! {
        "Type" => "Outlines",
        "First" => Object::Reference(item_ids[0]),
        "Last" => Object::Reference(item_ids[item_ids.len() - 1]),
        "Count" => item_ids.len() as i64,
    };
    doc.objects.insert(outlines_id, Object::Dictionary(outlines));

    outlines_id
}

fn remap_references(object: &mut Object, id_map: &HashMap<ObjectId, ObjectId>) {
    match object {
        Object::Reference(id) => {
            if let Some(&new_id) = id_map.get(id) {
                *id = new_id;
            }
        }
        Object::Array(items) => {
            for item in items {
                remap_references(item, id_map);
            }
        }
        Object::Dictionary(dict) => remap_dictionary(dict, id_map),
        Object::Stream(stream) => remap_dictionary(&mut stream.dict, id_map),
        _ => {}
    }
}

fn remap_dictionary(dict: &mut Dictionary, id_map: &HashMap<ObjectId, ObjectId>) {
    let keys: Vec<Vec<u8>> = dict.iter().map(|(key, _)| key.clone()).collect();
    for key in keys {
        if let Ok(value) = dict.get_mut(&key) {
            remap_references(value, id_map);
        }
    }
}
