use crate::sheet::{build_sheet, Selection, SHEET_HEIGHT_PX, SHEET_WIDTH_PX};
use anyhow::{Context, Result};
use std::path::Path;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(input: P, sel: Selection, output: Q) -> Result<()> {
    let input = input.as_ref();
    let img = image::open(input)
        .with_context(|| format!("Failed to open image: {}", input.display()))?;

    let sheet = build_sheet(&img, sel)?;

    let output = output.as_ref();
    sheet
        .save(output)
        .with_context(|| format!("Failed to save image: {}", output.display()))?;

    println!(
        "Saved {}x{} px sheet (6x4 in at 300 PPI) to {}",
        SHEET_WIDTH_PX,
        SHEET_HEIGHT_PX,
        output.display()
    );

    Ok(())
}
