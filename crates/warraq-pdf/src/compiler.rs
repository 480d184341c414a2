//! Typst to PDF compiler
//!
//! Compiles Typst markup to PDF bytes using typst-as-lib.

use crate::error::{PdfError, Result};
use typst_as_lib::TypstEngine;

/// Compiler for converting Typst markup to PDF
pub struct Compiler;

impl Compiler {
    /// Compile Typst markup to PDF bytes
    ///
    /// # Arguments
    /// * `markup` - Typst markup string
    ///
    /// # Returns
    /// PDF bytes on success
    pub fn compile(markup: &str) -> Result<Vec<u8>> {
        Self::compile_with_fonts(markup, &[])
    }

    /// Compile with custom fonts
    ///
    /// # Arguments
    /// * `markup` - Typst markup string
    /// * `font_paths` - Paths to font files to include
    ///
    /// # Returns
    /// PDF bytes on success
    pub fn compile_with_fonts(markup: &str, font_paths: &[&str]) -> Result<Vec<u8>> {
        let mut builder = TypstEngine::builder().main_file(markup.to_string());

        for font_path in font_paths {
            let font_bytes = std::fs::read(font_path).map_err(|e| {
                PdfError::Font(format!("Failed to read font {}: {}", font_path, e))
            })?;
            builder = builder.fonts([font_bytes]);
        }

        let engine = builder.build();

        // compiled is Warned<Result<Document, Error>>:
        // compiled.output holds the Result, compiled.warnings any warnings
        let compiled = engine.compile();
        let document = compiled
            .output
            .map_err(|e| PdfError::Compilation(format!("{:?}", e)))?;

        let options = typst_pdf::PdfOptions::default();
        let pdf_bytes = typst_pdf::pdf(&document, &options)
            .map_err(|e| PdfError::Compilation(format!("PDF generation failed: {:?}", e)))?;

        Ok(pdf_bytes.into())
    }
}
