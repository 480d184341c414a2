//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use warraq_ast::{Direction, Template};
use warraq_core::{normalize, parse_segments, publish_nodes};
use warraq_glossary::{find_terms, Lexicon, DEFAULT_LIMIT};
use warraq_pdf::{render_document, RenderRequest};

/// Template selector as exposed on the command line
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum TemplateArg {
    /// Single-column, direction-aware document
    #[default]
    Classic,
    /// Condensed summary with chip TOC and term highlighting
    Ultra,
    /// Per-segment bilingual cards
    Dual,
    /// Single flowing sheet with metrics
    TextSheet,
    /// Verbatim monospace tree outline
    Mindmap,
    /// Classic plus contents page and back-links
    StudyPro,
}

impl From<TemplateArg> for Template {
    fn from(arg: TemplateArg) -> Self {
        match arg {
            TemplateArg::Classic => Template::Classic,
            TemplateArg::Ultra => Template::Ultra,
            TemplateArg::Dual => Template::Dual,
            TemplateArg::TextSheet => Template::TextSheet,
            TemplateArg::Mindmap => Template::Mindmap,
            TemplateArg::StudyPro => Template::StudyPro,
        }
    }
}

#[derive(Parser)]
#[command(name = "warraq")]
#[command(author, version, about = "Bilingual study documents from plain markup", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render input text to a paginated PDF
    Render {
        /// Input text file
        input: PathBuf,

        /// Output PDF file (defaults to the suggested filename)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Document title (a body <h1> overrides it)
        #[arg(short, long, default_value = "Study Notes")]
        title: String,

        /// Author/brand handle shown on the cover, without the @
        #[arg(short, long, default_value = "warraq")]
        author: String,

        /// Template variant
        #[arg(long, value_enum, default_value_t = TemplateArg::Classic)]
        template: TemplateArg,

        /// Body language; "en" switches the layout to LTR
        #[arg(long, default_value = "ar")]
        lang: String,
    },

    /// Parse bilingual segments and print them as JSON
    Segments {
        /// Input text file
        input: PathBuf,
    },

    /// Print the simplified publish-node list as JSON
    Nodes {
        /// Input text file
        input: PathBuf,
    },

    /// Detect glossary terms in English text and print them as JSON
    Glossary {
        /// Input text file
        input: PathBuf,

        /// Maximum number of detected terms
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },
}

/// Run the CLI with the given arguments.
pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    match cli.command {
        Commands::Render {
            input,
            output,
            title,
            author,
            template,
            lang,
        } => {
            let text = fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let mut request = RenderRequest::new(text, title, author);
            request.template = template.into();
            request.direction = Direction::from_lang(&lang);

            let doc = render_document(&request, None).context("Rendering failed")?;
            let path = output.unwrap_or_else(|| PathBuf::from(&doc.filename));
            fs::write(&path, &doc.bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {} ({} bytes)", path.display(), doc.bytes.len());
        }

        Commands::Segments { input } => {
            let text = fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let segments = parse_segments(&normalize(&text));
            println!("{}", serde_json::to_string_pretty(&segments)?);
        }

        Commands::Nodes { input } => {
            let text = fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let segments = parse_segments(&normalize(&text));
            let nodes = publish_nodes(&segments);
            println!("{}", serde_json::to_string_pretty(&nodes)?);
        }

        Commands::Glossary { input, limit } => {
            let text = fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let found = find_terms(&normalize(&text), &Lexicon::seed(), limit);
            println!("{}", serde_json::to_string_pretty(&found)?);
        }
    }

    Ok(())
}
