use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use traducto_core::{
    DEFAULT_LAYOUT, DeepLTranslator, FetchConfig, Fragment, MetaFields, PipelineConfig, PseudoTranslator,
    TranslationMatrix, Translator, fetch_file, fetch_stdin, fetch_url, fill_matrix, prepare, reconstruct_all,
};

mod echo;

use echo::{print_banner, print_info, print_step, print_success, print_warning};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Per-run file holding the fragment list, meta fields, and language set
const STRINGS_FILE: &str = "strings.json";
/// Per-run placeholder template document
const TEMPLATE_FILE: &str = "template.html";
/// Per-run filled translation matrix
const MATRIX_FILE: &str = "matrix.json";

/// Translation provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Provider {
    Pseudo,
    DeepL,
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pseudo" | "mock" => Ok(Self::Pseudo),
            "deepl" => Ok(Self::DeepL),
            _ => Err(format!("Invalid provider: {}. Valid options: pseudo, deepl", s)),
        }
    }
}

/// Everything the translate and render stages need from a prepare run.
#[derive(Debug, Serialize, Deserialize)]
struct RunManifest {
    source_lang: String,
    target_langs: Vec<String>,
    fragments: Vec<Fragment>,
    meta: MetaFields,
}

/// Prepare web pages for localization and render translated documents
#[derive(Parser, Debug)]
#[command(name = "traducto")]
#[command(author = "Traducto Contributors")]
#[command(version)]
#[command(about = "Prepare web pages for localization", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract fragments and build the placeholder template
    Prepare {
        /// URL to fetch, local HTML file, or "-" for stdin
        #[arg(value_name = "INPUT")]
        input: String,

        /// Output directory (default: derived from the document title)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Source language of the document
        #[arg(long, default_value = "EN", value_name = "LANG")]
        from: String,

        /// Comma-separated target languages
        #[arg(long, value_delimiter = ',', default_value = "FR,NL", value_name = "LANGS")]
        to: Vec<String>,

        /// Layout file with a {{ content }} slot (default: built-in layout)
        #[arg(long, value_name = "FILE")]
        layout: Option<PathBuf>,

        /// HTTP timeout in seconds
        #[arg(long, default_value = "30", value_name = "SECS")]
        timeout: u64,

        /// Custom User-Agent for HTTP requests
        #[arg(long, value_name = "UA")]
        user_agent: Option<String>,
    },

    /// Fill the translation matrix by calling a provider per cell
    Translate {
        /// Directory produced by `prepare`
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Translation provider (pseudo, deepl)
        #[arg(long, default_value = "pseudo", value_name = "PROVIDER")]
        provider: Provider,
    },

    /// Render one HTML document per target language
    Render {
        /// Directory holding template.html and matrix.json
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },

    /// Generate a shell completion script on stdout
    Completions {
        /// Shell to generate for
        #[arg(value_enum, value_name = "SHELL")]
        shell: clap_complete::Shell,
    },
}

/// Turn a document title into a usable directory name
fn safe_dir_name(title: &str) -> String {
    let cleaned: String = title
        .replace(':', " -")
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '<' | '>' | '"' | '|' | '?' | '*') { '-' } else { c })
        .collect();
    let cleaned = cleaned.trim().to_string();

    if cleaned.is_empty() { "traducto-run".to_string() } else { cleaned }
}

async fn acquire_input(input: &str, timeout: u64, user_agent: Option<String>, verbose: bool) -> anyhow::Result<String> {
    if input == "-" {
        if verbose {
            print_step(1, 4, "Reading from stdin");
        }
        fetch_stdin().context("Failed to read from stdin")
    } else if input.starts_with("http://") || input.starts_with("https://") {
        if verbose {
            print_step(1, 4, &format!("Fetching from {}", input.bright_white().underline()));
        }

        let config = FetchConfig {
            timeout,
            user_agent: user_agent.unwrap_or_else(|| "Mozilla/5.0 (compatible; Traducto/0.3)".to_string()),
        };

        fetch_url(input, &config).await.context("Failed to fetch URL")
    } else {
        if verbose {
            print_step(1, 4, &format!("Reading from file {}", input.bright_white()));
        }
        fetch_file(input).with_context(|| format!("Failed to read file: {}", input))
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_prepare(
    input: String,
    output: Option<PathBuf>,
    from: String,
    to: Vec<String>,
    layout: Option<PathBuf>,
    timeout: u64,
    user_agent: Option<String>,
    verbose: bool,
) -> anyhow::Result<()> {
    let html = acquire_input(&input, timeout, user_agent, verbose).await?;

    let layout = match layout {
        Some(path) => {
            fs::read_to_string(&path).with_context(|| format!("Failed to read layout: {}", path.display()))?
        }
        None => DEFAULT_LAYOUT.to_string(),
    };

    if verbose {
        print_step(2, 4, "Extracting fragments and building template");
    }

    let config = PipelineConfig::builder()
        .source_lang(from.clone())
        .target_langs(to.clone())
        .layout(layout)
        .build();

    let prepared = prepare(&html, &config).context("Failed to prepare document")?;

    if verbose {
        eprintln!(
            "  {} {}",
            "Fragments:".dimmed(),
            prepared.fragments.len().to_string().bright_white()
        );
        if !prepared.meta.title.is_empty() {
            eprintln!("  {} {}", "Title:".dimmed(), prepared.meta.title.bright_white());
        }
    }

    let dir = output.unwrap_or_else(|| PathBuf::from(safe_dir_name(&prepared.meta.title)));
    fs::create_dir_all(&dir).with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    if verbose {
        print_step(3, 4, "Writing template and original document");
    }

    fs::write(dir.join(TEMPLATE_FILE), &prepared.template).context("Failed to write template")?;
    fs::write(dir.join(format!("{}.html", from.to_lowercase())), &prepared.original)
        .context("Failed to write original document")?;

    if verbose {
        print_step(4, 4, "Writing strings manifest");
    }

    let manifest = RunManifest {
        source_lang: from,
        target_langs: to,
        fragments: prepared.fragments,
        meta: prepared.meta,
    };
    let json = serde_json::to_string_pretty(&manifest).context("Failed to serialize strings manifest")?;
    fs::write(dir.join(STRINGS_FILE), json).context("Failed to write strings manifest")?;

    print_success(&format!("Prepared run written to {}", dir.display()));

    Ok(())
}

async fn run_translate(dir: PathBuf, provider: Provider, verbose: bool) -> anyhow::Result<()> {
    let manifest_path = dir.join(STRINGS_FILE);
    let manifest: RunManifest = serde_json::from_str(
        &fs::read_to_string(&manifest_path)
            .with_context(|| format!("Failed to read {}", manifest_path.display()))?,
    )
    .context("Failed to parse strings manifest")?;

    if verbose {
        print_step(1, 3, "Creating translation matrix");
        eprintln!(
            "  {} {} rows × {} languages",
            "Size:".dimmed(),
            manifest.fragments.len() + MetaFields::KEYS.len(),
            manifest.target_langs.len()
        );
    }

    let mut matrix = TranslationMatrix::new(
        manifest.target_langs.clone(),
        manifest.fragments.len(),
        &MetaFields::KEYS,
    );

    let translator: Box<dyn Translator> = match provider {
        Provider::Pseudo => {
            if verbose {
                print_warning("Using the pseudo provider; output is tagged source text, not translations");
            }
            Box::new(PseudoTranslator)
        }
        Provider::DeepL => Box::new(DeepLTranslator::from_env().context("Failed to configure DeepL provider")?),
    };

    if verbose {
        print_step(2, 3, "Filling matrix");
    }

    fill_matrix(
        &mut matrix,
        &manifest.fragments,
        &manifest.meta,
        &manifest.source_lang,
        translator.as_ref(),
    )
    .await;

    if verbose {
        print_step(3, 3, "Writing matrix");
    }

    let json = serde_json::to_string_pretty(&matrix).context("Failed to serialize matrix")?;
    fs::write(dir.join(MATRIX_FILE), json).context("Failed to write matrix")?;

    print_success(&format!("Matrix written to {}", dir.join(MATRIX_FILE).display()));

    Ok(())
}

fn run_render(dir: &Path, verbose: bool) -> anyhow::Result<()> {
    let template_path = dir.join(TEMPLATE_FILE);
    let template = fs::read_to_string(&template_path)
        .with_context(|| format!("Failed to read {}", template_path.display()))?;

    let matrix_path = dir.join(MATRIX_FILE);
    let matrix: TranslationMatrix = serde_json::from_str(
        &fs::read_to_string(&matrix_path).with_context(|| format!("Failed to read {}", matrix_path.display()))?,
    )
    .context("Failed to parse matrix")?;

    if verbose {
        print_step(1, 1, &format!("Rendering {} languages", matrix.languages().len()));
    }

    for (lang, html) in reconstruct_all(&template, &matrix) {
        let path = dir.join(format!("{}.html", lang.to_lowercase()));
        fs::write(&path, html).with_context(|| format!("Failed to write {}", path.display()))?;
        if verbose {
            print_info(&format!("Wrote {}", path.display()));
        }
    }

    print_success("Render complete");

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        print_banner();
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "traducto=debug,traducto_core=debug".into()),
            )
            .with_writer(io::stderr)
            .init();
    }

    match cli.command {
        Command::Prepare { input, output, from, to, layout, timeout, user_agent } => {
            run_prepare(input, output, from, to, layout, timeout, user_agent, cli.verbose).await
        }
        Command::Translate { dir, provider } => run_translate(dir, provider, cli.verbose).await,
        Command::Render { dir } => run_render(&dir, cli.verbose),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "traducto", &mut io::stdout());
            Ok(())
        }
    }
}
