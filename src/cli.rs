//! Minimal CLI: parse schemas → map → post-process → (go | decls)
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::decl::{SourceFile, TypeDecl};
use crate::emit::Emitter;
use crate::mapper::Mapper;
use crate::name::NameMap;
use crate::postprocess::{self, UnresolvedPolicy};
use crate::schema::Schema;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate statically typed bid-request/response declarations from JSON Schema documents
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// map, post-process, and emit Go declaration source
    Go(GoOut),
    /// map and post-process, then print the declaration graph as JSON
    Decls(DeclsOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// name-override file: one `<raw> <replacement>` mapping per line
    #[arg(long)]
    name_map: Option<PathBuf>,

    /// fail on field identifiers that resolve to neither a declaration nor
    /// a builtin, instead of marking them optional
    #[arg(long, default_value_t = false)]
    deny_unresolved: bool,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug)]
struct GoOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// package clause of the generated source
    #[arg(long, default_value = "openrtb")]
    package: String,

    /// import paths of the generated source (the decimal module by default)
    #[arg(long, default_value = "h12.io/decimal")]
    import: Vec<String>,

    /// output .go file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct DeclsOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    /// Map every input document and post-process the concatenated result.
    /// Any failure aborts the run; there is no partial output.
    fn build_decls(&self) -> anyhow::Result<Vec<TypeDecl>> {
        let names = match self.name_map.as_deref() {
            Some(path) => NameMap::load(path)?,
            None => NameMap::default(),
        };
        let mapper = Mapper::new(names);

        let source_paths =
            resolve_file_path_patterns(&self.input).context("failed to resolve input file paths")?;
        let mut decls = Vec::new();
        for source_path in source_paths {
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read schema file {}", source_path.display()))?;
            let schema = Schema::parse(&source)
                .with_context(|| format!("failed to parse schema file {}", source_path.display()))?;
            let id = schema.id.clone().unwrap_or_default();
            let mapped = mapper
                .map_schema(&id, &schema)
                .with_context(|| format!("failed to map schema file {}", source_path.display()))?;
            decls.extend(mapped);
        }

        let policy = if self.deny_unresolved {
            UnresolvedPolicy::Deny
        } else {
            UnresolvedPolicy::Pointer
        };
        Ok(postprocess::post_process(decls, policy)?)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Go(target) => {
                let decls = target.input_settings.build_decls()?;
                let file = SourceFile {
                    package_name: target.package.clone(),
                    imports: target.import.clone(),
                    decls,
                };
                let mut emitter = Emitter::new();
                emitter.emit_file(&file);
                write_output(target.out.as_deref(), &emitter.into_string())
            }
            Command::Decls(target) => {
                let decls = target.input_settings.build_decls()?;
                let json = serde_json::to_string_pretty(&decls)
                    .context("failed to serialize declaration graph")?;
                write_output(target.out.as_deref(), &json)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create output directory {}", parent.display())
                })?;
            }
            std::fs::write(out, text).with_context(|| format!("failed to write {}", out.display()))
        }
        None => {
            if text.ends_with('\n') {
                print!("{text}");
            } else {
                println!("{text}");
            }
            Ok(())
        }
    }
}

fn resolve_file_path_patterns<I>(patterns: I) -> anyhow::Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                anyhow::bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            // Treat as a literal path
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
