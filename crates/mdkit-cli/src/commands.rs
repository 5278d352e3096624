use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};
use mdkit_config::Config;
use mdkit_engine::{
    Document, DocumentService, Engine, MergeStrategy, Operation, Request, SourceDocument, analyze,
    merge_sources, parse, split_lenient, tokenize, transform,
};
use relative_path::RelativePathBuf;
use serde::Serialize;

use crate::storage::{self, read_text, relative_to_root, scan_markdown_files, write_text};

/// Everything a command needs: where files live, how strict to be, how to print.
pub struct Session {
    root: PathBuf,
    engine: Engine,
    pretty: bool,
    default_strategy: MergeStrategy,
}

impl Session {
    pub fn new(config: &Config, compact: bool) -> Result<Self> {
        let root = match &config.documents_root {
            Some(root) => root.clone(),
            None => std::env::current_dir().context("Failed to determine current directory")?,
        };
        debug!("documents root: {}", root.display());

        Ok(Self {
            root,
            engine: Engine {
                strict_metadata: config.metadata.strict,
            },
            pretty: config.output.pretty && !compact,
            default_strategy: config.merge.strategy,
        })
    }

    /// Reads `path` and validates its metadata block when strict mode is on.
    fn load(&self, path: &Path) -> Result<(RelativePathBuf, String)> {
        let relative = relative_to_root(path, &self.root)?;
        let raw = read_text(&relative, &self.root)
            .with_context(|| format!("Failed to read {relative}"))?;
        self.engine.validate(relative.as_str(), &raw)?;
        Ok((relative, raw))
    }

    fn save(&self, path: &Path, doc: &Document) -> Result<()> {
        // Rendered in full before anything touches the file
        let text = doc.to_markdown()?;
        let relative = relative_to_root(path, &self.root)?;
        write_text(&relative, &self.root, &text)
            .with_context(|| format!("Failed to write {relative}"))?;
        info!("Wrote {relative}");
        Ok(())
    }

    fn print<T: Serialize>(&self, value: &T) -> Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        println!("{json}");
        Ok(())
    }

    pub fn parse(&self, file: &Path) -> Result<()> {
        let (_, raw) = self.load(file)?;
        self.print(&parse(&raw))
    }

    pub fn analyze(&self, file: &Path) -> Result<()> {
        let (_, raw) = self.load(file)?;
        self.print(&analyze(&raw))
    }

    pub fn tokens(&self, file: &Path) -> Result<()> {
        let (_, raw) = self.load(file)?;
        let doc = split_lenient(&raw);
        self.print(&tokenize(&doc.body))
    }

    pub fn transform(
        &self,
        file: &Path,
        operation: &str,
        strict: bool,
        output: Option<&Path>,
    ) -> Result<()> {
        let operation = if strict {
            operation.parse::<Operation>()?
        } else {
            Operation::from_name_lenient(operation)
        };
        let (_, raw) = self.load(file)?;
        let result = transform(&raw, operation);

        match output {
            Some(path) => self.save(
                path,
                &Document::new(result.metadata, result.transformed_content),
            ),
            None => self.print(&result),
        }
    }

    pub fn merge(
        &self,
        inputs: &[PathBuf],
        strategy: Option<&str>,
        output: Option<&Path>,
    ) -> Result<()> {
        let strategy = match strategy {
            Some(name) => name.parse::<MergeStrategy>()?,
            None => self.default_strategy,
        };

        let mut sources = Vec::new();
        for input in self.expand_inputs(inputs)? {
            let (relative, raw) = self.load(&input)?;
            sources.push(SourceDocument::new(relative.as_str(), raw));
        }
        info!("Merging {} documents with {strategy}", sources.len());
        let merged = merge_sources(&sources, strategy);

        match output {
            Some(path) => self.save(
                path,
                &Document::new(merged.combined_metadata, merged.content),
            ),
            None => self.print(&merged),
        }
    }

    /// Replaces directory inputs with the markdown files inside them.
    fn expand_inputs(&self, inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for input in inputs {
            let relative = relative_to_root(input, &self.root)?;
            if storage::is_dir(&relative, &self.root) {
                let found = scan_markdown_files(&relative, &self.root)?;
                debug!("{relative}: {} markdown files", found.len());
                files.extend(found.into_iter().map(|f| PathBuf::from(f.as_str())));
            } else {
                files.push(PathBuf::from(relative.as_str()));
            }
        }
        Ok(files)
    }

    /// Reads one JSON request per line and writes one JSON reply per line.
    pub fn serve(&self, input: impl BufRead, mut output: impl Write) -> Result<()> {
        for line in input.lines() {
            let line = line.context("Failed to read request")?;
            if line.trim().is_empty() {
                continue;
            }
            let reply = match serde_json::from_str::<Request>(&line) {
                Ok(request) => match self.engine.handle(request) {
                    Ok(response) => serde_json::to_value(response)?,
                    Err(e) => serde_json::json!({ "error": e.to_string() }),
                },
                Err(e) => serde_json::json!({ "error": format!("invalid request: {e}") }),
            };
            writeln!(output, "{reply}")?;
            output.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn session(root: &TempDir, strict: bool) -> Session {
        let mut config = Config {
            documents_root: Some(root.path().to_path_buf()),
            ..Config::default()
        };
        config.metadata.strict = strict;
        Session::new(&config, true).unwrap()
    }

    fn write(root: &TempDir, name: &str, content: &str) {
        let path = root.path().join(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn transform_writes_document_with_metadata() {
        let root = TempDir::new().unwrap();
        write(&root, "in.md", "---\ntitle: x\n---\n# a\n");
        let s = session(&root, false);

        s.transform(
            Path::new("in.md"),
            "uppercase",
            false,
            Some(Path::new("out/upper.md")),
        )
        .unwrap();

        let written = std::fs::read_to_string(root.path().join("out/upper.md")).unwrap();
        assert_eq!(written, "---\ntitle: x\n---\n# A\n");
    }

    #[test]
    fn strict_transform_rejects_unknown_operation() {
        let root = TempDir::new().unwrap();
        write(&root, "in.md", "text");
        let s = session(&root, false);

        let err = s
            .transform(Path::new("in.md"), "bogus", true, None)
            .unwrap_err();
        assert_eq!(err.to_string(), "unsupported operation `bogus`");
    }

    #[test]
    fn strict_metadata_reports_document_id() {
        let root = TempDir::new().unwrap();
        write(&root, "good.md", "fine");
        write(&root, "bad.md", "---\nunterminated\n");
        let s = session(&root, true);

        let err = s
            .merge(
                &[PathBuf::from("good.md"), PathBuf::from("bad.md")],
                None,
                None,
            )
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "bad.md: metadata block opened with `---` is never closed"
        );
    }

    #[test]
    fn merge_directory_in_sorted_order() {
        let root = TempDir::new().unwrap();
        write(&root, "notes/b.md", "---\ntags: [b]\n---\nB\n");
        write(&root, "notes/a.md", "---\ntags: [a]\n---\nA\n");
        let s = session(&root, false);

        s.merge(
            &[PathBuf::from("notes")],
            Some("combine_metadata"),
            Some(Path::new("merged.md")),
        )
        .unwrap();

        let written = std::fs::read_to_string(root.path().join("merged.md")).unwrap();
        assert_eq!(written, "---\ntags:\n- a\n- b\n---\nA\n\nB\n");
    }

    #[test]
    fn serve_answers_each_line() {
        let root = TempDir::new().unwrap();
        let s = session(&root, false);
        let input = concat!(
            r#"{"type":"analyze","content":"one two"}"#,
            "\n\n",
            "not json\n",
            r#"{"type":"merge","documents":[],"strategy":"union"}"#,
            "\n",
        );
        let mut out = Vec::new();

        s.serve(input.as_bytes(), &mut out).unwrap();

        let replies: Vec<serde_json::Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(replies.len(), 3);
        assert_eq!(replies[0]["type"], "analysis");
        assert_eq!(replies[0]["result"]["word_count"], 2);
        let parse_error = replies[1]["error"].as_str().unwrap();
        assert!(parse_error.starts_with("invalid request"));
        let strategy_error = replies[2]["error"].as_str().unwrap();
        assert!(strategy_error.contains("union"));
    }
}
