//! Source enumeration, translation and output writing.
//!
//! Translation runs in two parallel passes: every file is parsed first so
//! the declaration index can see all types of the project, then each file
//! is translated against that index. Files are independent of each other
//! in both passes.

use crate::config::Settings;
use anyhow::{Context, anyhow};
use rayon::prelude::*;
use sharpts::syntax::CompilationUnit;
use sharpts::{DeclarationFailure, DeclarationIndex, ErrorPolicy, WalkContext, reader_for_extension};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directories that hold build output rather than sources.
const SKIPPED_DIRS: &[&str] = &["bin", "obj", "node_modules"];

/// Outcome of one translated file.
#[derive(Debug)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub declarations: usize,
    pub failures: Vec<DeclarationFailure>,
}

/// One file to translate and where its output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
}

fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// All files under `root` that a registered reader can parse.
pub fn collect_sources(root: &Path) -> Vec<PathBuf> {
    let mut sources: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| !name.starts_with('.') && !SKIPPED_DIRS.contains(&name))
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            extension_of(path).is_some_and(|ext| ext != "json" && reader_for_extension(ext).is_some())
        })
        .collect();
    sources.sort();
    sources
}

/// Jobs for every source of a project, mirroring its layout below the
/// output directory.
pub fn project_jobs(root: &Path, settings: &Settings) -> Vec<Job> {
    collect_sources(root)
        .into_iter()
        .map(|input| {
            let relative = input.strip_prefix(root).unwrap_or(&input);
            let output = settings
                .output
                .join(relative)
                .with_extension(&settings.extension);
            Job { input, output }
        })
        .collect()
}

/// The job for a single file, optionally renamed by `filename`.
pub fn file_job(input: &Path, filename: Option<&str>, settings: &Settings) -> anyhow::Result<Job> {
    let output = match filename {
        Some(name) => settings.output.join(name),
        None => {
            let stem = input
                .file_stem()
                .ok_or_else(|| anyhow!("{} has no file name", input.display()))?;
            settings
                .output
                .join(stem)
                .with_extension(&settings.extension)
        }
    };
    Ok(Job {
        input: input.to_path_buf(),
        output,
    })
}

fn read_unit(path: &Path) -> anyhow::Result<CompilationUnit> {
    let ext = extension_of(path).unwrap_or_default();
    let reader = reader_for_extension(ext).ok_or_else(|| anyhow!("no reader for `.{ext}` files"))?;
    let source = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    reader
        .read(&source)
        .with_context(|| format!("failed to parse {}", path.display()))
}

fn translate_job(
    job: &Job,
    unit: &CompilationUnit,
    cx: WalkContext<'_>,
    policy: ErrorPolicy,
) -> anyhow::Result<FileReport> {
    let translation = sharpts::translate_unit(unit, cx, policy)
        .with_context(|| format!("failed to translate {}", job.input.display()))?;
    if let Some(parent) = job.output.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(&job.output, translation.text())
        .with_context(|| format!("failed to write {}", job.output.display()))?;
    tracing::info!(input = %job.input.display(), output = %job.output.display(), "translated");
    Ok(FileReport {
        input: job.input.clone(),
        output: job.output.clone(),
        declarations: translation.blocks.len(),
        failures: translation.failures,
    })
}

/// Translate `jobs` in parallel.
///
/// Under [`ErrorPolicy::Abort`] the first failing file fails the run.
/// Under [`ErrorPolicy::Skip`] files that cannot be read or translated
/// are logged and left out of the reports.
pub fn run_jobs(jobs: &[Job], settings: &Settings) -> anyhow::Result<Vec<FileReport>> {
    let parsed: Vec<(&Job, anyhow::Result<CompilationUnit>)> =
        jobs.par_iter().map(|job| (job, read_unit(&job.input))).collect();

    let mut units = Vec::with_capacity(parsed.len());
    for (job, result) in parsed {
        match result {
            Ok(unit) => units.push((job, unit)),
            Err(err) if settings.policy == ErrorPolicy::Skip => {
                tracing::warn!(input = %job.input.display(), "skipping file: {err:#}");
            }
            Err(err) => return Err(err),
        }
    }

    let index = DeclarationIndex::from_units(units.iter().map(|(_, unit)| unit));
    tracing::debug!(types = index.len(), "declaration index built");
    let cx = WalkContext::new(settings.dialect.dialect()).with_semantic(&index);

    let results: Vec<anyhow::Result<FileReport>> = units
        .par_iter()
        .map(|(job, unit)| translate_job(job, unit, cx, settings.policy))
        .collect();

    let mut reports = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(report) => reports.push(report),
            Err(err) if settings.policy == ErrorPolicy::Skip => {
                tracing::warn!("skipping file: {err:#}");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharpts::DialectKind;
    use tempfile::TempDir;

    fn settings(output: &Path, policy: ErrorPolicy) -> Settings {
        Settings {
            dialect: DialectKind::TypeScript,
            extension: "ts".into(),
            policy,
            output: output.to_path_buf(),
        }
    }

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn collects_sources_outside_build_dirs() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "Models/Cart.cs", "class Cart { }");
        write(dir.path(), "obj/Generated.cs", "class Generated { }");
        write(dir.path(), ".git/Hook.cs", "class Hook { }");
        write(dir.path(), "README.md", "# docs");
        write(dir.path(), "sharpts.json", "{}");

        let sources = collect_sources(dir.path());
        assert_eq!(sources, vec![dir.path().join("Models/Cart.cs")]);
    }

    #[test]
    fn job_paths_mirror_the_project() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "Models/Cart.cs", "class Cart { }");
        let out = dir.path().join("out");
        let jobs = project_jobs(dir.path(), &settings(&out, ErrorPolicy::Skip));
        assert_eq!(jobs[0].output, out.join("Models/Cart.ts"));

        let single = file_job(Path::new("src/Cart.cs"), Some("cart.ts"), &settings(&out, ErrorPolicy::Skip)).unwrap();
        assert_eq!(single.output, out.join("cart.ts"));
    }

    #[test]
    fn index_spans_files() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "Contracts.cs", "public interface Shape { }");
        write(dir.path(), "Square.cs", "public class Square : Shape { }");
        let out = dir.path().join("out");
        let settings = settings(&out, ErrorPolicy::Abort);

        let reports = run_jobs(&project_jobs(dir.path(), &settings), &settings).unwrap();
        assert_eq!(reports.len(), 2);
        let square = std::fs::read_to_string(out.join("Square.ts")).unwrap();
        assert_eq!(square, "export class Square implements Shape {\n}\n");
    }

    #[test]
    fn skip_policy_leaves_out_broken_files() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "Good.cs", "class Good { }");
        write(dir.path(), "Bad.cs", "class {");
        let out = dir.path().join("out");

        let skip = settings(&out, ErrorPolicy::Skip);
        let reports = run_jobs(&project_jobs(dir.path(), &skip), &skip).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].declarations, 1);
        assert!(out.join("Good.ts").is_file());

        let abort = settings(&out, ErrorPolicy::Abort);
        assert!(run_jobs(&project_jobs(dir.path(), &abort), &abort).is_err());
    }
}
