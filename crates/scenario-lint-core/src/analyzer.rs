//! Core analyzer for orchestrating lint execution.

use crate::config::Config;
use crate::context::{ChapterContext, FileContext};
use crate::rule::{Rule, RuleBox};
use crate::script::parse_script;
use crate::types::{LintResult, ParseFailure, Severity, Suggestion, Violation};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Code of the violation reported for code blocks that fail to parse.
pub const CODE_PARSE_CODE: &str = "SL001";

/// Name of the violation reported for code blocks that fail to parse.
pub const CODE_PARSE_NAME: &str = "code-parse";

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reading one script file.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Directory traversal error.
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    files: Vec<PathBuf>,
    config: Option<Config>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory (or single file) to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Lints exactly these files, in order, instead of discovering them.
    #[must_use]
    pub fn files(mut self, files: impl IntoIterator<Item = PathBuf>) -> Self {
        self.files.extend(files);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined or an
    /// exclude pattern is not a valid glob.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let root = self
            .root
            .or_else(|| self.config.as_ref().map(|c| c.analyzer.root.clone()))
            .unwrap_or_else(|| PathBuf::from("."));

        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let config = self.config.unwrap_or_default();

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());
        let excludes = exclude_patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Analyzer {
            root,
            rules: self.rules,
            exclude_patterns,
            excludes,
            files: self.files,
            config,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    excludes: Vec<glob::Pattern>,
    files: Vec<PathBuf>,
    config: Config,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyzes all files and returns the results.
    ///
    /// Structural script errors do not stop the run; they are collected in
    /// [`LintResult::parse_errors`].
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery or reading fails.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let files = if self.files.is_empty() {
            self.discover_files()?
        } else {
            self.files.clone()
        };

        info!("Found {} files to analyze", files.len());

        let mut result = LintResult::new();
        for path in &files {
            let content = std::fs::read_to_string(path).map_err(|e| AnalyzerError::Read {
                path: path.clone(),
                source: e,
            })?;
            result.extend(self.analyze_source(path, &content));
        }

        info!(
            "Analysis complete: {} violations, {} parse errors in {} files",
            result.violations.len(),
            result.parse_errors.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Lints one script held in memory.
    #[must_use]
    pub fn analyze_source(&self, path: &Path, content: &str) -> LintResult {
        debug!("Analyzing: {}", path.display());

        let file = FileContext::new(path, content, self.base_dir());
        let mut result = LintResult::new();
        result.files_checked = 1;

        let chapters = match parse_script(content) {
            Ok(chapters) => chapters,
            Err(e) => {
                warn!("Failed to parse {}: {}", path.display(), e);
                result.parse_errors.push(ParseFailure::new(
                    file.relative_path.clone(),
                    e,
                    content.to_string(),
                ));
                return result;
            }
        };

        for chapter in &chapters {
            debug!(
                chapter = %chapter.name,
                entries = chapter.entries.len(),
                "Linting chapter"
            );
            let ctx = ChapterContext::new(&file, chapter, &self.config.walker);
            result.violations.extend(self.code_parse_violations(&ctx));

            for rule in &self.rules {
                if !self.config.is_rule_enabled(rule.name()) {
                    debug!("Skipping disabled rule: {}", rule.name());
                    continue;
                }

                let violations = rule.check(&ctx);
                let violations = self.apply_allowances(rule.as_ref(), &ctx, violations);
                let violations = self.apply_severity_override(rule.name(), violations);
                result.violations.extend(violations);
            }
        }

        // Stable: rule order is kept within a line
        result.violations.sort_by_key(|v| v.location.line);
        result
    }

    fn base_dir(&self) -> &Path {
        if self.root.is_file() {
            self.root.parent().unwrap_or(self.root.as_path())
        } else {
            &self.root
        }
    }

    /// Reports code blocks the walker could not parse.
    fn code_parse_violations(&self, ctx: &ChapterContext<'_>) -> Vec<Violation> {
        if !self.config.is_rule_enabled(CODE_PARSE_NAME) {
            return Vec::new();
        }

        let violations = ctx
            .entries
            .iter()
            .filter_map(|entry| {
                let error = entry.code_error.as_ref()?;
                warn!(
                    line = entry.line(),
                    code = %entry.entry.code,
                    "Failed to parse code block: {}",
                    error
                );
                Some(Violation::new(
                    CODE_PARSE_CODE,
                    CODE_PARSE_NAME,
                    Severity::Error,
                    ctx.location(entry),
                    format!("error when parsing code: {error}"),
                ))
            })
            .collect();
        self.apply_severity_override(CODE_PARSE_NAME, violations)
    }

    /// Drops violations suppressed by allow directives in the entry's code.
    fn apply_allowances(
        &self,
        rule: &dyn Rule,
        ctx: &ChapterContext<'_>,
        violations: Vec<Violation>,
    ) -> Vec<Violation> {
        let mut kept = Vec::with_capacity(violations.len());
        for violation in violations {
            let entry = ctx
                .entries
                .iter()
                .find(|e| e.line() as usize == violation.location.line);
            let check = entry.map(|e| e.allowances.check(rule.name()));

            match check {
                Some(check) if check.is_allowed() => {
                    debug!(
                        rule = rule.name(),
                        line = violation.location.line,
                        "Violation allowed by directive"
                    );
                    if rule.requires_allow_reason() && check.reason().is_none() {
                        kept.push(
                            Violation::new(
                                rule.code(),
                                rule.name(),
                                Severity::Warning,
                                violation.location,
                                format!(
                                    "Allow directive for '{}' is missing required reason",
                                    rule.name()
                                ),
                            )
                            .with_suggestion(Suggestion::new(
                                "Add reason=\"...\" to explain why this exception is necessary",
                            )),
                        );
                    }
                }
                _ => kept.push(violation),
            }
        }
        kept
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }

    /// Discovers all script files to analyze.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }

        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(self.config.analyzer.respect_gitignore)
            .require_git(false);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() || !self.has_script_extension(path) {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    fn has_script_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.config.analyzer.extensions.iter().any(|e| e == ext))
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        if self
            .excludes
            .iter()
            .any(|p| p.matches_path(path) || p.matches_path(relative))
        {
            return true;
        }

        // Also check as substring for patterns like "**/target/**"
        let path_str = path.to_string_lossy();
        self.exclude_patterns.iter().any(|pattern| {
            let normalized_pattern = pattern.replace("**", "");
            normalized_pattern.len() > 1 && path_str.contains(&normalized_pattern)
        })
    }
}

/// Reads a template file and returns the scripts it includes, in order.
///
/// Lines of the form `@include <file>` name scripts relative to `base`; all
/// other lines are ignored.
///
/// # Errors
///
/// Returns an error if the template cannot be read.
pub fn read_template(template: &Path, base: &Path) -> Result<Vec<PathBuf>, AnalyzerError> {
    let content = std::fs::read_to_string(template).map_err(|e| AnalyzerError::Read {
        path: template.to_path_buf(),
        source: e,
    })?;

    Ok(content
        .lines()
        .filter_map(|line| line.trim().strip_prefix("@include"))
        .filter_map(|rest| rest.split_whitespace().next())
        .map(|file| base.join(file))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Location;
    use tempfile::TempDir;

    struct EveryEntry;

    impl Rule for EveryEntry {
        fn name(&self) -> &'static str {
            "every-entry"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn default_severity(&self) -> Severity {
            Severity::Error
        }

        fn check(&self, ctx: &ChapterContext) -> Vec<Violation> {
            ctx.entries
                .iter()
                .map(|e| {
                    Violation::new(
                        self.code(),
                        self.name(),
                        self.default_severity(),
                        ctx.location(e),
                        "entry",
                    )
                })
                .collect()
        }
    }

    const SCRIPT: &str = "@<|label('c')|>\n<|show(|>\nfirst\n\n<|\n-- scenario-lint: allow(every-entry) reason=\"ok\"\n|>\nsecond\n\n<|\n-- scenario-lint: allow(all)\n|>\nthird\n@<||>\n";

    fn analyzer(config: Config) -> Analyzer {
        Analyzer::builder()
            .root(".")
            .rule(EveryEntry)
            .config(config)
            .build()
            .expect("Failed to build analyzer")
    }

    #[test]
    fn test_code_parse_and_allowances() {
        let result = analyzer(Config::default()).analyze_source(Path::new("c.txt"), SCRIPT);
        let summary: Vec<_> = result
            .violations
            .iter()
            .map(|v| (v.code.as_str(), v.location.line, v.severity))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("SL001", 2, Severity::Error),
                ("TEST001", 2, Severity::Error),
                ("TEST001", 10, Severity::Warning),
            ]
        );
        assert!(result.violations[2].message.contains("missing required reason"));
    }

    #[test]
    fn test_disabled_rules_and_overrides() {
        let config = Config::parse(
            "[rules.code-parse]\nenabled = false\n[rules.every-entry]\nseverity = \"info\"\n",
        )
        .unwrap();
        let result = analyzer(config).analyze_source(Path::new("c.txt"), SCRIPT);
        assert!(result.violations.iter().all(|v| v.code == "TEST001"));
        assert!(result.violations.iter().all(|v| v.severity == Severity::Info));
    }

    #[test]
    fn test_structural_error_is_collected() {
        let result =
            analyzer(Config::default()).analyze_source(Path::new("bad.txt"), "@<|\nshow()\n|>");
        assert!(result.violations.is_empty());
        assert_eq!(result.parse_errors.len(), 1);
        assert_eq!(result.files_checked, 1);
    }

    #[test]
    fn test_discovery_respects_extensions_and_excludes() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("drafts")).unwrap();
        std::fs::write(root.join("a.txt"), SCRIPT).unwrap();
        std::fs::write(root.join("b.md"), "ignored").unwrap();
        std::fs::write(root.join("drafts/c.txt"), SCRIPT).unwrap();

        let analyzer = Analyzer::builder()
            .root(root)
            .exclude("**/drafts/**")
            .build()
            .unwrap();
        let files = analyzer.discover_files().unwrap();
        assert_eq!(files, vec![root.join("a.txt")]);

        let result = analyzer.analyze().unwrap();
        assert_eq!(result.files_checked, 1);
        assert_eq!(result.violations[0].location, Location::new("a.txt".into(), 2, 1));
    }

    #[test]
    fn test_read_template() {
        let dir = TempDir::new().unwrap();
        let template = dir.path().join("template.txt");
        std::fs::write(&template, "title\n@include ch1.txt\n@include  ch2.txt extra\n").unwrap();

        let files = read_template(&template, Path::new("scenarios")).unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from("scenarios/ch1.txt"),
                PathBuf::from("scenarios/ch2.txt")
            ]
        );
    }
}
