//! Bundled template files written into the new project directory.
//!
//! The templates live in a `res/` directory shipped next to the binary. The
//! directory is resolved once at startup into a [`ResourceDir`] and passed to
//! whatever needs it.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::error::MigrateError;
use crate::fsops;

/// Directory name of the bundled templates next to the executable.
const RESOURCE_DIR_NAME: &str = "res";

/// Template directory of the source checkout, for `cargo run`.
const SOURCE_RESOURCE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../res");

/// A bundled template file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    /// Ignore rules for an Unreal project.
    GitIgnore,
    /// License notice, copied verbatim.
    License,
    /// Readme with `{projectName}`, `{userName}` and `{currentYear}`.
    Readme,
}

impl Template {
    /// Every bundled template.
    pub const ALL: [Self; 3] = [Self::GitIgnore, Self::License, Self::Readme];

    /// File name inside the resource directory.
    #[must_use]
    pub const fn resource_name(self) -> &'static str {
        match self {
            Self::GitIgnore => "gitignore",
            Self::License => "LICENSE",
            Self::Readme => "README.md",
        }
    }

    /// File name written into the project directory.
    #[must_use]
    pub const fn output_name(self) -> &'static str {
        match self {
            Self::GitIgnore => ".gitignore",
            Self::License => "LICENSE",
            Self::Readme => "README.md",
        }
    }
}

/// Values substituted into the readme template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateVars {
    /// Replaces `{projectName}`.
    pub project_name: String,
    /// Replaces `{userName}`.
    pub user_name: String,
    /// Replaces `{currentYear}`.
    pub year: String,
}

impl TemplateVars {
    /// Creates template values with the current local year.
    pub fn current(project_name: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            user_name: user_name.into(),
            year: chrono::Local::now().format("%Y").to_string(),
        }
    }

    /// Replaces every placeholder occurrence in `contents`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cs_migrate::TemplateVars;
    ///
    /// let vars = TemplateVars {
    ///     project_name: "Foo".to_owned(),
    ///     user_name: "Bar".to_owned(),
    ///     year: "2031".to_owned(),
    /// };
    /// assert_eq!(vars.render("{projectName} by {userName}, {currentYear}"), "Foo by Bar, 2031");
    /// ```
    #[must_use]
    pub fn render(&self, contents: &str) -> String {
        contents
            .replace("{projectName}", &self.project_name)
            .replace("{userName}", &self.user_name)
            .replace("{currentYear}", &self.year)
    }
}

/// Location of the bundled templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDir {
    root: Utf8PathBuf,
}

impl ResourceDir {
    /// Uses `root` as the template directory without checking it.
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Finds the template directory.
    ///
    /// Candidates, first complete one wins: `explicit`, `res/` next to the
    /// running executable, the `res/` directory of the source checkout.
    pub fn locate(explicit: Option<&Utf8Path>) -> Result<Self, MigrateError> {
        let mut candidates = Vec::new();

        if let Some(dir) = explicit {
            candidates.push(dir.to_owned());
        } else {
            if let Some(dir) = executable_dir() {
                candidates.push(dir.join(RESOURCE_DIR_NAME));
            }
            candidates.push(Utf8PathBuf::from(SOURCE_RESOURCE_DIR));
        }

        for candidate in &candidates {
            let dir = Self::new(candidate.clone());
            if dir.is_complete() {
                debug!(path = %candidate, "Using bundled templates");
                return Ok(dir);
            }
        }

        Err(MigrateError::ResourcesNotFound {
            searched: candidates,
        })
    }

    /// Returns `true` if every template file is present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        Template::ALL.iter().all(|t| self.path(*t).is_file())
    }

    /// Path of a template inside this directory.
    #[must_use]
    pub fn path(&self, template: Template) -> Utf8PathBuf {
        self.root.join(template.resource_name())
    }

    /// Copies a template verbatim into `destination_dir`.
    pub fn copy_into(&self, template: Template, destination_dir: &Utf8Path) -> Result<(), MigrateError> {
        fsops::copy_file(
            &self.path(template),
            &destination_dir.join(template.output_name()),
        )
    }

    /// Renders a template with `vars` and writes it into `destination_dir`.
    pub fn render_into(
        &self,
        template: Template,
        destination_dir: &Utf8Path,
        vars: &TemplateVars,
    ) -> Result<(), MigrateError> {
        let contents = fsops::read_text(&self.path(template))?;
        fsops::write_text(
            &destination_dir.join(template.output_name()),
            &vars.render(&contents),
        )
    }
}

fn executable_dir() -> Option<Utf8PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let dir = exe.parent()?.to_path_buf();
    Utf8PathBuf::from_path_buf(dir).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars() -> TemplateVars {
        TemplateVars {
            project_name: "Foo".to_owned(),
            user_name: "Bar".to_owned(),
            year: "2031".to_owned(),
        }
    }

    fn temp_dir() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_render_replaces_every_occurrence() {
        let out = vars().render("{projectName} {projectName} {userName} {currentYear}");
        assert_eq!(out, "Foo Foo Bar 2031");
    }

    #[test]
    fn test_render_bundled_readme() {
        let resources = ResourceDir::new(SOURCE_RESOURCE_DIR);
        let contents = fsops::read_text(&resources.path(Template::Readme)).unwrap();
        assert!(contents.contains("{projectName}"));
        assert!(contents.contains("{userName}"));
        assert!(contents.contains("{currentYear}"));

        let vars = TemplateVars::current("Foo", "Bar");
        let out = vars.render(&contents);
        assert!(out.contains("Foo"));
        assert!(out.contains("Bar"));
        assert_eq!(vars.year.len(), 4);
        assert!(out.contains(&vars.year));
        for token in ["{projectName}", "{userName}", "{currentYear}"] {
            assert!(!out.contains(token), "{token} left in output");
        }
    }

    #[test]
    fn test_render_snapshot() {
        let out = vars().render("# {projectName}\n\nCopyright (c) {currentYear} {userName}");
        insta::assert_snapshot!(out, @r"
        # Foo

        Copyright (c) 2031 Bar
        ");
    }

    #[test]
    fn test_locate_source_checkout() {
        let resources = ResourceDir::locate(Some(Utf8Path::new(SOURCE_RESOURCE_DIR))).unwrap();
        assert!(resources.is_complete());
    }

    #[test]
    fn test_locate_incomplete_dir_fails() {
        let (_guard, dir) = temp_dir();
        std::fs::write(dir.join("LICENSE"), "x").unwrap();
        let err = ResourceDir::locate(Some(&dir)).unwrap_err();
        match err {
            MigrateError::ResourcesNotFound { searched } => assert_eq!(searched, vec![dir]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_copy_and_render_into() {
        let (_guard, dest) = temp_dir();
        let resources = ResourceDir::new(SOURCE_RESOURCE_DIR);

        resources.copy_into(Template::GitIgnore, &dest).unwrap();
        resources.copy_into(Template::License, &dest).unwrap();
        resources.render_into(Template::Readme, &dest, &vars()).unwrap();

        assert!(dest.join(".gitignore").is_file());
        assert_eq!(
            std::fs::read(dest.join("LICENSE")).unwrap(),
            std::fs::read(resources.path(Template::License)).unwrap()
        );
        let readme = std::fs::read_to_string(dest.join("README.md")).unwrap();
        assert!(readme.contains("Foo"));
        assert!(!readme.contains("{projectName}"));
    }
}
