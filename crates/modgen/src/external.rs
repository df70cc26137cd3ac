//! Collaborators outside the compiler proper: acquiring a project skeleton and
//! invoking the generated project's build tool. Both are opaque synchronous calls.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use thiserror::Error;
use tracing::info;

pub const DEFAULT_TEMPLATE_URL: &str = "https://github.com/FabricMC/fabric-example-mod.git";

#[derive(Debug, Error)]
pub enum SkeletonError {
    #[error("failed to create project directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to launch git to clone {url}: {source}")]
    Launch {
        url: String,
        #[source]
        source: io::Error,
    },
    #[error("git clone of {url} into {path} exited with {status}")]
    CloneFailed {
        url: String,
        path: PathBuf,
        status: ExitStatus,
    },
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("project directory {path} does not contain a Gradle wrapper")]
    MissingWrapper { path: PathBuf },
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{program} {task} exited with {status}")]
    TaskFailed {
        program: String,
        task: String,
        status: ExitStatus,
    },
}

/// Supplies the project directory generated files are written into.
pub trait ProjectSkeleton {
    fn prepare(&self, project_dir: &Path) -> Result<(), SkeletonError>;
}

/// Uses the directory as it is, creating it when absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExistingDirectory;

impl ProjectSkeleton for ExistingDirectory {
    fn prepare(&self, project_dir: &Path) -> Result<(), SkeletonError> {
        fs::create_dir_all(project_dir).map_err(|source| SkeletonError::CreateDir {
            path: project_dir.to_path_buf(),
            source,
        })
    }
}

/// Clones a template repository when the project directory does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitTemplate {
    pub repo_url: String,
}

impl GitTemplate {
    pub fn new(repo_url: impl Into<String>) -> Self {
        Self {
            repo_url: repo_url.into(),
        }
    }
}

impl Default for GitTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE_URL)
    }
}

impl ProjectSkeleton for GitTemplate {
    fn prepare(&self, project_dir: &Path) -> Result<(), SkeletonError> {
        if project_dir.exists() {
            return Ok(());
        }
        if let Some(parent) = project_dir.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SkeletonError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        info!(url = %self.repo_url, project_dir = %project_dir.display(), "template_clone_started");
        let status = Command::new("git")
            .arg("clone")
            .arg(&self.repo_url)
            .arg(project_dir)
            .status()
            .map_err(|source| SkeletonError::Launch {
                url: self.repo_url.clone(),
                source,
            })?;
        if !status.success() {
            return Err(SkeletonError::CloneFailed {
                url: self.repo_url.clone(),
                path: project_dir.to_path_buf(),
                status,
            });
        }
        Ok(())
    }
}

/// Builds and launches a generated project.
pub trait BuildDriver {
    fn build(&self, project_dir: &Path) -> Result<(), DriverError>;
    fn run(&self, project_dir: &Path) -> Result<(), DriverError>;
}

/// Runs the project's Gradle wrapper: `build` and `runClient`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradleDriver;

impl GradleDriver {
    fn task(&self, project_dir: &Path, task: &str) -> Result<(), DriverError> {
        let wrapper = wrapper_path(project_dir);
        if !wrapper.exists() {
            return Err(DriverError::MissingWrapper {
                path: project_dir.to_path_buf(),
            });
        }

        let program = wrapper.display().to_string();
        info!(program = %program, task, "gradle_task_started");
        let status = Command::new(&wrapper)
            .arg(task)
            .current_dir(project_dir)
            .status()
            .map_err(|source| DriverError::Launch {
                program: program.clone(),
                source,
            })?;
        if !status.success() {
            return Err(DriverError::TaskFailed {
                program,
                task: task.to_string(),
                status,
            });
        }
        info!(task, "gradle_task_finished");
        Ok(())
    }
}

impl BuildDriver for GradleDriver {
    fn build(&self, project_dir: &Path) -> Result<(), DriverError> {
        self.task(project_dir, "build")
    }

    fn run(&self, project_dir: &Path) -> Result<(), DriverError> {
        self.task(project_dir, "runClient")
    }
}

fn wrapper_path(project_dir: &Path) -> PathBuf {
    if cfg!(windows) {
        project_dir.join("gradlew.bat")
    } else {
        project_dir.join("gradlew")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn existing_directory_creates_missing_dirs() {
        let dir = TempDir::new().expect("temp dir");
        let project = dir.path().join("a/b");
        ExistingDirectory.prepare(&project).expect("prepare");
        assert!(project.is_dir());
    }

    #[test]
    fn git_template_leaves_existing_projects_alone() {
        let dir = TempDir::new().expect("temp dir");
        GitTemplate::new("file:///does/not/exist")
            .prepare(dir.path())
            .expect("existing directory is kept");
    }

    #[test]
    fn gradle_without_wrapper_fails_fast() {
        let dir = TempDir::new().expect("temp dir");
        let error = GradleDriver.build(dir.path()).expect_err("no wrapper");
        assert!(matches!(error, DriverError::MissingWrapper { .. }));
    }
}
