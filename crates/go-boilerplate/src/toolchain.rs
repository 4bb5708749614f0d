//! Go service flavour of the generator

use boilerplate_core::{CommandSpec, LayoutEntry, Toolchain};
use std::path::Path;

/// Packages every generated service depends on
const PACKAGES: &[&str] = &[
    "github.com/go-chi/chi/v5",
    "github.com/redis/go-redis/v9",
    "github.com/joho/godotenv",
    "github.com/sirupsen/logrus",
    "github.com/go-sql-driver/mysql",
    "gopkg.in/gomail.v2",
    "github.com/go-chi/chi/v5/middleware",
];

#[derive(Debug, Clone, Copy)]
pub struct GoToolchain;

impl Toolchain for GoToolchain {
    fn name(&self) -> &'static str {
        "go-service"
    }

    fn display_name(&self) -> &'static str {
        "Go"
    }

    fn template_dir_env(&self) -> &'static str {
        "BOILERPLATE_TEMPLATE_DIR"
    }

    fn template_subdir(&self) -> &'static str {
        "go-service"
    }

    fn version_command(&self) -> CommandSpec {
        CommandSpec::new("go", ["version"])
    }

    fn descriptor_file(&self) -> &'static str {
        "go.mod"
    }

    fn init_command(&self, project_name: &str) -> CommandSpec {
        CommandSpec::new("go", ["mod", "init", project_name])
    }

    fn fetch_command(&self, dependency: &str) -> CommandSpec {
        CommandSpec::new("go", ["get", dependency])
    }

    fn dependencies(&self) -> Vec<String> {
        PACKAGES.iter().map(|p| p.to_string()).collect()
    }

    fn layout(&self) -> Vec<LayoutEntry> {
        vec![
            LayoutEntry::new("", &["main.go", ".env"]),
            LayoutEntry::new("commons/helper", &["helper.go"]),
            LayoutEntry::new("commons/logger", &["logger.go"]),
            LayoutEntry::new("infra", &["mysql.go", "redis.go"]),
        ]
    }

    fn next_steps(&self, dir: &Path) -> Vec<String> {
        vec![
            format!("cd {}", dir.display()),
            "Edit .env with your MySQL and Redis settings".to_string(),
            "go mod tidy".to_string(),
            "go run .".to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boilerplate_core::templates::layout::file_count;

    #[test]
    fn test_layout_lists_every_file() {
        let layout = GoToolchain.layout();
        assert_eq!(file_count(&layout), 6);
        assert_eq!(layout[0].directory, Path::new(""));
        assert!(layout[0].files.iter().any(|f| f == ".env"));
    }

    #[test]
    fn test_commands() {
        assert_eq!(
            GoToolchain.init_command("demo-app").to_string(),
            "go mod init demo-app"
        );
        assert_eq!(
            GoToolchain.fetch_command("github.com/joho/godotenv").to_string(),
            "go get github.com/joho/godotenv"
        );
        assert_eq!(GoToolchain.version_command().to_string(), "go version");
    }

    #[test]
    fn test_dependencies_are_unique() {
        let mut deps = GoToolchain.dependencies();
        let total = deps.len();
        deps.sort();
        deps.dedup();
        assert_eq!(deps.len(), total);
        assert_eq!(total, 7);
    }

    #[test]
    fn test_next_steps_start_with_cd() {
        let steps = GoToolchain.next_steps(Path::new("/tmp/demo-app"));
        assert_eq!(steps[0], "cd /tmp/demo-app");
        assert_eq!(steps.last().map(String::as_str), Some("go run ."));
    }
}
