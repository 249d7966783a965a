use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use indicatif::ProgressBar;
use tera::{Context, Tera};

use crate::common::{has_executable, run_command, write_file};
use crate::error::GinitCliError;

/// Packages fetched into every generated project, in order. The generated
/// `main.go` imports all five.
const GO_DEPENDENCIES: [&str; 5] = [
    "github.com/gin-gonic/gin",
    "gorm.io/gorm",
    "gorm.io/driver/postgres",
    "github.com/gin-contrib/cors",
    "github.com/joho/godotenv",
];

pub fn new_project(project_name: Option<String>, dir: Option<String>) -> Result<()> {
    let project_name = project_name.ok_or(GinitCliError::MissingProjectName)?;
    validate_project_name(&project_name)?;
    let project_path = resolve_project_path(&project_name, dir)?;
    if project_path.exists() {
        return Err(GinitCliError::ProjectExists {
            path: project_path.display().to_string(),
        }
        .into());
    }
    if !has_executable("go") {
        return Err(GinitCliError::GoNotFound.into());
    }

    println!("Setting up project '{}'...", project_name);

    let path_arg = project_path.display().to_string();
    run_command("mkdir", &[path_arg.as_str()], None)?;
    run_command("go", &["mod", "init", &project_name], Some(&project_path))?;

    let bar = ProgressBar::new_spinner();
    bar.enable_steady_tick(Duration::from_millis(100));
    for dep in GO_DEPENDENCIES {
        bar.set_message(format!("Fetching {dep}"));
        // Suspend so `go get` output streams through cleanly.
        bar.suspend(|| run_command("go", &["get", "-u", dep], Some(&project_path)))?;
    }
    bar.finish_and_clear();

    for (file_name, content) in render_project_files(&project_name)? {
        write_file(&project_path.join(file_name), &content)?;
    }

    println!("Project '{}' initialized successfully!", project_name);
    Ok(())
}

/// The name becomes a directory name, the Go module path and part of the
/// database name, so it is checked against the strictest of those.
fn validate_project_name(name: &str) -> Result<(), GinitCliError> {
    let mut chars = name.chars();
    let first = match chars.next() {
        Some(first) => first,
        None => return Err(GinitCliError::MissingProjectName),
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(GinitCliError::InvalidProjectName {
            name: name.to_string(),
            reason: format!("must start with an ASCII letter or '_', found '{first}'"),
        });
    }
    if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-')) {
        return Err(GinitCliError::InvalidProjectName {
            name: name.to_string(),
            reason: format!("may only contain ASCII letters, digits, '_' and '-', found '{bad}'"),
        });
    }
    Ok(())
}

fn resolve_project_path(project_name: &str, dir: Option<String>) -> Result<PathBuf> {
    let pwd = std::env::current_dir()?;
    let project_path = match dir {
        Some(dir) => {
            let dir = Path::new(&dir);
            if dir.is_relative() {
                pwd.join(dir)
            } else {
                dir.to_path_buf()
            }
        }
        None => pwd.join(project_name),
    };
    Ok(project_path)
}

/// Renders the boilerplate files as (relative path, content) pairs. Output
/// is a pure function of the project name.
pub(crate) fn render_project_files(project_name: &str) -> Result<Vec<(&'static str, String)>> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        (".env", ENV_TEMPLATE),
        ("main.go", MAIN_TEMPLATE),
        ("models/user.go", MODEL_TEMPLATE),
    ])?;

    let mut context = Context::new();
    context.insert("project_name", project_name);

    [".env", "main.go", "models/user.go"]
        .iter()
        .map(|name| Ok((*name, tera.render(name, &context)?)))
        .collect()
}

const ENV_TEMPLATE: &str = r#"DATABASE_URL=host=localhost user=postgres dbname={{ project_name }}_db sslmode=disable password=yourpassword"#;

const MAIN_TEMPLATE: &str = r#"package main

import (
    "net/http"
    "{{ project_name }}/models"
    "github.com/gin-contrib/cors"
    "github.com/gin-gonic/gin"
    "gorm.io/driver/postgres"
    "gorm.io/gorm"
    "log"
    "os"

    "github.com/joho/godotenv"
)

func main() {
    err := godotenv.Load()
    if err != nil {
        log.Fatalf("Error loading .env file")
    }

    // Initialize Gin router
    router := gin.Default()

    // Setup CORS
    router.Use(cors.New(cors.Config{
        AllowOrigins:     []string{"http://localhost:3000"},
        AllowMethods:     []string{"GET", "POST", "PUT", "PATCH", "DELETE"},
        AllowHeaders:     []string{"Origin", "Content-Type", "Accept"},
        AllowCredentials: true,
    }))

    // Initialize GORM with PostgreSQL database
    dsn := os.Getenv("DATABASE_URL")
    db, err := gorm.Open(postgres.Open(dsn), &gorm.Config{})
    if err != nil {
        panic("failed to connect database")
    }

    // Auto migrate models
    err = db.AutoMigrate(&models.User{})
    if err != nil {
        panic("failed to migrate database")
    }

    // Define a simple route
    router.GET("/", func(c *gin.Context) {
        c.JSON(http.StatusOK, gin.H{
            "message": "Welcome to the Gin-GORM project!",
        })
    })

    // Start the server
    router.Run(":8080")
}
"#;

const MODEL_TEMPLATE: &str = r#"package models

import (
    "gorm.io/gorm"
)

// User represents a user model
type User struct {
    gorm.Model
    Name  string `json:"name"`
    Email string `json:"email" gorm:"unique"`
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_project_names() {
        for name in ["blog", "my-app", "my_app2", "_scratch", "API"] {
            validate_project_name(name).unwrap();
        }
    }

    #[test]
    fn rejects_empty_names() {
        assert!(matches!(
            validate_project_name(""),
            Err(GinitCliError::MissingProjectName)
        ));
    }

    #[test]
    fn rejects_names_outside_the_allow_list() {
        for name in ["9lives", "my app", "../evil", "a/b", "naïve", "-flag"] {
            assert!(
                matches!(
                    validate_project_name(name),
                    Err(GinitCliError::InvalidProjectName { .. })
                ),
                "expected '{name}' to be rejected"
            );
        }
    }

    #[test]
    fn default_project_path_is_under_the_working_directory() {
        let path = resolve_project_path("blog", None).unwrap();
        assert_eq!(path, std::env::current_dir().unwrap().join("blog"));
    }

    #[test]
    fn relative_dir_resolves_against_the_working_directory() {
        let path = resolve_project_path("blog", Some("projects/blog".to_string())).unwrap();
        assert_eq!(
            path,
            std::env::current_dir().unwrap().join("projects").join("blog")
        );
    }

    #[test]
    fn absolute_dir_is_used_as_is() {
        let path = resolve_project_path("blog", Some("/tmp/elsewhere".to_string())).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/elsewhere"));
    }

    #[test]
    fn env_file_pins_the_connection_string() {
        let files = render_project_files("blog").unwrap();
        let (_, env) = files.iter().find(|(name, _)| *name == ".env").unwrap();
        assert_eq!(
            env,
            "DATABASE_URL=host=localhost user=postgres dbname=blog_db sslmode=disable password=yourpassword"
        );
    }

    #[test]
    fn entry_point_imports_the_project_models() {
        let files = render_project_files("blog").unwrap();
        let (_, main_go) = files.iter().find(|(name, _)| *name == "main.go").unwrap();
        assert!(main_go.contains("\"blog/models\""));
        assert!(main_go.contains("db.AutoMigrate(&models.User{})"));
        assert!(main_go.starts_with("package main\n"));
    }

    #[test]
    fn model_file_defines_name_and_email_fields() {
        let files = render_project_files("blog").unwrap();
        let (_, user_go) = files
            .iter()
            .find(|(name, _)| *name == "models/user.go")
            .unwrap();
        assert!(user_go.contains("gorm.Model"));
        assert!(user_go.contains("Name  string `json:\"name\"`"));
        assert!(user_go.contains("Email string `json:\"email\" gorm:\"unique\"`"));
    }

    #[test]
    fn rendering_is_deterministic_in_the_project_name() {
        let first = render_project_files("blog").unwrap();
        let second = render_project_files("blog").unwrap();
        assert_eq!(first, second);

        let other = render_project_files("shop").unwrap();
        assert_ne!(first, other);
    }
}
