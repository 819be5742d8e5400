//! Subcommand handlers

use anyhow::{bail, Context, Result};
use backlog_core::descriptor::FORM_SECTION;
use backlog_core::registry::DEFAULT_EXTENSION_NAME;
use backlog_core::storage::PropertyStorage;
use backlog_core::{
    ExtensionRegistry, FormValidation, JobKind, JobRecord, Locale, ParentKind, ProjectLinkConfig,
};
use clap::Subcommand;
use serde_json::Value;
use std::io::{Read, Write};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Bind a configuration form (JSON) to a job; an empty form detaches
    Configure {
        #[arg(long)]
        job: String,

        /// Form file; reads stdin when omitted
        #[arg(long)]
        form: Option<PathBuf>,
    },

    /// Show the stored link property of a job
    Show {
        #[arg(long)]
        job: String,
    },

    /// Check a Backlog URL
    CheckUrl { url: String },

    /// Check a Backlog user ID
    CheckUserId { user_id: String },

    /// List the link actions rendered on a job page
    Actions {
        #[arg(long)]
        job: String,

        /// Treat the job as a pipeline job
        #[arg(long)]
        pipeline: bool,

        /// Treat the job as a branch of a multi-branch project
        #[arg(long)]
        multi_branch: bool,
    },

    /// Delete the link property of a job
    Delete {
        #[arg(long)]
        job: String,
    },

    /// List jobs with a stored link property
    List,
}

pub fn run(command: Command, storage: &PropertyStorage, locale: Locale) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(command, storage, locale, &mut out)
}

pub fn execute<W: Write>(
    command: Command,
    storage: &PropertyStorage,
    locale: Locale,
    out: &mut W,
) -> Result<()> {
    let registry = ExtensionRegistry::with_defaults(locale);
    let Some(descriptor) = registry.descriptor(DEFAULT_EXTENSION_NAME) else {
        bail!("Backlog property is not registered");
    };

    match command {
        Command::Configure { job, form } => {
            let form_data = read_form(form)?;

            if let Some(section) = form_data.get(FORM_SECTION) {
                let field = |name: &str| section.get(name).and_then(Value::as_str);
                report(out, "url", &descriptor.check_url(field("url")))?;
                report(out, "userId", &descriptor.check_user_id(field("userId")))?;
            }

            let property = descriptor.new_instance(&form_data)?;
            storage.save(&job, property.as_ref())?;
            match property {
                Some(_) => writeln!(out, "Saved Backlog property for {}", job)?,
                None => writeln!(out, "Removed Backlog property from {}", job)?,
            }
        }
        Command::Show { job } => match storage.load(&job)? {
            Some(property) => print_property(out, &property)?,
            None => writeln!(out, "No Backlog property for {}", job)?,
        },
        Command::CheckUrl { url } => {
            let result = descriptor.check_url(Some(&url));
            report(out, "url", &result)?;
            if result.is_ok() {
                writeln!(out, "ok")?;
            }
        }
        Command::CheckUserId { user_id } => {
            let result = descriptor.check_user_id(Some(&user_id));
            report(out, "userId", &result)?;
            if result.is_ok() {
                writeln!(out, "ok")?;
            }
        }
        Command::Actions {
            job,
            pipeline,
            multi_branch,
        } => {
            let kind = if pipeline {
                JobKind::Pipeline
            } else {
                JobKind::Freestyle
            };
            let parent = if multi_branch {
                ParentKind::MultiBranch
            } else {
                ParentKind::Root
            };
            let mut record = JobRecord::new(job.clone(), kind).with_parent(parent);
            record.attach(storage.load(&job)?);

            let visible: Vec<_> = registry
                .actions_for(&record)
                .into_iter()
                .filter(|action| action.is_visible())
                .collect();
            if visible.is_empty() {
                writeln!(out, "No link actions for {}", job)?;
            }
            for action in visible {
                writeln!(
                    out,
                    "{}\t{}\t{}",
                    action.display_name(locale),
                    action.icon().unwrap_or_default(),
                    action.target_url().unwrap_or_default()
                )?;
            }
        }
        Command::Delete { job } => {
            storage.remove(&job)?;
            writeln!(out, "Removed Backlog property from {}", job)?;
        }
        Command::List => {
            for job in storage.list()? {
                writeln!(out, "{}", job)?;
            }
        }
    }

    Ok(())
}

fn read_form(path: Option<PathBuf>) -> Result<Value> {
    let content = match path {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read form {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read form from stdin")?;
            buf
        }
    };

    if content.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&content).context("Form is not valid JSON")
}

fn report<W: Write>(out: &mut W, field: &str, result: &FormValidation) -> Result<()> {
    match result {
        FormValidation::Ok => {}
        FormValidation::Warning(msg) => {
            tracing::warn!("{}: {}", field, msg);
            writeln!(out, "warning: {}: {}", field, msg)?;
        }
        FormValidation::Error(msg) => {
            tracing::warn!("{}: {}", field, msg);
            writeln!(out, "error: {}: {}", field, msg)?;
        }
    }
    Ok(())
}

fn secret_state(empty: bool) -> &'static str {
    if empty {
        "(empty)"
    } else {
        "(set)"
    }
}

fn print_property<W: Write>(out: &mut W, property: &ProjectLinkConfig) -> Result<()> {
    if property.is_blank() {
        writeln!(out, "Backlog property is attached but has no fields set")?;
        return Ok(());
    }

    writeln!(out, "url:       {}", property.url().unwrap_or("-"))?;
    writeln!(out, "space:     {}", property.space_url().unwrap_or("-"))?;
    writeln!(out, "project:   {}", property.project().unwrap_or("-"))?;
    writeln!(out, "user id:   {}", property.user_id().unwrap_or("-"))?;
    writeln!(out, "password:  {}", secret_state(property.password().is_empty()))?;
    writeln!(out, "api key:   {}", secret_state(property.api_key().is_empty()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use backlog_core::storage::MemorySecretStore;
    use tempfile::TempDir;

    fn storage(temp_dir: &TempDir) -> PropertyStorage {
        PropertyStorage::new(
            temp_dir.path().join("data"),
            Box::new(MemorySecretStore::new()),
        )
    }

    fn run_to_string(command: Command, storage: &PropertyStorage) -> String {
        let mut out = Vec::new();
        execute(command, storage, Locale::En, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn write_form(temp_dir: &TempDir, content: &str) -> PathBuf {
        let path = temp_dir.path().join("form.json");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_configure_show_and_actions() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir);
        let form = write_form(
            &temp_dir,
            r#"{"backlog":{"url":"https://example.backlog.jp/projects/ABC","userId":"bob","password":"s3cr3t"}}"#,
        );

        let output = run_to_string(
            Command::Configure {
                job: "app".to_string(),
                form: Some(form),
            },
            &storage,
        );
        assert!(output.contains("Saved Backlog property for app"));

        let output = run_to_string(
            Command::Show {
                job: "app".to_string(),
            },
            &storage,
        );
        assert!(output.contains("project:   ABC"));
        assert!(output.contains("space:     https://example.backlog.jp/"));
        assert!(output.contains("password:  (set)"));
        assert!(!output.contains("s3cr3t"));

        let output = run_to_string(
            Command::Actions {
                job: "app".to_string(),
                pipeline: false,
                multi_branch: false,
            },
            &storage,
        );
        assert!(output.contains("https://example.backlog.jp/projects/ABC"));

        let output = run_to_string(
            Command::Actions {
                job: "app".to_string(),
                pipeline: true,
                multi_branch: true,
            },
            &storage,
        );
        assert!(output.contains("No link actions for app"));
    }

    #[test]
    fn test_configure_reports_invalid_fields() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir);
        let form = write_form(
            &temp_dir,
            r#"{"backlog":{"url":"example.backlog.jp","userId":"bob!"}}"#,
        );

        let output = run_to_string(
            Command::Configure {
                job: "app".to_string(),
                form: Some(form),
            },
            &storage,
        );
        assert!(output.contains("error: url:"));
        assert!(output.contains("error: userId:"));
        assert!(output.contains("Saved Backlog property for app"));
    }

    #[test]
    fn test_empty_form_removes_property() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir);
        let form = write_form(&temp_dir, r#"{"backlog":{"url":"https://example.backlog.jp"}}"#);
        run_to_string(
            Command::Configure {
                job: "app".to_string(),
                form: Some(form),
            },
            &storage,
        );

        let empty = write_form(&temp_dir, "{}");
        let output = run_to_string(
            Command::Configure {
                job: "app".to_string(),
                form: Some(empty),
            },
            &storage,
        );
        assert!(output.contains("Removed Backlog property from app"));
        assert!(run_to_string(Command::List, &storage).is_empty());
    }

    #[test]
    fn test_show_blank_property() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir);
        let form = write_form(&temp_dir, r#"{"backlog":{}}"#);
        run_to_string(
            Command::Configure {
                job: "app".to_string(),
                form: Some(form),
            },
            &storage,
        );

        let output = run_to_string(
            Command::Show {
                job: "app".to_string(),
            },
            &storage,
        );
        assert!(output.contains("has no fields set"));
        assert!(!output.contains("url:"));
    }

    #[test]
    fn test_check_commands() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir);

        let output = run_to_string(
            Command::CheckUserId {
                user_id: "bob@example.com".to_string(),
            },
            &storage,
        );
        assert_eq!(output.trim(), "ok");

        let output = run_to_string(
            Command::CheckUrl {
                url: "not a url".to_string(),
            },
            &storage,
        );
        assert!(output.starts_with("error: url:"));
    }
}
