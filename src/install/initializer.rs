//! Setting up an existing project.
//!
//! [`ProjectInitializer`] drives one `scaffold init` run:
//!
//! 1. Detect the project kind and package manager
//! 2. Check the tools installing dependencies (and git) needs
//! 3. Install dependencies when they are missing
//! 4. Write `.env.example` and `.env`
//! 5. Write the Docker files
//! 6. Initialize git last, so the first commit holds the generated files
//!
//! Every step after detection asks first. Existing files are never replaced
//! without a confirmation, and Docker files are never replaced at all.

use std::fs;
use std::path::{Path, PathBuf};

use crate::detection::{DetectedProject, PackageManager, ProjectDetector, ProjectKind};
use crate::error::{Result, ScaffoldError};
use crate::generators::{DockerFiles, DockerSetup, EnvConfig, Service};
use crate::install::git::{GitInitializer, GitOutcome, GitWarning};
use crate::install::orchestrator::report_git;
use crate::install::runner::CommandRunner;
use crate::requirements::{show_report, PrerequisiteChecker};
use crate::shell::{parse_system_path, CommandSpec, Executor};
use crate::ui::{Prompt, PromptOption, Table, UserInterface};

/// What `scaffold init` should set up.
#[derive(Debug, Clone)]
pub struct InitRequest {
    /// Project directory.
    pub root: PathBuf,
    /// Whether to offer a git repository when there is none.
    pub git: bool,
}

/// Result of a completed `scaffold init`.
#[derive(Debug, Clone)]
pub struct InitSummary {
    /// What detection found, before anything was changed.
    pub project: DetectedProject,
    /// Dependencies were installed during this run.
    pub dependencies_installed: bool,
    /// Files written, relative to the project root.
    pub files: Vec<String>,
    /// Version-control result, when git ran.
    pub git: Option<GitOutcome>,
    /// Non-fatal problems shown to the user.
    pub warnings: Vec<String>,
}

impl InitSummary {
    fn new(project: DetectedProject) -> Self {
        Self {
            project,
            dependencies_installed: false,
            files: Vec::new(),
            git: None,
            warnings: Vec::new(),
        }
    }

    fn wrote(&self, file: &str) -> bool {
        self.files.iter().any(|f| f == file)
    }

    fn warn(&mut self, message: String, ui: &mut dyn UserInterface) {
        ui.warning(&message);
        self.warnings.push(message);
    }
}

/// Runs `scaffold init` end to end.
pub struct ProjectInitializer<'a> {
    executor: &'a dyn Executor,
    path_entries: Vec<PathBuf>,
}

impl<'a> ProjectInitializer<'a> {
    /// Create an initializer that looks for tools in `path_entries`.
    pub fn new(executor: &'a dyn Executor, path_entries: Vec<PathBuf>) -> Self {
        Self {
            executor,
            path_entries,
        }
    }

    /// Create an initializer that looks for tools on the process PATH.
    pub fn from_system_path(executor: &'a dyn Executor) -> Self {
        Self::new(executor, parse_system_path())
    }

    /// Set up the project at `request.root`.
    pub fn run(&self, request: &InitRequest, ui: &mut dyn UserInterface) -> Result<InitSummary> {
        ui.show_header("Scaffold Init");
        ui.message("→ Analyzing project...");

        let project = ProjectDetector::detect(&request.root);
        if project.kind == ProjectKind::Unknown {
            return Err(ScaffoldError::UnrecognizedProject {
                path: request.root.clone(),
            });
        }
        show_project(&project, ui);

        let wants_git = request.git && !project.has_git;
        let tools = required_tools(&project, wants_git);
        let checker = PrerequisiteChecker::new(self.executor, self.path_entries.clone());
        let report = checker.check(tools.as_slice());
        if !tools.is_empty() {
            ui.message("→ Checking system dependencies...");
            show_report(&report, ui);
        }
        if !report.all_required_satisfied() {
            ui.warning("Some dependencies are missing");
            if !confirm(ui, "continue", "Continue anyway?", false)? {
                return Err(ScaffoldError::MissingPrerequisite {
                    tools: report.blocking().iter().map(|r| r.tool.clone()).collect(),
                });
            }
        }

        let mut summary = InitSummary::new(project.clone());

        if !project.dependencies_installed {
            if let Some(pm) = project.package_manager {
                if confirm(ui, "install", "📦 Install project dependencies?", true)? {
                    summary.dependencies_installed =
                        self.install_dependencies(pm, &project.root, ui)?;
                    if !summary.dependencies_installed {
                        summary.warn("Some dependencies failed to install".to_string(), ui);
                    }
                }
            }
        }

        if confirm(ui, "env", "🔧 Set up environment configuration?", true)? {
            setup_env(&project, &mut summary, ui)?;
        }

        if confirm(ui, "docker", "🐳 Set up Docker?", true)? {
            setup_docker(&project, &mut summary, ui)?;
        }

        if wants_git && confirm(ui, "git", "🔧 Initialize git repository?", true)? {
            if report.is_available("git") {
                let outcome = GitInitializer::new(self.executor)
                    .with_message(format!("Initial commit - {} project", project.kind))
                    .initialize(&project.root)?;
                report_git(&outcome, ui);
                summary
                    .warnings
                    .extend(outcome.warnings.iter().map(ToString::to_string));
                summary.git = Some(outcome);
            } else {
                summary.warn(GitWarning::git_missing().to_string(), ui);
            }
        }

        show_summary(&summary, ui);
        Ok(summary)
    }

    fn install_dependencies(
        &self,
        pm: PackageManager,
        root: &Path,
        ui: &mut dyn UserInterface,
    ) -> Result<bool> {
        ui.message("→ Installing dependencies...");
        let runner = CommandRunner::new(self.executor);
        for step in pm.install_steps(root) {
            let spec = CommandSpec::new(step.program.as_str())
                .args(step.args.iter().cloned())
                .cwd(root);
            if !runner.run_step(spec, &step.description, ui)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Package-manager tools, then git when a repository will be offered.
pub fn required_tools(project: &DetectedProject, git: bool) -> Vec<&'static str> {
    let mut tools = project
        .package_manager
        .map(PackageManager::required_tools)
        .unwrap_or_default();
    if git {
        tools.push("git");
    }
    tools
}

fn confirm(ui: &mut dyn UserInterface, key: &str, question: &str, default: bool) -> Result<bool> {
    Ok(ui
        .prompt(&Prompt::confirm(key, question, default))?
        .as_bool()
        .unwrap_or(default))
}

fn show_project(project: &DetectedProject, ui: &mut dyn UserInterface) {
    let state = |ok: bool, yes: &str, no: &str| {
        if ok {
            format!("✓ {}", yes)
        } else {
            format!("✗ {}", no)
        }
    };

    let mut table = Table::new(&["Property", "Value"]);
    table.add_row(&["Name", project.name.as_str()]);
    table.add_row(&["Type", project.kind.label()]);
    if !project.frameworks.is_empty() {
        table.add_row(&["Frameworks".to_string(), project.frameworks.join(", ")]);
    }
    if let Some(pm) = project.package_manager {
        table.add_row(&["Package manager", pm.name()]);
    }
    table.add_row(&["Git".to_string(), state(project.has_git, "Initialized", "Not initialized")]);
    table.add_row(&[
        "Dependencies".to_string(),
        state(project.dependencies_installed, "Installed", "Not installed"),
    ]);
    table.add_row(&["Environment".to_string(), state(project.has_env, "Configured", "Not configured")]);
    table.add_row(&["Docker".to_string(), state(project.has_docker, "Configured", "Not configured")]);

    ui.success("Project detected");
    ui.message(&table.render());
}

fn setup_env(
    project: &DetectedProject,
    summary: &mut InitSummary,
    ui: &mut dyn UserInterface,
) -> Result<()> {
    let mut config = EnvConfig::for_project(project.kind, &project.name);
    if confirm(ui, "services", "Configure additional services?", true)? {
        choose_services(&mut config, summary, ui)?;
    }
    if config.is_empty() {
        ui.show_hint("No environment variables to write");
        return Ok(());
    }

    for (file, with_values, overwrite_key) in [
        (".env.example", false, "overwrite_env_example"),
        (".env", true, "overwrite_env"),
    ] {
        let path = project.root.join(file);
        if path.exists()
            && !confirm(ui, overwrite_key, &format!("{} already exists. Overwrite?", file), false)?
        {
            ui.show_hint(&format!("Keeping existing {}", file));
            continue;
        }
        write_file(&project.root, file, &config.render(with_values), summary, ui);
    }

    if summary.wrote(".env") {
        if let Err(e) = ignore_env_file(&project.root) {
            summary.warn(format!("Could not add .env to .gitignore: {}", e), ui);
        }
    }

    ui.success(&format!("Environment configured ({} variables)", config.len()));
    let categories = config.service_categories();
    if !categories.is_empty() {
        let names: Vec<String> = categories.iter().map(ToString::to_string).collect();
        ui.show_hint(&format!("Services: {}", names.join(", ")));
    }
    Ok(())
}

fn choose_services(
    config: &mut EnvConfig,
    summary: &mut InitSummary,
    ui: &mut dyn UserInterface,
) -> Result<()> {
    let groups: [(&str, &str, &str, &str, &[Service]); 3] = [
        ("database", "🗄️  Configure database?", "database_kind", "Select database:", Service::DATABASES),
        ("email", "📧 Configure email service?", "email_kind", "Select email provider:", Service::EMAIL),
        ("payment", "💳 Configure payment gateway?", "payment_kind", "Select payment provider:", Service::PAYMENT),
    ];

    for (key, question, kind_key, kind_question, services) in groups {
        if !confirm(ui, key, question, false)? {
            continue;
        }
        let options = services
            .iter()
            .map(|s| PromptOption::new(s.label(), s.id()))
            .collect();
        let mut prompt = Prompt::select(kind_key, kind_question, options);
        if let Some(first) = services.first() {
            prompt = prompt.with_default(first.id());
        }
        let answer = ui.prompt(&prompt)?.as_string();
        match Service::from_id(&answer).filter(|s| services.contains(s)) {
            Some(service) => {
                config.add_service(service);
                ui.success(&format!("Added {} configuration", service.label()));
            }
            None => summary.warn(format!("Unknown {} '{}', skipped", key, answer), ui),
        }
    }

    if confirm(ui, "storage", "☁️  Configure cloud storage (AWS S3)?", false)? {
        config.add_service(Service::S3);
        ui.success(&format!("Added {} configuration", Service::S3.label()));
    }
    Ok(())
}

fn setup_docker(
    project: &DetectedProject,
    summary: &mut InitSummary,
    ui: &mut dyn UserInterface,
) -> Result<()> {
    let options = vec![
        PromptOption::new("Dockerfile only", "dockerfile"),
        PromptOption::new("Docker Compose", "compose"),
        PromptOption::new("Both", "both"),
    ];
    let prompt = Prompt::select("docker_setup", "What would you like to set up?", options)
        .with_default("dockerfile");
    let answer = ui.prompt(&prompt)?.as_string();
    let setup = match DockerSetup::from_id(&answer) {
        Some(setup) => setup,
        None => {
            summary.warn(format!("Unknown Docker setup '{}', using Dockerfile only", answer), ui);
            DockerSetup::Dockerfile
        }
    };

    let files = DockerFiles::for_project(project.kind, &project.name, &project.root);
    if setup.wants_dockerfile() {
        match files.dockerfile() {
            Some(dockerfile) => {
                keep_or_write(&project.root, "Dockerfile", &dockerfile, summary, ui);
                keep_or_write(&project.root, ".dockerignore", files.dockerignore(), summary, ui);
                if let Some(nginx) = files.nginx_conf() {
                    keep_or_write(&project.root, "nginx.conf", nginx, summary, ui);
                }
            }
            None => summary.warn(
                format!("No Dockerfile template for {} projects", project.kind),
                ui,
            ),
        }
    }

    if setup.wants_compose() {
        let with_database = confirm(
            ui,
            "compose_database",
            "Include a Postgres database in docker-compose?",
            false,
        )?;
        keep_or_write(&project.root, "docker-compose.yml", &files.compose(with_database), summary, ui);
    }
    Ok(())
}

/// Write `root/file` unless it already exists.
fn keep_or_write(
    root: &Path,
    file: &str,
    contents: &str,
    summary: &mut InitSummary,
    ui: &mut dyn UserInterface,
) {
    if root.join(file).exists() {
        ui.show_hint(&format!("Keeping existing {}", file));
    } else {
        write_file(root, file, contents, summary, ui);
    }
}

/// Write `root/file`. A failed write is a warning, never an error.
fn write_file(
    root: &Path,
    file: &str,
    contents: &str,
    summary: &mut InitSummary,
    ui: &mut dyn UserInterface,
) {
    match fs::write(root.join(file), contents) {
        Ok(()) => {
            tracing::debug!("Wrote {}", root.join(file).display());
            ui.success(&format!("Created {}", file));
            summary.files.push(file.to_string());
        }
        Err(e) => summary.warn(format!("Could not write {}: {}", file, e), ui),
    }
}

/// Add `.env` to an existing `.gitignore` that does not list it.
///
/// Without a `.gitignore`, git initialization writes one that does.
fn ignore_env_file(root: &Path) -> std::io::Result<()> {
    let path = root.join(".gitignore");
    if !path.exists() {
        return Ok(());
    }
    let mut contents = fs::read_to_string(&path)?;
    if contents.lines().any(|l| matches!(l.trim(), ".env" | "/.env" | ".env*")) {
        return Ok(());
    }
    if !contents.is_empty() && !contents.ends_with('\n') {
        contents.push('\n');
    }
    contents.push_str(".env\n");
    fs::write(&path, contents)
}

/// Commands that start the project locally.
fn start_commands(project: &DetectedProject) -> Vec<String> {
    let activate = if cfg!(windows) {
        "venv\\Scripts\\activate"
    } else {
        "source venv/bin/activate"
    };
    let python = |run: &str| vec![activate.to_string(), run.to_string()];

    match (project.kind, project.package_manager) {
        (ProjectKind::Django, _) => python("python manage.py runserver"),
        (ProjectKind::FastApi, _) => python("uvicorn main:app --reload"),
        (ProjectKind::Flask, _) => python("flask --app main run --debug"),
        (ProjectKind::Python, _) => python("python main.py"),
        (ProjectKind::Monorepo, _) => vec![
            "Start web/ and api/ in separate terminals (see README.md)".to_string(),
        ],
        (_, Some(pm)) => pm.dev_command().map(String::from).into_iter().collect(),
        (_, None) => Vec::new(),
    }
}

fn show_summary(summary: &InitSummary, ui: &mut dyn UserInterface) {
    let project = &summary.project;
    ui.success("Initialization complete");

    let mut done = Vec::new();
    if summary.dependencies_installed {
        done.push("Project dependencies installed");
    }
    if summary.git.as_ref().is_some_and(|g| g.committed) {
        done.push("Git repository initialized");
    }
    if summary.wrote(".env.example") || summary.wrote(".env") {
        done.push("Environment configuration created");
    }
    if summary.wrote("Dockerfile") || summary.wrote("docker-compose.yml") {
        done.push("Docker configuration added");
    }
    if !done.is_empty() {
        ui.message("");
        ui.message("What was set up:");
        for line in done {
            ui.message(&format!("  ✓ {}", line));
        }
    }

    let mut steps: Vec<(&str, Vec<String>)> = Vec::new();
    if project.root.join(".env.example").exists() && !project.root.join(".env").exists() {
        steps.push((
            "Configure environment",
            vec!["cp .env.example .env".to_string()],
        ));
    } else if summary.wrote(".env") {
        steps.push((
            "Configure environment",
            vec!["# Edit .env with your actual values".to_string()],
        ));
    }
    let start = start_commands(project);
    if !start.is_empty() {
        steps.push(("Start development", start));
    }
    if project.root.join("docker-compose.yml").exists() {
        steps.push(("Or use Docker", vec!["docker compose up".to_string()]));
    } else if project.root.join("Dockerfile").exists() {
        let tag = project.name.to_lowercase();
        let port = project.kind.default_port();
        steps.push((
            "Or use Docker",
            vec![
                format!("docker build -t {} .", tag),
                format!("docker run -p {port}:{port} {}", tag),
            ],
        ));
    }

    if !steps.is_empty() {
        ui.message("");
        ui.message("Next steps:");
        for (n, (title, lines)) in steps.iter().enumerate() {
            ui.message(&format!("  {}. {}:", n + 1, title));
            for line in lines {
                ui.message(&format!("     {}", line));
            }
        }
    }
    ui.show_hint("Need help? Run: scaffold --help");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockExecutor;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn project(files: &[(&str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for (name, contents) in files {
            let path = temp.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, contents).unwrap();
        }
        temp
    }

    #[test]
    fn required_tools_follow_package_manager() {
        let temp = project(&[("package.json", "{}"), ("yarn.lock", "")]);
        let detected = ProjectDetector::detect(temp.path());
        assert_eq!(required_tools(&detected, true), vec!["node", "yarn", "git"]);
        assert_eq!(required_tools(&detected, false), vec!["node", "yarn"]);
    }

    #[test]
    fn gitignore_gains_env_entry_once() {
        let temp = project(&[(".gitignore", "node_modules/")]);
        ignore_env_file(temp.path()).unwrap();
        ignore_env_file(temp.path()).unwrap();
        let gitignore = fs::read_to_string(temp.path().join(".gitignore")).unwrap();
        assert_eq!(gitignore, "node_modules/\n.env\n");
    }

    #[test]
    fn missing_gitignore_is_not_created() {
        let temp = project(&[]);
        ignore_env_file(temp.path()).unwrap();
        assert!(!temp.path().join(".gitignore").exists());
    }

    #[test]
    fn start_commands_per_kind() {
        let django = project(&[("manage.py", "")]);
        let commands = start_commands(&ProjectDetector::detect(django.path()));
        assert_eq!(commands.last().map(String::as_str), Some("python manage.py runserver"));

        let pnpm = project(&[("package.json", r#"{"dependencies": {"vue": "3"}}"#), ("pnpm-lock.yaml", "")]);
        assert_eq!(start_commands(&ProjectDetector::detect(pnpm.path())), vec!["pnpm dev"]);
    }

    #[test]
    fn unknown_project_is_an_error_before_anything_runs() {
        let temp = project(&[("notes.txt", "")]);
        let exec = MockExecutor::new();
        let mut ui = MockUI::new();

        let err = ProjectInitializer::new(&exec, Vec::new())
            .run(
                &InitRequest {
                    root: temp.path().to_path_buf(),
                    git: true,
                },
                &mut ui,
            )
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::UnrecognizedProject { .. }));
        assert_eq!(exec.call_count(), 0);
    }

    #[test]
    fn docker_files_are_never_replaced() {
        let temp = project(&[("main.py", ""), ("requirements.txt", "fastapi\n"), ("Dockerfile", "FROM scratch\n")]);
        let detected = ProjectDetector::detect(temp.path());
        let mut summary = InitSummary::new(detected.clone());
        let mut ui = MockUI::new();
        ui.set_prompt_response("docker_setup", "both");

        setup_docker(&detected, &mut summary, &mut ui).unwrap();

        assert_eq!(fs::read_to_string(temp.path().join("Dockerfile")).unwrap(), "FROM scratch\n");
        assert!(ui.has_hint("Keeping existing Dockerfile"));
        assert_eq!(summary.files, vec![".dockerignore", "docker-compose.yml"]);
    }

    #[test]
    fn monorepo_gets_compose_but_no_dockerfile() {
        let temp = project(&[("web/package.json", "{}"), ("api/main.py", "")]);
        let detected = ProjectDetector::detect(temp.path());
        let mut summary = InitSummary::new(detected.clone());
        let mut ui = MockUI::new();
        ui.set_prompt_response("docker_setup", "both");

        setup_docker(&detected, &mut summary, &mut ui).unwrap();

        assert!(ui.has_warning("No Dockerfile template for Monorepo projects"));
        assert_eq!(summary.files, vec!["docker-compose.yml"]);
    }

    #[test]
    fn existing_env_needs_confirmation() {
        let temp = project(&[("manage.py", ""), (".env", "SECRET_KEY=real\n")]);
        let detected = ProjectDetector::detect(temp.path());
        let mut summary = InitSummary::new(detected.clone());
        let mut ui = MockUI::new();
        ui.set_prompt_response("services", "false");

        setup_env(&detected, &mut summary, &mut ui).unwrap();

        assert_eq!(fs::read_to_string(temp.path().join(".env")).unwrap(), "SECRET_KEY=real\n");
        assert_eq!(summary.files, vec![".env.example"]);
        assert!(ui.has_hint("Keeping existing .env"));
    }

    #[test]
    fn unknown_service_answer_is_skipped() {
        let temp = project(&[("main.py", ""), ("requirements.txt", "fastapi\n")]);
        let detected = ProjectDetector::detect(temp.path());
        let mut summary = InitSummary::new(detected.clone());
        let mut ui = MockUI::new();
        ui.set_prompt_response("database", "true");
        ui.set_prompt_response("database_kind", "stripe");

        let mut config = EnvConfig::for_project(detected.kind, &detected.name);
        choose_services(&mut config, &mut summary, &mut ui).unwrap();

        assert!(config.get("STRIPE_SECRET_KEY").is_none());
        assert_eq!(summary.warnings, vec!["Unknown database 'stripe', skipped"]);
    }
}
