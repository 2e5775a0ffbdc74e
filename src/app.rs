//! app
//!
//! The application: a registration phase followed by a run phase.
//!
//! # Lifecycle
//!
//! ```text
//! ApplicationBuilder (register...) -> build() -> Application (run, flush)
//! ```
//!
//! Commands, aliases, executable options and cleanup actions can only be
//! registered on the builder. Once built, the registry is frozen: an
//! [`Application`] can run invocations but not change what they resolve to.
//!
//! # Invariants
//!
//! - Classified failures never escape `run`; they become output and a status
//! - Output is buffered and leaves the process through `flush` or `stop`
//!
//! # Example
//!
//! ```no_run
//! use switchyard::app::ApplicationBuilder;
//! use switchyard::command::{CallContext, CommandNode, Params};
//! use switchyard::engine::Invocation;
//!
//! let mut builder = ApplicationBuilder::new("yard", "1.0.0", "/tmp/yard");
//! builder.register_builtins().register_command(CommandNode::new(
//!     "hello",
//!     "Say hello",
//!     Params::new(),
//!     |ctx: &mut CallContext<'_>, _args: &[String]| {
//!         ctx.output.line("hello");
//!         Ok(())
//!     },
//! ));
//! let mut app = builder.build().unwrap();
//! let code = app.run(&Invocation::parse(["hello"])).unwrap();
//! print!("{}", app.flush());
//! std::process::exit(code);
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::builtins;
use crate::command::CommandNode;
use crate::cookies::{create_store, CookieError, CookieStore, DEFAULT_PROVIDER};
use crate::core::config::{ConfigError, Settings};
use crate::core::fs::Directory;
use crate::core::paths::AppPaths;
use crate::core::version::{Version, VersionError};
use crate::engine::cleanup::{CleanupActions, CleanupReport};
use crate::engine::dispatch::{Dispatcher, Origin};
use crate::engine::failure::{classify, Rendering};
use crate::engine::invocation::Invocation;
use crate::engine::mirror::Mirror;
use crate::engine::registry::{Registry, RegistryError};
use crate::ui::output::{debug, warn, Output, Verbosity};

/// Errors from the registration phase.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid application version: {0}")]
    Version(#[from] VersionError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cookies(#[from] CookieError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Registration phase.
pub struct ApplicationBuilder {
    name: String,
    version: String,
    paths: AppPaths,
    registry: Registry,
    cleanup: CleanupActions,
    cookies: Option<Box<dyn CookieStore>>,
    settings: Option<Settings>,
    data_dir: Option<PathBuf>,
}

impl ApplicationBuilder {
    /// Start registering an application rooted at `root`.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            paths: AppPaths::new(root),
            registry: Registry::new(),
            cleanup: CleanupActions::new(),
            cookies: None,
            settings: None,
            data_dir: None,
        }
    }

    /// Register a command.
    pub fn register_command(&mut self, node: CommandNode) -> &mut Self {
        self.registry.register(node);
        self
    }

    /// Register several commands in order.
    pub fn register_commands(&mut self, nodes: impl IntoIterator<Item = CommandNode>) -> &mut Self {
        self.registry.register_all(nodes);
        self
    }

    /// Attach a subcommand to a registered command.
    pub fn register_subcommand(
        &mut self,
        command: &str,
        subcommand: CommandNode,
    ) -> Result<&mut Self, AppError> {
        self.registry.register_subcommand(command, subcommand)?;
        Ok(self)
    }

    /// Add an alias to a registered command.
    pub fn register_alias(&mut self, command: &str, alias: &str) -> Result<&mut Self, AppError> {
        self.registry.register_alias(command, alias)?;
        Ok(self)
    }

    /// Register an executable option such as `version` (`--version`).
    pub fn register_executable_option(&mut self, node: CommandNode) -> &mut Self {
        self.registry.register_executable_option(node);
        self
    }

    /// Register `help`, `list`, `--help` and `--version`.
    pub fn register_builtins(&mut self) -> &mut Self {
        self.registry
            .register_all([builtins::help_command(), builtins::list_command()]);
        self.registry
            .register_executable_option(builtins::help_option());
        self.registry
            .register_executable_option(builtins::version_option());
        self
    }

    /// Register a cleanup action tagged with the version that introduced it.
    pub fn register_cleanup_action<F>(&mut self, version: &str, action: F) -> Result<&mut Self, AppError>
    where
        F: Fn(&Directory) -> anyhow::Result<Vec<PathBuf>> + 'static,
    {
        self.cleanup.register(version, action)?;
        Ok(self)
    }

    /// Make a registered command the default.
    pub fn set_default_command(&mut self, command: &str) -> Result<&mut Self, AppError> {
        self.registry.set_default(command)?;
        Ok(self)
    }

    /// Remove a command and its aliases.
    pub fn unregister_command(&mut self, command: &str) -> Option<CommandNode> {
        self.registry.unregister(command)
    }

    /// Set the secondary data directory (overrides `data_dir` in settings).
    pub fn data_directory(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.data_dir = Some(path.into());
        self
    }

    /// Use `store` instead of the `<root>/.cookies` file.
    pub fn cookie_store(&mut self, store: Box<dyn CookieStore>) -> &mut Self {
        self.cookies = Some(store);
        self
    }

    /// Use `settings` instead of loading them from disk and environment.
    pub fn settings(&mut self, settings: Settings) -> &mut Self {
        self.settings = Some(settings);
        self
    }

    /// Freeze registration and produce a runnable application.
    pub fn build(self) -> Result<Application, AppError> {
        let version = Version::parse(&self.version)?;

        let settings = match self.settings {
            Some(settings) => settings,
            None => {
                let loaded = Settings::load(&self.name, &self.paths)?;
                let verbosity = loaded.settings.verbosity();
                for warning in &loaded.warnings {
                    warn(&warning.message, verbosity);
                }
                loaded.settings
            }
        };
        let verbosity = settings.verbosity();

        let cookies = match self.cookies {
            Some(store) => store,
            None => create_store(DEFAULT_PROVIDER, &self.paths)?,
        };

        let data_dir = self
            .data_dir
            .or_else(|| settings.data_dir().map(Path::to_path_buf))
            .map(Directory::new);

        debug(
            format!(
                "{} {}: {} command(s), root {}",
                self.name,
                version,
                self.registry.len(),
                self.paths.root_path().display()
            ),
            verbosity,
        );

        Ok(Application {
            name: self.name,
            version,
            paths: self.paths,
            data_dir,
            output: Output::new(settings.width()),
            settings,
            verbosity,
            registry: self.registry,
            cleanup: self.cleanup,
            cookies,
        })
    }
}

/// Run phase: a frozen registry plus the collaborators commands use.
pub struct Application {
    name: String,
    version: Version,
    paths: AppPaths,
    data_dir: Option<Directory>,
    settings: Settings,
    verbosity: Verbosity,
    registry: Registry,
    cleanup: CleanupActions,
    cookies: Box<dyn CookieStore>,
    output: Output,
}

impl Application {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn root(&self) -> &Directory {
        self.paths.root()
    }

    pub fn data_directory(&self) -> Option<&Directory> {
        self.data_dir.as_ref()
    }

    /// The frozen registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// A fresh snapshot of identity and catalog.
    pub fn mirror(&self) -> Mirror {
        Mirror::snapshot(
            &self.name,
            self.version.as_str(),
            self.paths.root(),
            self.data_dir.as_ref(),
            &self.registry,
        )
    }

    /// Dispatch one invocation and return the exit status.
    ///
    /// Classified failures are written to the output buffer. A command that
    /// fails with an internal error makes this return `Err`; the buffer is
    /// left intact so the caller can still flush it.
    pub fn run(&mut self, invocation: &Invocation) -> anyhow::Result<i32> {
        let mirror = self.mirror();
        let dispatcher = Dispatcher::new(&self.registry, self.verbosity);

        let err = match dispatcher.dispatch(invocation, &mut self.output, &mirror, self.cookies.as_ref()) {
            Ok(Origin::Default) => {
                debug("default command finished", self.verbosity);
                return Ok(0);
            }
            Ok(_) => return Ok(0),
            Err(err) => err,
        };

        debug(format!("dispatch failed: {}", err), self.verbosity);
        let width = self.output.width();
        let verdict = classify(&self.name, err, || builtins::render_usage(&mirror, width))?;
        match verdict.rendering {
            Rendering::Line(line) => self.output.line(line),
            Rendering::Block(text) => self.output.string(text),
        }
        Ok(verdict.exit_code)
    }

    /// Run the cleanup pass for the running version.
    pub fn clean_up_self(&self) -> anyhow::Result<CleanupReport> {
        self.cleanup.run(
            &self.version,
            self.paths.root(),
            self.cookies.as_ref(),
            self.verbosity,
        )
    }

    /// Full usage text, or help for one command (by name or alias).
    pub fn command_help(&self, command: Option<&str>) -> Result<String, RegistryError> {
        let mirror = self.mirror();
        let width = self.output.width();
        match command {
            None => Ok(builtins::render_usage(&mirror, width)),
            Some(name) => {
                let node = self.registry.lookup(name)?;
                let entry = mirror
                    .command(node.name())
                    .ok_or_else(|| RegistryError::UnknownCommand(name.to_string()))?;
                Ok(builtins::render_command_help(&self.name, entry, width))
            }
        }
    }

    /// The output buffer, for host code writing outside a command.
    pub fn output(&mut self) -> &mut Output {
        &mut self.output
    }

    /// Take everything buffered so far.
    pub fn flush(&mut self) -> String {
        self.output.flush()
    }

    /// Print the buffer to stdout and exit with `code`.
    pub fn stop(&mut self, code: i32) -> ! {
        print!("{}", self.output.flush());
        std::process::exit(code)
    }

    // =========================================================================
    // Cookies
    // =========================================================================

    pub fn get_cookie(&self, section: &str, name: &str) -> Result<Option<String>, CookieError> {
        self.cookies.get(section, name)
    }

    pub fn set_cookie(&self, section: &str, name: &str, value: &str) -> Result<(), CookieError> {
        self.cookies.set(section, name, value)
    }

    pub fn delete_cookie(&self, section: &str, name: &str) -> Result<(), CookieError> {
        self.cookies.delete(section, name)
    }
}
