//! yard - demo host for the switchyard dispatch engine
//!
//! Registers the built-ins plus a handful of commands that exercise each
//! dispatch path: a default command, subcommands, aliases, command options,
//! application errors with exit codes, and the catalog mirror.
//!
//! The application root is `$YARD_HOME`, falling back to `~/.yard`.

use std::path::PathBuf;

use anyhow::{anyhow, Context as _};

use switchyard::app::ApplicationBuilder;
use switchyard::command::{CallContext, CommandError, CommandNode, CommandResult, Params};
use switchyard::core::fs::Directory;
use switchyard::engine::Invocation;

const APP_NAME: &str = "yard";

/// Environment variable overriding the application root.
const HOME_ENV: &str = "YARD_HOME";

fn main() -> anyhow::Result<()> {
    let mut builder = ApplicationBuilder::new(APP_NAME, env!("CARGO_PKG_VERSION"), root_dir()?);
    builder
        .register_builtins()
        .register_commands([status(), cookie(), catalog(), echo(), fail()])
        .register_cleanup_action("0.2.0", |root: &Directory| Ok(vec![root.child("cache")]))?;

    let mut app = builder.build()?;
    app.clean_up_self()?;

    let invocation = Invocation::parse(std::env::args().skip(1));
    let result = app.run(&invocation);
    print!("{}", app.flush());

    let code = result?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

fn root_dir() -> anyhow::Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    dirs::home_dir()
        .map(|home| home.join(".yard"))
        .ok_or_else(|| anyhow!("cannot determine home directory; set {}", HOME_ENV))
}

fn status() -> CommandNode {
    CommandNode::new(
        "status",
        "Show application status",
        Params::new(),
        |ctx: &mut CallContext<'_>, _args: &[String]| {
            let app = ctx.app;
            ctx.output.line(format!("{} {}", app.name, app.version));
            ctx.output.line(format!("root: {}", app.root().display()));
            if let Some(data) = &app.data_dir {
                ctx.output.line(format!("data: {}", data.path().display()));
            }
            ctx.output
                .line(format!("commands: {}", app.listed_commands().count()));
            Ok(())
        },
    )
    .as_application_default()
}

fn cookie() -> CommandNode {
    let pair = || Params::new().required("section").required("name");

    CommandNode::new(
        "cookie",
        "Read and write stored values",
        Params::new(),
        |_ctx: &mut CallContext<'_>, _args: &[String]| {
            Err(CommandError::usage("cookie <get|set|delete> <section> <name> [<value>]"))
        },
    )
    .with_subcommand(CommandNode::new(
        "get",
        "Print a stored value",
        pair(),
        |ctx: &mut CallContext<'_>, args: &[String]| {
            let value = ctx
                .cookies
                .get(&args[0], &args[1])
                .context("failed to read cookie")?;
            match value {
                Some(value) => {
                    ctx.output.line(value);
                    Ok(())
                }
                None => Err(CommandError::failed(
                    format!("cookie '{}.{}' is not set", args[0], args[1]),
                    2,
                )),
            }
        },
    ))
    .with_subcommand(CommandNode::new(
        "set",
        "Store a value",
        pair().required("value"),
        |ctx: &mut CallContext<'_>, args: &[String]| {
            ctx.cookies
                .set(&args[0], &args[1], &args[2])
                .context("failed to write cookie")?;
            Ok(())
        },
    ))
    .with_subcommand(CommandNode::new(
        "delete",
        "Remove a stored value",
        pair(),
        |ctx: &mut CallContext<'_>, args: &[String]| {
            ctx.cookies
                .delete(&args[0], &args[1])
                .context("failed to delete cookie")?;
            Ok(())
        },
    ))
}

fn catalog() -> CommandNode {
    CommandNode::new(
        "catalog",
        "Print the command catalog as JSON",
        Params::new(),
        |ctx: &mut CallContext<'_>, _args: &[String]| {
            let json = if ctx.has_option("pretty") {
                serde_json::to_string_pretty(ctx.app)
            } else {
                serde_json::to_string(ctx.app)
            };
            ctx.output.line(json.context("failed to serialize catalog")?);
            Ok(())
        },
    )
    .with_option("pretty")
}

fn echo() -> CommandNode {
    CommandNode::new(
        "echo",
        "Print the arguments",
        Params::new().required("text"),
        |ctx: &mut CallContext<'_>, args: &[String]| {
            let text = args.join(" ");
            let text = match ctx.option("upper") {
                Some(_) => text.to_uppercase(),
                None => text,
            };
            ctx.output.line(text);
            Ok(())
        },
    )
    .with_alias("say")
    .with_option("upper")
}

fn fail() -> CommandNode {
    CommandNode::new(
        "fail",
        "Exit with the given status",
        Params::new().required("code").optional("message"),
        |_ctx: &mut CallContext<'_>, args: &[String]| {
            let code = args[0]
                .parse::<i32>()
                .map_err(|_| CommandError::usage("fail <code> [<message>]"))?;
            let message = args
                .get(1)
                .cloned()
                .unwrap_or_else(|| format!("failed with status {}", code));
            Err(CommandError::failed(message, code))
        },
    )
}
