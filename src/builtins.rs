//! builtins
//!
//! Commands and executable options every application gets for free, and the
//! help renderers they share.
//!
//! | Name | Kind | Behavior |
//! |---|---|---|
//! | `help [<command>]` | command | full usage, or help for one command |
//! | `list` | command | command names in columns |
//! | `--help`, `-h` | executable option | as `help`, for the command on the line |
//! | `--version`, `-v` | executable option | `<app> version <version>` |
//!
//! Everything here renders from the [`Mirror`] handed to the command, never
//! from the live registry.

use crate::command::{CallContext, CommandError, CommandNode, CommandResult, Params};
use crate::engine::mirror::{CommandMirror, Mirror};
use crate::ui::listing::Listing;
use crate::ui::output::Output;

/// Hanging indent for wrapped description rows: `   ` + 11 name columns.
pub const DESCRIPTION_INDENT: usize = 14;

/// The `help [<command>]` command.
pub fn help_command() -> CommandNode {
    CommandNode::new(
        "help",
        "Show usage, or help for a command",
        Params::new().optional("command"),
        |ctx: &mut CallContext<'_>, args: &[String]| show_help(ctx, args.first().cloned()),
    )
}

/// The `list` command.
pub fn list_command() -> CommandNode {
    CommandNode::new("list", "List available commands", Params::new(), list)
}

/// The `--help` / `-h` executable option.
pub fn help_option() -> CommandNode {
    CommandNode::new(
        "help",
        "Show usage, or help for the given command",
        Params::new(),
        |ctx: &mut CallContext<'_>, _args: &[String]| {
            let told = ctx.command_name().map(str::to_string);
            show_help(ctx, told)
        },
    )
    .with_alias("h")
}

/// The `--version` / `-v` executable option.
pub fn version_option() -> CommandNode {
    CommandNode::new(
        "version",
        "Show the version",
        Params::new(),
        |ctx: &mut CallContext<'_>, _args: &[String]| {
            let line = format!("{} version {}", ctx.app.name, ctx.app.version);
            ctx.output.line(line);
            Ok(())
        },
    )
    .with_alias("v")
}

fn show_help(ctx: &mut CallContext<'_>, command: Option<String>) -> CommandResult {
    let width = ctx.output.width();
    let text = match command {
        None => render_usage(ctx.app, width),
        Some(name) => {
            let mirror = ctx.app.command(&name).ok_or_else(|| {
                CommandError::failed(
                    format!(
                        "'{name}' is not a {app} command. See '{app} help'",
                        name = name,
                        app = ctx.app.name
                    ),
                    1,
                )
            })?;
            render_command_help(&ctx.app.name, mirror, width)
        }
    };
    ctx.output.string(text);
    Ok(())
}

fn list(ctx: &mut CallContext<'_>, _args: &[String]) -> CommandResult {
    let mut listing = Listing::new();
    for command in ctx.app.listed_commands() {
        listing.item(command.name.as_str());
    }
    let text = listing.render(ctx.output.width());
    ctx.output.string(text);
    Ok(())
}

fn table_row(out: &mut Output, name: &str, description: &str) {
    out.indented_line(format!("   {:<11}{}", name, description), DESCRIPTION_INDENT);
}

/// Full usage text: the usage line, the listed commands, then the
/// executable options.
pub fn render_usage(mirror: &Mirror, width: usize) -> String {
    let mut out = Output::new(width);
    out.line(format!("usage: {} <command> [<args>]", mirror.name));

    let mut commands = mirror.listed_commands().peekable();
    if commands.peek().is_some() {
        out.line("");
        out.line("Commands:");
        for command in commands {
            table_row(&mut out, &command.name, &command.description);
        }
    }

    if !mirror.options.is_empty() {
        out.line("");
        out.line("Options:");
        for option in &mirror.options {
            table_row(&mut out, &format!("--{}", option.name), &option.description);
        }
    }

    out.line("");
    out.line(format!("See '{} help <command>' for more information.", mirror.name));
    out.flush()
}

/// Help for a single command.
///
/// A command without subcommands gets its usage line. A command with
/// subcommands gets one usage line per subcommand and a table of them.
pub fn render_command_help(app: &str, command: &CommandMirror, width: usize) -> String {
    let mut out = Output::new(width);

    if command.subcommands.is_empty() {
        out.line(format!("usage: {} {}", app, command.usage));
        return out.flush();
    }

    for sub in &command.subcommands {
        table_row(&mut out, &sub.name, &sub.description);
    }

    let usage = command
        .subcommands
        .iter()
        .map(|sub| format!("{} {} {}", app, command.name, sub.usage))
        .collect::<Vec<_>>()
        .join("\n       ");
    out.unshift_line(format!(
        "usage: {}\n\nSubcommands for '{}' are:",
        usage, command.name
    ));
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::OptionValues;
    use crate::cookies::MemoryCookieStore;
    use crate::core::fs::Directory;
    use crate::engine::registry::Registry;

    fn noop(_ctx: &mut CallContext<'_>, _args: &[String]) -> CommandResult {
        Ok(())
    }

    fn mirror() -> Mirror {
        let mut registry = Registry::new();
        registry.register(help_command());
        registry.register(list_command());
        registry.register(
            CommandNode::new("cookie", "Read and write stored values", Params::new(), noop)
                .with_subcommand(CommandNode::new(
                    "get",
                    "Print a value",
                    Params::new().required("section").required("name"),
                    noop,
                ))
                .with_subcommand(CommandNode::new(
                    "delete",
                    "Remove a value",
                    Params::new().required("section").required("name"),
                    noop,
                )),
        );
        registry.register(
            CommandNode::new("echo", "Print the arguments", Params::new().optional("text"), noop)
                .with_alias("say"),
        );
        registry.register_executable_option(help_option());
        registry.register_executable_option(version_option());
        Mirror::snapshot("yard", "0.3.1", &Directory::new("/r"), None, &registry)
    }

    fn call(node: &CommandNode, args: &[&str], told: Option<&str>) -> (CommandResult, String) {
        let app = mirror();
        let cookies = MemoryCookieStore::new();
        let options = OptionValues::new();
        let mut output = Output::new(80);
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let result = {
            let mut ctx = CallContext::new(&mut output, &app, &cookies, &options, told);
            node.callable().invoke(&mut ctx, &args)
        };
        (result, output.flush())
    }

    mod rendering {
        use super::*;

        #[test]
        fn leaf_command_help_is_usage_line() {
            let app = mirror();
            let echo = app.command("say").expect("echo");
            assert_eq!(
                render_command_help("yard", echo, 80),
                "usage: yard echo [<text>]\n"
            );
        }

        #[test]
        fn subcommand_help() {
            let app = mirror();
            let cookie = app.command("cookie").expect("cookie");
            insta::assert_snapshot!(render_command_help("yard", cookie, 80), @r"
usage: yard cookie delete <section> <name>
       yard cookie get <section> <name>

Subcommands for 'cookie' are:
   delete     Remove a value
   get        Print a value
");
        }

        #[test]
        fn full_usage_lists_commands_and_options() {
            let text = render_usage(&mirror(), 80);
            let expected = "\
usage: yard <command> [<args>]

Commands:
   cookie     Read and write stored values
   echo       Print the arguments

Options:
   --help     Show usage, or help for the given command
   --version  Show the version

See 'yard help <command>' for more information.
";
            assert_eq!(text, expected);
        }

        #[test]
        fn narrow_width_wraps_descriptions() {
            let text = render_usage(&mirror(), 30);
            assert!(text.contains("   cookie     Read and write\n              stored values\n"));
        }
    }

    mod commands {
        use super::*;

        #[test]
        fn version_option_prints_version() {
            let (result, out) = call(&version_option(), &[], None);
            result.expect("version");
            assert_eq!(out, "yard version 0.3.1\n");
        }

        #[test]
        fn help_option_uses_told_command() {
            let (result, out) = call(&help_option(), &[], Some("echo"));
            result.expect("help");
            assert_eq!(out, "usage: yard echo [<text>]\n");
        }

        #[test]
        fn help_without_command_is_full_usage() {
            let (result, out) = call(&help_command(), &[], None);
            result.expect("help");
            assert!(out.starts_with("usage: yard <command> [<args>]\n"));
        }

        #[test]
        fn help_for_unknown_command_fails() {
            let (result, out) = call(&help_command(), &["frobnicate"], None);
            match result {
                Err(CommandError::Failed { message, code }) => {
                    assert_eq!(
                        message,
                        "'frobnicate' is not a yard command. See 'yard help'"
                    );
                    assert_eq!(code, 1);
                }
                other => panic!("unexpected: {:?}", other),
            }
            assert!(out.is_empty());
        }

        #[test]
        fn list_skips_itself_and_help() {
            let (result, out) = call(&list_command(), &[], None);
            result.expect("list");
            assert_eq!(out, "cookie    echo\n");
        }
    }
}
