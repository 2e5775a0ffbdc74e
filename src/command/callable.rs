//! command::callable
//!
//! The invocable target behind a command node.
//!
//! # Architecture
//!
//! A command's body is anything implementing [`Callable`]: it declares its
//! parameters up front and is invoked with the positional arguments left
//! after resolution. Declaring parameters explicitly replaces runtime
//! introspection: the dispatch engine reads [`Callable::required_arity`] to
//! refuse an invocation with too few arguments before the body runs.
//!
//! Two binding styles are provided:
//!
//! - [`FnCallable`]: closures and plain `fn` items
//! - [`MethodCallable`]: a method bound to a shared receiver
//!
//! # Invariants
//!
//! - A callable is only invoked with at least `required_arity()` arguments
//! - Surplus arguments are passed through; the callable may ignore them
//!
//! # Example
//!
//! ```
//! use switchyard::command::{CallContext, Callable, CommandResult, FnCallable, Params};
//!
//! let greet = FnCallable::new(
//!     Params::new().required("name"),
//!     |ctx: &mut CallContext<'_>, args: &[String]| -> CommandResult {
//!         ctx.output.line(format!("hello {}", args[0]));
//!         Ok(())
//!     },
//! );
//! assert_eq!(greet.required_arity(), 1);
//! ```

use std::fmt;
use std::rc::Rc;

use super::errors::CommandResult;
use super::options::OptionValues;
use crate::cookies::CookieStore;
use crate::engine::mirror::Mirror;
use crate::ui::output::Output;

/// One declared positional parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    name: String,
    required: bool,
}

impl Param {
    /// Parameter name as shown in usage strings.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the parameter must be supplied.
    pub fn is_required(&self) -> bool {
        self.required
    }
}

/// Ordered positional parameter list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    params: Vec<Param>,
}

impl Params {
    /// No parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a required parameter.
    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.params.push(Param {
            name: name.into(),
            required: true,
        });
        self
    }

    /// Append an optional parameter.
    pub fn optional(mut self, name: impl Into<String>) -> Self {
        self.params.push(Param {
            name: name.into(),
            required: false,
        });
        self
    }

    /// Number of arguments that must be supplied.
    ///
    /// This is the position of the last required parameter, so an optional
    /// parameter declared before a required one still has to be filled.
    pub fn required_count(&self) -> usize {
        self.params
            .iter()
            .rposition(|p| p.required)
            .map_or(0, |i| i + 1)
    }

    /// Total number of declared parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether no parameters are declared.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate parameters in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Param> {
        self.params.iter()
    }

    /// Usage fragment: `<required> [<optional>]`.
    pub fn usage(&self) -> String {
        self.params
            .iter()
            .map(|p| {
                if p.required {
                    format!("<{}>", p.name)
                } else {
                    format!("[<{}>]", p.name)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Everything injected into a command at invocation time.
pub struct CallContext<'a> {
    /// Shared output sink, flushed once by the application.
    pub output: &'a mut Output,
    /// Snapshot of the application's identity and catalog.
    pub app: &'a Mirror,
    /// Persistent key/value store.
    pub cookies: &'a dyn CookieStore,
    options: &'a OptionValues,
    command_name: Option<&'a str>,
}

impl<'a> CallContext<'a> {
    /// Assemble a context.
    pub fn new(
        output: &'a mut Output,
        app: &'a Mirror,
        cookies: &'a dyn CookieStore,
        options: &'a OptionValues,
        command_name: Option<&'a str>,
    ) -> Self {
        Self {
            output,
            app,
            cookies,
            options,
            command_name,
        }
    }

    /// Value of a command option, if it was supplied.
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name)
    }

    /// Whether a command option was supplied.
    pub fn has_option(&self, name: &str) -> bool {
        self.options.is_set(name)
    }

    /// All option slots for this invocation.
    pub fn options(&self) -> &OptionValues {
        self.options
    }

    /// The plain command name that appeared alongside an executable option
    /// (`--help install` tells the `help` option `install`).
    pub fn command_name(&self) -> Option<&str> {
        self.command_name
    }
}

impl fmt::Debug for CallContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallContext")
            .field("app", &self.app.name)
            .field("options", &self.options)
            .field("command_name", &self.command_name)
            .finish_non_exhaustive()
    }
}

/// An invocable command body.
pub trait Callable {
    /// Declared positional parameters.
    fn params(&self) -> &Params;

    /// Number of positional arguments that must be supplied.
    fn required_arity(&self) -> usize {
        self.params().required_count()
    }

    /// Run the command with the positional arguments left after resolution.
    fn invoke(&self, ctx: &mut CallContext<'_>, args: &[String]) -> CommandResult;
}

/// A closure or `fn` item used as a command body.
pub struct FnCallable<F> {
    params: Params,
    body: F,
}

impl<F> FnCallable<F>
where
    F: Fn(&mut CallContext<'_>, &[String]) -> CommandResult,
{
    /// Wrap `body` with its declared parameters.
    pub fn new(params: Params, body: F) -> Self {
        Self { params, body }
    }
}

impl<F> Callable for FnCallable<F>
where
    F: Fn(&mut CallContext<'_>, &[String]) -> CommandResult,
{
    fn params(&self) -> &Params {
        &self.params
    }

    fn invoke(&self, ctx: &mut CallContext<'_>, args: &[String]) -> CommandResult {
        (self.body)(ctx, args)
    }
}

/// Signature of a method usable as a command body.
pub type Method<T> = fn(&T, &mut CallContext<'_>, &[String]) -> CommandResult;

/// A method bound to a receiver shared with the host program.
pub struct MethodCallable<T> {
    params: Params,
    receiver: Rc<T>,
    method: Method<T>,
}

impl<T> MethodCallable<T> {
    /// Bind `method` to `receiver`.
    pub fn new(params: Params, receiver: Rc<T>, method: Method<T>) -> Self {
        Self {
            params,
            receiver,
            method,
        }
    }
}

impl<T> Callable for MethodCallable<T> {
    fn params(&self) -> &Params {
        &self.params
    }

    fn invoke(&self, ctx: &mut CallContext<'_>, args: &[String]) -> CommandResult {
        (self.method)(&self.receiver, ctx, args)
    }
}
