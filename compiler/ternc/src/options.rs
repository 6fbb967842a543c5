//! Driver options.

/// Options controlling the per-unit pipeline and its output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileOptions {
    /// Print every symbol with its demangled form.
    pub verbose: bool,
    /// Hierarchical tracing output (with `RUST_LOG` set).
    pub log_tree: bool,
    /// Run the post-desugaring validation walk.
    pub validate: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions { verbose: false, log_tree: false, validate: true }
    }
}

impl CompileOptions {
    /// Parse flags from command-line arguments; anything that is not a
    /// known flag is ignored.
    pub fn parse(args: &[String]) -> Self {
        let mut options = CompileOptions::default();
        for arg in args {
            match arg.as_str() {
                "-v" | "--verbose" => options.verbose = true,
                "--log-tree" => options.log_tree = true,
                "--no-validate" => options.validate = false,
                _ => {}
            }
        }
        options
    }

    /// Whether `arg` is a flag [`CompileOptions::parse`] understands.
    pub fn is_flag(arg: &str) -> bool {
        matches!(arg, "-v" | "--verbose" | "--log-tree" | "--no-validate")
    }
}
