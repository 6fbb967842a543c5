//! Tern compiler CLI.

use ternc::{core_unit, init_tracing, CompileOptions, Compiler};
use tern_mangle::{decompose, demangle, is_tern_symbol};
use tern_types::TypeSystem;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let options = CompileOptions::parse(args.get(1..).unwrap_or(&[]));
    init_tracing(options.log_tree);

    let positional: Vec<&str> = args
        .iter()
        .skip(1)
        .map(String::as_str)
        .filter(|arg| !CompileOptions::is_flag(arg))
        .collect();

    let Some((&command, rest)) = positional.split_first() else {
        print_usage();
        return;
    };

    match command {
        "demangle" => {
            if rest.is_empty() {
                eprintln!("Usage: ternc demangle <symbol>...");
                std::process::exit(1);
            }
            for symbol in rest {
                demangle_symbol(symbol, options.verbose);
            }
        }
        "abi" => list_abi(options),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("error: unknown command '{command}'");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Tern compiler");
    println!();
    println!("Usage: ternc [options] <command> [args]");
    println!();
    println!("Commands:");
    println!("  demangle <symbol>...   Decode mangled Tern symbol names");
    println!("  abi                    List the symbols of the runtime support library");
    println!("  help                   Show this message");
    println!();
    println!("Options:");
    println!("  -v, --verbose          Show demangled forms and symbol structure");
    println!("  --log-tree             Hierarchical tracing output (with RUST_LOG set)");
    println!("  --no-validate          Skip post-desugaring validation");
}

/// Print the demangled form of `symbol`, or the symbol itself when it is
/// not a Tern symbol.
fn demangle_symbol(symbol: &str, verbose: bool) {
    if !is_tern_symbol(symbol) {
        println!("{symbol}");
        return;
    }
    match demangle(symbol) {
        Some(demangled) if verbose => {
            println!("{demangled}");
            if let Some(parts) = decompose(symbol) {
                println!("  {parts:?}");
            }
        }
        Some(demangled) => println!("{demangled}"),
        None => println!("{symbol}"),
    }
}

fn list_abi(options: CompileOptions) {
    let mut ts = TypeSystem::new();
    let mut unit = core_unit(&ts);
    let verbose = options.verbose;
    let symbols = match Compiler::new(options).compile_unit(&mut ts, &mut unit) {
        Ok(symbols) => symbols,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    for name in &symbols.types {
        println!("type    {name}");
    }
    for name in &symbols.defined {
        if verbose {
            let demangled = demangle(name).unwrap_or_default();
            println!("define  {name}  {demangled}");
        } else {
            println!("define  {name}");
        }
    }
    if verbose {
        for name in symbols.external() {
            println!("extern  {name}");
        }
    }
}
