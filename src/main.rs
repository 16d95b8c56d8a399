use std::env;
use std::fs;
use std::path::Path;
use std::process;

use php2js::test_runner::TestRunner;
use php2js::translator::Translator;

fn translate_to_stdout(source: &str, pack: bool) -> Result<(), String> {
    let js = Translator::new()
        .translate_source(source, pack)
        .map_err(|e| e.to_string())?;
    println!("{}", js);
    Ok(())
}

fn run_tests(dir: &str, verbose: bool) -> Result<(), String> {
    let summary = TestRunner::new(Path::new(dir), verbose).run_all()?;
    if summary.failed + summary.errors > 0 {
        process::exit(1);
    }
    Ok(())
}

/// First argument from position `from` on that is not an option flag.
fn positional(args: &[String], from: usize) -> Option<&str> {
    args.get(from..)?
        .iter()
        .find(|a| !a.starts_with('-'))
        .map(|s| s.as_str())
}

fn print_usage(program: &str) {
    eprintln!(
        "php2js: token-level PHP to JavaScript translator v{}",
        env!("CARGO_PKG_VERSION")
    );
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} <file.php> [options]     Translate a PHP file", program);
    eprintln!("  {} -r <code> [options]      Translate code directly", program);
    eprintln!("  {} test [dir] [-v]          Run .p2jt fixture tests", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -p, --pack              Collapse whitespace runs in the output");
    eprintln!("  -v, --verbose           Per-test detail when running fixtures");
    eprintln!();
    eprintln!("Fixture sections (.p2jt):");
    eprintln!("  --TEST--                Name shown in reports (required)");
    eprintln!("  --DESCRIPTION--         Longer description for verbose failures");
    eprintln!("  --FILE--                PHP source to translate (required)");
    eprintln!("  --PACK--                Translate in pack mode");
    eprintln!("  --EXPECT--              Exact expected output (one EXPECT form required)");
    eprintln!("  --EXPECTF--             Expected output with %s/%d/%w/%a wildcards");
    eprintln!("  --EXPECT_ERROR--        Substring of the expected error");
    eprintln!("  --SKIPIF--              Skip the case, giving a reason");
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        process::exit(1);
    }

    let pack = args[1..].iter().any(|a| a == "-p" || a == "--pack");

    let result = match args[1].as_str() {
        "-r" => {
            if args.len() < 3 || matches!(args[2].as_str(), "-p" | "--pack") {
                eprintln!("Error: -r requires a code argument");
                process::exit(1);
            }
            translate_to_stdout(&args[2], pack)
        }
        "test" => {
            let verbose = args[2..].iter().any(|a| a == "-v" || a == "--verbose");
            let dir = positional(&args, 2).unwrap_or("tests/cases");
            run_tests(dir, verbose)
        }
        "-h" | "--help" => {
            print_usage(&args[0]);
            Ok(())
        }
        // The file name may come before or after the option flags
        _ => match positional(&args, 1) {
            Some(filename) => match fs::read_to_string(filename) {
                Ok(source) => translate_to_stdout(&source, pack),
                Err(e) => {
                    eprintln!("Error reading file '{}': {}", filename, e);
                    process::exit(1);
                }
            },
            None => {
                print_usage(&args[0]);
                process::exit(1);
            }
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
