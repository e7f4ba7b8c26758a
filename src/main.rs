//! docpress – command-line document assembler.
//!
//! Usage:
//!   docpress <content>... [-o out.html] [--style <css-or-path>] [--title "T"]
//!            [--var key=value]
//!
//! Each `<content>` argument is resolved like any other content input:
//! an existing `.tpl` file is evaluated against the `--var` context, any
//! other existing file is included verbatim, and anything else is treated
//! as literal markup. The assembled HTML is written to the output path.

use std::{env, fs, path::PathBuf, process};

use docpress::{Document, Vars};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut contents: Vec<String> = Vec::new();
    let mut styles: Vec<String> = Vec::new();
    let mut vars = Vars::new();
    let mut title: Option<String> = None;
    let mut output: Option<PathBuf> = None;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--style" | "-s" => match iter.next() {
                Some(v) => styles.push(v.clone()),
                None => die("--style requires an argument", &args[0]),
            },
            "--title" | "-t" => match iter.next() {
                Some(v) => title = Some(v.clone()),
                None => die("--title requires an argument", &args[0]),
            },
            "--var" | "-v" => match iter.next() {
                Some(v) => match v.split_once('=') {
                    Some((key, raw)) => {
                        // Values parse as JSON where possible, else as strings.
                        let value = serde_json::from_str(raw)
                            .unwrap_or_else(|_| serde_json::Value::String(raw.to_string()));
                        vars.insert(key.to_string(), value);
                    }
                    None => die("--var expects key=value", &args[0]),
                },
                None => die("--var requires an argument", &args[0]),
            },
            "--out" | "-o" => match iter.next() {
                Some(v) => output = Some(PathBuf::from(v)),
                None => die("--out requires an argument", &args[0]),
            },
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown flag: {other}");
                print_usage(&args[0]);
                process::exit(1);
            }
            content => contents.push(content.to_string()),
        }
    }

    if contents.is_empty() {
        eprintln!("Error: no content specified.");
        print_usage(&args[0]);
        process::exit(1);
    }

    let output = output.unwrap_or_else(|| PathBuf::from("document.html"));

    let mut doc = Document::new();
    if let Some(title) = title {
        doc.set_title(title);
    }
    doc.add_styles(&styles);

    if let Err(e) = doc.add_contents(&contents, &vars) {
        eprintln!("Error resolving content: {e}");
        process::exit(1);
    }

    let html = match doc.render_html() {
        Ok(html) => html,
        Err(e) => {
            eprintln!("Error assembling document: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = fs::write(&output, &html) {
        eprintln!("Error writing '{}': {e}", output.display());
        process::exit(1);
    }
    eprintln!(
        "Wrote '{}' ({} bytes, {} fragment{})",
        output.display(),
        html.len(),
        doc.fragments().len(),
        if doc.fragments().len() == 1 { "" } else { "s" }
    );
}

fn die(message: &str, prog: &str) -> ! {
    eprintln!("Error: {message}");
    print_usage(prog);
    process::exit(1);
}

fn print_usage(prog: &str) {
    eprintln!("docpress – assemble styles and content fragments into an HTML document");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} <content>... [-o out.html] [flags]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <content>        Literal markup, a file to include verbatim, or a .tpl template");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --style, -s      Add a style entry (inline CSS or a stylesheet path); repeatable");
    eprintln!("  --title, -t      Document title for the head section");
    eprintln!("  --var, -v        Template variable as key=value; repeatable");
    eprintln!("  --out, -o        Output path (default: document.html)");
    eprintln!("  --help           Print this message");
}
