//! Script-template evaluation.
//!
//! A template is plain markup interleaved with two tag forms:
//!
//! - `{{ name }}` – substitute a variable from the context. Dotted names
//!   (`customer.address.city`) descend into nested objects.
//! - `{% directive ... %}` – call back into the owning document:
//!   - `{% newpage %}`, `{% rule <px> %}`, `{% space <px> %}` invoke the
//!     fragment producers; their fragments are appended immediately, so
//!     they land before the fragment captured for this template.
//!   - `{% barcode <arg> [symbology] %}` and `{% image <arg> %}` write the
//!     produced data URI into the captured output. `<arg>` is either a
//!     `"quoted"` literal or a variable name.
//!
//! Output is captured in a buffer local to the evaluation call; any error
//! drops the buffer, so a failed template never contributes a fragment.

use std::path::Path;

use serde_json::Value;

use crate::document::Document;
use crate::engine::Symbology;
use crate::error::{DocumentError, Result};

/// The variable context bound into a template's scope.
pub type Vars = serde_json::Map<String, Value>;

/// Evaluate `source` against `vars`, with `doc` available to the producer
/// directives. Returns the captured output as one fragment string.
pub fn evaluate(source: &str, path: &Path, vars: &Vars, doc: &mut Document) -> Result<String> {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;

    loop {
        let subst = rest.find("{{");
        let direct = rest.find("{%");
        let next = match (subst, direct) {
            (Some(s), Some(d)) => s.min(d),
            (Some(s), None) => s,
            (None, Some(d)) => d,
            (None, None) => break,
        };

        out.push_str(&rest[..next]);
        rest = &rest[next..];

        if rest.starts_with("{{") {
            let close = rest
                .find("}}")
                .ok_or_else(|| eval_error(path, "unterminated `{{` tag"))?;
            let name = rest[2..close].trim();
            let value = lookup(vars, name, path)?;
            out.push_str(&render_scalar(&value, name, path)?);
            rest = &rest[close + 2..];
        } else {
            let close = rest
                .find("%}")
                .ok_or_else(|| eval_error(path, "unterminated `{%` tag"))?;
            let body = rest[2..close].trim();
            run_directive(body, path, vars, doc, &mut out)?;
            rest = &rest[close + 2..];
        }
    }

    out.push_str(rest);
    Ok(out)
}

fn run_directive(
    body: &str,
    path: &Path,
    vars: &Vars,
    doc: &mut Document,
    out: &mut String,
) -> Result<()> {
    let mut words = body.split_whitespace();
    let name = words
        .next()
        .ok_or_else(|| eval_error(path, "empty `{%` tag"))?;
    let args: Vec<&str> = words.collect();

    match (name, args.as_slice()) {
        ("newpage", &[]) => {
            doc.new_page();
        }
        ("rule", &[size]) => {
            doc.dashed_rule(parse_px(size, path)?);
        }
        ("space", &[size]) => {
            doc.vertical_space(parse_px(size, path)?);
        }
        ("barcode", &[arg]) => {
            let value = resolve_arg(arg, vars, path)?;
            out.push_str(&doc.barcode(&value, Symbology::default())?);
        }
        ("barcode", &[arg, symbology]) => {
            let value = resolve_arg(arg, vars, path)?;
            let symbology = Symbology::from_name(symbology).ok_or_else(|| {
                eval_error(path, &format!("unknown barcode symbology: {symbology}"))
            })?;
            out.push_str(&doc.barcode(&value, symbology)?);
        }
        ("image", &[arg]) => {
            let image_path = resolve_arg(arg, vars, path)?;
            out.push_str(&doc.image(&image_path)?);
        }
        _ => {
            return Err(eval_error(
                path,
                &format!("unknown or malformed directive: {body}"),
            ));
        }
    }
    Ok(())
}

/// Resolve a directive argument: a `"quoted"` literal or a variable name.
fn resolve_arg(arg: &str, vars: &Vars, path: &Path) -> Result<String> {
    if arg.len() >= 2 && arg.starts_with('"') && arg.ends_with('"') {
        return Ok(arg[1..arg.len() - 1].to_string());
    }
    let value = lookup(vars, arg, path)?;
    render_scalar(&value, arg, path)
}

/// Dotted-path lookup into the variable context.
fn lookup(vars: &Vars, name: &str, path: &Path) -> Result<Value> {
    let mut parts = name.split('.');
    let first = parts.next().unwrap_or_default();
    let mut current = vars
        .get(first)
        .ok_or_else(|| eval_error(path, &format!("undefined variable: {name}")))?;
    for part in parts {
        current = current
            .get(part)
            .ok_or_else(|| eval_error(path, &format!("undefined variable: {name}")))?;
    }
    Ok(current.clone())
}

fn render_scalar(value: &Value, name: &str, path: &Path) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        Value::Array(_) | Value::Object(_) => Err(eval_error(
            path,
            &format!("variable `{name}` is not a scalar"),
        )),
    }
}

fn parse_px(raw: &str, path: &Path) -> Result<f64> {
    raw.parse::<f64>()
        .map_err(|_| eval_error(path, &format!("expected a numeric size, got `{raw}`")))
}

fn eval_error(path: &Path, message: &str) -> DocumentError {
    DocumentError::TemplateEvaluation {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}
