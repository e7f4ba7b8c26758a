//! Document assembler – concatenates styles and fragments into the fixed
//! head + body skeleton.
//!
//! Every call re-concatenates from the current sequences; there is no
//! caching, so repeated renders after further mutation reflect the latest
//! state. Output is deterministic for a given state: entries are joined in
//! insertion order, each followed by a newline, and nothing is reordered.

use crate::document::StyleEntry;
use crate::error::Result;
use crate::files::Filesystem;

/// Build the final HTML document.
///
/// File-backed style entries are resolved through `fs` here, at assembly
/// time; a read failure aborts the whole assembly and no partial HTML is
/// returned.
pub fn assemble(
    title: &str,
    styles: &[StyleEntry],
    fragments: &[String],
    fs: &dyn Filesystem,
) -> Result<String> {
    let mut style_blob = String::new();
    for entry in styles {
        match entry {
            StyleEntry::Inline(css) => style_blob.push_str(css),
            StyleEntry::File(path) => {
                let bytes = fs.read(path)?;
                style_blob.push_str(&String::from_utf8_lossy(&bytes));
            }
        }
        style_blob.push('\n');
    }

    let mut content_blob = String::new();
    for fragment in fragments {
        content_blob.push_str(fragment);
        content_blob.push('\n');
    }

    log::debug!(
        "assembled document: {} style entries, {} fragments",
        styles.len(),
        fragments.len()
    );

    Ok(format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <style>\n\
         {style_blob}</style>\n\
         </head>\n\
         <body>\n\
         {content_blob}</body>\n\
         </html>\n"
    ))
}
