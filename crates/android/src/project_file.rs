//! Eclipse `.project` file updates
//!
//! Places a rendered `<linkedResources>` block inside `<projectDescription>`,
//! replacing any block a previous run left there.

use droidres_core::error::{Error, Result, ResultExt};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::debug;

static LINKED_RESOURCES_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)[ \t]*<linkedResources\s*(?:/>|>.*?</linkedResources>)[ \t]*\r?\n?").unwrap()
});

static PROJECT_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]*</projectDescription>").unwrap());

/// Return `project_xml` with `block` as its linked-resources section
pub fn splice_linked_resources(project_xml: &str, block: &str) -> Result<String> {
    let Some(end) = PROJECT_END.find(project_xml) else {
        return Err(Error::invalid_project(
            "No closing </projectDescription> tag found",
        ));
    };

    let mut block = indent_block(block, "\t");
    if !block.ends_with('\n') {
        block.push('\n');
    }

    if let Some(existing) = LINKED_RESOURCES_BLOCK.find(&project_xml[..end.start()]) {
        debug!(start = existing.start(), "replacing existing linkedResources block");
        let mut out = String::with_capacity(project_xml.len() + block.len());
        out.push_str(&project_xml[..existing.start()]);
        out.push_str(&block);
        out.push_str(&project_xml[existing.end()..]);
        return Ok(out);
    }

    debug!("inserting linkedResources block");
    let mut out = String::with_capacity(project_xml.len() + block.len());
    out.push_str(&project_xml[..end.start()]);
    out.push_str(&block);
    out.push_str(&project_xml[end.start()..]);
    Ok(out)
}

fn indent_block(block: &str, indent: &str) -> String {
    block
        .lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rewrite the `.project` file at `path` with `block` spliced in
pub fn update_project_file(path: &Path, block: &str) -> Result<()> {
    if !path.is_file() {
        return Err(Error::file_not_found(path));
    }

    let original = fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Reading {}", path.display()))?;
    let updated =
        splice_linked_resources(&original, block).context(format!("Updating {}", path.display()))?;

    fs::write(path, updated)
        .map_err(Error::from)
        .context(format!("Writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use droidres_core::error::ErrorCode;
    use tempfile::TempDir;

    const PROJECT: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<projectDescription>\n\
\t<name>FidoCadJ</name>\n\
\t<natures>\n\
\t\t<nature>com.android.ide.eclipse.adt.AndroidNature</nature>\n\
\t</natures>\n\
</projectDescription>\n";

    const BLOCK: &str = "<linkedResources>\n\t<link>\n\t\t<name>src/a</name>\n\t\t<type>2</type>\n\t\t<location>/p/src/a</location>\n\t</link>\n</linkedResources>\n";

    #[test]
    fn test_insert_before_closing_tag() {
        let out = splice_linked_resources(PROJECT, BLOCK).unwrap();
        assert!(out.contains("\t</natures>\n\t<linkedResources>\n\t\t<link>\n"));
        assert!(out.ends_with("\t</linkedResources>\n</projectDescription>\n"));
    }

    #[test]
    fn test_splice_is_idempotent() {
        let once = splice_linked_resources(PROJECT, BLOCK).unwrap();
        let twice = splice_linked_resources(&once, BLOCK).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_replaces_existing_block() {
        let first = splice_linked_resources(PROJECT, BLOCK).unwrap();
        let empty = "<linkedResources>\n</linkedResources>\n";
        let out = splice_linked_resources(&first, empty).unwrap();

        assert!(!out.contains("src/a"));
        assert_eq!(out.matches("<linkedResources>").count(), 1);
    }

    #[test]
    fn test_replaces_self_closing_block() {
        let project = PROJECT.replace(
            "</projectDescription>",
            "\t<linkedResources/>\n</projectDescription>",
        );
        let out = splice_linked_resources(&project, BLOCK).unwrap();
        assert!(!out.contains("<linkedResources/>"));
        assert!(out.contains("<name>src/a</name>"));
    }

    #[test]
    fn test_missing_project_description() {
        let err = splice_linked_resources("<project/>", BLOCK).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidProject);
    }

    #[test]
    fn test_update_project_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".project");
        fs::write(&path, PROJECT).unwrap();

        update_project_file(&path, BLOCK).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("<location>/p/src/a</location>"));
    }

    #[test]
    fn test_update_missing_project_file() {
        let dir = TempDir::new().unwrap();
        let err = update_project_file(&dir.path().join(".project"), BLOCK).unwrap_err();
        assert_eq!(err.code, ErrorCode::FileNotFound);
    }
}
