use std::path::Path;

use crate::error::Error;

/// Read an input file (DDL or type-map JSON) into a string.
///
/// Lines are kept as they are; flattening DDL is the normalizer's job.
pub fn read_text(path: &Path) -> Result<String, Error> {
    std::fs::read_to_string(path).map_err(|e| Error::io("read", path, e))
}

/// Write the rendered schema document, and the report when one is requested.
///
/// Missing parent directories are created.
pub fn write_output(
    xml_path: &Path,
    xml: &str,
    report: Option<(&Path, &str)>,
) -> Result<(), Error> {
    write_text(xml_path, xml)?;
    if let Some((report_path, content)) = report {
        write_text(report_path, content)?;
    }
    Ok(())
}

/// Write one file, creating missing parent directories.
pub fn write_text(path: &Path, content: &str) -> Result<(), Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::io("create directory for", path, e))?;
    }
    std::fs::write(path, content).map_err(|e| Error::io("write", path, e))
}
