use crate::error::DescriptorError;
use crate::parser::descriptor::BuildingDescriptor;
use std::path::Path;

/// Reads a building descriptor from a JSON file.
///
/// Values inside the descriptor are coerced rather than validated: a box
/// with missing dimensions loads as a zero-sized box and later renders as
/// nothing.
///
/// # Errors
///
/// Returns [`DescriptorError::FileRead`] if the file cannot be read.
/// Returns [`DescriptorError::InvalidJson`] if the content is not JSON.
///
/// # Example
///
/// ```no_run
/// use building_viewer::parser::parse_descriptor_file;
///
/// let building = parse_descriptor_file("building.json")?;
/// for floor in &building.floors {
///     println!("{}: {} outer walls", floor.name(), floor.walls.outer.len());
/// }
/// # Ok::<(), building_viewer::error::DescriptorError>(())
/// ```
pub fn parse_descriptor_file<P: AsRef<Path>>(path: P) -> Result<BuildingDescriptor, DescriptorError> {
    let content = std::fs::read_to_string(&path).map_err(|source| DescriptorError::FileRead {
        path: path.as_ref().to_path_buf(),
        source,
    })?;

    let descriptor = parse_descriptor_str(&content)?;
    tracing::debug!(
        path = %path.as_ref().display(),
        floors = descriptor.floors.len(),
        "Loaded building descriptor"
    );
    Ok(descriptor)
}

/// Parses a building descriptor from JSON text.
pub fn parse_descriptor_str(content: &str) -> Result<BuildingDescriptor, DescriptorError> {
    Ok(serde_json::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reports_missing_file() {
        let err = parse_descriptor_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, DescriptorError::FileRead { .. }));
    }

    #[test]
    fn reports_non_json() {
        let err = parse_descriptor_str("floors: []").unwrap_err();
        assert!(matches!(err, DescriptorError::InvalidJson { .. }));
    }

    #[test]
    fn empty_object_is_an_empty_building() {
        let b = parse_descriptor_str("{}").unwrap();
        assert!(b.floors.is_empty());
        assert_eq!(b.l, 0.0);
    }

    #[test]
    fn reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!("building-viewer-loader-{}.json", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{"name": "Shed", "l": 4, "d": 3, "h": 2.5, "floors": []}}"#).unwrap();
        drop(file);
        let b = parse_descriptor_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(b.name, "Shed");
        assert_eq!(b.h, 2.5);
    }
}
