use crate::error::ExportError;
use crate::export::snapshot::wall_key;
use crate::view::Scene;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const HEADER: [&str; 12] = [
    "Floor",
    "Wall",
    "Tags",
    "Face",
    "Visible",
    "Width",
    "Height",
    "X",
    "Y",
    "Z",
    "Rotation Axis",
    "Rotation Degrees",
];

/// Writes one row per side of every wall.
pub fn export_csv<P: AsRef<Path>>(scene: &Scene, path: P) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;
    write_csv(scene, file)?;
    tracing::info!(path = %path_ref.display(), "Exported side table");
    Ok(())
}

pub fn write_csv<W: Write>(scene: &Scene, out: W) -> Result<(), ExportError> {
    let building = scene.building();
    let mut writer = csv::Writer::from_writer(out);

    writer.write_record(HEADER)?;

    for wall in building.walls() {
        let floor = building.floor(wall.floor).map_or("", |f| f.name.as_str());
        let tags = wall.tags.to_string();
        let id = wall_key(wall.id).to_string();
        let visible = scene.is_visible(wall.id).to_string();
        for side in &wall.sides {
            let [x, y, z] = side.placement.translate;
            let (axis, degrees) = match &side.placement.rotate {
                Some(r) => (format!("{:?}", r.axis), r.degrees.to_string()),
                None => (String::new(), String::new()),
            };
            let numbers = [side.width, side.height, x, y, z].map(|n| n.to_string());
            writer.write_record([
                floor,
                id.as_str(),
                tags.as_str(),
                side.kind.as_str(),
                visible.as_str(),
                numbers[0].as_str(),
                numbers[1].as_str(),
                numbers[2].as_str(),
                numbers[3].as_str(),
                numbers[4].as_str(),
                axis.as_str(),
                degrees.as_str(),
            ])?;
        }
    }

    writer.flush().map_err(|e| ExportError::WriteError {
        message: e.to_string(),
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{build_with_scale, Scale};
    use crate::parser::parse_descriptor_str;
    use pretty_assertions::assert_eq;

    #[test]
    fn one_row_per_side() {
        let d = parse_descriptor_str(
            r#"{"l": 4, "d": 4, "h": 2,
                "floors": [{"name": "Ground", "l": 4, "d": 4,
                            "windows": [{"x": 1, "y": 1, "l": 1, "h": 1}]}]}"#,
        )
        .unwrap();
        let (scene, _) = Scene::new(build_with_scale(&d, Scale::identity()).building, "", "");

        let mut out = Vec::new();
        write_csv(&scene, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Floor,Wall,Tags,Face,Visible"));
        assert!(lines[1].starts_with("Ground,"));
        assert!(lines[1].contains(",window outer-front,front,true,1,1,1,-1,2,,"));
    }
}
