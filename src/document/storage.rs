//! Flat text persistence for layers.
//!
//! Each layer is stored as three files that share a shape index:
//!
//! ```text
//! paths.txt          paths.txt.colors    paths.txt.types
//! 2                  2                   2
//! 2                  255 255 255 255     0
//! 0 0                40 200 90 255       2
//! 100 0
//! 3
//! 10 10
//! 20 30
//! 5 30
//! ```
//!
//! Reading is forgiving: missing files load as empty, short companion files are
//! padded with opaque white / `Line`, and a malformed or truncated token stream
//! simply ends the records read from that file.

use super::{Document, Layer, LayerId, Shape, ShapeType};
use crate::draw::Color;
use crate::draw::color::WHITE;
use crate::geometry::Point;
use log::{debug, info, warn};
use std::ffi::OsString;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to persist a layer. Reading never fails.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Path of a companion file: `<path>.<suffix>`.
pub fn companion_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

/// Whitespace-separated integer tokens. Yields `None` at end of input and at
/// the first token that is not an integer; nothing after that is read.
struct Tokens<'a> {
    inner: std::str::SplitWhitespace<'a>,
    stopped: bool,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace(),
            stopped: false,
        }
    }

    fn next_int(&mut self) -> Option<i64> {
        if self.stopped {
            return None;
        }
        match self.inner.next().map(str::parse::<i64>) {
            Some(Ok(value)) => Some(value),
            Some(Err(_)) | None => {
                self.stopped = true;
                None
            }
        }
    }

    /// Reads a record count; negative counts read as zero.
    fn next_count(&mut self) -> Option<usize> {
        self.next_int().map(|n| usize::try_from(n).unwrap_or(0))
    }

    fn next_coord(&mut self) -> Option<i32> {
        self.next_int()
            .map(|v| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
    }
}

fn read_text(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            warn!("{} not found; treating it as empty", path.display());
            None
        }
        Err(err) => {
            warn!("Could not read {}: {}; treating it as empty", path.display(), err);
            None
        }
    }
}

fn parse_paths(text: &str) -> Vec<Vec<Point>> {
    let mut tokens = Tokens::new(text);
    let Some(count) = tokens.next_count() else {
        return Vec::new();
    };

    let mut paths = Vec::new();
    'shapes: for _ in 0..count {
        let Some(point_count) = tokens.next_count() else {
            break;
        };
        let mut points = Vec::new();
        for _ in 0..point_count {
            match (tokens.next_coord(), tokens.next_coord()) {
                (Some(x), Some(y)) => points.push(Point::new(x, y)),
                _ => break 'shapes,
            }
        }
        paths.push(points);
    }
    paths
}

fn parse_colors(text: &str) -> Vec<Color> {
    let mut tokens = Tokens::new(text);
    let Some(count) = tokens.next_count() else {
        return Vec::new();
    };

    let mut colors = Vec::new();
    for _ in 0..count {
        let mut channels = [0u8; 4];
        for channel in channels.iter_mut() {
            match tokens.next_int() {
                Some(value) => *channel = value.clamp(0, 255) as u8,
                None => return colors,
            }
        }
        let [r, g, b, a] = channels;
        colors.push(Color::new(r, g, b, a));
    }
    colors
}

fn parse_types(text: &str) -> Vec<ShapeType> {
    let mut tokens = Tokens::new(text);
    let Some(count) = tokens.next_count() else {
        return Vec::new();
    };

    let mut types = Vec::new();
    for _ in 0..count {
        match tokens.next_int() {
            Some(tag) => types.push(ShapeType::from_tag(tag)),
            None => break,
        }
    }
    types
}

/// Loads the layer stored at `path` and its `.colors` / `.types` companions.
///
/// The points file decides how many shapes there are; colors and types beyond
/// that are ignored and missing ones are defaulted.
pub fn load_layer(path: &Path) -> Layer {
    let paths = read_text(path).map(|t| parse_paths(&t)).unwrap_or_default();
    let colors = read_text(&companion_path(path, "colors"))
        .map(|t| parse_colors(&t))
        .unwrap_or_default();
    let types = read_text(&companion_path(path, "types"))
        .map(|t| parse_types(&t))
        .unwrap_or_default();

    if colors.len() < paths.len() || types.len() < paths.len() {
        debug!(
            "{}: {} shapes, {} colors, {} types; padding with defaults",
            path.display(),
            paths.len(),
            colors.len(),
            types.len()
        );
    }

    let shapes = paths
        .into_iter()
        .enumerate()
        .map(|(i, points)| {
            let color = colors.get(i).copied().unwrap_or(WHITE);
            let kind = types.get(i).copied().unwrap_or_default();
            Shape::new(points, color, kind)
        })
        .collect();
    Layer::new(shapes)
}

fn write_file(path: &Path, contents: &str) -> Result<(), DocumentError> {
    fs::write(path, contents).map_err(|source| DocumentError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `layer` to `path` plus companions. Every file starts with its count,
/// so an empty layer still produces three files containing `0`.
pub fn save_layer(path: &Path, layer: &Layer) -> Result<(), DocumentError> {
    let mut points = String::new();
    let mut colors = String::new();
    let mut types = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(points, "{}", layer.len());
    let _ = writeln!(colors, "{}", layer.len());
    let _ = writeln!(types, "{}", layer.len());

    for shape in layer.iter() {
        let _ = writeln!(points, "{}", shape.points.len());
        for p in &shape.points {
            let _ = writeln!(points, "{} {}", p.x, p.y);
        }
        let c = shape.color;
        let _ = writeln!(colors, "{} {} {} {}", c.r, c.g, c.b, c.a);
        let _ = writeln!(types, "{}", shape.kind.tag());
    }

    write_file(path, &points)?;
    write_file(&companion_path(path, "colors"), &colors)?;
    write_file(&companion_path(path, "types"), &types)?;
    Ok(())
}

impl Document {
    /// Loads both layers from `base_dir`. Never fails; see [`load_layer`].
    pub fn load(base_dir: &Path) -> Self {
        let foliage = load_layer(&base_dir.join(LayerId::Foliage.file_name()));
        let trunks = load_layer(&base_dir.join(LayerId::Trunks.file_name()));
        info!(
            "Loaded document from {} ({} foliage, {} trunks)",
            base_dir.display(),
            foliage.len(),
            trunks.len()
        );
        Self::new(foliage, trunks)
    }

    /// Saves both layers into `base_dir`.
    ///
    /// Both layers are attempted even if the first fails; the first error is returned.
    pub fn save(&self, base_dir: &Path) -> Result<(), DocumentError> {
        let mut first_error = None;
        for id in LayerId::ALL {
            let path = base_dir.join(id.file_name());
            if let Err(err) = save_layer(&path, self.layer(id)) {
                warn!("Saving {} layer failed: {}", id.name(), err);
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => {
                info!(
                    "Saved document to {} ({} shapes)",
                    base_dir.display(),
                    self.shape_count()
                );
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn line(x0: i32, y0: i32, x1: i32, y1: i32, color: Color) -> Shape {
        Shape::new(
            vec![Point::new(x0, y0), Point::new(x1, y1)],
            color,
            ShapeType::Line,
        )
    }

    fn sample_layer() -> Layer {
        Layer::new(vec![
            line(0, 0, 100, 0, WHITE),
            Shape::new(
                vec![Point::new(10, 10), Point::new(30, 30)],
                Color::new(40, 200, 90, 255),
                ShapeType::Circle,
            ),
            Shape::new(
                vec![Point::new(-5, 7), Point::new(20, 30), Point::new(5, 30)],
                Color::new(1, 2, 3, 4),
                ShapeType::Triangle,
            ),
            Shape::new(
                vec![
                    Point::new(10, 10),
                    Point::new(50, 10),
                    Point::new(50, 50),
                    Point::new(10, 50),
                ],
                Color::new(255, 0, 0, 128),
                ShapeType::Quadrilateral,
            ),
        ])
    }

    #[test]
    fn save_then_load_reproduces_every_layer_combination() {
        for (foliage, trunks) in [
            (Layer::default(), Layer::default()),
            (sample_layer(), Layer::default()),
            (Layer::default(), sample_layer()),
            (sample_layer(), Layer::new(vec![line(1, 2, 3, 4, WHITE)])),
        ] {
            let dir = tempdir().unwrap();
            let doc = Document::new(foliage, trunks);
            doc.save(dir.path()).unwrap();
            assert_eq!(Document::load(dir.path()), doc);
        }
    }

    #[test]
    fn empty_layer_still_writes_count_headers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("current.txt");
        save_layer(&path, &Layer::default()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "0\n");
        assert_eq!(
            fs::read_to_string(companion_path(&path, "colors")).unwrap(),
            "0\n"
        );
        assert_eq!(
            fs::read_to_string(companion_path(&path, "types")).unwrap(),
            "0\n"
        );
    }

    #[test]
    fn written_format_is_line_oriented() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("paths.txt");
        save_layer(&path, &Layer::new(vec![line(0, 0, 100, 0, WHITE)])).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1\n2\n0 0\n100 0\n");
        assert_eq!(
            fs::read_to_string(companion_path(&path, "colors")).unwrap(),
            "1\n255 255 255 255\n"
        );
        assert_eq!(
            fs::read_to_string(companion_path(&path, "types")).unwrap(),
            "1\n0\n"
        );
    }

    #[test]
    fn missing_files_load_as_empty() {
        let dir = tempdir().unwrap();
        let doc = Document::load(dir.path());
        assert_eq!(doc, Document::default());
    }

    #[test]
    fn short_companions_are_padded_with_white_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("paths.txt");
        fs::write(&path, "2\n2\n0 0\n1 1\n3\n0 0\n5 5\n0 5\n").unwrap();
        fs::write(companion_path(&path, "colors"), "1\n9 8 7 6\n").unwrap();

        let layer = load_layer(&path);
        assert_eq!(layer.len(), 2);
        assert_eq!(layer.shapes[0].color, Color::new(9, 8, 7, 6));
        assert_eq!(layer.shapes[1].color, WHITE);
        assert!(layer.iter().all(|s| s.kind == ShapeType::Line));
        assert_eq!(layer.shapes[1].points.len(), 3);
    }

    #[test]
    fn out_of_range_values_are_normalized() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("paths.txt");
        fs::write(&path, "2\n2\n0 0\n1 1\n2\n2 2\n3 3\n").unwrap();
        fs::write(companion_path(&path, "colors"), "2\n300 -4 10 255\n1 2 3 4\n").unwrap();
        fs::write(companion_path(&path, "types"), "2\n7\n-2\n").unwrap();

        let layer = load_layer(&path);
        assert_eq!(layer.shapes[0].color, Color::new(255, 0, 10, 255));
        assert_eq!(layer.shapes[0].kind, ShapeType::Line);
        assert_eq!(layer.shapes[1].kind, ShapeType::Line);
    }

    #[test]
    fn malformed_token_stops_reading_but_keeps_earlier_shapes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("paths.txt");
        fs::write(&path, "3\n2\n0 0\n10 0\n2\n5 x\n9 9\n2\n1 1\n2 2\n").unwrap();

        let layer = load_layer(&path);
        assert_eq!(layer.len(), 1);
        assert_eq!(layer.shapes[0].points, vec![Point::new(0, 0), Point::new(10, 0)]);
    }

    #[test]
    fn truncated_file_keeps_complete_shapes_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("paths.txt");
        fs::write(&path, "5\n2\n0 0\n1 1\n2\n4 4\n").unwrap();
        assert_eq!(load_layer(&path).len(), 1);
    }

    #[test]
    fn negative_counts_read_as_zero() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("paths.txt");
        fs::write(&path, "-3\n2\n0 0\n1 1\n").unwrap();
        assert!(load_layer(&path).is_empty());
    }

    #[test]
    fn save_into_missing_directory_reports_the_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = Document::default().save(&missing).unwrap_err();
        let DocumentError::Write { path, .. } = err;
        assert!(path.starts_with(&missing));
    }
}
