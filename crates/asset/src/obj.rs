//! OBJ loader for the `v`/`vt`/`vn`/`f` subset, flattened into a triangle list.
//!
//! Faces must use the full `p/t/n` form and have 3 or 4 corners. Quads are
//! split with the fixed fan (A,B,C) + (A,C,D). Attributes have to be defined
//! before the faces that use them; every other record kind is skipped.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Read},
    num::IntErrorKind,
    path::Path,
    str::SplitWhitespace,
};

use corelib::{Vec2, Vec3, vec2, vec3};

use crate::{
    config::LoaderConfig,
    error::{IndexKind, LoadError, LoadResult},
    mesh::Mesh,
};

/// Name used in errors when the input did not come from a file.
const READER_SOURCE: &str = "<reader>";

/// Load an OBJ mesh from a file path with the default [`LoaderConfig`].
pub fn load_obj_from_path(path: impl AsRef<Path>) -> LoadResult<Mesh> {
    load_obj_from_path_with(path, &LoaderConfig::default())
}

/// Load an OBJ mesh from a file path.
///
/// The file size is checked against `config.max_file_bytes` before anything
/// is read, and reading stops once the limit is crossed, so devices, pipes
/// and files that grow after opening stay bounded too. The handle is closed
/// on return, including on error.
pub fn load_obj_from_path_with(
    path: impl AsRef<Path>,
    config: &LoaderConfig,
) -> LoadResult<Mesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::FileUnreadable {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let size = file
        .metadata()
        .map_err(|source| LoadError::FileUnreadable {
            path: path.to_path_buf(),
            source,
        })?
        .len();
    if size > config.max_file_bytes {
        return Err(LoadError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            limit: config.max_file_bytes,
        });
    }
    log::debug!("Loading OBJ {} ({} bytes)", path.display(), size);

    let limit = config.max_file_bytes;
    let mut reader = BufReader::new(file.take(limit.saturating_add(1)));
    let parsed = parse_obj(&mut reader, path);
    if reader.get_ref().limit() == 0 {
        return Err(LoadError::FileTooLarge {
            path: path.to_path_buf(),
            size: limit.saturating_add(1),
            limit,
        });
    }

    let mesh = parsed?;
    log::info!(
        "Loaded OBJ {}: {} triangles",
        path.display(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Load an OBJ mesh from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(reader: R) -> LoadResult<Mesh> {
    parse_obj(reader, Path::new(READER_SOURCE))
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str) -> LoadResult<Mesh> {
    parse_obj(io::Cursor::new(contents), Path::new(READER_SOURCE))
}

/// Attribute tables in file order, 0-based.
#[derive(Debug, Default)]
struct RawAttributes {
    positions: Vec<Vec3>,
    tex_coords: Vec<Vec2>,
    normals: Vec<Vec3>,
}

/// One face corner as validated 0-based indices into [`RawAttributes`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Corner {
    position: usize,
    tex_coord: usize,
    normal: usize,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum FaceRecord {
    Triangle([Corner; 3]),
    Quad([Corner; 4]),
}

impl FaceRecord {
    fn triangle_count(&self) -> usize {
        match self {
            FaceRecord::Triangle(_) => 1,
            FaceRecord::Quad(_) => 2,
        }
    }
}

fn parse_obj<R: BufRead>(reader: R, source: &Path) -> LoadResult<Mesh> {
    let mut attrs = RawAttributes::default();
    let mut faces: Vec<FaceRecord> = Vec::new();

    for (line_idx, line) in reader.lines().enumerate() {
        let line_no = line_idx + 1;
        let line = line.map_err(|e| LoadError::FileUnreadable {
            path: source.to_path_buf(),
            source: e,
        })?;
        // Inline comments end the record.
        let record = match line.split_once('#') {
            Some((before, _)) => before,
            None => line.as_str(),
        };

        let mut parts = record.split_whitespace();
        let Some(tag) = parts.next() else {
            continue;
        };

        match tag {
            "v" => {
                let [x, y, z] = parse_floats(&mut parts, line_no, "v")?;
                attrs.positions.push(vec3(x, y, z));
            }
            "vt" => {
                let [u, v] = parse_floats(&mut parts, line_no, "vt")?;
                attrs.tex_coords.push(vec2(u, v));
            }
            "vn" => {
                let [x, y, z] = parse_floats(&mut parts, line_no, "vn")?;
                attrs.normals.push(vec3(x, y, z));
            }
            "f" => faces.push(parse_face(parts, line_no, &attrs)?),
            _ => {
                // o/g/s/usemtl/mtllib/l/p etc. are not part of the subset.
            }
        }
    }

    let quads = faces
        .iter()
        .filter(|f| matches!(f, FaceRecord::Quad(_)))
        .count();
    log::debug!(
        "OBJ contains {} positions, {} uvs, {} normals, {} faces ({} quads)",
        attrs.positions.len(),
        attrs.tex_coords.len(),
        attrs.normals.len(),
        faces.len(),
        quads
    );

    Ok(resolve_faces(&attrs, &faces))
}

fn parse_floats<const N: usize>(
    parts: &mut SplitWhitespace<'_>,
    line_no: usize,
    tag: &'static str,
) -> LoadResult<[f32; N]> {
    let mut out = [0.0f32; N];
    for slot in &mut out {
        *slot = parts
            .next()
            .and_then(|token| token.parse::<f32>().ok())
            .ok_or(LoadError::MalformedAttribute { line: line_no, tag })?;
    }
    Ok(out)
}

fn parse_face(
    parts: SplitWhitespace<'_>,
    line_no: usize,
    attrs: &RawAttributes,
) -> LoadResult<FaceRecord> {
    let groups: Vec<&str> = parts.collect();
    let corner = |group: &str| parse_corner(group, line_no, attrs);

    match groups[..] {
        [a, b, c] => Ok(FaceRecord::Triangle([corner(a)?, corner(b)?, corner(c)?])),
        [a, b, c, d] => Ok(FaceRecord::Quad([
            corner(a)?,
            corner(b)?,
            corner(c)?,
            corner(d)?,
        ])),
        _ => Err(LoadError::MalformedFace {
            line: line_no,
            reason: format!("expected 3 or 4 corners, found {}", groups.len()),
        }),
    }
}

/// Parse one `p/t/n` group. All three indices are required.
fn parse_corner(group: &str, line_no: usize, attrs: &RawAttributes) -> LoadResult<Corner> {
    let malformed = || LoadError::MalformedFace {
        line: line_no,
        reason: format!("expected 'position/texcoord/normal', found '{group}'"),
    };

    let mut fields = group.split('/');
    let mut next_index = || -> LoadResult<i64> {
        fields
            .next()
            .and_then(parse_index)
            .ok_or_else(malformed)
    };
    let position = next_index()?;
    let tex_coord = next_index()?;
    let normal = next_index()?;
    if fields.next().is_some() {
        return Err(malformed());
    }

    let position = resolve_index(position, attrs.positions.len(), IndexKind::Position, line_no)?;
    let tex_coord =
        resolve_index(tex_coord, attrs.tex_coords.len(), IndexKind::TexCoord, line_no)?;
    let normal = resolve_index(normal, attrs.normals.len(), IndexKind::Normal, line_no)?;
    Ok(Corner {
        position,
        tex_coord,
        normal,
    })
}

/// Integer index token. Digits that overflow `i64` saturate so they are
/// reported as out of range rather than as a syntax error.
fn parse_index(field: &str) -> Option<i64> {
    match field.parse::<i64>() {
        Ok(raw) => Some(raw),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

/// 1-based file index to 0-based table index. Zero, negative (relative) and
/// not-yet-defined indices are all dangling.
fn resolve_index(raw: i64, len: usize, kind: IndexKind, line_no: usize) -> LoadResult<usize> {
    let dangling = LoadError::DanglingIndex {
        line: line_no,
        kind,
        index: raw,
        len,
    };
    match usize::try_from(raw) {
        Ok(idx) if (1..=len).contains(&idx) => Ok(idx - 1),
        _ => Err(dangling),
    }
}

/// Flatten faces into per-corner sequences. Indices were bounds-checked
/// while parsing and tables only grow, so direct indexing is safe.
fn resolve_faces(attrs: &RawAttributes, faces: &[FaceRecord]) -> Mesh {
    let triangles = faces.iter().map(FaceRecord::triangle_count).sum();
    let mut mesh = Mesh::with_triangle_capacity(triangles);

    let lookup = |c: Corner| {
        (
            attrs.positions[c.position],
            attrs.tex_coords[c.tex_coord],
            attrs.normals[c.normal],
        )
    };

    for face in faces {
        match *face {
            FaceRecord::Triangle([a, b, c]) => {
                mesh.push_triangle([lookup(a), lookup(b), lookup(c)]);
            }
            FaceRecord::Quad([a, b, c, d]) => {
                mesh.push_triangle([lookup(a), lookup(b), lookup(c)]);
                mesh.push_triangle([lookup(a), lookup(c), lookup(d)]);
            }
        }
    }

    mesh
}
