//! objinfo: load OBJ meshes and report what a renderer would upload.

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result, bail};
use asset::{LoaderConfig, Mesh, obj};

const USAGE: &str = "usage: objinfo [--max-bytes=N] [--dump] <file.obj>...";

/// Everything the command line can set, gathered once in `main`.
#[derive(Debug, Default, PartialEq)]
struct Options {
    config: LoaderConfig,
    dump: bool,
    paths: Vec<PathBuf>,
}

fn parse_args<I>(args: I) -> Result<Options>
where
    I: IntoIterator<Item = String>,
{
    let mut opts = Options::default();
    for arg in args {
        if let Some(val) = arg.strip_prefix("--max-bytes=") {
            let limit = val
                .parse::<u64>()
                .with_context(|| format!("Invalid --max-bytes value '{val}'"))?;
            opts.config = opts.config.with_max_file_bytes(limit);
        } else if arg == "--dump" {
            opts.dump = true;
        } else if arg.starts_with("--") {
            bail!("Unknown option '{arg}'\n{USAGE}");
        } else {
            opts.paths.push(PathBuf::from(arg));
        }
    }

    if opts.paths.is_empty() {
        bail!("No OBJ file given\n{USAGE}");
    }
    Ok(opts)
}

fn summary(mesh: &Mesh) -> String {
    let mut out = format!(
        "{} corners, {} triangles",
        mesh.len(),
        mesh.triangle_count()
    );
    if let Some(b) = mesh.bounds() {
        let c = b.center();
        out.push_str(&format!(
            ", bounds min=({:.3}, {:.3}, {:.3}) max=({:.3}, {:.3}, {:.3}) \
             center=({:.3}, {:.3}, {:.3}) radius={:.3}",
            b.min.x,
            b.min.y,
            b.min.z,
            b.max.x,
            b.max.y,
            b.max.z,
            c.x,
            c.y,
            c.z,
            b.radius()
        ));
    }
    out
}

/// Write every emitted corner, grouped per triangle.
fn dump<W: Write>(mesh: &Mesh, out: &mut W) -> io::Result<()> {
    let corners = mesh.vertices().iter().zip(mesh.uvs()).zip(mesh.normals());
    for (i, ((p, uv), n)) in corners.enumerate() {
        if i % 3 == 0 {
            writeln!(out, "# triangle {}", i / 3)?;
        }
        writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
        writeln!(out, "vt {} {}", uv.x, uv.y)?;
        writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    Ok(())
}

fn run(opts: &Options) -> Result<()> {
    for path in &opts.paths {
        let mesh = obj::load_obj_from_path_with(path, &opts.config)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        println!("{}: {}", path.display(), summary(&mesh));
        if opts.dump {
            dump(&mesh, &mut io::stdout().lock()).context("Failed to write dump")?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = parse_args(std::env::args().skip(1))?;
    log::debug!(
        "objinfo: {} file(s), max_file_bytes={}, dump={}",
        opts.paths.len(),
        opts.config.max_file_bytes,
        opts.dump
    );

    run(&opts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_paths_and_flags() {
        let opts = parse_args(args(&["--dump", "--max-bytes=1024", "a.obj", "b.obj"])).unwrap();
        assert!(opts.dump);
        assert_eq!(opts.config.max_file_bytes, 1024);
        assert_eq!(opts.paths, vec![PathBuf::from("a.obj"), PathBuf::from("b.obj")]);
    }

    #[test]
    fn defaults_without_flags() {
        let opts = parse_args(args(&["cube.obj"])).unwrap();
        assert!(!opts.dump);
        assert_eq!(opts.config, LoaderConfig::default());
    }

    #[test]
    fn rejects_missing_path_and_bad_flags() {
        assert!(parse_args(args(&[])).is_err());
        assert!(parse_args(args(&["--max-bytes=lots", "a.obj"])).is_err());
        assert!(parse_args(args(&["--fullscreen", "a.obj"])).is_err());
    }

    #[test]
    fn summary_reports_triangles_and_bounds() {
        let mesh = obj::load_obj_from_str(
            "v 0 0 0\nv 2 0 0\nv 0 2 0\nvt 0 0\nvn 0 0 1\nf 1/1/1 2/1/1 3/1/1\n",
        )
        .unwrap();
        let text = summary(&mesh);
        assert!(text.starts_with("3 corners, 1 triangles"), "{text}");
        assert!(text.contains("max=(2.000, 2.000, 0.000)"), "{text}");
        assert!(text.contains("center=(1.000, 1.000, 0.000)"), "{text}");
    }

    #[test]
    fn summary_of_empty_mesh_has_no_bounds() {
        assert_eq!(summary(&Mesh::new()), "0 corners, 0 triangles");
    }

    #[test]
    fn dump_lists_corners_per_triangle() {
        let mesh = obj::load_obj_from_str(
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvt 0 0\nvt 1 1\nvn 0 0 1\n\
             f 1/1/1 2/1/1 3/2/1 4/2/1\n",
        )
        .unwrap();
        let mut out = Vec::new();
        dump(&mesh, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2 * (1 + 3 * 3));
        assert_eq!(lines[..4], ["# triangle 0", "v 0 0 0", "vt 0 0", "vn 0 0 1"]);
        assert_eq!(lines[10], "# triangle 1");
        // Second fan triangle starts again at the first quad corner.
        assert_eq!(lines[11], "v 0 0 0");
        assert_eq!(lines[lines.len() - 3..], ["v 0 1 0", "vt 1 1", "vn 0 0 1"]);
    }

    #[test]
    fn dump_of_empty_mesh_is_empty() {
        let mut out = Vec::new();
        dump(&Mesh::new(), &mut out).unwrap();
        assert!(out.is_empty());
    }
}
