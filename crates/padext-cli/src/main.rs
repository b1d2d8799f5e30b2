//! padext CLI - edit and resolve extrusion parameters from the terminal.
//!
//! Operates on a JSON project document, drives an editing session the same
//! way a dialog host would, and prints the resolved extent and the commit
//! script.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use padext_ir::{AxisRef, DocObject, ExtrudeMode, ObjectKind, ProjectDoc, Vec3};
use padext_resolver::{DirectionCandidate, ExtentLimit, ExtrusionExtent};
use padext_session::{
    DocumentStore, EditSession, ExtentRecompute, FieldEdit, RecomputeService, RecomputeStatus,
};

#[derive(Parser)]
#[command(name = "padext")]
#[command(about = "Extrusion parameter editor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a sample project document
    Init {
        /// Output .json file
        file: PathBuf,
    },
    /// Display a project document's objects and pad parameters
    Info {
        /// Path to the .json project document
        file: PathBuf,
    },
    /// Resolve and print the extrusion vector and limits
    Resolve {
        /// Path to the .json project document
        file: PathBuf,
    },
    /// Apply field edits through an editing session
    Edit {
        /// Path to the .json project document
        input: PathBuf,
        /// Edits of the form field=value, e.g. length=25 mode=UpToFace
        #[arg(short, long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,
        /// Treat the pad as newly created (seed fields from usage history)
        #[arg(long)]
        new: bool,
        /// Accept the session and write the document back
        #[arg(long)]
        apply: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { file } => init_doc(&file),
        Commands::Info { file } => show_info(&file),
        Commands::Resolve { file } => resolve(&file),
        Commands::Edit {
            input,
            set,
            new,
            apply,
        } => edit(&input, &set, new, apply),
    }
}

fn load_doc(path: &Path) -> Result<ProjectDoc> {
    let json =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    ProjectDoc::from_json(&json).with_context(|| format!("parsing {}", path.display()))
}

fn save_doc(path: &Path, doc: &ProjectDoc) -> Result<()> {
    fs::write(path, doc.to_json()?).with_context(|| format!("writing {}", path.display()))
}

fn init_doc(path: &Path) -> Result<()> {
    let mut doc = ProjectDoc::new();
    doc.objects.push(DocObject {
        name: "Sketch".to_string(),
        label: "Profile".to_string(),
        kind: ObjectKind::Sketch {
            normal: Vec3::new(0.0, 0.0, 1.0),
        },
    });
    doc.objects.push(DocObject {
        name: "Box".to_string(),
        label: "Support".to_string(),
        kind: ObjectKind::Solid {
            faces: 6,
            edges: vec![
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
            ],
        },
    });
    doc.objects.push(DocObject {
        name: "Plane001".to_string(),
        label: "Stop plane".to_string(),
        kind: ObjectKind::DatumPlane {
            normal: Vec3::new(0.0, 0.0, 1.0),
        },
    });
    doc.pad.profile = "Sketch".to_string();
    save_doc(path, &doc)?;
    println!("Wrote sample document to {}", path.display());
    Ok(())
}

fn show_info(path: &Path) -> Result<()> {
    let doc = load_doc(path)?;
    println!("Objects:");
    for obj in &doc.objects {
        let kind = match &obj.kind {
            ObjectKind::Sketch { .. } => "sketch",
            ObjectKind::DatumPlane { .. } => "datum plane",
            ObjectKind::Solid { .. } => "solid",
            ObjectKind::Axis { .. } => "axis",
        };
        println!("  {} ({kind}) label={:?}", obj.name, obj.label);
    }
    let pad = &doc.pad;
    println!("Pad:");
    println!("  profile   = {}", pad.profile);
    println!("  mode      = {}", pad.mode);
    println!("  length    = {}", pad.length);
    println!("  length2   = {}", pad.length2);
    println!("  offset    = {}", pad.offset);
    println!(
        "  direction = {} (custom: {}, along normal: {})",
        pad.direction, pad.use_custom_vector, pad.along_sketch_normal
    );
    match &pad.reference_axis {
        Some(axis) => println!("  axis      = {axis}"),
        None => println!("  axis      = sketch normal"),
    }
    println!("  reversed  = {}", pad.reversed);
    println!("  midplane  = {}", pad.midplane);
    match &pad.up_to_face {
        Some(face) => println!("  up to     = {}", face.commit_form()),
        None => println!("  up to     = None"),
    }
    Ok(())
}

fn resolve(path: &Path) -> Result<()> {
    let doc = load_doc(path)?;
    let store = DocumentStore::new(doc);
    let params = store.doc().pad.clone();
    let feedback = ExtentRecompute
        .recompute(&params, &store)
        .context("resolving extent")?;
    print_extent(&feedback.extent);
    Ok(())
}

fn print_extent(extent: &ExtrusionExtent) {
    let d = extent.direction;
    println!("direction = ({:.6}, {:.6}, {:.6})", d.x, d.y, d.z);
    println!("forward   = {:.6}", extent.forward);
    println!("backward  = {:.6}", extent.backward);
    match &extent.limit {
        ExtentLimit::Blind => println!("limit     = blind"),
        ExtentLimit::ThroughFirst { clearance } => {
            println!("limit     = up to first (clearance {clearance})")
        }
        ExtentLimit::ThroughLast { clearance } => {
            println!("limit     = up to last (clearance {clearance})")
        }
        ExtentLimit::Face { target, clearance } => println!(
            "limit     = up to face {} (clearance {clearance})",
            target.commit_form()
        ),
    }
    if extent.custom_fallback {
        println!("note      = null custom vector, sketch normal used");
    }
}

fn edit(path: &Path, edits: &[String], new: bool, apply: bool) -> Result<()> {
    let doc = load_doc(path)?;
    let store = DocumentStore::new(doc);
    let mut session = if new {
        EditSession::open_new(store, ExtentRecompute)
    } else {
        EditSession::open(store, ExtentRecompute)
    };

    for raw in edits {
        let edit = parse_edit(raw)?;
        let feedback = session.apply_edit(edit);
        if let Some(issue) = feedback.issue {
            println!("{raw}: {issue}");
        }
        if let Some(filter) = feedback.selection_request {
            println!("{raw}: awaiting reference selection ({filter:?})");
        }
        if let RecomputeStatus::Failed(e) = feedback.recompute {
            println!("{raw}: {e}");
        }
    }

    println!("Commit script:");
    for stmt in session.commit() {
        println!("  {stmt}");
    }

    if apply {
        let (store, _script) = session.accept();
        save_doc(path, store.doc())?;
        println!("Applied to {}", path.display());
    }
    Ok(())
}

fn parse_edit(raw: &str) -> Result<FieldEdit> {
    let Some((field, value)) = raw.split_once('=') else {
        bail!("expected field=value, got {raw:?}");
    };
    let field = field.trim();
    let value = value.trim();
    let number = || -> Result<f64> {
        value
            .parse()
            .with_context(|| format!("{field}: expected a number, got {value:?}"))
    };
    let boolean = || -> Result<bool> {
        match value {
            "1" | "true" | "on" => Ok(true),
            "0" | "false" | "off" => Ok(false),
            _ => bail!("{field}: expected a boolean, got {value:?}"),
        }
    };

    Ok(match field {
        "length" => FieldEdit::Length(number()?),
        "length2" => FieldEdit::Length2(number()?),
        "offset" => FieldEdit::Offset(number()?),
        "x" => FieldEdit::DirectionX(number()?),
        "y" => FieldEdit::DirectionY(number()?),
        "z" => FieldEdit::DirectionZ(number()?),
        "along" => FieldEdit::AlongSketchNormal(boolean()?),
        "midplane" => FieldEdit::Midplane(boolean()?),
        "reversed" => FieldEdit::Reversed(boolean()?),
        "live" => FieldEdit::LiveUpdate(boolean()?),
        "mode" => FieldEdit::Mode(
            ExtrudeMode::from_property_value(value)
                .with_context(|| format!("mode: unknown value {value:?}"))?,
        ),
        "direction" => FieldEdit::Direction(parse_direction(value)?),
        "face" => FieldEdit::FaceLabel(value.to_string()),
        _ => bail!("unknown field {field:?}"),
    })
}

fn parse_direction(value: &str) -> Result<DirectionCandidate> {
    Ok(match value {
        "normal" => DirectionCandidate::SketchNormal,
        "select" => DirectionCandidate::SelectReference,
        "custom" => DirectionCandidate::Custom,
        axis => match axis.split_once(':') {
            // a picked axis is addressed as Object:SubElement
            Some((object, sub)) if !object.is_empty() && !sub.is_empty() => {
                DirectionCandidate::NamedAxis(AxisRef::new(object, sub))
            }
            _ => bail!("direction: expected normal, select, custom or Object:SubElement"),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_numeric_and_flag_edits() {
        assert_eq!(parse_edit("length=25").unwrap(), FieldEdit::Length(25.0));
        assert_eq!(
            parse_edit("midplane=on").unwrap(),
            FieldEdit::Midplane(true)
        );
        assert_eq!(
            parse_edit("mode=UpToFace").unwrap(),
            FieldEdit::Mode(ExtrudeMode::UpToFace)
        );
        assert!(parse_edit("length=abc").is_err());
        assert!(parse_edit("nonsense").is_err());
    }

    #[test]
    fn parse_direction_candidates() {
        assert_eq!(
            parse_edit("direction=normal").unwrap(),
            FieldEdit::Direction(DirectionCandidate::SketchNormal)
        );
        assert_eq!(
            parse_edit("direction=Box:Edge2").unwrap(),
            FieldEdit::Direction(DirectionCandidate::NamedAxis(AxisRef::new("Box", "Edge2")))
        );
        assert!(parse_edit("direction=bogus").is_err());
    }
}
