//! Project files
//!
//! A project is the list of placements that produced a track, one per line:
//!
//! ```text
//! name:x:y:z:pitch:yaw:roll
//! ```
//!
//! Loading a project replays every placement through the same path as
//! placing it by hand, so a reloaded track matches the original.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::info;

use crate::blueprint::{Blueprint, BlueprintLibrary};
use crate::math::{Euler, Vec3};
use super::{Track, TrackError, OUTPUT_PRECISION};

/// Field separator in placement records
pub const SEPARATOR: char = ':';

/// Number of fields in a placement record
pub const FIELD_COUNT: usize = 7;

/// One placement: which template, where, and how it is turned
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub name: String,
    pub position: Vec3,
    pub rotation: Euler,
}

impl Placement {
    pub fn new(name: impl Into<String>, position: Vec3, rotation: Euler) -> Self {
        Self {
            name: name.into(),
            position,
            rotation,
        }
    }

    /// Record that reproduces a placed instance
    pub fn of(instance: &Blueprint) -> Self {
        Self::new(
            instance.name.clone(),
            instance.pivot_position(),
            instance.pivot_rotation(),
        )
    }
}

/// Why a placement record could not be read
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("expected 7 fields, found {0}")]
    FieldCount(usize),
    #[error("empty blueprint name")]
    EmptyName,
    #[error("'{0}' is not a number")]
    InvalidNumber(String),
}

impl FromStr for Placement {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.trim().split(SEPARATOR).collect();
        if fields.len() != FIELD_COUNT {
            return Err(RecordError::FieldCount(fields.len()));
        }

        let name = fields[0].trim();
        if name.is_empty() {
            return Err(RecordError::EmptyName);
        }

        let mut values = [0.0f64; FIELD_COUNT - 1];
        for (slot, raw) in values.iter_mut().zip(&fields[1..]) {
            let raw = raw.trim();
            *slot = raw
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| RecordError::InvalidNumber(raw.to_string()))?;
        }

        Ok(Placement::new(
            name,
            Vec3::new(values[0], values[1], values[2]),
            Euler::new(values[3], values[4], values[5]),
        ))
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.position.rounded(OUTPUT_PRECISION);
        let r = self.rotation.rounded(OUTPUT_PRECISION);
        write!(
            f,
            "{name}{s}{}{s}{}{s}{}{s}{}{s}{}{s}{}",
            p.x,
            p.y,
            p.z,
            r.pitch,
            r.yaw,
            r.roll,
            name = self.name,
            s = SEPARATOR
        )
    }
}

/// Parse project contents. Blank lines are skipped; line numbers are 1-based.
pub fn parse_project(contents: &str) -> Result<Vec<Placement>, TrackError> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            line.parse::<Placement>()
                .map_err(|reason| TrackError::MalformedRecord { line: i + 1, reason })
        })
        .collect()
}

/// Serialize every placed instance, one record per line
pub fn serialize_project(track: &Track) -> String {
    track
        .instances()
        .iter()
        .map(|instance| Placement::of(instance).to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Save a track's placements to a project file
pub fn save_project<P: AsRef<Path>>(track: &Track, path: P) -> Result<(), TrackError> {
    let path = path.as_ref();
    std::fs::write(path, serialize_project(track))?;
    info!("Saved {} instances to {}", track.len(), path.display());
    Ok(())
}

/// Replace a track's instances with those recorded in a project file.
///
/// Nothing changes if any record is malformed or names an unknown template.
pub fn load_project<P: AsRef<Path>>(
    track: &mut Track,
    library: &BlueprintLibrary,
    path: P,
) -> Result<usize, TrackError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let placements = parse_project(&contents)?;
    track.replay(library, &placements)?;
    info!("Loaded {} instances from {}", placements.len(), path.display());
    Ok(placements.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::Item;
    use tempfile::TempDir;

    fn library() -> BlueprintLibrary {
        let mut lib = BlueprintLibrary::new();
        let mut block = Blueprint::new("Block");
        block.add(Item::new("Cube", 0, Vec3::ZERO, Euler::ZERO));
        lib.add(block);

        let mut pair = Blueprint::new("Pair");
        pair.add(Item::new("GateA", 0, Vec3::new(1.0, 0.0, 0.0), Euler::ZERO));
        pair.add(Item::new("GateB", 0, Vec3::new(-1.0, 0.0, 0.0), Euler::ZERO));
        lib.add(pair);
        lib
    }

    #[test]
    fn test_parse_placement() {
        let p: Placement = "Pair:1.5:0:-3:0:90:45.25".parse().unwrap();
        assert_eq!(p.name, "Pair");
        assert_eq!(p.position, Vec3::new(1.5, 0.0, -3.0));
        assert_eq!(p.rotation, Euler::new(0.0, 90.0, 45.25));
    }

    #[test]
    fn test_parse_placement_errors() {
        assert_eq!("Pair:1:2:3".parse::<Placement>(), Err(RecordError::FieldCount(4)));
        assert_eq!(":1:2:3:4:5:6".parse::<Placement>(), Err(RecordError::EmptyName));
        assert_eq!(
            "Pair:1:2:x:4:5:6".parse::<Placement>(),
            Err(RecordError::InvalidNumber("x".to_string()))
        );
        assert!(matches!("Pair:1:2:inf:4:5:6".parse::<Placement>(), Err(RecordError::InvalidNumber(_))));
    }

    #[test]
    fn test_display_rounds_to_three_places() {
        let p = Placement::new("Pair", Vec3::new(1.23456, -0.0001, 10.0), Euler::new(0.0, 89.99999, -90.0));
        assert_eq!(p.to_string(), "Pair:1.235:0:10:0:90:270");
    }

    #[test]
    fn test_parse_project_reports_line() {
        let err = parse_project("Block:0:0:0:0:0:0\n\nBlock:0:0\n").unwrap_err();
        match err {
            TrackError::MalformedRecord { line, reason } => {
                assert_eq!(line, 3);
                assert_eq!(reason, RecordError::FieldCount(3));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("project.dat");
        let lib = library();

        let mut track = Track::new();
        track.place(&lib, &Placement::new("Pair", Vec3::new(10.0, 2.0, -5.0), Euler::new(15.0, 200.0, 0.0))).unwrap();
        track.place(&lib, &Placement::new("Block", Vec3::new(0.0, 0.0, 3.0), Euler::new(0.0, 45.0, 0.0))).unwrap();
        save_project(&track, &path).unwrap();

        let mut reloaded = Track::new();
        assert_eq!(load_project(&mut reloaded, &lib, &path).unwrap(), 2);
        assert_eq!(reloaded.len(), 2);

        for (a, b) in track.instances().iter().zip(reloaded.instances()) {
            assert_eq!(a.name, b.name);
            for (ia, ib) in a.items().iter().zip(b.items()) {
                assert!(ia.position().max_abs_diff(ib.position()) < 1e-6);
                assert!(ia.rotation().max_angle_diff(&ib.rotation()) < 1e-6);
            }
        }
        assert_eq!(serialize_project(&reloaded), serialize_project(&track));
    }

    #[test]
    fn test_failed_load_leaves_track_untouched() {
        let dir = TempDir::new().unwrap();
        let lib = library();
        let mut track = Track::new();
        track.place(&lib, &Placement::new("Block", Vec3::ZERO, Euler::ZERO)).unwrap();
        let counter = track.instance_counter();

        let unknown = dir.path().join("unknown.dat");
        std::fs::write(&unknown, "Pair:0:0:0:0:0:0\nRamp:0:0:0:0:0:0").unwrap();
        let err = load_project(&mut track, &lib, &unknown).unwrap_err();
        assert!(matches!(err, TrackError::UnknownTemplate(ref n) if n == "Ramp"));

        let malformed = dir.path().join("malformed.dat");
        std::fs::write(&malformed, "Pair:0:0:0:0:0:0\nPair:a:0:0:0:0:0").unwrap();
        assert!(matches!(
            load_project(&mut track, &lib, &malformed),
            Err(TrackError::MalformedRecord { line: 2, .. })
        ));

        assert!(matches!(
            load_project(&mut track, &lib, dir.path().join("missing.dat")),
            Err(TrackError::Io(_))
        ));

        assert_eq!(track.len(), 1);
        assert_eq!(track.instances()[0].name, "Block");
        assert_eq!(track.instance_counter(), counter);
    }
}
