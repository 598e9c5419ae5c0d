//! Track XML export
//!
//! Writes the `<blueprints>` section of a Liftoff track file. The result is
//! pasted into the game's track file in place of its own section, together
//! with the `<lastTrackItemID>` that keeps later in-game ids unique.

use std::fmt;
use std::path::Path;

use tracing::info;

use crate::blueprint::{Item, ITEM_ELEMENT};
use crate::math::{Euler, Vec3};
use super::{Track, TrackError, OUTPUT_PRECISION};

/// One placed item as written to the track file
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    pub item_id: String,
    pub instance_id: u64,
    /// Rounded to [`OUTPUT_PRECISION`] decimals
    pub position: Vec3,
    /// Rounded to [`OUTPUT_PRECISION`] decimals, each in [0, 360)
    pub rotation: Euler,
}

impl ItemRecord {
    pub fn from_item(item: &Item) -> Self {
        Self {
            item_id: item.item_id.clone(),
            instance_id: item.instance_id,
            position: item.position().rounded(OUTPUT_PRECISION),
            rotation: item.rotation().rounded(OUTPUT_PRECISION),
        }
    }
}

impl fmt::Display for ItemRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "    <{} xsi:type=\"TrackBlueprintFlag\">", ITEM_ELEMENT)?;
        writeln!(f, "      <itemID>{}</itemID>", self.item_id)?;
        writeln!(f, "      <instanceID>{}</instanceID>", self.instance_id)?;
        writeln!(f, "      <position>")?;
        writeln!(f, "        <x>{}</x>", self.position.x)?;
        writeln!(f, "        <y>{}</y>", self.position.y)?;
        writeln!(f, "        <z>{}</z>", self.position.z)?;
        writeln!(f, "      </position>")?;
        writeln!(f, "      <rotation>")?;
        writeln!(f, "        <x>{}</x>", self.rotation.pitch)?;
        writeln!(f, "        <y>{}</y>", self.rotation.yaw)?;
        writeln!(f, "        <z>{}</z>", self.rotation.roll)?;
        writeln!(f, "      </rotation>")?;
        writeln!(f, "      <purpose>Functional</purpose>")?;
        write!(f, "    </{}>", ITEM_ELEMENT)
    }
}

/// Render the track's blueprint section
pub fn track_xml(track: &Track) -> String {
    let mut out = String::from("  <blueprints>");
    for record in track.item_records() {
        out.push_str(&record.to_string());
    }
    out.push_str("\n  </blueprints>");
    out.push_str(&format!(
        "\n  <lastTrackItemID>{}</lastTrackItemID>",
        track.instance_counter()
    ));
    out
}

/// Write the track's blueprint section to a file
pub fn write_track_xml<P: AsRef<Path>>(track: &Track, path: P) -> Result<(), TrackError> {
    let path = path.as_ref();
    std::fs::write(path, track_xml(track))?;
    info!("Wrote {} items to {}", track.item_records().count(), path.display());
    Ok(())
}
