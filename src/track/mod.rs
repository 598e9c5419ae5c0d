//! Track Scene
//!
//! The track being built: every placed blueprint instance plus the counter
//! that hands out Liftoff instance ids.
//!
//! ```text
//! Track
//! ├── instances: Vec<Blueprint>   (placement order)
//! └── instance_counter: u64       (last id handed out)
//! ```
//!
//! Placing an instance copies its template, gives every item a fresh id,
//! then moves and turns the copy. The track only changes once all of that
//! has succeeded.

mod export;
mod project;

pub use export::{track_xml, write_track_xml, ItemRecord};
pub use project::{
    load_project, parse_project, save_project, serialize_project, Placement, RecordError,
};

use tracing::{debug, info};

use crate::blueprint::{Blueprint, BlueprintLibrary};

/// Decimal places used for everything written out of the editor
pub const OUTPUT_PRECISION: i32 = 3;

/// Error type for track operations
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error("blueprint '{0}' does not exist")]
    UnknownTemplate(String),
    #[error("line {line}: {reason}")]
    MalformedRecord { line: usize, reason: RecordError },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Placed instances and the instance id counter
#[derive(Debug, Clone, Default)]
pub struct Track {
    instances: Vec<Blueprint>,
    instance_counter: u64,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start numbering after `counter`, e.g. the last id of an existing track
    pub fn with_instance_counter(counter: u64) -> Self {
        Self {
            instances: Vec::new(),
            instance_counter: counter,
        }
    }

    pub fn instances(&self) -> &[Blueprint] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Last instance id handed out
    pub fn instance_counter(&self) -> u64 {
        self.instance_counter
    }

    pub fn set_instance_counter(&mut self, value: u64) {
        debug!("Instance counter {} -> {}", self.instance_counter, value);
        self.instance_counter = value;
    }

    /// Place a copy of a template. Returns the index of the new instance.
    pub fn place(&mut self, library: &BlueprintLibrary, placement: &Placement) -> Result<usize, TrackError> {
        let (instance, counter) = instantiate(library, placement, self.instance_counter)?;
        debug!(
            "Placed {} ({} items) ids {}..={}",
            instance.name,
            instance.len(),
            self.instance_counter + 1,
            counter
        );
        self.instances.push(instance);
        self.instance_counter = counter;
        Ok(self.instances.len() - 1)
    }

    /// Remove an instance, keeping the order of the rest
    pub fn remove(&mut self, index: usize) -> Option<Blueprint> {
        if index >= self.instances.len() {
            return None;
        }
        let removed = self.instances.remove(index);
        debug!("Removed instance {} ({})", index, removed.name);
        Some(removed)
    }

    /// Replace every instance with the given placements, all or nothing.
    ///
    /// The counter keeps running from its current value, so reloaded items
    /// get ids above any handed out before.
    pub fn replay(&mut self, library: &BlueprintLibrary, placements: &[Placement]) -> Result<(), TrackError> {
        let mut counter = self.instance_counter;
        let mut instances = Vec::with_capacity(placements.len());
        for placement in placements {
            let (instance, next) = instantiate(library, placement, counter)?;
            instances.push(instance);
            counter = next;
        }

        info!("Replayed {} placements", instances.len());
        self.instances = instances;
        self.instance_counter = counter;
        Ok(())
    }

    /// One aligned text row per instance: name, pivot position and angles
    pub fn summary_rows(&self) -> Vec<String> {
        self.instances.iter().map(summary_row).collect()
    }

    /// Output records for every placed item, in placement order
    pub fn item_records(&self) -> impl Iterator<Item = ItemRecord> + '_ {
        self.instances
            .iter()
            .flat_map(|instance| instance.items().iter().map(ItemRecord::from_item))
    }
}

/// Header matching [`Track::summary_rows`]
pub fn summary_header() -> String {
    format!(
        "{:<20}{:<10}{:<10}{:<10}{:<10}{:<10}{:<10}",
        "", "X", "Y", "Z", "Pitch", "Yaw", "Roll"
    )
}

fn summary_row(instance: &Blueprint) -> String {
    let p = instance.pivot_position().rounded(OUTPUT_PRECISION);
    let r = instance.pivot_rotation().rounded(OUTPUT_PRECISION);
    let mut row = format!("{:<20}", instance.name);
    for value in [p.x, p.y, p.z, r.pitch, r.yaw, r.roll] {
        row.push_str(&format!("{:<10}", value));
    }
    row
}

/// Build a placed instance without touching any track state
fn instantiate(
    library: &BlueprintLibrary,
    placement: &Placement,
    counter: u64,
) -> Result<(Blueprint, u64), TrackError> {
    let template = library
        .get(&placement.name)
        .ok_or_else(|| TrackError::UnknownTemplate(placement.name.clone()))?;

    let mut instance = template.copy();
    let counter = instance.sync_instance_id(counter);
    instance.translate(placement.position);
    instance.rotate(placement.rotation);
    Ok((instance, counter))
}
